//! Parser tests.
//!
//! Trees are compared through a compact s-expression of node kinds, which
//! keeps expectations readable while pinning down the exact tree shape.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod items;

use crate::{parse, ParseOutput};
use enc_ir::{SyntaxKind, SyntaxNode};

/// Render node kinds (not tokens) as nested s-expressions.
pub(super) fn sexp(node: SyntaxNode<'_>) -> String {
    let children: Vec<String> = node.child_nodes().map(sexp).collect();
    if children.is_empty() {
        format!("{:?}", node.kind())
    } else {
        format!("({:?} {})", node.kind(), children.join(" "))
    }
}

/// Parse and assert that no errors were reported.
pub(super) fn parse_ok(source: &str) -> ParseOutput {
    let output = parse(source);
    assert!(
        !output.has_errors(),
        "unexpected errors for {source:?}: {:?}",
        output.errors
    );
    output
}

/// The first node of `kind` in pre-order.
pub(super) fn first_of(output: &ParseOutput, kind: SyntaxKind) -> SyntaxNode<'_> {
    output
        .tree
        .root()
        .descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} node"))
}

//! Shared test utilities. Only compiled in test builds.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use enc_ir::{Span, SyntaxKind, SyntaxNode, SyntaxTree};

use crate::MemberBody;

/// Parse `source`, failing the test on any syntax error.
pub(crate) fn parse(source: &str) -> SyntaxTree {
    let output = enc_parse::parse(source);
    assert!(
        !output.has_errors(),
        "unexpected errors for {source:?}: {:?}",
        output.errors
    );
    output.tree
}

/// First node of `kind` (pre-order) whose text starts with `prefix`.
pub(crate) fn find<'t>(tree: &'t SyntaxTree, kind: SyntaxKind, prefix: &str) -> SyntaxNode<'t> {
    tree.root()
        .descendants()
        .find(|n| n.kind() == kind && n.text().starts_with(prefix))
        .unwrap_or_else(|| panic!("no {kind:?} starting with {prefix:?}"))
}

/// Span of the first occurrence of `needle` in the source.
pub(crate) fn span_of(tree: &SyntaxTree, needle: &str) -> Span {
    span_of_nth(tree, needle, 0)
}

/// Span of the `n`-th (zero-based) occurrence of `needle` in the source.
pub(crate) fn span_of_nth(tree: &SyntaxTree, needle: &str, n: usize) -> Span {
    let (start, _) = tree
        .source()
        .match_indices(needle)
        .nth(n)
        .unwrap_or_else(|| panic!("{needle:?} occurs fewer than {} times", n + 1));
    Span::try_from_range(start..start + needle.len()).unwrap()
}

/// Body of the first declaration of `kind` whose text starts with `prefix`.
pub(crate) fn body<'t>(tree: &'t SyntaxTree, kind: SyntaxKind, prefix: &str) -> MemberBody<'t> {
    let node = find(tree, kind, prefix);
    MemberBody::from_declaration(node)
        .unwrap_or_else(|| panic!("{node:?} has no body"))
}

/// Text of a node.
pub(crate) fn text(node: SyntaxNode<'_>) -> &str {
    node.text()
}

//! Locating the statement at an active span.

use enc_ir::{Span, SyntaxKind, SyntaxNode};
use smallvec::SmallVec;

use crate::comparer::has_label;
use crate::part::StatementPart;
use crate::syntax;

/// An old active statement and, when the bodies line up, its counterpart.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FoundStatement<'o, 'n> {
    pub statement: SyntaxNode<'o>,
    /// Node at the same child path in the partner body. Only meaningful
    /// when the two bodies are syntactically equivalent.
    pub partner: Option<SyntaxNode<'n>>,
    pub part: StatementPart,
}

/// Find the active statement starting at `span` within `body`.
///
/// Starts from the token at the span start (the body start when the span
/// lies outside) and walks up to the nearest labeled node, lambda body or
/// `body` itself, following the same child path in `partner_body`. A
/// variable declaration resolves to its first declarator.
pub(crate) fn find_statement_in<'o, 'n>(
    body: SyntaxNode<'o>,
    span: Span,
    partner_body: Option<SyntaxNode<'n>>,
) -> FoundStatement<'o, 'n> {
    let body_span = body.span();
    let position = if body_span.contains(span.start) {
        span.start
    } else {
        body_span.start
    };

    let leaf = body
        .find_token(position)
        .map(|t| t.parent())
        .filter(|n| body.contains_node(*n))
        .unwrap_or(body);
    let mut node = leaf;
    let mut partner = partner_body.and_then(|p| follow_child_path(body, leaf, p));
    while node != body && !has_label(node) && !syntax::is_lambda_body(node) {
        let Some(parent) = node.parent() else {
            break;
        };
        node = parent;
        partner = partner.and_then(|p| p.parent());
    }

    if node.kind() == SyntaxKind::VariableDeclaration {
        if let Some(first) = syntax::declarators(node).next() {
            node = first;
            partner = partner.and_then(|p| syntax::declarators(p).next());
        }
    }

    FoundStatement {
        statement: node,
        partner,
        part: StatementPart::at(node, position),
    }
}

/// The node reached from `partner_root` by the child indices leading from
/// `root` to `node`.
fn follow_child_path<'o, 'n>(
    root: SyntaxNode<'o>,
    node: SyntaxNode<'o>,
    partner_root: SyntaxNode<'n>,
) -> Option<SyntaxNode<'n>> {
    let mut path: SmallVec<[usize; 16]> = SmallVec::new();
    let mut current = node;
    while current != root {
        path.push(current.index_in_parent()?);
        current = current.parent()?;
    }
    let mut partner = partner_root;
    for index in path.into_iter().rev() {
        partner = partner.child(index)?.into_node()?;
    }
    Some(partner)
}

//! Syntax queries shared by the body kinds: lambda shapes, declaration
//! headers and the nodes the matcher treats as opaque.

use enc_ir::{SyntaxKind, SyntaxNode, SyntaxToken, TokenKind};
use smallvec::SmallVec;

/// Lambda expressions and local functions.
pub fn is_lambda(node: SyntaxNode<'_>) -> bool {
    node.kind().is_lambda_expression() || node.kind() == SyntaxKind::LocalFunctionStatement
}

/// Members and type declarations. Body scans never descend into these
/// unless they are the scan root.
pub(crate) fn is_member_or_type(node: SyntaxNode<'_>) -> bool {
    let kind = node.kind();
    kind.is_type_declaration()
        || kind.is_accessor()
        || matches!(
            kind,
            SyntaxKind::MethodDeclaration
                | SyntaxKind::ConstructorDeclaration
                | SyntaxKind::PropertyDeclaration
                | SyntaxKind::IndexerDeclaration
                | SyntaxKind::FieldDeclaration
        )
}

/// Body of a lambda or local function: a block or an expression.
pub fn lambda_body(lambda: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    match lambda.kind() {
        kind if kind.is_lambda_expression() => lambda
            .child_nodes()
            .last()
            .filter(|b| b.kind() == SyntaxKind::Block || b.kind().is_expression()),
        SyntaxKind::LocalFunctionStatement => block_or_arrow_expression(lambda),
        _ => None,
    }
}

/// The lambda or local function whose body `node` is.
pub fn lambda_of_body(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let parent = node.parent()?;
    let lambda = if parent.kind() == SyntaxKind::ArrowExpressionClause {
        parent.parent()?
    } else {
        parent
    };
    (is_lambda(lambda) && lambda_body(lambda) == Some(node)).then_some(lambda)
}

pub fn is_lambda_body(node: SyntaxNode<'_>) -> bool {
    lambda_of_body(node).is_some()
}

/// Lambda bodies containing `node` (or equal to it), innermost first. The
/// walk stops before reaching any of `roots`.
pub fn enclosing_lambda_bodies<'t>(
    node: SyntaxNode<'t>,
    roots: &[SyntaxNode<'t>],
) -> SmallVec<[SyntaxNode<'t>; 2]> {
    node.ancestors_and_self()
        .take_while(|n| !roots.contains(n))
        .filter(|n| is_lambda_body(*n))
        .collect()
}

/// Block body, or the expression of an `=> expr` body.
pub fn block_or_arrow_expression(decl: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    decl.child_node(SyntaxKind::Block).or_else(|| {
        decl.child_node(SyntaxKind::ArrowExpressionClause)
            .and_then(|arrow| arrow.child_nodes().next())
    })
}

/// Value of an `= expr` clause.
pub fn initializer_value(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    node.child_node(SyntaxKind::EqualsValueClause)
        .and_then(|clause| clause.child_nodes().next())
        .filter(|value| !value.is_missing())
}

pub fn is_async(decl: SyntaxNode<'_>) -> bool {
    decl.has_child_token(TokenKind::Async)
}

/// `class`, `struct`, `interface` or `record` keyword of a type declaration.
pub fn type_keyword(decl: SyntaxNode<'_>) -> Option<SyntaxToken<'_>> {
    decl.child_tokens().find(|t| is_type_keyword(t.kind()))
}

/// Declared name of a type declaration.
pub fn type_name(decl: SyntaxNode<'_>) -> Option<SyntaxToken<'_>> {
    decl.child_tokens()
        .skip_while(|t| t.kind().is_modifier() || is_type_keyword(t.kind()))
        .next()
        .filter(|t| t.kind().is_contextual_identifier())
}

fn is_type_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Class | TokenKind::Struct | TokenKind::Interface | TokenKind::Record
    )
}

/// Declarators of a field, local declaration or `for` initializer.
pub fn declarators(declaration: SyntaxNode<'_>) -> impl Iterator<Item = SyntaxNode<'_>> {
    declaration
        .child_nodes()
        .filter(|n| n.kind() == SyntaxKind::VariableDeclarator)
}

/// First executable node of a body: the first statement of a block (a
/// local declaration resolves to its first declarator), or the expression
/// of an expression body. `None` for an empty block.
pub fn first_active_statement(body: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    if body.kind() != SyntaxKind::Block {
        return Some(body);
    }
    let first = body.child_nodes().next()?;
    if first.kind() == SyntaxKind::LocalDeclarationStatement {
        let first_declarator = first
            .child_node(SyntaxKind::VariableDeclaration)
            .and_then(|d| declarators(d).next());
        return Some(first_declarator.unwrap_or(first));
    }
    Some(first)
}

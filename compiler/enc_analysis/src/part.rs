//! Statement parts.

use enc_ir::{SyntaxKind, SyntaxNode, TokenKind};

/// Steppable piece of a multi-part statement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatementPart {
    /// The statement as a whole.
    #[default]
    None,
    OpenBrace,
    CloseBrace,
    ForEach,
    VariableDeclaration,
    In,
    Expression,
    /// Implicit `base()` call of a constructor without an initializer.
    DefaultBaseConstructorCall,
}

impl StatementPart {
    /// Part of `statement` at source offset `position`.
    pub fn at(statement: SyntaxNode<'_>, position: u32) -> StatementPart {
        match statement.kind() {
            SyntaxKind::Block => {
                let before_open_end = statement
                    .child_token(TokenKind::OpenBrace)
                    .is_some_and(|brace| position < brace.span().end);
                if before_open_end {
                    StatementPart::OpenBrace
                } else {
                    StatementPart::CloseBrace
                }
            }
            SyntaxKind::ForEachStatement => foreach_part(statement, position),
            _ => StatementPart::None,
        }
    }
}

fn foreach_part(foreach: SyntaxNode<'_>, position: u32) -> StatementPart {
    let before = |kind: TokenKind| {
        foreach
            .child_token(kind)
            .is_some_and(|t| position < t.span().start)
    };
    if before(TokenKind::OpenParen) {
        return StatementPart::ForEach;
    }
    if before(TokenKind::In) {
        return StatementPart::VariableDeclaration;
    }
    let expression_start = foreach
        .child_nodes()
        .find(|n| n.kind().is_expression())
        .map(|e| e.span().start);
    if expression_start.is_some_and(|start| position < start) {
        return StatementPart::In;
    }
    StatementPart::Expression
}

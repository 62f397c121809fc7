//! Expression parsing.
//!
//! Precedence climbing for binary operators; assignments and conditionals are
//! wrapped retroactively using checkpoints.

use enc_ir::{SyntaxKind, TokenKind};

use super::Parser;

/// Binding power of binary operators. Higher binds tighter.
fn binary_precedence(kind: TokenKind) -> Option<u8> {
    let prec = match kind {
        TokenKind::PipePipe => 1,
        TokenKind::AmpAmp => 2,
        TokenKind::EqualsEquals | TokenKind::BangEquals => 3,
        TokenKind::LessThan
        | TokenKind::GreaterThan
        | TokenKind::LessThanEquals
        | TokenKind::GreaterThanEquals => 4,
        TokenKind::Plus | TokenKind::Minus => 5,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 6,
        _ => return None,
    };
    Some(prec)
}

impl Parser<'_> {
    pub(super) fn expression(&mut self) {
        if let Some(kind) = self.lambda_kind() {
            self.lambda(kind);
            return;
        }
        let cp = self.checkpoint();
        self.conditional_expression();
        if self.kind().is_assignment_operator() {
            self.start_at(cp, SyntaxKind::AssignmentExpression);
            self.bump();
            self.expression();
            self.finish_node();
        }
    }

    fn conditional_expression(&mut self) {
        let cp = self.checkpoint();
        self.binary_expression(0);
        if self.at(TokenKind::Question) {
            self.start_at(cp, SyntaxKind::ConditionalExpression);
            self.bump();
            self.expression();
            self.expect(TokenKind::Colon);
            self.expression();
            self.finish_node();
        }
    }

    fn binary_expression(&mut self, min_prec: u8) {
        let cp = self.checkpoint();
        self.unary_expression();
        while let Some(prec) = binary_precedence(self.kind()) {
            if prec < min_prec {
                break;
            }
            self.start_at(cp, SyntaxKind::BinaryExpression);
            self.bump();
            self.binary_expression(prec + 1);
            self.finish_node();
        }
    }

    fn unary_expression(&mut self) {
        match self.kind() {
            TokenKind::Bang
            | TokenKind::Minus
            | TokenKind::Plus
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus => {
                self.start(SyntaxKind::PrefixUnaryExpression);
                self.bump();
                self.unary_expression();
                self.finish_node();
            }
            TokenKind::Await => {
                self.start(SyntaxKind::AwaitExpression);
                self.bump();
                self.unary_expression();
                self.finish_node();
            }
            _ => self.postfix_expression(),
        }
    }

    fn postfix_expression(&mut self) {
        let cp = self.checkpoint();
        self.primary_expression();
        loop {
            match self.kind() {
                TokenKind::OpenParen => {
                    self.start_at(cp, SyntaxKind::InvocationExpression);
                    self.argument_list();
                    self.finish_node();
                }
                TokenKind::Dot => {
                    self.start_at(cp, SyntaxKind::MemberAccessExpression);
                    self.bump();
                    self.identifier_name();
                    self.finish_node();
                }
                TokenKind::OpenBracket => {
                    self.start_at(cp, SyntaxKind::ElementAccessExpression);
                    self.bracketed_argument_list();
                    self.finish_node();
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    self.start_at(cp, SyntaxKind::PostfixUnaryExpression);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    fn primary_expression(&mut self) {
        match self.kind() {
            kind if kind.is_contextual_identifier() => self.identifier_name(),
            TokenKind::NumericLiteral
            | TokenKind::StringLiteral
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => {
                self.start(SyntaxKind::LiteralExpression);
                self.bump();
                self.finish_node();
            }
            TokenKind::This => {
                self.start(SyntaxKind::ThisExpression);
                self.bump();
                self.finish_node();
            }
            TokenKind::Base => {
                self.start(SyntaxKind::BaseExpression);
                self.bump();
                self.finish_node();
            }
            TokenKind::New => {
                self.start(SyntaxKind::ObjectCreationExpression);
                self.bump();
                self.parse_type();
                if self.at(TokenKind::OpenParen) {
                    self.argument_list();
                }
                self.finish_node();
            }
            TokenKind::OpenParen => {
                self.start(SyntaxKind::ParenthesizedExpression);
                self.bump();
                self.expression();
                self.expect(TokenKind::CloseParen);
                self.finish_node();
            }
            _ => {
                // Missing operand: keep the tree shape, report once.
                self.error_construct("expression");
                self.start(SyntaxKind::IdentifierName);
                self.builder.missing_token(TokenKind::Identifier);
                self.finish_node();
            }
        }
    }

    pub(super) fn identifier_name(&mut self) {
        self.start(SyntaxKind::IdentifierName);
        self.expect_identifier();
        self.finish_node();
    }

    pub(super) fn argument_list(&mut self) {
        self.start(SyntaxKind::ArgumentList);
        self.expect(TokenKind::OpenParen);
        self.arguments(TokenKind::CloseParen);
        self.expect(TokenKind::CloseParen);
        self.finish_node();
    }

    fn bracketed_argument_list(&mut self) {
        self.start(SyntaxKind::BracketedArgumentList);
        self.expect(TokenKind::OpenBracket);
        self.arguments(TokenKind::CloseBracket);
        self.expect(TokenKind::CloseBracket);
        self.finish_node();
    }

    fn arguments(&mut self, close: TokenKind) {
        if self.at(close) {
            return;
        }
        loop {
            self.start(SyntaxKind::Argument);
            self.expression();
            self.finish_node();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    // === Lambdas ===

    /// Detect `x => ...`, `(a, b) => ...` and their `async` forms.
    pub(super) fn lambda_kind(&self) -> Option<SyntaxKind> {
        let start = self.cursor.position();
        let pos = if self.cursor.kind_at(start) == TokenKind::Async {
            start + 1
        } else {
            start
        };
        let at = |p: usize| self.cursor.kind_at(p);
        if at(pos).is_contextual_identifier() && at(pos + 1) == TokenKind::FatArrow {
            return Some(SyntaxKind::SimpleLambdaExpression);
        }
        if at(pos) == TokenKind::OpenParen {
            let close = self.matching_paren(pos)?;
            if at(close + 1) == TokenKind::FatArrow {
                return Some(SyntaxKind::ParenthesizedLambdaExpression);
            }
        }
        None
    }

    /// Position of the `)` matching the `(` at `open`.
    fn matching_paren(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut pos = open;
        loop {
            match self.cursor.kind_at(pos) {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(pos);
                    }
                }
                TokenKind::EndOfFile | TokenKind::Semicolon | TokenKind::OpenBrace => {
                    return None
                }
                _ => {}
            }
            pos += 1;
        }
    }

    fn lambda(&mut self, kind: SyntaxKind) {
        self.start(kind);
        self.eat(TokenKind::Async);
        if kind == SyntaxKind::SimpleLambdaExpression {
            self.start(SyntaxKind::Parameter);
            self.expect_identifier();
            self.finish_node();
        } else {
            self.parameter_list(true);
        }
        self.expect(TokenKind::FatArrow);
        if self.at(TokenKind::OpenBrace) {
            self.block();
        } else {
            self.expression();
        }
        self.finish_node();
    }
}

//! Types, parameter lists and speculative type scanning.

use enc_ir::{SyntaxKind, TokenKind};

use super::Parser;

impl Parser<'_> {
    /// Scan a type starting at absolute token position `pos` without
    /// consuming anything. Returns the position just past the type.
    pub(super) fn scan_type(&self, pos: usize) -> Option<usize> {
        let at = |p: usize| self.cursor.kind_at(p);
        if !at(pos).is_contextual_identifier() {
            return None;
        }
        let mut pos = pos + 1;
        loop {
            if at(pos) == TokenKind::Dot && at(pos + 1).is_contextual_identifier() {
                pos += 2;
            } else if at(pos) == TokenKind::LessThan {
                match self.scan_type_arguments(pos) {
                    Some(end) => pos = end,
                    None => break,
                }
            } else {
                break;
            }
        }
        while at(pos) == TokenKind::OpenBracket && at(pos + 1) == TokenKind::CloseBracket {
            pos += 2;
        }
        if self.is_nullable_marker(pos) {
            pos += 1;
        }
        Some(pos)
    }

    /// Scan `<T, U>` starting at the `<`.
    fn scan_type_arguments(&self, pos: usize) -> Option<usize> {
        let mut pos = pos + 1;
        loop {
            pos = self.scan_type(pos)?;
            match self.cursor.kind_at(pos) {
                TokenKind::Comma => pos += 1,
                TokenKind::GreaterThan => return Some(pos + 1),
                _ => return None,
            }
        }
    }

    /// `?` after a type is a nullable marker only when a declared name and a
    /// declaration terminator follow (otherwise it starts a conditional).
    fn is_nullable_marker(&self, pos: usize) -> bool {
        let at = |p: usize| self.cursor.kind_at(p);
        at(pos) == TokenKind::Question
            && at(pos + 1).is_contextual_identifier()
            && matches!(
                at(pos + 2),
                TokenKind::Equals
                    | TokenKind::Semicolon
                    | TokenKind::Comma
                    | TokenKind::CloseParen
                    | TokenKind::In
                    | TokenKind::OpenBrace
                    | TokenKind::FatArrow
            )
    }

    /// Returns `true` when a type followed by a name starts at `pos`.
    pub(super) fn at_typed_name(&self, pos: usize) -> bool {
        self.scan_type(pos)
            .is_some_and(|end| self.cursor.kind_at(end).is_contextual_identifier())
    }

    pub(super) fn parse_type(&mut self) {
        self.start(SyntaxKind::Type);
        self.expect_identifier();
        loop {
            if self.at(TokenKind::Dot) && self.nth(1).is_contextual_identifier() {
                self.bump();
                self.bump();
            } else if self.at(TokenKind::LessThan)
                && self.scan_type_arguments(self.cursor.position()).is_some()
            {
                self.type_argument_list();
            } else {
                break;
            }
        }
        while self.at(TokenKind::OpenBracket) && self.nth(1) == TokenKind::CloseBracket {
            self.bump();
            self.bump();
        }
        if self.is_nullable_marker(self.cursor.position()) {
            self.bump();
        }
        self.finish_node();
    }

    fn type_argument_list(&mut self) {
        self.start(SyntaxKind::TypeArgumentList);
        self.bump();
        loop {
            self.parse_type();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::GreaterThan);
        self.finish_node();
    }

    /// `<T, U>` on a declaration.
    pub(super) fn type_parameter_list(&mut self) {
        self.start(SyntaxKind::TypeParameterList);
        self.expect(TokenKind::LessThan);
        loop {
            self.expect_identifier();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::GreaterThan);
        self.finish_node();
    }

    /// `(T a, U b = default)`. Lambdas may omit parameter types.
    pub(super) fn parameter_list(&mut self, allow_untyped: bool) {
        self.start(SyntaxKind::ParameterList);
        self.expect(TokenKind::OpenParen);
        self.parameters(TokenKind::CloseParen, allow_untyped);
        self.expect(TokenKind::CloseParen);
        self.finish_node();
    }

    /// `[int i]` on an indexer.
    pub(super) fn bracketed_parameter_list(&mut self) {
        self.start(SyntaxKind::BracketedParameterList);
        self.expect(TokenKind::OpenBracket);
        self.parameters(TokenKind::CloseBracket, false);
        self.expect(TokenKind::CloseBracket);
        self.finish_node();
    }

    fn parameters(&mut self, close: TokenKind, allow_untyped: bool) {
        if self.at(close) {
            return;
        }
        loop {
            self.parameter(close, allow_untyped);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    fn parameter(&mut self, close: TokenKind, allow_untyped: bool) {
        self.start(SyntaxKind::Parameter);
        let untyped = allow_untyped
            && self.at_identifier()
            && (self.nth(1) == TokenKind::Comma || self.nth(1) == close);
        if !untyped {
            self.parse_type();
        }
        self.expect_identifier();
        if self.at(TokenKind::Equals) {
            self.equals_value_clause();
        }
        self.finish_node();
    }

    pub(super) fn equals_value_clause(&mut self) {
        self.start(SyntaxKind::EqualsValueClause);
        self.expect(TokenKind::Equals);
        self.expression();
        self.finish_node();
    }
}

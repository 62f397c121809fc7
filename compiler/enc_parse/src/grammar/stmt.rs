//! Statement parsing.

use enc_ir::{SyntaxKind, TokenKind};

use super::Parser;
use crate::recovery::{EXPR_START, MODIFIERS};

impl Parser<'_> {
    pub(super) fn statement(&mut self) {
        match self.kind() {
            TokenKind::OpenBrace => self.block(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Do => self.do_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::Foreach => self.foreach_statement(),
            TokenKind::Return => self.keyword_statement(SyntaxKind::ReturnStatement, true),
            TokenKind::Throw => self.keyword_statement(SyntaxKind::ThrowStatement, true),
            TokenKind::Break => self.keyword_statement(SyntaxKind::BreakStatement, false),
            TokenKind::Continue => self.keyword_statement(SyntaxKind::ContinueStatement, false),
            TokenKind::Yield if self.nth(1) == TokenKind::Return => self.yield_return(),
            TokenKind::Yield if self.nth(1) == TokenKind::Break => self.yield_break(),
            TokenKind::Semicolon => {
                self.start(SyntaxKind::EmptyStatement);
                self.bump();
                self.finish_node();
            }
            _ => self.declaration_or_expression_statement(),
        }
    }

    pub(super) fn block(&mut self) {
        self.start(SyntaxKind::Block);
        self.expect(TokenKind::OpenBrace);
        while !self.at(TokenKind::CloseBrace) && !self.is_at_end() {
            let before = self.cursor.position();
            self.statement();
            if self.cursor.position() == before {
                self.error_and_bump("statement");
            }
        }
        self.expect(TokenKind::CloseBrace);
        self.finish_node();
    }

    /// Statement nested in `if`/`else`/loops. A missing statement becomes an
    /// empty statement with a missing `;`.
    fn embedded_statement(&mut self) {
        if self.at(TokenKind::CloseBrace) || self.is_at_end() {
            self.error_construct("statement");
            self.start(SyntaxKind::EmptyStatement);
            self.builder.missing_token(TokenKind::Semicolon);
            self.finish_node();
        } else {
            self.statement();
        }
    }

    fn parenthesized_condition(&mut self) {
        self.expect(TokenKind::OpenParen);
        self.expression();
        self.expect(TokenKind::CloseParen);
    }

    fn if_statement(&mut self) {
        self.start(SyntaxKind::IfStatement);
        self.bump();
        self.parenthesized_condition();
        self.embedded_statement();
        if self.at(TokenKind::Else) {
            self.start(SyntaxKind::ElseClause);
            self.bump();
            self.embedded_statement();
            self.finish_node();
        }
        self.finish_node();
    }

    fn while_statement(&mut self) {
        self.start(SyntaxKind::WhileStatement);
        self.bump();
        self.parenthesized_condition();
        self.embedded_statement();
        self.finish_node();
    }

    fn do_statement(&mut self) {
        self.start(SyntaxKind::DoStatement);
        self.bump();
        self.embedded_statement();
        self.expect(TokenKind::While);
        self.parenthesized_condition();
        self.expect(TokenKind::Semicolon);
        self.finish_node();
    }

    fn for_statement(&mut self) {
        self.start(SyntaxKind::ForStatement);
        self.bump();
        self.expect(TokenKind::OpenParen);
        if self.at_typed_name(self.cursor.position()) {
            self.variable_declaration();
        } else if !self.at(TokenKind::Semicolon) {
            self.expression_list();
        }
        self.expect(TokenKind::Semicolon);
        if !self.at(TokenKind::Semicolon) {
            self.expression();
        }
        self.expect(TokenKind::Semicolon);
        if !self.at(TokenKind::CloseParen) {
            self.expression_list();
        }
        self.expect(TokenKind::CloseParen);
        self.embedded_statement();
        self.finish_node();
    }

    fn expression_list(&mut self) {
        loop {
            self.expression();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    fn foreach_statement(&mut self) {
        self.start(SyntaxKind::ForEachStatement);
        self.bump();
        self.expect(TokenKind::OpenParen);
        self.parse_type();
        self.expect_identifier();
        self.expect(TokenKind::In);
        self.expression();
        self.expect(TokenKind::CloseParen);
        self.embedded_statement();
        self.finish_node();
    }

    /// `return [expr];`, `throw [expr];`, `break;`, `continue;`
    fn keyword_statement(&mut self, kind: SyntaxKind, allows_expression: bool) {
        self.start(kind);
        self.bump();
        if allows_expression && !self.at(TokenKind::Semicolon) && self.at_expression_start() {
            self.expression();
        }
        self.expect(TokenKind::Semicolon);
        self.finish_node();
    }

    fn yield_return(&mut self) {
        self.start(SyntaxKind::YieldReturnStatement);
        self.bump();
        self.bump();
        self.expression();
        self.expect(TokenKind::Semicolon);
        self.finish_node();
    }

    fn yield_break(&mut self) {
        self.start(SyntaxKind::YieldBreakStatement);
        self.bump();
        self.bump();
        self.expect(TokenKind::Semicolon);
        self.finish_node();
    }

    fn at_expression_start(&self) -> bool {
        self.at_set(EXPR_START) || self.lambda_kind().is_some()
    }

    fn declaration_or_expression_statement(&mut self) {
        let start = self.cursor.position();
        let mut pos = start;
        while MODIFIERS.contains(self.cursor.kind_at(pos)) {
            pos += 1;
        }
        if let Some(after_type) = self.scan_type(pos) {
            if self.cursor.kind_at(after_type).is_contextual_identifier() {
                match self.cursor.kind_at(after_type + 1) {
                    TokenKind::OpenParen | TokenKind::LessThan => self.local_function(),
                    _ => self.local_declaration(),
                }
                return;
            }
        }
        if pos > start && self.lambda_kind().is_none() {
            self.error_and_bump("declaration");
            return;
        }
        if !self.at_expression_start() {
            self.error_and_bump("statement");
            return;
        }
        self.start(SyntaxKind::ExpressionStatement);
        self.expression();
        self.expect(TokenKind::Semicolon);
        self.finish_node();
    }

    fn local_declaration(&mut self) {
        self.start(SyntaxKind::LocalDeclarationStatement);
        self.eat_modifiers();
        self.variable_declaration();
        self.expect(TokenKind::Semicolon);
        self.finish_node();
    }

    fn local_function(&mut self) {
        self.start(SyntaxKind::LocalFunctionStatement);
        self.eat_modifiers();
        self.parse_type();
        self.expect_identifier();
        if self.at(TokenKind::LessThan) {
            self.type_parameter_list();
        }
        self.parameter_list(false);
        self.function_body();
        self.finish_node();
    }

    /// `Type a = x, b;` (without the terminator).
    pub(super) fn variable_declaration(&mut self) {
        self.start(SyntaxKind::VariableDeclaration);
        self.parse_type();
        loop {
            self.start(SyntaxKind::VariableDeclarator);
            self.expect_identifier();
            if self.at(TokenKind::Equals) {
                self.equals_value_clause();
            }
            self.finish_node();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    /// Block, `=> expr;` or `;`.
    pub(super) fn function_body(&mut self) {
        match self.kind() {
            TokenKind::OpenBrace => self.block(),
            TokenKind::FatArrow => {
                self.arrow_expression_clause();
                self.expect(TokenKind::Semicolon);
            }
            _ => {
                self.expect(TokenKind::Semicolon);
            }
        }
    }

    pub(super) fn arrow_expression_clause(&mut self) {
        self.start(SyntaxKind::ArrowExpressionClause);
        self.expect(TokenKind::FatArrow);
        self.expression();
        self.finish_node();
    }
}

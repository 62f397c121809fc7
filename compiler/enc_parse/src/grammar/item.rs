//! Compilation unit, type declarations and members.

use enc_ir::{SyntaxKind, TokenKind};

use super::Parser;
use crate::recovery::MODIFIERS;

impl Parser<'_> {
    pub(crate) fn compilation_unit(&mut self) {
        self.start(SyntaxKind::CompilationUnit);
        while !self.is_at_end() {
            let before = self.cursor.position();
            if self.type_declaration_kind().is_some() {
                self.type_declaration();
            } else {
                self.start(SyntaxKind::GlobalStatement);
                self.statement();
                self.finish_node();
            }
            if self.cursor.position() == before {
                self.error_and_bump("declaration or statement");
            }
        }
        self.finish_node();
    }

    fn skip_modifiers_from(&self, mut pos: usize) -> usize {
        while MODIFIERS.contains(self.cursor.kind_at(pos)) {
            pos += 1;
        }
        pos
    }

    fn text_at(&self, pos: usize) -> &str {
        self.builder
            .source()
            .get(self.cursor.span_at(pos).to_range())
            .unwrap_or("")
    }

    /// Kind of the type declaration starting at the cursor, if any.
    fn type_declaration_kind(&self) -> Option<SyntaxKind> {
        let pos = self.skip_modifiers_from(self.cursor.position());
        let next = self.cursor.kind_at(pos + 1);
        match self.cursor.kind_at(pos) {
            TokenKind::Class => Some(SyntaxKind::ClassDeclaration),
            TokenKind::Struct => Some(SyntaxKind::StructDeclaration),
            TokenKind::Interface => Some(SyntaxKind::InterfaceDeclaration),
            TokenKind::Record if next == TokenKind::Struct => {
                Some(SyntaxKind::RecordStructDeclaration)
            }
            TokenKind::Record if next == TokenKind::Class || next.is_contextual_identifier() => {
                Some(SyntaxKind::RecordDeclaration)
            }
            _ => None,
        }
    }

    fn type_declaration(&mut self) {
        let Some(kind) = self.type_declaration_kind() else {
            self.error_and_bump("type declaration");
            return;
        };
        self.start(kind);
        self.eat_modifiers();
        if self.eat(TokenKind::Record) {
            if !self.eat(TokenKind::Struct) {
                self.eat(TokenKind::Class);
            }
        } else {
            self.bump();
        }
        let name = self.text_at(self.cursor.position()).to_owned();
        self.expect_identifier();
        if self.at(TokenKind::LessThan) {
            self.type_parameter_list();
        }
        if self.at(TokenKind::OpenParen) {
            self.parameter_list(false);
        }
        if self.at(TokenKind::Colon) {
            self.base_list();
        }
        if self.eat(TokenKind::OpenBrace) {
            while !self.at(TokenKind::CloseBrace) && !self.is_at_end() {
                let before = self.cursor.position();
                self.member(&name);
                if self.cursor.position() == before {
                    self.error_and_bump("member");
                }
            }
            self.expect(TokenKind::CloseBrace);
            self.eat(TokenKind::Semicolon);
        } else {
            self.expect(TokenKind::Semicolon);
        }
        self.finish_node();
    }

    fn base_list(&mut self) {
        self.start(SyntaxKind::BaseList);
        self.bump();
        loop {
            let cp = self.checkpoint();
            self.parse_type();
            if self.at(TokenKind::OpenParen) {
                self.start_at(cp, SyntaxKind::PrimaryConstructorBaseType);
                self.argument_list();
            } else {
                self.start_at(cp, SyntaxKind::SimpleBaseType);
            }
            self.finish_node();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    fn member(&mut self, type_name: &str) {
        if self.type_declaration_kind().is_some() {
            self.type_declaration();
            return;
        }
        let pos = self.skip_modifiers_from(self.cursor.position());
        let is_constructor = self.cursor.kind_at(pos).is_contextual_identifier()
            && self.cursor.kind_at(pos + 1) == TokenKind::OpenParen
            && self.text_at(pos) == type_name;
        if is_constructor {
            self.constructor();
            return;
        }
        let Some(after_type) = self.scan_type(pos) else {
            self.error_and_bump("member");
            return;
        };
        match (
            self.cursor.kind_at(after_type),
            self.cursor.kind_at(after_type + 1),
        ) {
            (TokenKind::This, TokenKind::OpenBracket) => self.indexer(),
            (name, next) if name.is_contextual_identifier() => match next {
                TokenKind::OpenParen | TokenKind::LessThan => self.method(),
                TokenKind::OpenBrace | TokenKind::FatArrow => self.property(),
                _ => self.field(),
            },
            _ => self.error_and_bump("member"),
        }
    }

    fn constructor(&mut self) {
        self.start(SyntaxKind::ConstructorDeclaration);
        self.eat_modifiers();
        self.expect_identifier();
        self.parameter_list(false);
        if self.at(TokenKind::Colon) {
            let kind = if self.nth(1) == TokenKind::This {
                SyntaxKind::ThisConstructorInitializer
            } else {
                SyntaxKind::BaseConstructorInitializer
            };
            self.start(kind);
            self.bump();
            if !self.eat(TokenKind::This) {
                self.expect(TokenKind::Base);
            }
            self.argument_list();
            self.finish_node();
        }
        self.function_body();
        self.finish_node();
    }

    fn method(&mut self) {
        self.start(SyntaxKind::MethodDeclaration);
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

    fn property(&mut self) {
        self.start(SyntaxKind::PropertyDeclaration);
        self.eat_modifiers();
        self.parse_type();
        self.expect_identifier();
        if self.at(TokenKind::OpenBrace) {
            self.accessor_list();
            if self.at(TokenKind::Equals) {
                self.equals_value_clause();
                self.expect(TokenKind::Semicolon);
            }
        } else {
            self.arrow_expression_clause();
            self.expect(TokenKind::Semicolon);
        }
        self.finish_node();
    }

    fn indexer(&mut self) {
        self.start(SyntaxKind::IndexerDeclaration);
        self.eat_modifiers();
        self.parse_type();
        self.expect(TokenKind::This);
        self.bracketed_parameter_list();
        if self.at(TokenKind::FatArrow) {
            self.arrow_expression_clause();
            self.expect(TokenKind::Semicolon);
        } else {
            self.accessor_list();
        }
        self.finish_node();
    }

    fn field(&mut self) {
        self.start(SyntaxKind::FieldDeclaration);
        self.eat_modifiers();
        self.variable_declaration();
        self.expect(TokenKind::Semicolon);
        self.finish_node();
    }

    fn accessor_list(&mut self) {
        self.start(SyntaxKind::AccessorList);
        self.expect(TokenKind::OpenBrace);
        while !self.at(TokenKind::CloseBrace) && !self.is_at_end() {
            let before = self.cursor.position();
            self.accessor();
            if self.cursor.position() == before {
                self.error_and_bump("accessor");
            }
        }
        self.expect(TokenKind::CloseBrace);
        self.finish_node();
    }

    fn accessor(&mut self) {
        let pos = self.skip_modifiers_from(self.cursor.position());
        let kind = match self.cursor.kind_at(pos) {
            TokenKind::Get => SyntaxKind::GetAccessorDeclaration,
            TokenKind::Set => SyntaxKind::SetAccessorDeclaration,
            TokenKind::Init => SyntaxKind::InitAccessorDeclaration,
            _ => {
                self.error_and_bump("accessor");
                return;
            }
        };
        self.start(kind);
        self.eat_modifiers();
        self.bump();
        self.function_body();
        self.finish_node();
    }
}

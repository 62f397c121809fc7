//! Grammar productions.
//!
//! The parser drives a [`SyntaxTreeBuilder`]: every production opens a node,
//! pushes the tokens it consumes and closes the node. Productions never fail;
//! a required token that is absent is inserted as a missing token.
//!
//! - `item`: compilation unit, type declarations and members
//! - `stmt`: statements
//! - `expr`: expressions and lambdas
//! - `ty`: types, parameter lists and speculative type scanning

mod expr;
mod item;
mod stmt;
mod ty;

use enc_ir::{Checkpoint, SyntaxKind, SyntaxTree, SyntaxTreeBuilder, TokenKind};
use enc_lexer::LexedToken;

use crate::cursor::Cursor;
use crate::recovery::TokenSet;
use crate::ParseError;

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    builder: SyntaxTreeBuilder,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &str, tokens: &'a [LexedToken]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            builder: SyntaxTreeBuilder::new(source),
            errors: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> (SyntaxTree, Vec<ParseError>) {
        (self.builder.finish(), self.errors)
    }

    // === Token inspection ===

    #[inline]
    fn kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn nth(&self, n: usize) -> TokenKind {
        self.cursor.nth_kind(n)
    }

    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    #[inline]
    fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.kind())
    }

    #[inline]
    fn at_identifier(&self) -> bool {
        self.kind().is_contextual_identifier()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    // === Consumption ===

    /// Push the current token into the tree and advance.
    fn bump(&mut self) {
        if self.is_at_end() {
            return;
        }
        let token = self.cursor.advance();
        self.builder.token(token.kind, token.span);
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or insert it as a missing token and report an error.
    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_expected(kind);
        self.builder.missing_token(kind);
        false
    }

    /// Consume an identifier (or contextual keyword used as one).
    fn expect_identifier(&mut self) -> bool {
        if self.at_identifier() {
            self.bump();
            true
        } else {
            self.expect(TokenKind::Identifier)
        }
    }

    fn eat_modifiers(&mut self) {
        while self.at_set(crate::recovery::MODIFIERS) {
            self.bump();
        }
    }

    // === Tree construction ===

    #[inline]
    fn start(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind);
    }

    #[inline]
    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    #[inline]
    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    #[inline]
    fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind);
    }

    // === Errors ===

    fn error_expected(&mut self, expected: TokenKind) {
        self.errors.push(ParseError::ExpectedToken {
            expected,
            found: self.kind(),
            span: self.cursor.current_span(),
        });
    }

    fn error_construct(&mut self, what: &'static str) {
        self.errors.push(ParseError::ExpectedConstruct {
            what,
            found: self.kind(),
            span: self.cursor.current_span(),
        });
    }

    /// Report an error and wrap the current token in an `Error` node,
    /// guaranteeing progress.
    fn error_and_bump(&mut self, what: &'static str) {
        self.error_construct(what);
        self.start(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }
}

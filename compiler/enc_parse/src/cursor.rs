//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead and consumption. The parser
//! owns tree construction; the cursor only tracks position.

use enc_ir::{Span, TokenKind};
use enc_lexer::LexedToken;

/// Cursor over lexed tokens.
///
/// Invariant: the last token is always [`TokenKind::EndOfFile`] and the
/// position never moves past it.
pub struct Cursor<'a> {
    tokens: &'a [LexedToken],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of the token stream.
    ///
    /// # Panics
    ///
    /// Panics if `tokens` does not end with an end-of-file token.
    pub fn new(tokens: &'a [LexedToken]) -> Self {
        assert!(
            tokens.last().map(|t| t.kind) == Some(TokenKind::EndOfFile),
            "token stream must end with EndOfFile"
        );
        Cursor { tokens, pos: 0 }
    }

    /// Current position, used for progress tracking and speculative scans.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> LexedToken {
        self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    /// Kind of the token `n` positions ahead (`0` is the current token).
    /// Saturates at end of file.
    #[inline]
    pub fn nth_kind(&self, n: usize) -> TokenKind {
        self.kind_at(self.pos + n)
    }

    /// Kind of the token at an absolute position. Saturates at end of file.
    #[inline]
    pub fn kind_at(&self, pos: usize) -> TokenKind {
        self.tokens
            .get(pos)
            .map_or(TokenKind::EndOfFile, |t| t.kind)
    }

    /// Span of the token at an absolute position. Saturates at end of file.
    #[inline]
    pub fn span_at(&self, pos: usize) -> Span {
        self.tokens
            .get(pos)
            .or(self.tokens.last())
            .map_or(Span::DUMMY, |t| t.span)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::EndOfFile
    }

    /// Move to the next token and return the one just consumed.
    pub fn advance(&mut self) -> LexedToken {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }
}

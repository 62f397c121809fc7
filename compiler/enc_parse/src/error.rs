//! Parse error types.
//!
//! Errors are collected, never thrown: the parser always produces a complete
//! tree, inserting missing tokens and `Error` nodes where input is malformed.

use enc_ir::{Span, TokenKind};
use enc_lexer::LexError;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A specific token was required.
    #[error("expected {expected}, found {found} at {span}")]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    /// A syntactic construct (expression, statement, member) was required.
    #[error("expected {what}, found {found} at {span}")]
    ExpectedConstruct {
        what: &'static str,
        found: TokenKind,
        span: Span,
    },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// Location of the error, when known.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::ExpectedToken { span, .. } | ParseError::ExpectedConstruct { span, .. } => {
                Some(*span)
            }
            ParseError::Lex(LexError::UnrecognizedInput { span, .. }) => Some(*span),
            ParseError::Lex(LexError::SourceTooLarge(_)) => None,
        }
    }
}

#[cfg(test)]
mod tests;

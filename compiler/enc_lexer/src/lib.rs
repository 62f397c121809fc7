//! Lexer for the edit-and-continue syntax subset using logos.
//!
//! Produces a flat token list (trivia dropped) terminated by an end-of-file
//! token, plus any lexical errors. Lexing never fails: unrecognized input
//! becomes [`TokenKind::Unknown`] so the parser can recover around it.

use enc_ir::{Span, SpanError, TokenKind};
use logos::Logos;

/// Raw token from logos (before conversion to [`TokenKind`]).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[token("class")]
    Class,
    #[token("struct")]
    Struct,
    #[token("record")]
    Record,
    #[token("interface")]
    Interface,

    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("internal")]
    Internal,
    #[token("static")]
    Static,
    #[token("async")]
    Async,
    #[token("readonly")]
    Readonly,
    #[token("const")]
    Const,
    #[token("override")]
    Override,
    #[token("virtual")]
    Virtual,
    #[token("abstract")]
    Abstract,
    #[token("sealed")]
    Sealed,
    #[token("partial")]
    Partial,
    #[token("extern")]
    Extern,

    #[token("get")]
    Get,
    #[token("set")]
    Set,
    #[token("init")]
    Init,

    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("foreach")]
    Foreach,
    #[token("in")]
    In,
    #[token("return")]
    Return,
    #[token("yield")]
    Yield,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("throw")]
    Throw,
    #[token("await")]
    Await,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("base")]
    Base,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=>")]
    FatArrow,

    #[token("=")]
    Equals,
    #[token("+=")]
    PlusEquals,
    #[token("-=")]
    MinusEquals,
    #[token("*=")]
    StarEquals,
    #[token("/=")]
    SlashEquals,
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    BangEquals,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("<=")]
    LessThanEquals,
    #[token(">=")]
    GreaterThanEquals,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?[a-zA-Z]?")]
    Number,

    // No unescaped newlines allowed
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,

    #[regex(r"@?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// A lexed token: kind and source span.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LexedToken {
    pub kind: TokenKind,
    pub span: Span,
}

/// Lexical error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unrecognized input {text:?} at {span}")]
    UnrecognizedInput { text: String, span: Span },

    #[error("source too large: {0}")]
    SourceTooLarge(#[from] SpanError),
}

/// Output of [`lex`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    /// Tokens in source order, always ending with [`TokenKind::EndOfFile`].
    pub tokens: Vec<LexedToken>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex source code into tokens, dropping whitespace and comments.
pub fn lex(source: &str) -> LexOutput {
    let mut output = LexOutput::default();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = match Span::try_from_range(lexer.span()) {
            Ok(span) => span,
            Err(err) => {
                output.errors.push(LexError::from(err));
                break;
            }
        };
        match result {
            Ok(RawToken::LineComment | RawToken::BlockComment) => {}
            Ok(raw) => output.tokens.push(LexedToken {
                kind: convert_token(raw),
                span,
            }),
            Err(()) => {
                output.errors.push(LexError::UnrecognizedInput {
                    text: lexer.slice().to_owned(),
                    span,
                });
                output.tokens.push(LexedToken {
                    kind: TokenKind::Unknown,
                    span,
                });
            }
        }
    }

    let end = match Span::try_from_range(source.len()..source.len()) {
        Ok(span) => span,
        Err(err) => {
            output.errors.push(LexError::from(err));
            Span::point(u32::MAX)
        }
    };
    output.tokens.push(LexedToken {
        kind: TokenKind::EndOfFile,
        span: end,
    });
    output
}

fn convert_token(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Class => TokenKind::Class,
        RawToken::Struct => TokenKind::Struct,
        RawToken::Record => TokenKind::Record,
        RawToken::Interface => TokenKind::Interface,
        RawToken::Public => TokenKind::Public,
        RawToken::Private => TokenKind::Private,
        RawToken::Protected => TokenKind::Protected,
        RawToken::Internal => TokenKind::Internal,
        RawToken::Static => TokenKind::Static,
        RawToken::Async => TokenKind::Async,
        RawToken::Readonly => TokenKind::Readonly,
        RawToken::Const => TokenKind::Const,
        RawToken::Override => TokenKind::Override,
        RawToken::Virtual => TokenKind::Virtual,
        RawToken::Abstract => TokenKind::Abstract,
        RawToken::Sealed => TokenKind::Sealed,
        RawToken::Partial => TokenKind::Partial,
        RawToken::Extern => TokenKind::Extern,
        RawToken::Get => TokenKind::Get,
        RawToken::Set => TokenKind::Set,
        RawToken::Init => TokenKind::Init,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::Do => TokenKind::Do,
        RawToken::For => TokenKind::For,
        RawToken::Foreach => TokenKind::Foreach,
        RawToken::In => TokenKind::In,
        RawToken::Return => TokenKind::Return,
        RawToken::Yield => TokenKind::Yield,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Throw => TokenKind::Throw,
        RawToken::Await => TokenKind::Await,
        RawToken::New => TokenKind::New,
        RawToken::This => TokenKind::This,
        RawToken::Base => TokenKind::Base,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::OpenBrace => TokenKind::OpenBrace,
        RawToken::CloseBrace => TokenKind::CloseBrace,
        RawToken::OpenParen => TokenKind::OpenParen,
        RawToken::CloseParen => TokenKind::CloseParen,
        RawToken::OpenBracket => TokenKind::OpenBracket,
        RawToken::CloseBracket => TokenKind::CloseBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Question => TokenKind::Question,
        RawToken::FatArrow => TokenKind::FatArrow,
        RawToken::Equals => TokenKind::Equals,
        RawToken::PlusEquals => TokenKind::PlusEquals,
        RawToken::MinusEquals => TokenKind::MinusEquals,
        RawToken::StarEquals => TokenKind::StarEquals,
        RawToken::SlashEquals => TokenKind::SlashEquals,
        RawToken::EqualsEquals => TokenKind::EqualsEquals,
        RawToken::BangEquals => TokenKind::BangEquals,
        RawToken::LessThan => TokenKind::LessThan,
        RawToken::GreaterThan => TokenKind::GreaterThan,
        RawToken::LessThanEquals => TokenKind::LessThanEquals,
        RawToken::GreaterThanEquals => TokenKind::GreaterThanEquals,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Number => TokenKind::NumericLiteral,
        RawToken::String => TokenKind::StringLiteral,
        RawToken::Ident => TokenKind::Identifier,
        // Filtered out by `lex` before conversion.
        RawToken::LineComment | RawToken::BlockComment => TokenKind::Unknown,
    }
}

#[cfg(test)]
mod tests;

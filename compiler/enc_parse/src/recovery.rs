//! Error recovery for the parser.
//!
//! Token sets the grammar consults when deciding what a token sequence
//! starts: declaration modifiers and expression starts.

use enc_ir::TokenKind;

/// A set of token kinds using a bitset for O(1) membership testing.
///
/// Each bit in the `u128` corresponds to a [`TokenKind`] discriminant index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Declaration modifiers.
pub const MODIFIERS: TokenSet = TokenSet::new()
    .with(TokenKind::Public)
    .with(TokenKind::Private)
    .with(TokenKind::Protected)
    .with(TokenKind::Internal)
    .with(TokenKind::Static)
    .with(TokenKind::Async)
    .with(TokenKind::Readonly)
    .with(TokenKind::Const)
    .with(TokenKind::Override)
    .with(TokenKind::Virtual)
    .with(TokenKind::Abstract)
    .with(TokenKind::Sealed)
    .with(TokenKind::Partial)
    .with(TokenKind::Extern);

/// Tokens that may start an expression.
pub const EXPR_START: TokenSet = TokenSet::new()
    .with(TokenKind::Identifier)
    .with(TokenKind::Get)
    .with(TokenKind::Set)
    .with(TokenKind::Init)
    .with(TokenKind::Record)
    .with(TokenKind::Partial)
    .with(TokenKind::NumericLiteral)
    .with(TokenKind::StringLiteral)
    .with(TokenKind::True)
    .with(TokenKind::False)
    .with(TokenKind::Null)
    .with(TokenKind::This)
    .with(TokenKind::Base)
    .with(TokenKind::New)
    .with(TokenKind::Await)
    .with(TokenKind::OpenParen)
    .with(TokenKind::Bang)
    .with(TokenKind::Minus)
    .with(TokenKind::Plus)
    .with(TokenKind::PlusPlus)
    .with(TokenKind::MinusMinus);

#[cfg(test)]
mod tests;

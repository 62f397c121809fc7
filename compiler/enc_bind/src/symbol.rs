//! Symbols produced by the binder.

use std::fmt;

use enc_ir::Span;

/// Index of a symbol in its [`SemanticInfo`](crate::SemanticInfo).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        SymbolId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// What kind of variable a symbol is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Local variable, including `foreach` iteration variables.
    Local,
    /// Method, constructor, lambda, accessor (`value`) or primary-constructor
    /// parameter.
    Parameter,
    /// The implicit `this` of a type declaration.
    This,
}

/// A variable that can be captured.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub id: SymbolId,
    pub kind: SymbolKind,
    pub name: String,
    /// Span of the declaring identifier (or type keyword for `this`).
    pub declaration: Span,
}

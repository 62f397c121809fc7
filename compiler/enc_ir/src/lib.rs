//! Enc IR - syntax substrate for edit-and-continue analysis
//!
//! This crate contains the data structures every later pass shares:
//! - Spans for source locations
//! - Token and node kinds
//! - The immutable, arena-backed [`SyntaxTree`] and its cursors
//! - [`SyntaxTreeBuilder`] used by the parser
//!
//! # Design
//!
//! - **Flatten Everything**: nodes and tokens are `u32` ids into flat vectors,
//!   cursors are `(tree, id)` pairs.
//! - **Immutable Trees**: a tree never changes after `finish`, so analyses over
//!   an old and a new snapshot can borrow both freely and in parallel.
//! - **Missing Tokens**: error recovery inserts zero-width tokens flagged
//!   [`TokenFlags::MISSING`] instead of failing.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod builder;
mod kind;
mod span;
mod tree;

pub use builder::{Checkpoint, SyntaxTreeBuilder};
pub use kind::{SyntaxKind, TokenKind};
pub use span::{Span, SpanError};
pub use tree::{
    Descendants, NodeId, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree, Token, TokenFlags,
    TokenId,
};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{NodeId, TokenId};
    crate::static_assert_size!(NodeId, 4);
    crate::static_assert_size!(TokenId, 4);
}

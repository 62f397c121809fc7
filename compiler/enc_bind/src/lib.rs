//! Enc Bind - semantic queries for edit-and-continue analysis.
//!
//! The analysis needs exactly one semantic capability: which variables the
//! lambdas and local functions in a region capture. This crate defines that
//! capability as the [`SemanticModel`] trait and implements it with a
//! lexical scope binder ([`SemanticInfo`]).

mod binder;
mod semantic_info;
mod symbol;

pub use semantic_info::SemanticInfo;
pub use symbol::{Symbol, SymbolId, SymbolKind};

use enc_ir::SyntaxNode;

/// Result of a data-flow query over a region of statements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataFlowAnalysis {
    /// Variables declared outside some lambda (or local function) in the
    /// region and referenced inside it. Ordered by declaration position,
    /// without duplicates.
    pub captured: Vec<Symbol>,
}

/// Semantic queries over one syntax tree.
pub trait SemanticModel {
    /// Analyze the region spanning `first` through `last` (siblings, or the
    /// same node twice).
    fn analyze_data_flow(&self, first: SyntaxNode<'_>, last: SyntaxNode<'_>) -> DataFlowAnalysis;
}

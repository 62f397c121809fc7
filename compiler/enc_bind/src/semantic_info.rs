//! Bound semantic information for one syntax tree.

use enc_ir::{NodeId, Span, SyntaxKind, SyntaxNode, SyntaxTree};
use rustc_hash::FxHashMap;

use crate::binder::Binder;
use crate::{DataFlowAnalysis, SemanticModel, Symbol, SymbolId};

/// Symbols and resolved references of a [`SyntaxTree`].
pub struct SemanticInfo<'t> {
    tree: &'t SyntaxTree,
    symbols: Vec<Symbol>,
    references: FxHashMap<NodeId, SymbolId>,
}

impl<'t> SemanticInfo<'t> {
    /// Bind every declaration and reference in `tree`.
    pub fn bind(tree: &'t SyntaxTree) -> Self {
        let binder = Binder::new(tree).bind();
        tracing::debug!(
            symbols = binder.symbols.len(),
            references = binder.references.len(),
            "bound syntax tree"
        );
        SemanticInfo {
            tree,
            symbols: binder.symbols,
            references: binder.references,
        }
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// The symbol an `IdentifierName`, `this` or `base` node refers to.
    pub fn referenced_symbol(&self, node: SyntaxNode<'_>) -> Option<&Symbol> {
        if !std::ptr::eq(node.tree(), self.tree) {
            return None;
        }
        self.references.get(&node.id()).map(|id| self.symbol(*id))
    }
}

/// Lambdas and local functions: the constructs that capture.
fn is_capturing_function(kind: SyntaxKind) -> bool {
    kind.is_lambda_expression() || kind == SyntaxKind::LocalFunctionStatement
}

impl SemanticModel for SemanticInfo<'_> {
    /// # Panics
    ///
    /// Panics if `first` or `last` belong to a different tree.
    fn analyze_data_flow(&self, first: SyntaxNode<'_>, last: SyntaxNode<'_>) -> DataFlowAnalysis {
        assert!(
            std::ptr::eq(first.tree(), self.tree) && std::ptr::eq(last.tree(), self.tree),
            "data flow requested for nodes of a different syntax tree"
        );
        let region = first.span().merge(last.span());

        let mut captured: Vec<&Symbol> = self
            .references
            .iter()
            .filter_map(|(&node_id, &symbol_id)| {
                let reference = self.tree.node(node_id);
                if !region.contains_span(reference.span()) {
                    return None;
                }
                let symbol = self.symbol(symbol_id);
                innermost_function_within(reference, region)
                    .filter(|function| !function.span().contains_span(symbol.declaration))
                    .map(|_| symbol)
            })
            .collect();

        captured.sort_by_key(|s| (s.declaration.start, s.id));
        captured.dedup_by_key(|s| s.id);

        DataFlowAnalysis {
            captured: captured.into_iter().cloned().collect(),
        }
    }
}

/// The innermost lambda or local function containing `node` that lies
/// entirely inside `region`.
fn innermost_function_within<'t>(node: SyntaxNode<'t>, region: Span) -> Option<SyntaxNode<'t>> {
    node.ancestors()
        .take_while(|a| region.contains_span(a.span()))
        .find(|a| is_capturing_function(a.kind()))
}

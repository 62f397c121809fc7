//! Scope binder.
//!
//! One pre-order walk over the tree declares variables in lexical scopes and
//! resolves every `IdentifierName`/`this`/`base` reference to its symbol.
//! Names that resolve to nothing (fields, methods, types) are left unbound.
//!
//! # Scoping Rules
//!
//! - A type declaration opens a boundary scope holding `this` and its
//!   primary-constructor parameters; lookups never cross a boundary.
//! - Methods, constructors, indexers, local functions and lambdas open a scope
//!   with their parameters; `set`/`init` accessors add an implicit `value`.
//! - Blocks, `for` and `foreach` open scopes; locals are visible from their
//!   declarator onward.

use enc_ir::{NodeId, Span, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxTree, TokenKind};
use rustc_hash::FxHashMap;

use crate::{Symbol, SymbolId, SymbolKind};

/// Name used for the implicit `this` symbol; not a valid identifier.
const THIS_NAME: &str = "this";

struct Scope {
    names: Vec<(String, SymbolId)>,
    boundary: bool,
}

pub(crate) struct Binder<'t> {
    tree: &'t SyntaxTree,
    scopes: Vec<Scope>,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) references: FxHashMap<NodeId, SymbolId>,
}

impl<'t> Binder<'t> {
    pub(crate) fn new(tree: &'t SyntaxTree) -> Self {
        Binder {
            tree,
            scopes: Vec::new(),
            symbols: Vec::new(),
            references: FxHashMap::default(),
        }
    }

    pub(crate) fn bind(mut self) -> Self {
        let root = self.tree.root();
        self.with_scope(false, |b| b.visit_children(root));
        self
    }

    fn with_scope(&mut self, boundary: bool, f: impl FnOnce(&mut Self)) {
        self.scopes.push(Scope {
            names: Vec::new(),
            boundary,
        });
        f(self);
        self.scopes.pop();
    }

    fn declare(&mut self, kind: SymbolKind, name: &str, declaration: Span) -> SymbolId {
        let id = SymbolId::new(
            u32::try_from(self.symbols.len())
                .unwrap_or_else(|_| panic!("symbol count exceeds u32::MAX")),
        );
        self.symbols.push(Symbol {
            id,
            kind,
            name: name.to_owned(),
            declaration,
        });
        if let Some(scope) = self.scopes.last_mut() {
            scope.names.push((name.to_owned(), id));
        }
        tracing::trace!(name, ?kind, ?declaration, "declared symbol");
        id
    }

    fn lookup(&self, name: &str) -> Option<SymbolId> {
        for scope in self.scopes.iter().rev() {
            if let Some((_, id)) = scope.names.iter().rev().find(|(n, _)| n == name) {
                return Some(*id);
            }
            if scope.boundary {
                break;
            }
        }
        None
    }

    fn visit_children(&mut self, node: SyntaxNode<'t>) {
        for child in node.child_nodes() {
            self.visit(child);
        }
    }

    fn visit(&mut self, node: SyntaxNode<'t>) {
        match node.kind() {
            kind if kind.is_type_declaration() => self.with_scope(true, |b| {
                let keyword_span = node
                    .child_tokens()
                    .find(|t| {
                        matches!(
                            t.kind(),
                            TokenKind::Class
                                | TokenKind::Struct
                                | TokenKind::Interface
                                | TokenKind::Record
                        )
                    })
                    .map_or(node.span(), |t| t.span());
                b.declare(SymbolKind::This, THIS_NAME, keyword_span);
                b.visit_children(node);
            }),

            SyntaxKind::MethodDeclaration
            | SyntaxKind::ConstructorDeclaration
            | SyntaxKind::IndexerDeclaration
            | SyntaxKind::LocalFunctionStatement
            | SyntaxKind::SimpleLambdaExpression
            | SyntaxKind::ParenthesizedLambdaExpression
            | SyntaxKind::Block
            | SyntaxKind::ForStatement
            | SyntaxKind::GetAccessorDeclaration => {
                self.with_scope(false, |b| b.visit_children(node));
            }

            SyntaxKind::SetAccessorDeclaration | SyntaxKind::InitAccessorDeclaration => {
                self.with_scope(false, |b| {
                    if let Some(keyword) = node.child_tokens().find(|t| {
                        matches!(t.kind(), TokenKind::Set | TokenKind::Init)
                    }) {
                        b.declare(SymbolKind::Parameter, "value", keyword.span());
                    }
                    b.visit_children(node);
                });
            }

            SyntaxKind::ForEachStatement => self.with_scope(false, |b| b.visit_foreach(node)),

            SyntaxKind::Parameter => {
                if let Some(default) = node.child_node(SyntaxKind::EqualsValueClause) {
                    self.visit(default);
                }
                if let Some(name) = declared_name(node) {
                    self.declare(SymbolKind::Parameter, name.text(), name.span());
                }
            }

            // Fields are members, not variables; only their initializers bind.
            SyntaxKind::FieldDeclaration => {
                let declarators = node
                    .child_node(SyntaxKind::VariableDeclaration)
                    .into_iter()
                    .flat_map(|d| d.child_nodes())
                    .filter(|d| d.kind() == SyntaxKind::VariableDeclarator);
                for declarator in declarators {
                    if let Some(init) = declarator.child_node(SyntaxKind::EqualsValueClause) {
                        self.visit(init);
                    }
                }
            }

            SyntaxKind::VariableDeclarator => {
                if let Some(init) = node.child_node(SyntaxKind::EqualsValueClause) {
                    self.visit(init);
                }
                if let Some(name) = declared_name(node) {
                    self.declare(SymbolKind::Local, name.text(), name.span());
                }
            }

            SyntaxKind::IdentifierName => {
                if let Some(token) = node.first_token() {
                    if let Some(id) = self.lookup(token.text()) {
                        self.references.insert(node.id(), id);
                    }
                }
            }

            SyntaxKind::ThisExpression | SyntaxKind::BaseExpression => {
                if let Some(id) = self.lookup(THIS_NAME) {
                    self.references.insert(node.id(), id);
                }
            }

            // Only the receiver of `a.b` can be a variable.
            SyntaxKind::MemberAccessExpression => {
                if let Some(receiver) = node.child_nodes().next() {
                    self.visit(receiver);
                }
            }

            SyntaxKind::Type => {}

            _ => self.visit_children(node),
        }
    }

    /// `foreach (T x in e) s`: `e` is bound before `x` is declared.
    fn visit_foreach(&mut self, node: SyntaxNode<'t>) {
        let mut name = None;
        for child in node.children() {
            match child {
                SyntaxElement::Token(token)
                    if token.kind().is_contextual_identifier() && name.is_none() =>
                {
                    name = Some(token);
                }
                SyntaxElement::Token(token) if token.kind() == TokenKind::CloseParen => {
                    if let Some(name) = name.filter(|n| !n.is_missing()) {
                        self.declare(SymbolKind::Local, name.text(), name.span());
                    }
                }
                SyntaxElement::Token(_) => {}
                SyntaxElement::Node(child) => self.visit(child),
            }
        }
    }
}

/// The identifier a parameter or declarator introduces.
fn declared_name(node: SyntaxNode<'_>) -> Option<enc_ir::SyntaxToken<'_>> {
    node.child_tokens()
        .find(|t| t.kind().is_contextual_identifier() && !t.is_missing())
}

#[cfg(test)]
mod tests;

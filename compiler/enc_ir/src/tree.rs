//! Immutable syntax tree storage and cursors.
//!
//! A [`SyntaxTree`] is a flat arena: nodes, tokens and child lists live in
//! parallel vectors indexed by [`NodeId`]/[`TokenId`]. Trees are never
//! mutated after [`SyntaxTreeBuilder::finish`](crate::SyntaxTreeBuilder::finish),
//! so cursors are plain `(tree, id)` pairs that can be copied freely and
//! shared across threads.
//!
//! # Index Spaces
//!
//! - `tokens`/`token_parents`: indexed by [`TokenId`], in source order
//! - `nodes`/`node_parents`: indexed by [`NodeId`], in post-order
//! - `elements`: flattened child lists, sliced by each node's child range

use std::fmt;
use std::hash::{Hash, Hasher};

use bitflags::bitflags;

use crate::{Span, SyntaxKind, TokenKind};

/// Index of a node in its [`SyntaxTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a new `NodeId` from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the node arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Index of a token in its [`SyntaxTree`]. Token ids follow source order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TokenId(u32);

impl TokenId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        TokenId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.0)
    }
}

bitflags! {
    /// Per-token flags.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u8 {
        /// Zero-width token synthesized by error recovery.
        const MISSING = 1 << 0;
    }
}

/// A lexical token stored in the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

/// Child slot of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Element {
    Node(NodeId),
    Token(TokenId),
}

/// Per-node storage.
#[derive(Copy, Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) span: Span,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
    pub(crate) first_token: u32,
    pub(crate) token_count: u32,
    /// Every token below this node is missing.
    pub(crate) missing: bool,
}

/// Convert a length to `u32`, panicking on overflow.
///
/// Trees larger than 4 GiB of source are not supported.
pub(crate) fn to_u32(value: usize, what: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic!("too many {what}: {value} exceeds u32::MAX"))
}

/// Immutable syntax tree for one source text snapshot.
#[derive(Clone)]
pub struct SyntaxTree {
    pub(crate) source: String,
    pub(crate) tokens: Vec<Token>,
    pub(crate) token_parents: Vec<NodeId>,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) node_parents: Vec<Option<NodeId>>,
    pub(crate) elements: Vec<Element>,
    pub(crate) root: NodeId,
}

impl SyntaxTree {
    /// The root node (a compilation unit for parsed trees).
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            tree: self,
            id: self.root,
        }
    }

    /// Full source text the tree was built from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Cursor for a node id.
    #[inline]
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        debug_assert!(id.index() < self.nodes.len(), "node id out of bounds");
        SyntaxNode { tree: self, id }
    }

    /// Cursor for a token id.
    #[inline]
    pub fn token(&self, id: TokenId) -> SyntaxToken<'_> {
        debug_assert!(id.index() < self.tokens.len(), "token id out of bounds");
        SyntaxToken { tree: self, id }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of tokens (including missing tokens).
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// All tokens in source order.
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken<'_>> + '_ {
        (0..self.tokens.len()).map(move |i| SyntaxToken {
            tree: self,
            id: TokenId::new(to_u32(i, "tokens")),
        })
    }

    /// Source text covered by a span. Out-of-range spans yield `""`.
    pub fn text_of(&self, span: Span) -> &str {
        self.source.get(span.to_range()).unwrap_or("")
    }

    #[inline]
    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    #[inline]
    fn children_of(&self, id: NodeId) -> &[Element] {
        let data = self.data(id);
        let start = data.children_start as usize;
        &self.elements[start..start + data.children_len as usize]
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("nodes", &self.nodes.len())
            .field("tokens", &self.tokens.len())
            .field("root", &self.root)
            .finish()
    }
}

/// Cursor to a node in a [`SyntaxTree`].
///
/// Identity is the pair (tree, id): nodes from different trees never compare
/// equal, even when structurally identical.
#[derive(Copy, Clone)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl Hash for SyntaxNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.span())
    }
}

impl<'t> SyntaxNode<'t> {
    /// The tree this node belongs to.
    #[inline]
    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.tree.data(self.id).kind
    }

    /// Span of the node's non-missing tokens.
    #[inline]
    pub fn span(&self) -> Span {
        self.tree.data(self.id).span
    }

    /// Returns `true` when every token below this node is missing.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.tree.data(self.id).missing
    }

    /// Source text covered by the node.
    pub fn text(&self) -> &'t str {
        self.tree.text_of(self.span())
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.tree.node_parents[self.id.index()].map(|id| SyntaxNode {
            tree: self.tree,
            id,
        })
    }

    /// Strict ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> {
        std::iter::successors(self.parent(), SyntaxNode::parent)
    }

    /// This node followed by its ancestors.
    pub fn ancestors_and_self(&self) -> impl Iterator<Item = SyntaxNode<'t>> {
        std::iter::successors(Some(*self), SyntaxNode::parent)
    }

    /// Returns `true` if `other` is this node or one of its descendants.
    pub fn contains_node(&self, other: SyntaxNode<'_>) -> bool {
        if !std::ptr::eq(self.tree, other.tree) {
            return false;
        }
        let mut current = Some(other.id);
        while let Some(id) = current {
            if id == self.id {
                return true;
            }
            current = self.tree.node_parents[id.index()];
        }
        false
    }

    pub fn child_count(&self) -> usize {
        self.tree.children_of(self.id).len()
    }

    /// Child element at `index` (nodes and tokens interleaved in order).
    pub fn child(&self, index: usize) -> Option<SyntaxElement<'t>> {
        let tree = self.tree;
        tree.children_of(self.id)
            .get(index)
            .map(|element| SyntaxElement::from_element(tree, *element))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = SyntaxElement<'t>> + 't {
        let tree = self.tree;
        tree.children_of(self.id)
            .iter()
            .map(move |element| SyntaxElement::from_element(tree, *element))
    }

    pub fn child_nodes(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + 't {
        self.children().filter_map(SyntaxElement::into_node)
    }

    pub fn child_tokens(&self) -> impl DoubleEndedIterator<Item = SyntaxToken<'t>> + 't {
        self.children().filter_map(SyntaxElement::into_token)
    }

    /// First child node of the given kind.
    pub fn child_node(&self, kind: SyntaxKind) -> Option<SyntaxNode<'t>> {
        self.child_nodes().find(|n| n.kind() == kind)
    }

    /// First child node matching a predicate.
    pub fn child_node_where(
        &self,
        mut pred: impl FnMut(SyntaxNode<'t>) -> bool,
    ) -> Option<SyntaxNode<'t>> {
        self.child_nodes().find(|n| pred(*n))
    }

    /// First child token of the given kind (missing tokens included).
    pub fn child_token(&self, kind: TokenKind) -> Option<SyntaxToken<'t>> {
        self.child_tokens().find(|t| t.kind() == kind)
    }

    /// Returns `true` if a non-missing child token of the kind exists.
    pub fn has_child_token(&self, kind: TokenKind) -> bool {
        self.child_tokens()
            .any(|t| t.kind() == kind && !t.is_missing())
    }

    /// Position of this node among its parent's children.
    pub fn index_in_parent(&self) -> Option<usize> {
        let parent = self.tree.node_parents[self.id.index()]?;
        self.tree
            .children_of(parent)
            .iter()
            .position(|e| *e == Element::Node(self.id))
    }

    /// Pre-order traversal starting at (and including) this node.
    pub fn descendants(&self) -> Descendants<'t, fn(SyntaxNode<'t>) -> bool> {
        let descend_all: fn(SyntaxNode<'t>) -> bool = |_| true;
        Descendants::new(*self, descend_all)
    }

    /// Pre-order traversal that only enters a node's children when
    /// `descend_into` returns `true`. The starting node is always entered.
    pub fn descendants_pruned<F>(&self, descend_into: F) -> Descendants<'t, F>
    where
        F: FnMut(SyntaxNode<'t>) -> bool,
    {
        Descendants::new(*self, descend_into)
    }

    /// All tokens below this node in source order (missing tokens included).
    pub fn descendant_tokens(&self) -> impl DoubleEndedIterator<Item = SyntaxToken<'t>> + 't {
        let tree = self.tree;
        let data = tree.data(self.id);
        (data.first_token..data.first_token + data.token_count).map(move |raw| SyntaxToken {
            tree,
            id: TokenId::new(raw),
        })
    }

    /// Non-missing tokens below this node whose span lies inside `span`.
    pub fn tokens_within(&self, span: Span) -> impl Iterator<Item = SyntaxToken<'t>> + 't {
        self.descendant_tokens()
            .filter(move |t| !t.is_missing() && span.contains_span(t.span()))
    }

    pub fn first_token(&self) -> Option<SyntaxToken<'t>> {
        self.descendant_tokens().find(|t| !t.is_missing())
    }

    pub fn last_token(&self) -> Option<SyntaxToken<'t>> {
        self.descendant_tokens().rev().find(|t| !t.is_missing())
    }

    /// Token at `position`.
    ///
    /// A position between tokens resolves to the following token (leading
    /// whitespace belongs to the next token). Positions past the end resolve
    /// to the last token.
    pub fn find_token(&self, position: u32) -> Option<SyntaxToken<'t>> {
        self.descendant_tokens()
            .filter(|t| !t.is_missing())
            .find(|t| t.span().end > position)
            .or_else(|| self.last_token())
    }

    /// Structural equivalence: same node kinds, same token kinds and texts.
    pub fn is_equivalent_to(&self, other: SyntaxNode<'_>) -> bool {
        if self.kind() != other.kind() || self.child_count() != other.child_count() {
            return false;
        }
        self.children()
            .zip(other.children())
            .all(|pair| match pair {
                (SyntaxElement::Node(a), SyntaxElement::Node(b)) => a.is_equivalent_to(b),
                (SyntaxElement::Token(a), SyntaxElement::Token(b)) => a.is_equivalent_to(b),
                _ => false,
            })
    }
}

/// Pre-order node iterator with optional pruning.
pub struct Descendants<'t, F> {
    root: SyntaxNode<'t>,
    stack: Vec<NodeId>,
    descend_into: F,
}

impl<'t, F> Descendants<'t, F>
where
    F: FnMut(SyntaxNode<'t>) -> bool,
{
    fn new(root: SyntaxNode<'t>, descend_into: F) -> Self {
        Descendants {
            root,
            stack: vec![root.id],
            descend_into,
        }
    }
}

impl<'t, F> Iterator for Descendants<'t, F>
where
    F: FnMut(SyntaxNode<'t>) -> bool,
{
    type Item = SyntaxNode<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.root.tree;
        let node = SyntaxNode { tree, id };
        if id == self.root.id || (self.descend_into)(node) {
            for element in tree.children_of(id).iter().rev() {
                if let Element::Node(child) = element {
                    self.stack.push(*child);
                }
            }
        }
        Some(node)
    }
}

/// Cursor to a token in a [`SyntaxTree`].
#[derive(Copy, Clone)]
pub struct SyntaxToken<'t> {
    tree: &'t SyntaxTree,
    id: TokenId,
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxToken<'_> {}

impl Hash for SyntaxToken<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, "{:?}(missing)@{:?}", self.kind(), self.span())
        } else {
            write!(f, "{:?}({:?})@{:?}", self.kind(), self.text(), self.span())
        }
    }
}

impl<'t> SyntaxToken<'t> {
    #[inline]
    fn data(&self) -> &'t Token {
        &self.tree.tokens[self.id.index()]
    }

    #[inline]
    pub fn id(&self) -> TokenId {
        self.id
    }

    #[inline]
    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.data().kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.data().span
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.data().flags.contains(TokenFlags::MISSING)
    }

    /// Source text of the token; empty for missing tokens.
    pub fn text(&self) -> &'t str {
        if self.is_missing() {
            ""
        } else {
            self.tree.text_of(self.span())
        }
    }

    /// The node that owns this token.
    pub fn parent(&self) -> SyntaxNode<'t> {
        SyntaxNode {
            tree: self.tree,
            id: self.tree.token_parents[self.id.index()],
        }
    }

    /// Same kind, same text and same missing-ness.
    pub fn is_equivalent_to(&self, other: SyntaxToken<'_>) -> bool {
        self.kind() == other.kind()
            && self.is_missing() == other.is_missing()
            && self.text() == other.text()
    }
}

/// A child slot: either a node or a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxElement<'t> {
    Node(SyntaxNode<'t>),
    Token(SyntaxToken<'t>),
}

impl<'t> SyntaxElement<'t> {
    fn from_element(tree: &'t SyntaxTree, element: Element) -> Self {
        match element {
            Element::Node(id) => SyntaxElement::Node(SyntaxNode { tree, id }),
            Element::Token(id) => SyntaxElement::Token(SyntaxToken { tree, id }),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span(),
            SyntaxElement::Token(token) => token.span(),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            SyntaxElement::Node(node) => node.is_missing(),
            SyntaxElement::Token(token) => token.is_missing(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode<'t>> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken<'t>> {
        match self {
            SyntaxElement::Node(_) => None,
            SyntaxElement::Token(token) => Some(token),
        }
    }
}

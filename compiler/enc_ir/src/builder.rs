//! Bottom-up construction of [`SyntaxTree`]s.
//!
//! The parser pushes tokens and opens/closes nodes in source order. Nodes are
//! stored in post-order as they close. Checkpoints allow the parser to wrap
//! already-built children in a new node retroactively (binary expressions,
//! assignments, invocations).

use crate::tree::{to_u32, Element, NodeData, Token, TokenFlags};
use crate::{NodeId, Span, SyntaxKind, SyntaxTree, TokenId, TokenKind};

/// Position in the pending-children stack, used with
/// [`SyntaxTreeBuilder::start_node_at`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Incremental syntax tree builder.
pub struct SyntaxTreeBuilder {
    source: String,
    tokens: Vec<Token>,
    token_parents: Vec<NodeId>,
    nodes: Vec<NodeData>,
    node_parents: Vec<Option<NodeId>>,
    elements: Vec<Element>,
    /// Children produced but not yet attached to a node.
    pending: Vec<Element>,
    /// Open nodes: kind and the index into `pending` where their children start.
    open: Vec<(SyntaxKind, usize)>,
    /// End offset of the last real token, where missing tokens are placed.
    last_end: u32,
}

impl SyntaxTreeBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        SyntaxTreeBuilder {
            source: source.into(),
            tokens: Vec::new(),
            token_parents: Vec::new(),
            nodes: Vec::new(),
            node_parents: Vec::new(),
            elements: Vec::new(),
            pending: Vec::new(),
            open: Vec::new(),
            last_end: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pending.len())
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.open.push((kind, self.pending.len()));
    }

    /// Open a node whose children start at `checkpoint`.
    ///
    /// # Panics
    ///
    /// Panics if the checkpoint lies before the start of the innermost open
    /// node (the checkpoint must have been taken inside the current node).
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        let Checkpoint(at) = checkpoint;
        assert!(at <= self.pending.len(), "checkpoint is past the pending children");
        if let Some(&(_, start)) = self.open.last() {
            assert!(at >= start, "checkpoint precedes the innermost open node");
        }
        self.open.push((kind, at));
    }

    /// Push a real token.
    pub fn token(&mut self, kind: TokenKind, span: Span) -> TokenId {
        self.last_end = span.end;
        self.push_token(Token {
            kind,
            span,
            flags: TokenFlags::empty(),
        })
    }

    /// Push a zero-width token synthesized by error recovery.
    pub fn missing_token(&mut self, kind: TokenKind) -> TokenId {
        self.push_token(Token {
            kind,
            span: Span::point(self.last_end),
            flags: TokenFlags::MISSING,
        })
    }

    fn push_token(&mut self, token: Token) -> TokenId {
        let id = TokenId::new(to_u32(self.tokens.len(), "tokens"));
        self.tokens.push(token);
        // Patched when the owning node closes.
        self.token_parents.push(NodeId::new(u32::MAX));
        self.pending.push(Element::Token(id));
        id
    }

    /// Close the innermost open node.
    ///
    /// # Panics
    ///
    /// Panics if no node is open.
    pub fn finish_node(&mut self) -> NodeId {
        let Some((kind, start)) = self.open.pop() else {
            panic!("finish_node called without a matching start_node");
        };
        let children: Vec<Element> = self.pending.drain(start..).collect();
        let id = self.close(kind, children);
        self.pending.push(Element::Node(id));
        id
    }

    fn close(&mut self, kind: SyntaxKind, children: Vec<Element>) -> NodeId {
        let id = NodeId::new(to_u32(self.nodes.len(), "nodes"));

        let mut span: Option<Span> = None;
        let mut first_missing: Option<Span> = None;
        let mut first_token: Option<u32> = None;
        let mut token_count = 0u32;

        for child in &children {
            let (child_span, missing, child_first, child_count) = match *child {
                Element::Token(tok) => {
                    let token = &self.tokens[tok.index()];
                    self.token_parents[tok.index()] = id;
                    (
                        token.span,
                        token.flags.contains(TokenFlags::MISSING),
                        tok.raw(),
                        1,
                    )
                }
                Element::Node(node) => {
                    let data = &self.nodes[node.index()];
                    self.node_parents[node.index()] = Some(id);
                    (data.span, data.missing, data.first_token, data.token_count)
                }
            };
            if child_count > 0 && first_token.is_none() {
                first_token = Some(child_first);
            }
            token_count += child_count;
            if missing {
                first_missing.get_or_insert(child_span);
            } else {
                span = Some(span.map_or(child_span, |s| s.merge(child_span)));
            }
        }

        let missing = span.is_none();
        let span = span
            .or_else(|| first_missing.map(|s| Span::point(s.start)))
            .unwrap_or(Span::point(self.last_end));

        let children_start = to_u32(self.elements.len(), "elements");
        self.elements.extend_from_slice(&children);
        self.nodes.push(NodeData {
            kind,
            span,
            children_start,
            children_len: to_u32(children.len(), "children"),
            first_token: first_token.unwrap_or_else(|| to_u32(self.tokens.len(), "tokens")),
            token_count,
            missing,
        });
        self.node_parents.push(None);

        tracing::trace!(?kind, ?span, id = id.raw(), "closed syntax node");
        id
    }

    /// Close any open nodes and produce the tree.
    ///
    /// The root is a [`SyntaxKind::CompilationUnit`]; if the builder produced
    /// something else (or several top-level elements), they are wrapped in one.
    pub fn finish(mut self) -> SyntaxTree {
        while !self.open.is_empty() {
            self.finish_node();
        }
        let root = match self.pending.as_slice() {
            [Element::Node(id)] if self.nodes[id.index()].kind == SyntaxKind::CompilationUnit => {
                *id
            }
            _ => {
                let children = std::mem::take(&mut self.pending);
                self.close(SyntaxKind::CompilationUnit, children)
            }
        };
        SyntaxTree {
            source: self.source,
            tokens: self.tokens,
            token_parents: self.token_parents,
            nodes: self.nodes,
            node_parents: self.node_parents,
            elements: self.elements,
            root,
        }
    }
}

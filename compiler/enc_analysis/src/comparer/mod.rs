//! Statement comparer.
//!
//! Aligns the statements of an old and a new body.
//!
//! # Algorithm
//!
//! Candidates are the labeled descendants of each root in document order.
//! Nested lambdas and local functions are leaves: they are matched as a whole
//! and their bodies are compared separately. Matching proceeds
//!
//! 1. roots with each other,
//! 2. known matches, verbatim, skipping any that conflict,
//! 3. for each [`Label`] outer to inner and each threshold in ascending
//!    order: every unmatched old node takes the closest unmatched new node
//!    with the same label, first in document order on ties, when the
//!    distance does not exceed the threshold.
//!
//! The distance of two nodes mixes the LCS distance of their token
//! sequences (header and body weighted apart for compound statements) with
//! whether their nearest labeled ancestors are matched to each other.

mod label;
mod lcs;

pub use label::{has_label, Label};
pub(crate) use lcs::lcs_distance;
pub use lcs::{sequence_edits, SequenceEdit};

use enc_ir::{SyntaxNode, TokenKind};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::syntax;
use crate::MatchOptions;

/// Partial injective map between the nodes of an old and a new tree.
#[derive(Clone, Debug)]
pub struct Match<'o, 'n> {
    old_root: SyntaxNode<'o>,
    new_root: SyntaxNode<'n>,
    old_to_new: FxHashMap<SyntaxNode<'o>, SyntaxNode<'n>>,
    new_to_old: FxHashMap<SyntaxNode<'n>, SyntaxNode<'o>>,
}

impl<'o, 'n> Match<'o, 'n> {
    fn new(old_root: SyntaxNode<'o>, new_root: SyntaxNode<'n>) -> Self {
        let mut m = Match {
            old_root,
            new_root,
            old_to_new: FxHashMap::default(),
            new_to_old: FxHashMap::default(),
        };
        m.try_add(old_root, new_root);
        m
    }

    /// Record a pair unless either side is taken.
    fn try_add(&mut self, old: SyntaxNode<'o>, new: SyntaxNode<'n>) -> bool {
        if self.old_to_new.contains_key(&old) || self.new_to_old.contains_key(&new) {
            return false;
        }
        self.old_to_new.insert(old, new);
        self.new_to_old.insert(new, old);
        true
    }

    pub fn old_root(&self) -> SyntaxNode<'o> {
        self.old_root
    }

    pub fn new_root(&self) -> SyntaxNode<'n> {
        self.new_root
    }

    /// Partner of an old node.
    pub fn new_node(&self, old: SyntaxNode<'o>) -> Option<SyntaxNode<'n>> {
        self.old_to_new.get(&old).copied()
    }

    /// Partner of a new node.
    pub fn old_node(&self, new: SyntaxNode<'n>) -> Option<SyntaxNode<'o>> {
        self.new_to_old.get(&new).copied()
    }

    pub fn len(&self) -> usize {
        self.old_to_new.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old_to_new.is_empty()
    }

    /// All pairs, in document order of the old nodes.
    pub fn pairs(&self) -> Vec<(SyntaxNode<'o>, SyntaxNode<'n>)> {
        let mut pairs: Vec<_> = self.old_to_new.iter().map(|(o, n)| (*o, *n)).collect();
        pairs.sort_by_key(|(old, _)| {
            (
                old.span().start,
                std::cmp::Reverse(old.span().end),
                old.id(),
            )
        });
        pairs
    }
}

type TokenKey<'t> = (TokenKind, &'t str);

/// A labeled node with the data the distance function needs.
struct Candidate<'t> {
    node: SyntaxNode<'t>,
    /// Nearest labeled ancestor, or the root.
    parent: SyntaxNode<'t>,
    tokens: Vec<TokenKey<'t>>,
    /// Header and body tokens of compound statements.
    split: Option<(Vec<TokenKey<'t>>, Vec<TokenKey<'t>>)>,
}

/// Candidates of one side, bucketed by label.
struct Side<'t> {
    by_label: Vec<Vec<Candidate<'t>>>,
    count: usize,
}

impl<'t> Side<'t> {
    fn collect(root: SyntaxNode<'t>) -> Self {
        let mut by_label: Vec<Vec<Candidate<'t>>> =
            std::iter::repeat_with(Vec::new).take(Label::COUNT).collect();
        let mut count = 0;
        let nodes = root
            .descendants_pruned(|n| !syntax::is_lambda(n) && !syntax::is_member_or_type(n))
            .skip(1);
        for node in nodes {
            let Some(label) = Label::classify(node) else {
                continue;
            };
            let parent = node
                .ancestors()
                .find(|a| *a == root || has_label(*a))
                .unwrap_or(root);
            let tokens = token_keys(node.descendant_tokens());
            let split = label.is_compound().then(|| split_tokens(node));
            by_label[label.index()].push(Candidate {
                node,
                parent,
                tokens,
                split,
            });
            count += 1;
        }
        Side { by_label, count }
    }
}

fn token_keys<'t>(tokens: impl Iterator<Item = enc_ir::SyntaxToken<'t>>) -> Vec<TokenKey<'t>> {
    tokens
        .filter(|t| !t.is_missing())
        .map(|t| (t.kind(), t.text()))
        .collect()
}

/// Header/body token split of a compound statement.
fn split_tokens<'t>(node: SyntaxNode<'t>) -> (Vec<TokenKey<'t>>, Vec<TokenKey<'t>>) {
    let bodies: SmallVec<[SyntaxNode<'t>; 2]> = if syntax::is_lambda(node) {
        syntax::lambda_body(node).into_iter().collect()
    } else {
        node.child_nodes()
            .filter(|c| c.kind().is_statement() || c.kind() == enc_ir::SyntaxKind::ElseClause)
            .collect()
    };
    let (body, header): (Vec<_>, Vec<_>) = node
        .descendant_tokens()
        .filter(|t| !t.is_missing())
        .partition(|t| bodies.iter().any(|b| b.span().contains_span(t.span())));
    (token_keys(header.into_iter()), token_keys(body.into_iter()))
}

/// Computes statement matches between two bodies.
#[derive(Clone, Debug, Default)]
pub struct StatementComparer {
    options: MatchOptions,
}

impl StatementComparer {
    pub fn new(options: MatchOptions) -> Self {
        StatementComparer { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Match the subtrees at `old_root` and `new_root`.
    ///
    /// Known matches outside either subtree are ignored.
    pub fn compute_match<'o, 'n>(
        &self,
        old_root: SyntaxNode<'o>,
        new_root: SyntaxNode<'n>,
        known_matches: &[(SyntaxNode<'o>, SyntaxNode<'n>)],
    ) -> Match<'o, 'n> {
        let mut m = Match::new(old_root, new_root);
        for &(old, new) in known_matches {
            if !old_root.contains_node(old) || !new_root.contains_node(new) {
                tracing::trace!(?old, ?new, "known match outside the match roots");
                continue;
            }
            if !m.try_add(old, new) {
                tracing::trace!(?old, ?new, "conflicting known match skipped");
            }
        }

        let old_side = Side::collect(old_root);
        let new_side = Side::collect(new_root);
        for label in Label::ALL {
            let olds = &old_side.by_label[label.index()];
            let news = &new_side.by_label[label.index()];
            if olds.is_empty() || news.is_empty() {
                continue;
            }
            for &threshold in &self.options.thresholds {
                self.match_label(label, olds, news, threshold, &mut m);
            }
        }

        tracing::debug!(
            old_root = ?old_root,
            old_candidates = old_side.count,
            new_candidates = new_side.count,
            matched = m.len(),
            "computed statement match"
        );
        m
    }

    fn match_label<'o, 'n>(
        &self,
        label: Label,
        olds: &[Candidate<'o>],
        news: &[Candidate<'n>],
        threshold: f64,
        m: &mut Match<'o, 'n>,
    ) {
        let tied = label.is_tied_to_parent();
        for old in olds {
            if m.new_node(old.node).is_some() {
                continue;
            }
            let parent_partner = m.new_node(old.parent);
            if tied && parent_partner.is_none() {
                continue;
            }
            let mut best: Option<(SyntaxNode<'n>, f64)> = None;
            for new in news {
                if m.old_node(new.node).is_some() {
                    continue;
                }
                if tied && parent_partner != Some(new.parent) {
                    continue;
                }
                let distance = self.distance(old, new, parent_partner);
                if best.is_none_or(|(_, d)| distance < d) {
                    best = Some((new.node, distance));
                    if distance <= 0.0 {
                        break;
                    }
                }
            }
            if let Some((new, distance)) = best {
                if distance <= threshold {
                    m.try_add(old.node, new);
                }
            }
        }
    }

    fn distance<'n>(
        &self,
        old: &Candidate<'_>,
        new: &Candidate<'n>,
        parent_partner: Option<SyntaxNode<'n>>,
    ) -> f64 {
        let own = if old.node.is_equivalent_to(new.node) {
            0.0
        } else {
            match (&old.split, &new.split) {
                (Some((old_header, old_body)), Some((new_header, new_body))) => {
                    let weight = self.options.header_weight;
                    weight * lcs_distance(old_header, new_header)
                        + (1.0 - weight) * lcs_distance(old_body, new_body)
                }
                _ => lcs_distance(&old.tokens, &new.tokens),
            }
        };
        let ancestor = if parent_partner == Some(new.parent) {
            0.0
        } else {
            1.0
        };
        let weight = self.options.ancestor_weight;
        (1.0 - weight) * own + weight * ancestor
    }
}

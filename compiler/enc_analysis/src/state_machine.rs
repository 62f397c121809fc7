//! State-machine classification.
//!
//! A body compiles to a state machine when it is `async` or contains
//! `yield`. Suspension points (`await`, `yield return`, `yield break`) are
//! collected from the body itself; nested lambdas and local functions have
//! their own state machines and do not contribute.

use bitflags::bitflags;
use enc_ir::{Span, SyntaxKind, SyntaxNode};
use smallvec::SmallVec;

use crate::comparer::{sequence_edits, SequenceEdit};
use crate::syntax;

bitflags! {
    /// Kinds of state machine a body compiles to.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StateMachineKinds: u8 {
        const ASYNC = 1 << 0;
        const ITERATOR = 1 << 1;
    }
}

/// State-machine facts about one body.
#[derive(Clone, Debug, Default)]
pub struct StateMachineInfo<'t> {
    pub kinds: StateMachineKinds,
    /// `await` expressions and `yield` statements in document order.
    pub suspension_points: SmallVec<[SyntaxNode<'t>; 4]>,
}

impl<'t> StateMachineInfo<'t> {
    /// Scan `roots` for suspension points. `is_async` comes from the
    /// declaration's modifiers; any `yield` makes the body an iterator.
    pub fn scan(roots: &[SyntaxNode<'t>], is_async: bool) -> Self {
        let suspension_points: SmallVec<[SyntaxNode<'t>; 4]> = roots
            .iter()
            .flat_map(|root| {
                root.descendants_pruned(|n| {
                    !syntax::is_lambda(n) && !syntax::is_member_or_type(n)
                })
            })
            .filter(|n| is_suspension_point(*n))
            .collect();
        let mut kinds = StateMachineKinds::empty();
        kinds.set(StateMachineKinds::ASYNC, is_async);
        kinds.set(
            StateMachineKinds::ITERATOR,
            suspension_points.iter().any(|n| is_yield(*n)),
        );
        StateMachineInfo {
            kinds,
            suspension_points,
        }
    }

    pub fn is_async(&self) -> bool {
        self.kinds.contains(StateMachineKinds::ASYNC)
    }

    pub fn is_iterator(&self) -> bool {
        self.kinds.contains(StateMachineKinds::ITERATOR)
    }

    pub fn is_state_machine(&self) -> bool {
        !self.kinds.is_empty()
    }

    pub fn has_suspension_points(&self) -> bool {
        !self.suspension_points.is_empty()
    }
}

pub fn is_suspension_point(node: SyntaxNode<'_>) -> bool {
    node.kind() == SyntaxKind::AwaitExpression || is_yield(node)
}

fn is_yield(node: SyntaxNode<'_>) -> bool {
    matches!(
        node.kind(),
        SyntaxKind::YieldReturnStatement | SyntaxKind::YieldBreakStatement
    )
}

/// State-machine problem found while matching two bodies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateMachineEdit {
    /// An old `await`/`yield` has no counterpart.
    SuspensionPointDeleted { old: Span },
    /// A new `await`/`yield` has no counterpart.
    SuspensionPointInserted {
        new: Span,
        /// The old body had no suspension points but has active statements.
        around_active_statement: bool,
    },
    /// A plain body became `async` or an iterator while it has active
    /// statements.
    UpdatingToStateMachineAroundActiveStatement { new: Span },
}

/// Known matches and edits derived from the suspension points of a body
/// pair.
#[derive(Clone, Debug, Default)]
pub struct SuspensionPointMatch<'o, 'n> {
    pub known_matches: Vec<(SyntaxNode<'o>, SyntaxNode<'n>)>,
    pub edits: Vec<StateMachineEdit>,
}

/// Pair up the suspension points of an old and a new body.
///
/// Equal counts pair by position. Otherwise the longest common subsequence
/// of structurally equivalent points pairs them and the rest are reported as
/// inserted or deleted. When the old body has no suspension points the new
/// ones only matter if the body has active statements; an `async` or
/// iterator conversion around them is reported once.
pub fn match_suspension_points<'o, 'n>(
    old: &StateMachineInfo<'o>,
    new: &StateMachineInfo<'n>,
    new_body_span: Span,
    has_active_statements: bool,
) -> SuspensionPointMatch<'o, 'n> {
    let mut result = SuspensionPointMatch::default();
    let creating_around_active = !old.has_suspension_points()
        && new.has_suspension_points()
        && has_active_statements;

    if old.has_suspension_points() || creating_around_active {
        let olds = &old.suspension_points;
        let news = &new.suspension_points;
        if olds.len() == news.len() {
            result
                .known_matches
                .extend(olds.iter().copied().zip(news.iter().copied()));
        } else {
            for edit in sequence_edits(olds, news, |a, b| a.is_equivalent_to(*b)) {
                match edit {
                    SequenceEdit::Update { old, new } => {
                        result.known_matches.push((olds[old], news[new]));
                    }
                    SequenceEdit::Delete { old } => {
                        result.edits.push(StateMachineEdit::SuspensionPointDeleted {
                            old: olds[old].span(),
                        });
                    }
                    SequenceEdit::Insert { new } => {
                        result.edits.push(StateMachineEdit::SuspensionPointInserted {
                            new: news[new].span(),
                            around_active_statement: creating_around_active,
                        });
                    }
                }
            }
        }
    } else if has_active_statements && !old.is_state_machine() && new.is_state_machine() {
        tracing::debug!(?new_body_span, kinds = ?new.kinds, "body became a state machine");
        result
            .edits
            .push(StateMachineEdit::UpdatingToStateMachineAroundActiveStatement {
                new: new_body_span,
            });
    }
    result
}

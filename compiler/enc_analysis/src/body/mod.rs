//! Declaration bodies.
//!
//! A declaration body is the part of a member's syntax that edit analysis
//! looks at: where its active statements live (the envelope), which nodes
//! hold them (the root nodes), what its lambdas capture, whether it compiles
//! to a state machine and how its statements line up with an edited
//! version of itself.
//!
//! # Design
//!
//! The set of body kinds is closed, so bodies are enums. [`MemberBody`]
//! groups the kinds into families whose members may turn into each other
//! across an edit (a constructor gaining an initializer, an auto accessor
//! gaining a body). Old/new pairs must come from the same family; pairing
//! different families is a caller bug and panics.
//!
//! Bodies borrow the tree they were built from and are rebuilt for every
//! analysis pass.

mod accessor;
mod constructor;
mod field;
mod lambda;
mod member;
mod primary;
mod selector;
mod simple;
mod statement;
mod top_level;

pub use accessor::{
    ExplicitAutoPropertyAccessorDeclarationBody, PropertyOrIndexerAccessorDeclarationBody,
    PropertyOrIndexerAccessorWithExplicitBodyDeclarationBody, RecordParameterDeclarationBody,
};
pub use constructor::{
    CopyConstructorDeclarationBody, InstanceConstructorDeclarationBody,
    InstanceConstructorWithExplicitInitializerDeclarationBody,
    InstanceConstructorWithImplicitInitializerDeclarationBody,
};
pub use field::{FieldWithInitializerDeclarationBody, PropertyWithInitializerDeclarationBody};
pub use lambda::LambdaBody;
pub use member::MemberBody;
pub use primary::{
    PrimaryConstructorDeclarationBody, PrimaryConstructorWithExplicitInitializerDeclarationBody,
    PrimaryConstructorWithImplicitInitializerDeclarationBody,
};
pub use simple::SimpleMemberBody;
pub use statement::FoundStatement;
pub use top_level::TopLevelCodeDeclarationBody;

use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxKind, SyntaxNode, SyntaxTree};
use smallvec::SmallVec;

use crate::comparer::{Match, StatementComparer};
use crate::part::StatementPart;
use crate::state_machine::StateMachineInfo;

/// One or more root nodes.
pub type RootNodes<'t> = SmallVec<[SyntaxNode<'t>; 2]>;

/// Any body: a member body or the body of a lambda/local function.
#[derive(Clone, Debug)]
pub enum DeclarationBody<'t> {
    Member(MemberBody<'t>),
    Lambda(LambdaBody<'t>),
}

impl<'t> DeclarationBody<'t> {
    pub fn tree(&self) -> &'t SyntaxTree {
        self.encompassing_ancestor().tree()
    }

    /// Smallest node whose span contains the envelope.
    pub fn encompassing_ancestor(&self) -> SyntaxNode<'t> {
        match self {
            DeclarationBody::Member(body) => body.encompassing_ancestor(),
            DeclarationBody::Lambda(body) => body.lambda(),
        }
    }

    /// Span bounding all active statements of the body.
    pub fn envelope(&self) -> Span {
        match self {
            DeclarationBody::Member(body) => body.envelope(),
            DeclarationBody::Lambda(body) => body.envelope(),
        }
    }

    pub fn root_nodes(&self) -> RootNodes<'t> {
        match self {
            DeclarationBody::Member(body) => body.root_nodes(),
            DeclarationBody::Lambda(body) => body.root_nodes(),
        }
    }

    pub fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        match self {
            DeclarationBody::Member(body) => body.captured_variables(model),
            DeclarationBody::Lambda(body) => body.captured_variables(model),
        }
    }

    pub fn state_machine_info(&self) -> StateMachineInfo<'t> {
        match self {
            DeclarationBody::Member(body) => body.state_machine_info(),
            DeclarationBody::Lambda(body) => body.state_machine_info(),
        }
    }

    /// Node the statement match is computed from, if the body has one.
    pub fn match_root(&self) -> Option<SyntaxNode<'t>> {
        match self {
            DeclarationBody::Member(body) => body.match_root(),
            DeclarationBody::Lambda(body) => Some(body.match_root()),
        }
    }

    /// Statement match against `new`, seeded with `known_matches`. `None`
    /// when either body has no match root.
    pub fn compute_single_root_match<'n>(
        &self,
        new: &DeclarationBody<'n>,
        known_matches: &[(SyntaxNode<'t>, SyntaxNode<'n>)],
    ) -> Option<Match<'t, 'n>> {
        let old_root = self.match_root()?;
        let new_root = new.match_root()?;
        Some(StatementComparer::default().compute_match(old_root, new_root, known_matches))
    }

    /// The statement in `new` corresponding to `old_statement`, or `None`
    /// when it has no counterpart.
    ///
    /// Shape-specific correspondences are tried first; anything else is
    /// looked up in `body_match`, the match of the two bodies' match roots.
    pub fn try_match_active_statement<'n>(
        &self,
        new: &DeclarationBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        match (self, new) {
            (DeclarationBody::Member(old), DeclarationBody::Member(new)) => {
                old.try_match_active_statement(new, old_statement, part, body_match)
            }
            (DeclarationBody::Lambda(old), DeclarationBody::Lambda(new)) => {
                old.try_match_active_statement(new, old_statement, part, body_match)
            }
            _ => panic!(
                "cannot match a {} body against a {} body",
                self.kind_name(),
                new.kind_name()
            ),
        }
    }

    pub fn is_syntax_equivalent_to(&self, other: &DeclarationBody<'_>) -> bool {
        roots_equivalent(&self.root_nodes(), &other.root_nodes())
    }

    fn kind_name(&self) -> &'static str {
        match self {
            DeclarationBody::Member(body) => body.kind_name(),
            DeclarationBody::Lambda(_) => "lambda",
        }
    }
}

impl<'t> From<MemberBody<'t>> for DeclarationBody<'t> {
    fn from(body: MemberBody<'t>) -> Self {
        DeclarationBody::Member(body)
    }
}

impl<'t> From<LambdaBody<'t>> for DeclarationBody<'t> {
    fn from(body: LambdaBody<'t>) -> Self {
        DeclarationBody::Lambda(body)
    }
}

fn roots_equivalent(old: &[SyntaxNode<'_>], new: &[SyntaxNode<'_>]) -> bool {
    old.len() == new.len() && old.iter().zip(new).all(|(o, n)| o.is_equivalent_to(*n))
}

/// Match root of a block or expression body: the block itself, or the
/// clause holding the expression.
fn body_match_root(body: SyntaxNode<'_>) -> SyntaxNode<'_> {
    if body.kind() == SyntaxKind::Block {
        body
    } else {
        body.parent().unwrap_or(body)
    }
}

/// Variables captured by lambdas in `first..=last`.
fn captured_in(model: &dyn SemanticModel, first: SyntaxNode<'_>, last: SyntaxNode<'_>) -> Vec<Symbol> {
    model.analyze_data_flow(first, last).captured
}

/// Union of two capture sets, ordered by declaration, without duplicates.
fn union_captures(mut first: Vec<Symbol>, second: Vec<Symbol>) -> Vec<Symbol> {
    first.extend(second);
    first.sort_by_key(|s| (s.declaration.start, s.id));
    first.dedup_by_key(|s| s.id);
    first
}

/// Statement-match lookup, keeping the part.
fn match_statement<'o, 'n>(
    body_match: Option<&Match<'o, 'n>>,
    old_statement: SyntaxNode<'o>,
    part: StatementPart,
) -> Option<(SyntaxNode<'n>, StatementPart)> {
    let new_statement = body_match?.new_node(old_statement);
    tracing::trace!(?old_statement, ?new_statement, "matched active statement");
    new_statement.map(|n| (n, part))
}

/// Matching shared by block/expression bodies: the old body itself maps to
/// a new expression body directly; everything else goes through the match.
fn try_match_in_body<'o, 'n>(
    old_body: SyntaxNode<'o>,
    new_body: SyntaxNode<'n>,
    old_statement: SyntaxNode<'o>,
    part: StatementPart,
    body_match: Option<&Match<'o, 'n>>,
) -> Option<(SyntaxNode<'n>, StatementPart)> {
    if old_statement == old_body && new_body.kind() != SyntaxKind::Block {
        return Some((new_body, StatementPart::None));
    }
    match_statement(body_match, old_statement, part)
}

#[cfg(test)]
mod tests;

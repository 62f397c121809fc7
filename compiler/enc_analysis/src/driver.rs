//! Active-statement driver.
//!
//! Composes the pieces for one member edit: find the old active statement,
//! follow the chain of enclosing lambdas through the body matches, resolve
//! the statement in the innermost new body and compute its new span.
//! Independent members are mapped in parallel.

use enc_ir::{Span, SyntaxNode};
use rayon::prelude::*;

use crate::body::{DeclarationBody, LambdaBody, MemberBody};
use crate::breakpoints::try_get_active_span;
use crate::comparer::Match;
use crate::part::StatementPart;
use crate::state_machine::{match_suspension_points, StateMachineEdit};
use crate::{syntax, AnalysisError};

/// Where an old active statement ends up in the new body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MappedActiveStatement<'n> {
    pub statement: SyntaxNode<'n>,
    pub part: StatementPart,
    /// `None` when the new statement has no breakpoint span.
    pub span: Option<Span>,
}

impl<'n> MappedActiveStatement<'n> {
    fn new(statement: SyntaxNode<'n>, part: StatementPart) -> Self {
        MappedActiveStatement {
            statement,
            part,
            span: try_get_active_span(statement, part),
        }
    }
}

/// Statement match of two bodies plus the state-machine edits found on the
/// way.
#[derive(Clone, Debug)]
pub struct BodyMatch<'o, 'n> {
    /// `None` when either body has no match root.
    pub matching: Option<Match<'o, 'n>>,
    pub state_machine_edits: Vec<StateMachineEdit>,
}

/// Match two bodies, pairing their suspension points first.
///
/// `active_matches` are already-known partners of old active statements;
/// they and the paired suspension points seed the statement match.
pub fn compute_body_match<'o, 'n>(
    old: &DeclarationBody<'o>,
    new: &DeclarationBody<'n>,
    active_matches: &[(SyntaxNode<'o>, SyntaxNode<'n>)],
    has_active_statements: bool,
) -> BodyMatch<'o, 'n> {
    let old_info = old.state_machine_info();
    let new_info = new.state_machine_info();
    let suspension = match_suspension_points(
        &old_info,
        &new_info,
        new.envelope(),
        has_active_statements,
    );

    let mut known = active_matches.to_vec();
    known.extend(suspension.known_matches);
    let matching = old.compute_single_root_match(new, &known);
    tracing::debug!(
        old_kinds = ?old_info.kinds,
        new_kinds = ?new_info.kinds,
        known = known.len(),
        edits = suspension.edits.len(),
        "computed body match"
    );
    BodyMatch {
        matching,
        state_machine_edits: suspension.edits,
    }
}

/// Result of mapping one active statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveStatementMapping<'n> {
    /// `None` when the statement (or a lambda enclosing it) has no
    /// counterpart in the new body.
    pub mapped: Option<MappedActiveStatement<'n>>,
    /// State-machine edits of the bodies matched on the way, outermost
    /// first.
    pub state_machine_edits: Vec<StateMachineEdit>,
}

/// Map the active statement at `span` in `old_body` to `new_body`.
///
/// The member bodies are matched once; the chain of lambdas enclosing the
/// statement is then followed from the outside in, matching each lambda
/// body against its partner. The statement is resolved through the
/// innermost match.
pub fn map_active_statement<'o, 'n>(
    old_body: &MemberBody<'o>,
    new_body: &MemberBody<'n>,
    span: Span,
) -> Result<ActiveStatementMapping<'n>, AnalysisError> {
    let envelope = old_body.envelope();
    if !envelope.contains_span(span) {
        return Err(AnalysisError::SpanOutsideEnvelope { span, envelope });
    }
    if old_body.is_excluded_active_statement_span_within_envelope(span) {
        return Err(AnalysisError::ExcludedSpan { span });
    }

    let found = old_body.find_statement_and_partner(span, Some(new_body));
    tracing::trace!(statement = ?found.statement, part = ?found.part, "old active statement");

    if old_body.is_syntax_equivalent_to(new_body) {
        if let Some(partner) = found.partner {
            return Ok(ActiveStatementMapping {
                mapped: Some(MappedActiveStatement::new(partner, found.part)),
                state_machine_edits: Vec::new(),
            });
        }
    }

    let roots = old_body.root_nodes();
    let lambdas = syntax::enclosing_lambda_bodies(found.statement, &roots);
    let mut enclosing = lambdas.iter().rev();
    let mut old_decl = DeclarationBody::Member(old_body.clone());
    let mut new_decl = DeclarationBody::Member(new_body.clone());
    let mut state_machine_edits = Vec::new();
    let mapped = loop {
        let body_match = compute_body_match(&old_decl, &new_decl, &[], true);
        state_machine_edits.extend(body_match.state_machine_edits);
        let matching = body_match.matching.as_ref();

        let Some(old_lambda_body) = enclosing.next() else {
            break old_decl
                .try_match_active_statement(&new_decl, found.statement, found.part, matching)
                .map(|(statement, part)| MappedActiveStatement::new(statement, part));
        };
        let partner = LambdaBody::from_body(*old_lambda_body).and_then(|old_lambda| {
            let new_lambda = old_lambda.try_get_partner_lambda_body(matching?)?;
            Some((old_lambda, new_lambda))
        });
        let Some((old_lambda, new_lambda)) = partner else {
            tracing::debug!(lambda_body = ?old_lambda_body, "enclosing lambda has no partner");
            break None;
        };
        old_decl = DeclarationBody::Lambda(old_lambda);
        new_decl = DeclarationBody::Lambda(new_lambda);
    };

    tracing::debug!(
        ?span,
        mapped = ?mapped.map(|m| m.span),
        edits = state_machine_edits.len(),
        "mapped active statement"
    );
    Ok(ActiveStatementMapping {
        mapped,
        state_machine_edits,
    })
}

/// One edited member and the active statements in its old body.
#[derive(Clone, Debug)]
pub struct MemberEdit<'o, 'n> {
    pub old: MemberBody<'o>,
    pub new: MemberBody<'n>,
    pub active_statements: Vec<Span>,
}

/// Results for one [`MemberEdit`], in active-statement order.
pub type MemberEditResult<'n> = Vec<Result<ActiveStatementMapping<'n>, AnalysisError>>;

/// Map the active statements of independent member edits in parallel.
/// Results are in input order.
pub fn map_active_statements<'o, 'n>(edits: &[MemberEdit<'o, 'n>]) -> Vec<MemberEditResult<'n>> {
    edits
        .par_iter()
        .map(|edit| {
            edit.active_statements
                .iter()
                .map(|span| map_active_statement(&edit.old, &edit.new, *span))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests;

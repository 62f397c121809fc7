use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxKind, SyntaxNode};
use smallvec::SmallVec;

use super::statement::{find_statement_in, FoundStatement};
use super::{captured_in, match_statement, RootNodes};
use crate::comparer::Match;
use crate::part::StatementPart;
use crate::state_machine::{StateMachineInfo, StateMachineKinds};

/// Global statements of a compilation unit.
#[derive(Clone, Debug)]
pub struct TopLevelCodeDeclarationBody<'t> {
    unit: SyntaxNode<'t>,
    global_statements: RootNodes<'t>,
}

impl<'t> TopLevelCodeDeclarationBody<'t> {
    /// `None` when the unit has no global statements.
    pub fn new(unit: SyntaxNode<'t>) -> Option<Self> {
        let global_statements: RootNodes<'t> = unit
            .child_nodes()
            .filter(|n| n.kind() == SyntaxKind::GlobalStatement)
            .collect();
        if global_statements.is_empty() {
            return None;
        }
        Some(TopLevelCodeDeclarationBody {
            unit,
            global_statements,
        })
    }

    pub fn unit(&self) -> SyntaxNode<'t> {
        self.unit
    }

    pub fn global_statements(&self) -> &[SyntaxNode<'t>] {
        &self.global_statements
    }

    fn first_and_last(&self) -> (SyntaxNode<'t>, SyntaxNode<'t>) {
        let first = self.global_statements[0];
        let last = self.global_statements[self.global_statements.len() - 1];
        (first, last)
    }

    pub(super) fn envelope(&self) -> Span {
        let (first, last) = self.first_and_last();
        first.span().merge(last.span())
    }

    pub(super) fn root_nodes(&self) -> RootNodes<'t> {
        self.global_statements.clone()
    }

    pub(super) fn active_token_ranges(&self) -> SmallVec<[Span; 2]> {
        self.global_statements.iter().map(|g| g.span()).collect()
    }

    pub(super) fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        let (first, last) = self.first_and_last();
        captured_in(model, first, last)
    }

    /// Top-level code is async exactly when it awaits.
    pub(super) fn state_machine_info(&self) -> StateMachineInfo<'t> {
        let mut info = StateMachineInfo::scan(&self.global_statements, false);
        let awaits = info
            .suspension_points
            .iter()
            .any(|n| n.kind() == SyntaxKind::AwaitExpression);
        info.kinds.set(StateMachineKinds::ASYNC, awaits);
        info
    }

    pub(super) fn match_root(&self) -> SyntaxNode<'t> {
        self.unit
    }

    /// Spans between the global statements (inside a type declaration, say)
    /// belong to no statement of this body.
    pub(super) fn is_excluded_active_statement_span_within_envelope(&self, span: Span) -> bool {
        self.global_index(span).is_none()
    }

    fn global_index(&self, span: Span) -> Option<usize> {
        self.global_statements
            .iter()
            .position(|g| g.span().contains_span(span))
    }

    /// # Panics
    ///
    /// When `span` is excluded from the body.
    pub(super) fn find_statement_and_partner<'n>(
        &self,
        span: Span,
        partner: Option<&TopLevelCodeDeclarationBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        let index = self
            .global_index(span)
            .unwrap_or_else(|| panic!("span {span} is not within a global statement"));
        let global = self.global_statements[index];
        let partner_global = partner.and_then(|p| p.global_statements.get(index).copied());
        let mut found = find_statement_in(global, span, partner_global);
        if found.statement == global {
            if let Some(statement) = global.child_nodes().next() {
                found.statement = statement;
                found.partner = found.partner.and_then(|p| p.child_nodes().next());
                found.part = StatementPart::at(statement, span.start.max(statement.span().start));
            }
        }
        found
    }

    pub(super) fn try_match_active_statement<'n>(
        &self,
        _new: &TopLevelCodeDeclarationBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        match_statement(body_match, old_statement, part)
    }
}

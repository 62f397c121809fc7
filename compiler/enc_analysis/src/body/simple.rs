use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxNode};
use smallvec::smallvec;

use super::statement::{find_statement_in, FoundStatement};
use super::{body_match_root, captured_in, try_match_in_body, RootNodes};
use crate::comparer::Match;
use crate::part::StatementPart;
use crate::state_machine::StateMachineInfo;
use crate::syntax;

/// Block or expression body of a method or static constructor.
#[derive(Copy, Clone, Debug)]
pub struct SimpleMemberBody<'t> {
    declaration: SyntaxNode<'t>,
    body: SyntaxNode<'t>,
}

impl<'t> SimpleMemberBody<'t> {
    pub fn new(declaration: SyntaxNode<'t>, body: SyntaxNode<'t>) -> Self {
        SimpleMemberBody { declaration, body }
    }

    pub fn declaration(&self) -> SyntaxNode<'t> {
        self.declaration
    }

    /// The block, or the expression of an `=> expr` body.
    pub fn body(&self) -> SyntaxNode<'t> {
        self.body
    }

    pub(super) fn envelope(&self) -> Span {
        self.body.span()
    }

    pub(super) fn root_nodes(&self) -> RootNodes<'t> {
        smallvec![self.body]
    }

    pub(super) fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        captured_in(model, self.body, self.body)
    }

    pub(super) fn state_machine_info(&self) -> StateMachineInfo<'t> {
        StateMachineInfo::scan(&[self.body], syntax::is_async(self.declaration))
    }

    pub(super) fn match_root(&self) -> SyntaxNode<'t> {
        body_match_root(self.body)
    }

    pub(super) fn find_statement_and_partner<'n>(
        &self,
        span: Span,
        partner: Option<&SimpleMemberBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        find_statement_in(self.body, span, partner.map(|p| p.body))
    }

    pub(super) fn try_match_active_statement<'n>(
        &self,
        new: &SimpleMemberBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        try_match_in_body(self.body, new.body, old_statement, part, body_match)
    }
}

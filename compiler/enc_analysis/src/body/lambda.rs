use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxNode};
use smallvec::smallvec;

use super::{body_match_root, captured_in, try_match_in_body, RootNodes};
use crate::comparer::Match;
use crate::part::StatementPart;
use crate::state_machine::StateMachineInfo;
use crate::syntax;

/// Body of a lambda expression or local function.
#[derive(Copy, Clone, Debug)]
pub struct LambdaBody<'t> {
    lambda: SyntaxNode<'t>,
    body: SyntaxNode<'t>,
}

impl<'t> LambdaBody<'t> {
    /// Body of `lambda`, if it is a lambda or local function with a body.
    pub fn from_lambda(lambda: SyntaxNode<'t>) -> Option<Self> {
        let body = syntax::lambda_body(lambda)?;
        Some(LambdaBody { lambda, body })
    }

    /// The body `node` is, if it is the body of a lambda or local function.
    pub fn from_body(node: SyntaxNode<'t>) -> Option<Self> {
        let lambda = syntax::lambda_of_body(node)?;
        Some(LambdaBody { lambda, body: node })
    }

    pub fn lambda(&self) -> SyntaxNode<'t> {
        self.lambda
    }

    pub fn body(&self) -> SyntaxNode<'t> {
        self.body
    }

    pub fn envelope(&self) -> Span {
        self.body.span()
    }

    pub fn root_nodes(&self) -> RootNodes<'t> {
        smallvec![self.body]
    }

    pub fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        captured_in(model, self.body, self.body)
    }

    pub fn state_machine_info(&self) -> StateMachineInfo<'t> {
        StateMachineInfo::scan(&[self.body], syntax::is_async(self.lambda))
    }

    pub fn match_root(&self) -> SyntaxNode<'t> {
        body_match_root(self.body)
    }

    /// Body of the lambda `body_match` pairs with this one.
    pub fn try_get_partner_lambda_body<'n>(
        &self,
        body_match: &Match<'t, 'n>,
    ) -> Option<LambdaBody<'n>> {
        body_match
            .new_node(self.lambda)
            .and_then(LambdaBody::from_lambda)
    }

    pub fn try_match_active_statement<'n>(
        &self,
        new: &LambdaBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        try_match_in_body(self.body, new.body, old_statement, part, body_match)
    }
}

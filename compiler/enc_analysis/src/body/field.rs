use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxNode};
use smallvec::smallvec;

use super::statement::{find_statement_in, FoundStatement};
use super::{captured_in, match_statement, RootNodes};
use crate::breakpoints;
use crate::comparer::Match;
use crate::part::StatementPart;
use crate::state_machine::StateMachineInfo;
use crate::syntax;

/// Returns `true` when `position` falls inside a lambda nested in `value`.
fn is_in_lambda(value: SyntaxNode<'_>, position: u32) -> bool {
    value.span().contains(position)
        && value.find_token(position).is_some_and(|token| {
            token
                .parent()
                .ancestors_and_self()
                .take_while(|n| *n != value)
                .any(syntax::is_lambda_body)
        })
}

/// `int x = expr;`: one declarator of a field with an initializer.
#[derive(Copy, Clone, Debug)]
pub struct FieldWithInitializerDeclarationBody<'t> {
    declarator: SyntaxNode<'t>,
    value: SyntaxNode<'t>,
}

impl<'t> FieldWithInitializerDeclarationBody<'t> {
    pub fn new(declarator: SyntaxNode<'t>, value: SyntaxNode<'t>) -> Self {
        FieldWithInitializerDeclarationBody { declarator, value }
    }

    pub fn declarator(&self) -> SyntaxNode<'t> {
        self.declarator
    }

    /// Initializer expression.
    pub fn value(&self) -> SyntaxNode<'t> {
        self.value
    }

    pub(super) fn encompassing_ancestor(&self) -> SyntaxNode<'t> {
        self.declarator
            .ancestors()
            .nth(1)
            .unwrap_or(self.declarator)
    }

    pub(super) fn envelope(&self) -> Span {
        breakpoints::variable_declarator_span(self.declarator)
    }

    pub(super) fn root_nodes(&self) -> RootNodes<'t> {
        smallvec![self.value]
    }

    pub(super) fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        captured_in(model, self.value, self.value)
    }

    pub(super) fn state_machine_info(&self) -> StateMachineInfo<'t> {
        StateMachineInfo::scan(&[self.value], false)
    }

    /// The `= expr` clause.
    pub(super) fn match_root(&self) -> Option<SyntaxNode<'t>> {
        self.value.parent()
    }

    pub(super) fn find_statement_and_partner<'n>(
        &self,
        span: Span,
        partner: Option<&FieldWithInitializerDeclarationBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        if is_in_lambda(self.value, span.start) {
            return find_statement_in(self.value, span, partner.map(|p| p.value));
        }
        FoundStatement {
            statement: self.declarator,
            partner: partner.map(|p| p.declarator),
            part: StatementPart::None,
        }
    }

    pub(super) fn try_match_active_statement<'n>(
        &self,
        new: &FieldWithInitializerDeclarationBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        if old_statement == self.declarator {
            return Some((new.declarator, StatementPart::None));
        }
        match_statement(body_match, old_statement, part)
    }
}

/// `int P { get; } = expr;`: the initializer of an auto-property. The
/// property declaration stands for the initializer as active statement.
#[derive(Copy, Clone, Debug)]
pub struct PropertyWithInitializerDeclarationBody<'t> {
    property: SyntaxNode<'t>,
    value: SyntaxNode<'t>,
}

impl<'t> PropertyWithInitializerDeclarationBody<'t> {
    pub fn new(property: SyntaxNode<'t>, value: SyntaxNode<'t>) -> Self {
        PropertyWithInitializerDeclarationBody { property, value }
    }

    pub fn property(&self) -> SyntaxNode<'t> {
        self.property
    }

    pub fn value(&self) -> SyntaxNode<'t> {
        self.value
    }

    pub(super) fn envelope(&self) -> Span {
        self.value.span()
    }

    pub(super) fn root_nodes(&self) -> RootNodes<'t> {
        smallvec![self.value]
    }

    pub(super) fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        captured_in(model, self.value, self.value)
    }

    pub(super) fn state_machine_info(&self) -> StateMachineInfo<'t> {
        StateMachineInfo::scan(&[self.value], false)
    }

    pub(super) fn match_root(&self) -> Option<SyntaxNode<'t>> {
        self.value.parent()
    }

    pub(super) fn find_statement_and_partner<'n>(
        &self,
        span: Span,
        partner: Option<&PropertyWithInitializerDeclarationBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        if is_in_lambda(self.value, span.start) {
            return find_statement_in(self.value, span, partner.map(|p| p.value));
        }
        FoundStatement {
            statement: self.property,
            partner: partner.map(|p| p.property),
            part: StatementPart::None,
        }
    }

    pub(super) fn try_match_active_statement<'n>(
        &self,
        new: &PropertyWithInitializerDeclarationBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        if old_statement == self.property {
            return Some((new.property, StatementPart::None));
        }
        match_statement(body_match, old_statement, part)
    }
}

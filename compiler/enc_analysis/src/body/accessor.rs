//! Property and indexer accessors.

use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxNode};
use smallvec::smallvec;

use super::statement::{find_statement_in, FoundStatement};
use super::{body_match_root, captured_in, try_match_in_body, RootNodes};
use crate::breakpoints;
use crate::comparer::Match;
use crate::part::StatementPart;
use crate::state_machine::StateMachineInfo;
use crate::syntax;

/// `get { ... }`, `get => expr;` or `int P => expr;`.
#[derive(Copy, Clone, Debug)]
pub struct PropertyOrIndexerAccessorWithExplicitBodyDeclarationBody<'t> {
    /// The accessor, or the property/indexer of an `=> expr` declaration.
    declaration: SyntaxNode<'t>,
    body: SyntaxNode<'t>,
}

impl<'t> PropertyOrIndexerAccessorWithExplicitBodyDeclarationBody<'t> {
    pub fn new(declaration: SyntaxNode<'t>, body: SyntaxNode<'t>) -> Self {
        PropertyOrIndexerAccessorWithExplicitBodyDeclarationBody { declaration, body }
    }

    pub fn body(&self) -> SyntaxNode<'t> {
        self.body
    }
}

/// `get;`, `set;` or `init;` of an auto-property.
#[derive(Copy, Clone, Debug)]
pub struct ExplicitAutoPropertyAccessorDeclarationBody<'t> {
    accessor: SyntaxNode<'t>,
}

impl<'t> ExplicitAutoPropertyAccessorDeclarationBody<'t> {
    pub fn new(accessor: SyntaxNode<'t>) -> Self {
        ExplicitAutoPropertyAccessorDeclarationBody { accessor }
    }
}

/// Accessor of the auto-property a positional record parameter declares.
#[derive(Copy, Clone, Debug)]
pub struct RecordParameterDeclarationBody<'t> {
    parameter: SyntaxNode<'t>,
}

impl<'t> RecordParameterDeclarationBody<'t> {
    pub fn new(parameter: SyntaxNode<'t>) -> Self {
        RecordParameterDeclarationBody { parameter }
    }
}

/// Accessor bodies. An accessor may change shape across an edit.
#[derive(Copy, Clone, Debug)]
pub enum PropertyOrIndexerAccessorDeclarationBody<'t> {
    ExplicitBody(PropertyOrIndexerAccessorWithExplicitBodyDeclarationBody<'t>),
    Auto(ExplicitAutoPropertyAccessorDeclarationBody<'t>),
    RecordParameter(RecordParameterDeclarationBody<'t>),
}

impl<'t> PropertyOrIndexerAccessorDeclarationBody<'t> {
    /// The single active statement of a bodiless accessor.
    pub fn header_active_statement(&self) -> Option<SyntaxNode<'t>> {
        match self {
            Self::ExplicitBody(_) => None,
            Self::Auto(b) => Some(b.accessor),
            Self::RecordParameter(b) => Some(b.parameter),
        }
    }

    pub fn explicit_body(&self) -> Option<SyntaxNode<'t>> {
        match self {
            Self::ExplicitBody(b) => Some(b.body),
            Self::Auto(_) | Self::RecordParameter(_) => None,
        }
    }

    pub(super) fn encompassing_ancestor(&self) -> SyntaxNode<'t> {
        match self {
            Self::ExplicitBody(b) => b.declaration,
            Self::Auto(b) => b.accessor,
            Self::RecordParameter(b) => b.parameter,
        }
    }

    pub(super) fn envelope(&self) -> Span {
        match self {
            Self::ExplicitBody(b) => b.body.span(),
            Self::Auto(b) => breakpoints::auto_property_accessor_span(b.accessor),
            Self::RecordParameter(b) => breakpoints::record_parameter_span(b.parameter),
        }
    }

    pub(super) fn root_nodes(&self) -> RootNodes<'t> {
        match self {
            Self::ExplicitBody(b) => smallvec![b.body],
            Self::Auto(b) => smallvec![b.accessor],
            Self::RecordParameter(b) => smallvec![b.parameter],
        }
    }

    pub(super) fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        match self {
            Self::ExplicitBody(b) => captured_in(model, b.body, b.body),
            Self::Auto(_) | Self::RecordParameter(_) => Vec::new(),
        }
    }

    pub(super) fn state_machine_info(&self) -> StateMachineInfo<'t> {
        match self {
            Self::ExplicitBody(b) => StateMachineInfo::scan(&[b.body], false),
            Self::Auto(_) | Self::RecordParameter(_) => StateMachineInfo::default(),
        }
    }

    pub(super) fn match_root(&self) -> Option<SyntaxNode<'t>> {
        self.explicit_body().map(body_match_root)
    }

    pub(super) fn find_statement_and_partner<'n>(
        &self,
        span: Span,
        partner: Option<&PropertyOrIndexerAccessorDeclarationBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        if let Self::ExplicitBody(b) = self {
            return find_statement_in(
                b.body,
                span,
                partner.and_then(PropertyOrIndexerAccessorDeclarationBody::explicit_body),
            );
        }
        // Bodiless shapes: the accessor or parameter is the only statement.
        FoundStatement {
            statement: self.encompassing_ancestor(),
            partner: partner
                .and_then(PropertyOrIndexerAccessorDeclarationBody::header_active_statement),
            part: StatementPart::None,
        }
    }

    /// Shape-aware matching:
    ///
    /// 1. the old header maps to the new header, or to the first active
    ///    statement of a new explicit body;
    /// 2. otherwise a new header is the answer;
    /// 3. between explicit bodies the old body maps to the new body and
    ///    other statements go through the statement match.
    pub(super) fn try_match_active_statement<'n>(
        &self,
        new: &PropertyOrIndexerAccessorDeclarationBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        if self.header_active_statement() == Some(old_statement) {
            if let Some(new_header) = new.header_active_statement() {
                return Some((new_header, part));
            }
            let new_body = new.explicit_body()?;
            return Some(match syntax::first_active_statement(new_body) {
                Some(first) => (first, StatementPart::None),
                None => (new_body, StatementPart::OpenBrace),
            });
        }
        if let Some(new_header) = new.header_active_statement() {
            return Some((new_header, StatementPart::None));
        }
        match (self.explicit_body(), new.explicit_body()) {
            (Some(old_body), Some(new_body)) => {
                try_match_in_body(old_body, new_body, old_statement, part, body_match)
            }
            _ => None,
        }
    }
}

//! Primary constructors.

use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxKind, SyntaxNode};
use smallvec::smallvec;

use super::statement::{find_statement_in, FoundStatement};
use super::{captured_in, match_statement, RootNodes};
use crate::breakpoints;
use crate::comparer::Match;
use crate::part::StatementPart;

/// `class C(int a)`: the parameter list stands for the implicit base call.
#[derive(Copy, Clone, Debug)]
pub struct PrimaryConstructorWithImplicitInitializerDeclarationBody<'t> {
    type_declaration: SyntaxNode<'t>,
    parameter_list: SyntaxNode<'t>,
}

impl<'t> PrimaryConstructorWithImplicitInitializerDeclarationBody<'t> {
    pub fn new(type_declaration: SyntaxNode<'t>, parameter_list: SyntaxNode<'t>) -> Self {
        PrimaryConstructorWithImplicitInitializerDeclarationBody {
            type_declaration,
            parameter_list,
        }
    }
}

/// `class C(int a) : B(a)`.
#[derive(Copy, Clone, Debug)]
pub struct PrimaryConstructorWithExplicitInitializerDeclarationBody<'t> {
    type_declaration: SyntaxNode<'t>,
    base_type: SyntaxNode<'t>,
}

impl<'t> PrimaryConstructorWithExplicitInitializerDeclarationBody<'t> {
    pub fn new(type_declaration: SyntaxNode<'t>, base_type: SyntaxNode<'t>) -> Self {
        PrimaryConstructorWithExplicitInitializerDeclarationBody {
            type_declaration,
            base_type,
        }
    }
}

/// Primary constructor of a type declaration.
///
/// Its envelope is the type header, which also holds the active statements
/// of record parameters and the copy constructor; spans belonging to those
/// are excluded.
#[derive(Copy, Clone, Debug)]
pub enum PrimaryConstructorDeclarationBody<'t> {
    ImplicitInitializer(PrimaryConstructorWithImplicitInitializerDeclarationBody<'t>),
    ExplicitInitializer(PrimaryConstructorWithExplicitInitializerDeclarationBody<'t>),
}

impl<'t> PrimaryConstructorDeclarationBody<'t> {
    pub fn type_declaration(&self) -> SyntaxNode<'t> {
        match self {
            Self::ImplicitInitializer(b) => b.type_declaration,
            Self::ExplicitInitializer(b) => b.type_declaration,
        }
    }

    /// Parameter list (implicit) or base type with arguments (explicit).
    pub fn initializer_active_statement(&self) -> SyntaxNode<'t> {
        match self {
            Self::ImplicitInitializer(b) => b.parameter_list,
            Self::ExplicitInitializer(b) => b.base_type,
        }
    }

    pub fn initializer_active_span(&self) -> Span {
        match self {
            Self::ImplicitInitializer(b) => {
                breakpoints::implicit_primary_constructor_initializer_span(b.type_declaration)
            }
            Self::ExplicitInitializer(b) => {
                breakpoints::explicit_primary_constructor_initializer_span(b.base_type)
            }
        }
    }

    pub(super) fn envelope(&self) -> Span {
        let header = breakpoints::primary_constructor_header_span(self.type_declaration());
        match self {
            Self::ImplicitInitializer(_) => header,
            Self::ExplicitInitializer(b) => header.merge(b.base_type.span()),
        }
    }

    pub(super) fn root_nodes(&self) -> RootNodes<'t> {
        smallvec![self.initializer_active_statement()]
    }

    pub(super) fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        match self {
            Self::ImplicitInitializer(_) => Vec::new(),
            Self::ExplicitInitializer(b) => b
                .base_type
                .child_node(SyntaxKind::ArgumentList)
                .map(|args| captured_in(model, args, args))
                .unwrap_or_default(),
        }
    }

    pub(super) fn match_root(&self) -> Option<SyntaxNode<'t>> {
        match self {
            Self::ImplicitInitializer(_) => None,
            Self::ExplicitInitializer(b) => Some(b.base_type),
        }
    }

    pub(super) fn is_excluded_active_statement_span_within_envelope(&self, span: Span) -> bool {
        match self {
            Self::ImplicitInitializer(_) => span != self.initializer_active_span(),
            Self::ExplicitInitializer(b) => !b.base_type.span().contains_span(span),
        }
    }

    pub(super) fn find_statement_and_partner<'n>(
        &self,
        span: Span,
        partner: Option<&PrimaryConstructorDeclarationBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        if let Self::ExplicitInitializer(b) = self {
            if span.start != self.initializer_active_span().start
                && b.base_type.span().contains(span.start)
            {
                let partner_base = partner.and_then(|p| match p {
                    PrimaryConstructorDeclarationBody::ExplicitInitializer(p) => Some(p.base_type),
                    PrimaryConstructorDeclarationBody::ImplicitInitializer(_) => None,
                });
                return find_statement_in(b.base_type, span, partner_base);
            }
        }
        FoundStatement {
            statement: self.initializer_active_statement(),
            partner: partner.map(PrimaryConstructorDeclarationBody::initializer_active_statement),
            part: StatementPart::None,
        }
    }

    pub(super) fn try_match_active_statement<'n>(
        &self,
        new: &PrimaryConstructorDeclarationBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        if old_statement == self.initializer_active_statement() {
            return Some((new.initializer_active_statement(), StatementPart::None));
        }
        match_statement(body_match, old_statement, part)
    }
}

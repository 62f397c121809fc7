//! Instance and copy constructors.

use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxNode};
use smallvec::{smallvec, SmallVec};

use super::statement::{find_statement_in, FoundStatement};
use super::{captured_in, match_statement, union_captures, RootNodes};
use crate::breakpoints;
use crate::comparer::Match;
use crate::part::StatementPart;
use crate::state_machine::StateMachineInfo;

/// `C(...) { ... }`: the header stands for the implicit `base()` call.
#[derive(Copy, Clone, Debug)]
pub struct InstanceConstructorWithImplicitInitializerDeclarationBody<'t> {
    constructor: SyntaxNode<'t>,
    body: SyntaxNode<'t>,
}

impl<'t> InstanceConstructorWithImplicitInitializerDeclarationBody<'t> {
    pub fn new(constructor: SyntaxNode<'t>, body: SyntaxNode<'t>) -> Self {
        InstanceConstructorWithImplicitInitializerDeclarationBody { constructor, body }
    }
}

/// `C(...) : this(...) { ... }` or `: base(...)`.
#[derive(Copy, Clone, Debug)]
pub struct InstanceConstructorWithExplicitInitializerDeclarationBody<'t> {
    constructor: SyntaxNode<'t>,
    initializer: SyntaxNode<'t>,
    body: SyntaxNode<'t>,
}

impl<'t> InstanceConstructorWithExplicitInitializerDeclarationBody<'t> {
    pub fn new(constructor: SyntaxNode<'t>, initializer: SyntaxNode<'t>, body: SyntaxNode<'t>) -> Self {
        InstanceConstructorWithExplicitInitializerDeclarationBody {
            constructor,
            initializer,
            body,
        }
    }
}

/// Instance constructor, with or without an explicit initializer.
#[derive(Copy, Clone, Debug)]
pub enum InstanceConstructorDeclarationBody<'t> {
    ImplicitInitializer(InstanceConstructorWithImplicitInitializerDeclarationBody<'t>),
    ExplicitInitializer(InstanceConstructorWithExplicitInitializerDeclarationBody<'t>),
}

impl<'t> InstanceConstructorDeclarationBody<'t> {
    pub fn constructor(&self) -> SyntaxNode<'t> {
        match self {
            Self::ImplicitInitializer(b) => b.constructor,
            Self::ExplicitInitializer(b) => b.constructor,
        }
    }

    pub fn body(&self) -> SyntaxNode<'t> {
        match self {
            Self::ImplicitInitializer(b) => b.body,
            Self::ExplicitInitializer(b) => b.body,
        }
    }

    pub fn initializer(&self) -> Option<SyntaxNode<'t>> {
        match self {
            Self::ImplicitInitializer(_) => None,
            Self::ExplicitInitializer(b) => Some(b.initializer),
        }
    }

    /// The constructor node (implicit) or the initializer clause (explicit).
    pub fn initializer_active_statement(&self) -> SyntaxNode<'t> {
        self.initializer().unwrap_or_else(|| self.constructor())
    }

    fn initializer_part(&self) -> StatementPart {
        match self {
            Self::ImplicitInitializer(_) => StatementPart::DefaultBaseConstructorCall,
            Self::ExplicitInitializer(_) => StatementPart::None,
        }
    }

    pub fn initializer_active_span(&self) -> Span {
        match self {
            Self::ImplicitInitializer(b) => breakpoints::constructor_declaration_span(b.constructor),
            Self::ExplicitInitializer(b) => breakpoints::constructor_initializer_span(b.initializer),
        }
    }

    pub(super) fn envelope(&self) -> Span {
        self.initializer_active_span().merge(self.body().span())
    }

    pub(super) fn root_nodes(&self) -> RootNodes<'t> {
        match self {
            Self::ImplicitInitializer(b) => smallvec![b.body],
            Self::ExplicitInitializer(b) => smallvec![b.initializer, b.body],
        }
    }

    pub(super) fn active_token_ranges(&self) -> SmallVec<[Span; 2]> {
        smallvec![self.initializer_active_span(), self.body().span()]
    }

    pub(super) fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        let body = captured_in(model, self.body(), self.body());
        match self.initializer() {
            Some(initializer) => union_captures(captured_in(model, initializer, initializer), body),
            None => body,
        }
    }

    pub(super) fn state_machine_info(&self) -> StateMachineInfo<'t> {
        StateMachineInfo::scan(&self.root_nodes(), false)
    }

    /// Initializer lambdas take part in the match, so the root is the
    /// whole constructor.
    pub(super) fn match_root(&self) -> SyntaxNode<'t> {
        self.constructor()
    }

    pub(super) fn find_statement_and_partner<'n>(
        &self,
        span: Span,
        partner: Option<&InstanceConstructorDeclarationBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        let at_initializer = span.start == self.initializer_active_span().start
            || (self.initializer().is_none() && span.start < self.body().span().start);
        if at_initializer {
            return FoundStatement {
                statement: self.initializer_active_statement(),
                partner: partner.map(InstanceConstructorDeclarationBody::initializer_active_statement),
                part: self.initializer_part(),
            };
        }
        if let Some(initializer) = self.initializer() {
            if initializer.span().contains(span.start) {
                return find_statement_in(
                    initializer,
                    span,
                    partner.and_then(InstanceConstructorDeclarationBody::initializer),
                );
            }
        }
        find_statement_in(self.body(), span, partner.map(InstanceConstructorDeclarationBody::body))
    }

    pub(super) fn try_match_active_statement<'n>(
        &self,
        new: &InstanceConstructorDeclarationBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        if old_statement.kind().is_constructor_initializer() || old_statement == self.constructor() {
            return Some((new.initializer_active_statement(), new.initializer_part()));
        }
        match_statement(body_match, old_statement, part)
    }
}

/// Synthesized copy constructor of a record. It has no source body; the
/// record header is its only active statement.
#[derive(Copy, Clone, Debug)]
pub struct CopyConstructorDeclarationBody<'t> {
    record: SyntaxNode<'t>,
}

impl<'t> CopyConstructorDeclarationBody<'t> {
    pub fn new(record: SyntaxNode<'t>) -> Self {
        CopyConstructorDeclarationBody { record }
    }

    pub fn record(&self) -> SyntaxNode<'t> {
        self.record
    }

    pub(super) fn envelope(&self) -> Span {
        breakpoints::copy_constructor_span(self.record)
    }

    pub(super) fn root_nodes(&self) -> RootNodes<'t> {
        smallvec![self.record]
    }

    pub(super) fn find_statement_and_partner<'n>(
        &self,
        partner: Option<&CopyConstructorDeclarationBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        FoundStatement {
            statement: self.record,
            partner: partner.map(|p| p.record),
            part: StatementPart::None,
        }
    }

    pub(super) fn try_match_active_statement<'n>(
        &self,
        new: &CopyConstructorDeclarationBody<'n>,
        old_statement: SyntaxNode<'t>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        (old_statement == self.record).then_some((new.record, StatementPart::None))
    }
}

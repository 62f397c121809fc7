use enc_bind::{SemanticModel, Symbol};
use enc_ir::{Span, SyntaxNode, SyntaxToken, SyntaxTree};
use smallvec::{smallvec, SmallVec};

use super::{
    roots_equivalent, CopyConstructorDeclarationBody, FieldWithInitializerDeclarationBody,
    FoundStatement, InstanceConstructorDeclarationBody, PrimaryConstructorDeclarationBody,
    PropertyOrIndexerAccessorDeclarationBody, PropertyWithInitializerDeclarationBody,
    RootNodes, SimpleMemberBody, TopLevelCodeDeclarationBody,
};
use crate::comparer::Match;
use crate::part::StatementPart;
use crate::state_machine::StateMachineInfo;

/// Body of a member, grouped by family.
#[derive(Clone, Debug)]
pub enum MemberBody<'t> {
    Simple(SimpleMemberBody<'t>),
    FieldWithInitializer(FieldWithInitializerDeclarationBody<'t>),
    PropertyWithInitializer(PropertyWithInitializerDeclarationBody<'t>),
    InstanceConstructor(InstanceConstructorDeclarationBody<'t>),
    CopyConstructor(CopyConstructorDeclarationBody<'t>),
    PrimaryConstructor(PrimaryConstructorDeclarationBody<'t>),
    Accessor(PropertyOrIndexerAccessorDeclarationBody<'t>),
    TopLevel(TopLevelCodeDeclarationBody<'t>),
}

#[track_caller]
fn mismatched(old: &MemberBody<'_>, new: &MemberBody<'_>) -> ! {
    panic!(
        "cannot pair a {} body with a {} body",
        old.kind_name(),
        new.kind_name()
    )
}

impl<'t> MemberBody<'t> {
    pub(super) fn kind_name(&self) -> &'static str {
        match self {
            MemberBody::Simple(_) => "simple member",
            MemberBody::FieldWithInitializer(_) => "field initializer",
            MemberBody::PropertyWithInitializer(_) => "property initializer",
            MemberBody::InstanceConstructor(_) => "instance constructor",
            MemberBody::CopyConstructor(_) => "copy constructor",
            MemberBody::PrimaryConstructor(_) => "primary constructor",
            MemberBody::Accessor(_) => "accessor",
            MemberBody::TopLevel(_) => "top-level code",
        }
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.encompassing_ancestor().tree()
    }

    pub fn encompassing_ancestor(&self) -> SyntaxNode<'t> {
        match self {
            MemberBody::Simple(b) => b.declaration(),
            MemberBody::FieldWithInitializer(b) => b.encompassing_ancestor(),
            MemberBody::PropertyWithInitializer(b) => b.property(),
            MemberBody::InstanceConstructor(b) => b.constructor(),
            MemberBody::CopyConstructor(b) => b.record(),
            MemberBody::PrimaryConstructor(b) => b.type_declaration(),
            MemberBody::Accessor(b) => b.encompassing_ancestor(),
            MemberBody::TopLevel(b) => b.unit(),
        }
    }

    pub fn envelope(&self) -> Span {
        match self {
            MemberBody::Simple(b) => b.envelope(),
            MemberBody::FieldWithInitializer(b) => b.envelope(),
            MemberBody::PropertyWithInitializer(b) => b.envelope(),
            MemberBody::InstanceConstructor(b) => b.envelope(),
            MemberBody::CopyConstructor(b) => b.envelope(),
            MemberBody::PrimaryConstructor(b) => b.envelope(),
            MemberBody::Accessor(b) => b.envelope(),
            MemberBody::TopLevel(b) => b.envelope(),
        }
    }

    pub fn root_nodes(&self) -> RootNodes<'t> {
        match self {
            MemberBody::Simple(b) => b.root_nodes(),
            MemberBody::FieldWithInitializer(b) => b.root_nodes(),
            MemberBody::PropertyWithInitializer(b) => b.root_nodes(),
            MemberBody::InstanceConstructor(b) => b.root_nodes(),
            MemberBody::CopyConstructor(b) => b.root_nodes(),
            MemberBody::PrimaryConstructor(b) => b.root_nodes(),
            MemberBody::Accessor(b) => b.root_nodes(),
            MemberBody::TopLevel(b) => b.root_nodes(),
        }
    }

    /// Tokens of the body's active statements, lazily, in source order.
    pub fn active_tokens(&self) -> impl Iterator<Item = SyntaxToken<'t>> + 't {
        let ranges: SmallVec<[Span; 2]> = match self {
            MemberBody::InstanceConstructor(b) => b.active_token_ranges(),
            MemberBody::TopLevel(b) => b.active_token_ranges(),
            MemberBody::PrimaryConstructor(b) => smallvec![b.initializer_active_span()],
            _ => smallvec![self.envelope()],
        };
        self.encompassing_ancestor()
            .descendant_tokens()
            .filter(move |t| !t.is_missing() && ranges.iter().any(|r| r.contains_span(t.span())))
    }

    pub fn captured_variables(&self, model: &dyn SemanticModel) -> Vec<Symbol> {
        match self {
            MemberBody::Simple(b) => b.captured_variables(model),
            MemberBody::FieldWithInitializer(b) => b.captured_variables(model),
            MemberBody::PropertyWithInitializer(b) => b.captured_variables(model),
            MemberBody::InstanceConstructor(b) => b.captured_variables(model),
            MemberBody::PrimaryConstructor(b) => b.captured_variables(model),
            MemberBody::Accessor(b) => b.captured_variables(model),
            MemberBody::TopLevel(b) => b.captured_variables(model),
            MemberBody::CopyConstructor(_) => Vec::new(),
        }
    }

    pub fn state_machine_info(&self) -> StateMachineInfo<'t> {
        match self {
            MemberBody::Simple(b) => b.state_machine_info(),
            MemberBody::FieldWithInitializer(b) => b.state_machine_info(),
            MemberBody::PropertyWithInitializer(b) => b.state_machine_info(),
            MemberBody::InstanceConstructor(b) => b.state_machine_info(),
            MemberBody::Accessor(b) => b.state_machine_info(),
            MemberBody::TopLevel(b) => b.state_machine_info(),
            MemberBody::CopyConstructor(_) | MemberBody::PrimaryConstructor(_) => {
                StateMachineInfo::default()
            }
        }
    }

    pub fn match_root(&self) -> Option<SyntaxNode<'t>> {
        match self {
            MemberBody::Simple(b) => Some(b.match_root()),
            MemberBody::FieldWithInitializer(b) => b.match_root(),
            MemberBody::PropertyWithInitializer(b) => b.match_root(),
            MemberBody::InstanceConstructor(b) => Some(b.match_root()),
            MemberBody::PrimaryConstructor(b) => b.match_root(),
            MemberBody::Accessor(b) => b.match_root(),
            MemberBody::TopLevel(b) => Some(b.match_root()),
            MemberBody::CopyConstructor(_) => None,
        }
    }

    /// Returns `true` for spans inside the envelope that belong to another
    /// body sharing it.
    pub fn is_excluded_active_statement_span_within_envelope(&self, span: Span) -> bool {
        match self {
            MemberBody::PrimaryConstructor(b) => {
                b.is_excluded_active_statement_span_within_envelope(span)
            }
            MemberBody::TopLevel(b) => b.is_excluded_active_statement_span_within_envelope(span),
            _ => false,
        }
    }

    /// The old statement whose active span starts at `span`, and its
    /// counterpart at the same position in `partner`.
    pub fn find_statement_and_partner<'n>(
        &self,
        span: Span,
        partner: Option<&MemberBody<'n>>,
    ) -> FoundStatement<'t, 'n> {
        macro_rules! same_family {
            ($variant:ident) => {
                partner.map(|p| match p {
                    MemberBody::$variant(p) => p,
                    other => mismatched(self, other),
                })
            };
        }
        match self {
            MemberBody::Simple(b) => b.find_statement_and_partner(span, same_family!(Simple)),
            MemberBody::FieldWithInitializer(b) => {
                b.find_statement_and_partner(span, same_family!(FieldWithInitializer))
            }
            MemberBody::PropertyWithInitializer(b) => {
                b.find_statement_and_partner(span, same_family!(PropertyWithInitializer))
            }
            MemberBody::InstanceConstructor(b) => {
                b.find_statement_and_partner(span, same_family!(InstanceConstructor))
            }
            MemberBody::CopyConstructor(b) => {
                b.find_statement_and_partner(same_family!(CopyConstructor))
            }
            MemberBody::PrimaryConstructor(b) => {
                b.find_statement_and_partner(span, same_family!(PrimaryConstructor))
            }
            MemberBody::Accessor(b) => b.find_statement_and_partner(span, same_family!(Accessor)),
            MemberBody::TopLevel(b) => b.find_statement_and_partner(span, same_family!(TopLevel)),
        }
    }

    /// The statement in `new` corresponding to `old_statement`.
    ///
    /// # Panics
    ///
    /// When `new` belongs to a different body family.
    pub fn try_match_active_statement<'n>(
        &self,
        new: &MemberBody<'n>,
        old_statement: SyntaxNode<'t>,
        part: StatementPart,
        body_match: Option<&Match<'t, 'n>>,
    ) -> Option<(SyntaxNode<'n>, StatementPart)> {
        let result = match (self, new) {
            (MemberBody::Simple(o), MemberBody::Simple(n)) => {
                o.try_match_active_statement(n, old_statement, part, body_match)
            }
            (MemberBody::FieldWithInitializer(o), MemberBody::FieldWithInitializer(n)) => {
                o.try_match_active_statement(n, old_statement, part, body_match)
            }
            (MemberBody::PropertyWithInitializer(o), MemberBody::PropertyWithInitializer(n)) => {
                o.try_match_active_statement(n, old_statement, part, body_match)
            }
            (MemberBody::InstanceConstructor(o), MemberBody::InstanceConstructor(n)) => {
                o.try_match_active_statement(n, old_statement, part, body_match)
            }
            (MemberBody::CopyConstructor(o), MemberBody::CopyConstructor(n)) => {
                o.try_match_active_statement(n, old_statement)
            }
            (MemberBody::PrimaryConstructor(o), MemberBody::PrimaryConstructor(n)) => {
                o.try_match_active_statement(n, old_statement, part, body_match)
            }
            (MemberBody::Accessor(o), MemberBody::Accessor(n)) => {
                o.try_match_active_statement(n, old_statement, part, body_match)
            }
            (MemberBody::TopLevel(o), MemberBody::TopLevel(n)) => {
                o.try_match_active_statement(n, old_statement, part, body_match)
            }
            (old, new) => mismatched(old, new),
        };
        tracing::trace!(
            body = self.kind_name(),
            ?old_statement,
            new_statement = ?result.map(|(n, _)| n),
            "try_match_active_statement"
        );
        result
    }

    pub fn is_syntax_equivalent_to(&self, other: &MemberBody<'_>) -> bool {
        roots_equivalent(&self.root_nodes(), &other.root_nodes())
    }
}

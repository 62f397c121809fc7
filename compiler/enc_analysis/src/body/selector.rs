//! Body-kind selection from declaration syntax.

use enc_ir::{SyntaxKind, SyntaxNode, TokenKind};

use super::{
    CopyConstructorDeclarationBody, ExplicitAutoPropertyAccessorDeclarationBody,
    FieldWithInitializerDeclarationBody, InstanceConstructorDeclarationBody,
    InstanceConstructorWithExplicitInitializerDeclarationBody,
    InstanceConstructorWithImplicitInitializerDeclarationBody, MemberBody,
    PrimaryConstructorDeclarationBody, PrimaryConstructorWithExplicitInitializerDeclarationBody,
    PrimaryConstructorWithImplicitInitializerDeclarationBody,
    PropertyOrIndexerAccessorDeclarationBody,
    PropertyOrIndexerAccessorWithExplicitBodyDeclarationBody, PropertyWithInitializerDeclarationBody,
    RecordParameterDeclarationBody, SimpleMemberBody, TopLevelCodeDeclarationBody,
};
use crate::syntax;

impl<'t> MemberBody<'t> {
    /// Body of a declaration node, or `None` when it has no executable
    /// content (abstract members, fields without initializer, constants).
    ///
    /// | node | body |
    /// |---|---|
    /// | method, static constructor | simple |
    /// | instance constructor | implicit or explicit initializer |
    /// | field declarator with initializer | field initializer |
    /// | property with `= expr;` | property initializer |
    /// | property/indexer with `=> expr;` | accessor with explicit body |
    /// | accessor | explicit body or auto accessor |
    /// | positional record parameter | record parameter |
    /// | type declaration with parameter list | primary constructor |
    /// | compilation unit with global statements | top-level code |
    pub fn from_declaration(node: SyntaxNode<'t>) -> Option<Self> {
        let body = match node.kind() {
            SyntaxKind::MethodDeclaration => {
                let body = syntax::block_or_arrow_expression(node)?;
                MemberBody::Simple(SimpleMemberBody::new(node, body))
            }
            SyntaxKind::ConstructorDeclaration => constructor_body(node)?,
            SyntaxKind::VariableDeclarator => field_body(node)?,
            SyntaxKind::PropertyDeclaration => {
                if let Some(value) = syntax::initializer_value(node) {
                    MemberBody::PropertyWithInitializer(PropertyWithInitializerDeclarationBody::new(
                        node, value,
                    ))
                } else {
                    expression_bodied_accessor(node)?
                }
            }
            SyntaxKind::IndexerDeclaration => expression_bodied_accessor(node)?,
            kind if kind.is_accessor() => {
                let accessor = match syntax::block_or_arrow_expression(node) {
                    Some(body) => PropertyOrIndexerAccessorDeclarationBody::ExplicitBody(
                        PropertyOrIndexerAccessorWithExplicitBodyDeclarationBody::new(node, body),
                    ),
                    None => PropertyOrIndexerAccessorDeclarationBody::Auto(
                        ExplicitAutoPropertyAccessorDeclarationBody::new(node),
                    ),
                };
                MemberBody::Accessor(accessor)
            }
            SyntaxKind::Parameter if is_record_parameter(node) => MemberBody::Accessor(
                PropertyOrIndexerAccessorDeclarationBody::RecordParameter(
                    RecordParameterDeclarationBody::new(node),
                ),
            ),
            kind if kind.is_type_declaration() => primary_constructor_body(node)?,
            SyntaxKind::CompilationUnit => {
                MemberBody::TopLevel(TopLevelCodeDeclarationBody::new(node)?)
            }
            _ => return None,
        };
        tracing::trace!(declaration = ?node, body = body.kind_name(), "selected body");
        Some(body)
    }

    /// Synthesized copy constructor of a record.
    pub fn copy_constructor(record: SyntaxNode<'t>) -> Option<Self> {
        matches!(
            record.kind(),
            SyntaxKind::RecordDeclaration | SyntaxKind::RecordStructDeclaration
        )
        .then(|| MemberBody::CopyConstructor(CopyConstructorDeclarationBody::new(record)))
    }
}

fn constructor_body(ctor: SyntaxNode<'_>) -> Option<MemberBody<'_>> {
    let body = syntax::block_or_arrow_expression(ctor)?;
    if ctor.has_child_token(TokenKind::Static) {
        return Some(MemberBody::Simple(SimpleMemberBody::new(ctor, body)));
    }
    let family = match ctor.child_node_where(|n| n.kind().is_constructor_initializer()) {
        Some(initializer) => InstanceConstructorDeclarationBody::ExplicitInitializer(
            InstanceConstructorWithExplicitInitializerDeclarationBody::new(ctor, initializer, body),
        ),
        None => InstanceConstructorDeclarationBody::ImplicitInitializer(
            InstanceConstructorWithImplicitInitializerDeclarationBody::new(ctor, body),
        ),
    };
    Some(MemberBody::InstanceConstructor(family))
}

fn field_body(declarator: SyntaxNode<'_>) -> Option<MemberBody<'_>> {
    let field = declarator
        .parent()
        .and_then(|declaration| declaration.parent())
        .filter(|f| f.kind() == SyntaxKind::FieldDeclaration)?;
    if field.has_child_token(TokenKind::Const) {
        return None;
    }
    let value = syntax::initializer_value(declarator)?;
    Some(MemberBody::FieldWithInitializer(
        FieldWithInitializerDeclarationBody::new(declarator, value),
    ))
}

fn expression_bodied_accessor(declaration: SyntaxNode<'_>) -> Option<MemberBody<'_>> {
    let body = declaration
        .child_node(SyntaxKind::ArrowExpressionClause)?
        .child_nodes()
        .next()?;
    Some(MemberBody::Accessor(
        PropertyOrIndexerAccessorDeclarationBody::ExplicitBody(
            PropertyOrIndexerAccessorWithExplicitBodyDeclarationBody::new(declaration, body),
        ),
    ))
}

fn is_record_parameter(parameter: SyntaxNode<'_>) -> bool {
    parameter
        .parent()
        .filter(|list| list.kind() == SyntaxKind::ParameterList)
        .and_then(|list| list.parent())
        .is_some_and(|owner| {
            matches!(
                owner.kind(),
                SyntaxKind::RecordDeclaration | SyntaxKind::RecordStructDeclaration
            )
        })
}

fn primary_constructor_body(type_decl: SyntaxNode<'_>) -> Option<MemberBody<'_>> {
    let parameter_list = type_decl.child_node(SyntaxKind::ParameterList)?;
    let base_type = type_decl
        .child_node(SyntaxKind::BaseList)
        .and_then(|list| list.child_node(SyntaxKind::PrimaryConstructorBaseType));
    let family = match base_type {
        Some(base_type) => PrimaryConstructorDeclarationBody::ExplicitInitializer(
            PrimaryConstructorWithExplicitInitializerDeclarationBody::new(type_decl, base_type),
        ),
        None => PrimaryConstructorDeclarationBody::ImplicitInitializer(
            PrimaryConstructorWithImplicitInitializerDeclarationBody::new(
                type_decl,
                parameter_list,
            ),
        ),
    };
    Some(MemberBody::PrimaryConstructor(family))
}

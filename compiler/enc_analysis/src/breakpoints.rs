//! Breakpoint spans.
//!
//! Each function returns the source span a debugger highlights for one kind
//! of active statement. Spans are built from non-missing tokens only, so
//! malformed declarations degrade to the tokens that exist.

use enc_ir::{Span, SyntaxKind, SyntaxNode, SyntaxToken, TokenKind};

use crate::part::StatementPart;
use crate::syntax;

fn span_between(first: Option<SyntaxToken<'_>>, last_end: Option<u32>, fallback: Span) -> Span {
    match (first, last_end) {
        (Some(first), Some(end)) => Span::from_bounds(first.span().start, end),
        (Some(first), None) => first.span(),
        _ => fallback,
    }
}

fn present(token: Option<SyntaxToken<'_>>) -> Option<SyntaxToken<'_>> {
    token.filter(|t| !t.is_missing())
}

/// `get;` including modifiers and the semicolon.
pub fn auto_property_accessor_span(accessor: SyntaxNode<'_>) -> Span {
    accessor.span()
}

/// Constructor header: modifiers through the parameter list.
pub fn constructor_declaration_span(ctor: SyntaxNode<'_>) -> Span {
    let end = ctor
        .child_node(SyntaxKind::ParameterList)
        .filter(|p| !p.is_missing())
        .map(|p| p.span().end);
    span_between(ctor.first_token(), end, ctor.span())
}

/// `this(...)`/`base(...)` without the leading colon.
pub fn constructor_initializer_span(initializer: SyntaxNode<'_>) -> Span {
    let keyword = present(
        initializer
            .child_tokens()
            .find(|t| matches!(t.kind(), TokenKind::This | TokenKind::Base)),
    );
    let end = initializer
        .child_node(SyntaxKind::ArgumentList)
        .filter(|a| !a.is_missing())
        .map(|a| a.span().end);
    span_between(keyword, end, initializer.span())
}

pub fn record_parameter_span(parameter: SyntaxNode<'_>) -> Span {
    parameter.span()
}

/// Name through parameter list of a type with a primary constructor.
pub fn implicit_primary_constructor_initializer_span(type_decl: SyntaxNode<'_>) -> Span {
    let end = primary_parameter_list_end(type_decl);
    span_between(present(syntax::type_name(type_decl)), end, type_decl.span())
}

/// Type keyword through parameter list.
pub fn primary_constructor_header_span(type_decl: SyntaxNode<'_>) -> Span {
    let end = primary_parameter_list_end(type_decl);
    span_between(present(syntax::type_keyword(type_decl)), end, type_decl.span())
}

fn primary_parameter_list_end(type_decl: SyntaxNode<'_>) -> Option<u32> {
    type_decl
        .child_node(SyntaxKind::ParameterList)
        .filter(|p| !p.is_missing())
        .map(|p| p.span().end)
}

/// `B(a)` in `class C(int a) : B(a)`.
pub fn explicit_primary_constructor_initializer_span(base_type: SyntaxNode<'_>) -> Span {
    base_type.span()
}

/// Synthesized record copy constructor: `record` keyword through the name.
pub fn copy_constructor_span(record: SyntaxNode<'_>) -> Span {
    let end = present(syntax::type_name(record)).map(|t| t.span().end);
    span_between(present(syntax::type_keyword(record)), end, record.span())
}

/// Span of one declarator of a field, local declaration or `for`
/// initializer.
///
/// A sole declarator covers the whole declaration. Otherwise the first one
/// starts at the modifiers/type, the last one runs through the semicolon and
/// the ones in between cover just themselves.
pub fn variable_declarator_span(declarator: SyntaxNode<'_>) -> Span {
    let Some(declaration) = declarator.parent() else {
        return declarator.span();
    };
    let holder = declaration
        .parent()
        .filter(|h| h.kind() != SyntaxKind::ForStatement);
    let start = holder
        .and_then(|h| h.first_token())
        .or_else(|| declaration.first_token());
    let semicolon_end = present(holder.and_then(|h| h.child_token(TokenKind::Semicolon)))
        .map(|t| t.span().end);

    let all: Vec<_> = syntax::declarators(declaration).collect();
    let is_first = all.first() == Some(&declarator);
    let is_last = all.last() == Some(&declarator);
    let own_end = declarator.span().end;
    match (is_first, is_last) {
        (true, true) => span_between(start, semicolon_end.or(Some(own_end)), declarator.span()),
        (true, false) => span_between(start, Some(own_end), declarator.span()),
        (false, true) => Span::from_bounds(
            declarator.span().start,
            semicolon_end.unwrap_or(own_end),
        ),
        (false, false) => declarator.span(),
    }
}

/// Span of keyword through closing parenthesis of `if`/`while`/`for`.
fn header_span(statement: SyntaxNode<'_>) -> Span {
    let end = present(statement.child_token(TokenKind::CloseParen)).map(|t| t.span().end);
    span_between(statement.first_token(), end, statement.span())
}

/// Source span of an active statement (or of one part of it).
///
/// Returns `None` when the statement has no source representation (a
/// missing node, an absent brace, a property without initializer).
pub fn try_get_active_span(statement: SyntaxNode<'_>, part: StatementPart) -> Option<Span> {
    if statement.is_missing() {
        return None;
    }
    let span = match statement.kind() {
        SyntaxKind::Block => {
            let brace = if part == StatementPart::CloseBrace {
                TokenKind::CloseBrace
            } else {
                TokenKind::OpenBrace
            };
            present(statement.child_token(brace))?.span()
        }
        SyntaxKind::ForEachStatement => foreach_part_span(statement, part)?,
        SyntaxKind::DoStatement => {
            let keyword = present(statement.child_token(TokenKind::While))?;
            let end = present(statement.child_token(TokenKind::Semicolon))
                .or_else(|| present(statement.child_token(TokenKind::CloseParen)))
                .map(|t| t.span().end);
            span_between(Some(keyword), end, statement.span())
        }
        SyntaxKind::IfStatement | SyntaxKind::WhileStatement | SyntaxKind::ForStatement => {
            header_span(statement)
        }
        SyntaxKind::PropertyDeclaration => syntax::initializer_value(statement)?.span(),
        SyntaxKind::VariableDeclaration => {
            variable_declarator_span(syntax::declarators(statement).next()?)
        }
        SyntaxKind::VariableDeclarator => variable_declarator_span(statement),
        SyntaxKind::ConstructorDeclaration => constructor_declaration_span(statement),
        SyntaxKind::ThisConstructorInitializer | SyntaxKind::BaseConstructorInitializer => {
            constructor_initializer_span(statement)
        }
        SyntaxKind::Parameter => record_parameter_span(statement),
        SyntaxKind::ParameterList => {
            let type_decl = statement
                .parent()
                .filter(|p| p.kind().is_type_declaration())?;
            implicit_primary_constructor_initializer_span(type_decl)
        }
        SyntaxKind::PrimaryConstructorBaseType => {
            explicit_primary_constructor_initializer_span(statement)
        }
        SyntaxKind::RecordDeclaration | SyntaxKind::RecordStructDeclaration => {
            copy_constructor_span(statement)
        }
        kind if kind.is_accessor() => auto_property_accessor_span(statement),
        SyntaxKind::LocalFunctionStatement
        | SyntaxKind::SimpleLambdaExpression
        | SyntaxKind::ParenthesizedLambdaExpression => return None,
        kind if kind.is_expression() && !syntax::is_lambda_body(statement) => {
            enclosing_expression_statement(statement).map_or(statement.span(), |s| s.span())
        }
        _ => statement.span(),
    };
    Some(span)
}

/// The expression statement an expression begins, e.g. `await F();` for
/// `await F()`.
fn enclosing_expression_statement(expression: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let start = expression.span().start;
    expression
        .ancestors()
        .find(|a| !a.kind().is_expression())
        .filter(|a| a.kind() == SyntaxKind::ExpressionStatement && a.span().start == start)
}

fn foreach_part_span(foreach: SyntaxNode<'_>, part: StatementPart) -> Option<Span> {
    match part {
        StatementPart::VariableDeclaration => {
            let ty = foreach.child_node(SyntaxKind::Type)?;
            let name = present(
                foreach
                    .child_tokens()
                    .find(|t| t.kind().is_contextual_identifier()),
            );
            Some(span_between(
                ty.first_token(),
                name.map(|n| n.span().end),
                ty.span(),
            ))
        }
        StatementPart::In => Some(present(foreach.child_token(TokenKind::In))?.span()),
        StatementPart::Expression => foreach
            .child_nodes()
            .find(|n| n.kind().is_expression())
            .filter(|e| !e.is_missing())
            .map(|e| e.span()),
        _ => Some(present(foreach.child_token(TokenKind::Foreach))?.span()),
    }
}

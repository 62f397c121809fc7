#![allow(clippy::unwrap_used, clippy::expect_used)]

use enc_ir::{SyntaxKind, SyntaxTree};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{body, find, parse, span_of};

fn method<'t>(tree: &'t SyntaxTree) -> MemberBody<'t> {
    body(tree, SyntaxKind::MethodDeclaration, "")
}

/// Text of the new span `needle` maps to, or `None` when it is unmapped.
fn mapped_text<'n>(old: &SyntaxTree, new: &'n SyntaxTree, needle: &str) -> Option<&'n str> {
    let mapped = map_active_statement(&method(old), &method(new), span_of(old, needle))
        .unwrap()
        .mapped?;
    Some(new.text_of(mapped.span?))
}

#[test]
fn test_unedited_body_maps_to_itself() {
    let source = "class C { async Task M() {
        int a = 1, b = 2;
        if (a > b) { F(a); }
        while (b < 3) b++;
        await G();
        Func<int, int> f = x => x + a;
        return;
    } }";
    let old = parse(source);
    let new = parse(source);
    let old_body = method(&old);
    let new_body = method(&new);
    let statements = old_body.root_nodes()[0].descendants().filter(|n| {
        matches!(
            n.kind(),
            SyntaxKind::ExpressionStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::VariableDeclarator
        ) || syntax::is_lambda_body(*n)
    });
    let mut count = 0;
    for statement in statements {
        let span = try_get_active_span(statement, StatementPart::None).unwrap();
        let mapped = map_active_statement(&old_body, &new_body, span)
            .unwrap()
            .mapped
            .unwrap();
        assert_eq!(mapped.span, Some(span), "{statement:?}");
        assert!(std::ptr::eq(mapped.statement.tree(), &new));
        count += 1;
    }
    assert_eq!(count, 10);
}

#[test]
fn test_braces_map_to_braces() {
    let source = "class C { void M() { F(); } }";
    let old = parse(source);
    let new = parse("class C { void M() { G(); F(); } }");
    let old_body = method(&old);
    let block = old_body.root_nodes()[0];
    let close = Span::point(block.span().end - 1);
    let mapped = map_active_statement(&old_body, &method(&new), close)
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(mapped.part, StatementPart::CloseBrace);
    assert_eq!(new.text_of(mapped.span.unwrap()), "}");
    assert_eq!(
        mapped.span.unwrap().end,
        u32::try_from(new.source().len()).unwrap() - 2
    );
}

#[test]
fn test_deleted_statement_is_unmapped() {
    let old = parse("class C { void M() { A(); B(); C(); } }");
    let new = parse("class C { void M() { A(); C(); } }");
    assert_eq!(mapped_text(&old, &new, "C();"), Some("C();"));
    assert_eq!(mapped_text(&old, &new, "A();"), Some("A();"));
    assert_eq!(mapped_text(&old, &new, "B();"), None);
}

#[test]
fn test_updated_statement_follows_its_edit() {
    let old = parse("class C { void M() { A(); Log(\"x\", 1); return; } }");
    let new = parse("class C { void M() { A(); Log(\"x\", 2); return; } }");
    assert_eq!(mapped_text(&old, &new, "Log"), Some("Log(\"x\", 2);"));
}

#[test]
fn test_statement_in_lambda_maps_through_lambda_match() {
    let old = parse("class C { void M() { F(); G(x => { H(); }); } }");
    let new = parse("class C { void M() { G(x => { K(); H(); }); } }");
    assert_eq!(mapped_text(&old, &new, "H();"), Some("H();"));
}

#[test]
fn test_statement_in_nested_lambdas() {
    let old = parse("class C { void M() { G(x => H(y => { I(y); })); } }");
    let new = parse("class C { void M() { A(); G(x => H(y => { J(); I(y); })); } }");
    assert_eq!(mapped_text(&old, &new, "I(y);"), Some("I(y);"));
}

#[test]
fn test_deleted_lambda_leaves_statement_unmapped() {
    let old = parse("class C { void M() { G(x => { H(); }); } }");
    let new = parse("class C { void M() { H(); } }");
    assert_eq!(mapped_text(&old, &new, "H();"), None);
}

#[test]
fn test_span_outside_envelope_is_an_error() {
    let tree = parse("class C { void M() { F(); } void N() { G(); } }");
    let m = method(&tree);
    let span = span_of(&tree, "G();");
    let error = map_active_statement(&m, &m, span).unwrap_err();
    assert_eq!(
        error,
        AnalysisError::SpanOutsideEnvelope {
            span,
            envelope: m.envelope()
        }
    );
}

#[test]
fn test_excluded_span_is_an_error() {
    let tree = parse("record R(int A);");
    let primary = body(&tree, SyntaxKind::RecordDeclaration, "record");
    let span = span_of(&tree, "int A");
    assert_eq!(
        map_active_statement(&primary, &primary, span),
        Err(AnalysisError::ExcludedSpan { span })
    );
    let header = span_of(&tree, "R(int A)");
    let mapped = map_active_statement(&primary, &primary, header)
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(mapped.span, Some(header));
}

#[test]
fn test_constructor_gaining_an_initializer() {
    let old = parse("class C : B { C() { F(); } }");
    let new = parse("class C : B { C() : base(1) { F(); } }");
    let old_body = body(&old, SyntaxKind::ConstructorDeclaration, "C()");
    let new_body = body(&new, SyntaxKind::ConstructorDeclaration, "C()");
    let mapped = map_active_statement(&old_body, &new_body, span_of(&old, "C()"))
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(new.text_of(mapped.span.unwrap()), "base(1)");
    let mapped = map_active_statement(&old_body, &new_body, span_of(&old, "F();"))
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(new.text_of(mapped.span.unwrap()), "F();");
}

#[test]
fn test_auto_accessor_to_expression_body() {
    let old = parse("class C { int P { get; } }");
    let new = parse("class C { int P { get => x; } }");
    let old_body = body(&old, SyntaxKind::GetAccessorDeclaration, "get");
    let new_body = body(&new, SyntaxKind::GetAccessorDeclaration, "get");
    let mapped = map_active_statement(&old_body, &new_body, span_of(&old, "get;"))
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(new.text_of(mapped.span.unwrap()), "x");
}

#[test]
fn test_field_initializer_maps_declarator() {
    let old = parse("class C { int a = 1, b = F(); }");
    let new = parse("class C { int a = 1, b = G(); }");
    let old_body = body(&old, SyntaxKind::VariableDeclarator, "b");
    let new_body = body(&new, SyntaxKind::VariableDeclarator, "b");
    let mapped = map_active_statement(&old_body, &new_body, span_of(&old, "b = F();"))
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(new.text_of(mapped.span.unwrap()), "b = G();");
}

#[test]
fn test_top_level_statements() {
    let old = parse("A();\nB();\nC();");
    let new = parse("A();\nC();");
    let old_body = MemberBody::from_declaration(old.root()).unwrap();
    let new_body = MemberBody::from_declaration(new.root()).unwrap();
    let mapped = map_active_statement(&old_body, &new_body, span_of(&old, "C();"))
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(new.text_of(mapped.span.unwrap()), "C();");
    assert_eq!(
        map_active_statement(&old_body, &new_body, span_of(&old, "B();"))
            .unwrap()
            .mapped,
        None
    );
}

#[test]
fn test_span_between_global_statements_is_excluded() {
    let tree = parse("F(0);\nclass C { void M() { S(); } }\nG(1);");
    let top = MemberBody::from_declaration(tree.root()).unwrap();
    let span = span_of(&tree, "S();");
    assert!(top.envelope().contains_span(span));
    assert_eq!(
        map_active_statement(&top, &top, span),
        Err(AnalysisError::ExcludedSpan { span })
    );
    let mapped = map_active_statement(&top, &top, span_of(&tree, "G(1);"))
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(tree.text_of(mapped.span.unwrap()), "G(1);");
}

#[test]
fn test_awaits_resolve_through_the_body_match() {
    let old = parse("class C { async Task M() { await A(); await B(); } }");
    let new = parse("class C { async Task M() { await B(); await A(); } }");
    let old_body = method(&old);
    let new_body = method(&new);
    let matching = compute_body_match(
        &DeclarationBody::from(old_body.clone()),
        &DeclarationBody::from(new_body.clone()),
        &[],
        true,
    )
    .matching
    .unwrap();
    let old_a = find(&old, SyntaxKind::AwaitExpression, "await A");

    let mapping = map_active_statement(&old_body, &new_body, span_of(&old, "await A()")).unwrap();
    let mapped = mapping.mapped.unwrap();
    assert_eq!(Some(mapped.statement), matching.new_node(old_a));
    assert_eq!(new.text_of(mapped.span.unwrap()), "await B();");
    assert!(mapping.state_machine_edits.is_empty());
}

#[test]
fn test_mapping_reports_deleted_suspension_point() {
    let old = parse("class C { async Task M() { await A(); F(); } }");
    let new = parse("class C { async Task M() { F(); } }");
    let mapping = map_active_statement(&method(&old), &method(&new), span_of(&old, "F();")).unwrap();
    assert_eq!(new.text_of(mapping.mapped.unwrap().span.unwrap()), "F();");
    assert_eq!(
        mapping.state_machine_edits,
        [StateMachineEdit::SuspensionPointDeleted {
            old: span_of(&old, "await A()")
        }]
    );
}

#[test]
fn test_mapping_collects_edits_of_enclosing_lambdas() {
    let old = parse("class C { void M() { G(async () => { await A(); F(); }); } }");
    let new = parse("class C { void M() { G(async () => { F(); }); } }");
    let mapping = map_active_statement(&method(&old), &method(&new), span_of(&old, "F();")).unwrap();
    assert_eq!(new.text_of(mapping.mapped.unwrap().span.unwrap()), "F();");
    assert_eq!(
        mapping.state_machine_edits,
        [StateMachineEdit::SuspensionPointDeleted {
            old: span_of(&old, "await A()")
        }]
    );
}

#[test]
fn test_body_match_reports_state_machine_conversion() {
    let old = parse("class C { void M() { F(); } }");
    let new = parse("class C { async void M() { F(); } }");
    let old_body = DeclarationBody::from(method(&old));
    let new_body = DeclarationBody::from(method(&new));
    let result = compute_body_match(&old_body, &new_body, &[], true);
    assert!(result.matching.is_some());
    assert_eq!(
        result.state_machine_edits,
        [StateMachineEdit::UpdatingToStateMachineAroundActiveStatement {
            new: new_body.envelope()
        }]
    );
    let quiet = compute_body_match(&old_body, &new_body, &[], false);
    assert!(quiet.state_machine_edits.is_empty());
}

#[test]
fn test_body_match_pairs_awaits_first() {
    let old = parse("class C { async void M() { await A(); await B(); } }");
    let new = parse("class C { async void M() { await B(); await A(); } }");
    let old_body = DeclarationBody::from(method(&old));
    let new_body = DeclarationBody::from(method(&new));
    let matching = compute_body_match(&old_body, &new_body, &[], false)
        .matching
        .unwrap();
    let old_a = find(&old, SyntaxKind::AwaitExpression, "await A");
    let new_b = find(&new, SyntaxKind::AwaitExpression, "await B");
    assert_eq!(matching.new_node(old_a), Some(new_b));
}

#[test]
fn test_parallel_mapping_preserves_order() {
    let old = parse("class C { void M() { A(); B(); } void N() { C(); D(); } }");
    let new = parse("class C { void M() { B(); } void N() { D(); C(); } }");
    let edits = vec![
        MemberEdit {
            old: body(&old, SyntaxKind::MethodDeclaration, "void M"),
            new: body(&new, SyntaxKind::MethodDeclaration, "void M"),
            active_statements: vec![span_of(&old, "A();"), span_of(&old, "B();")],
        },
        MemberEdit {
            old: body(&old, SyntaxKind::MethodDeclaration, "void N"),
            new: body(&new, SyntaxKind::MethodDeclaration, "void N"),
            active_statements: vec![span_of(&old, "C();"), span_of(&old, "A();")],
        },
    ];
    let results = map_active_statements(&edits);
    let texts: Vec<Vec<_>> = results
        .iter()
        .map(|member| {
            member
                .iter()
                .map(|r| match r {
                    Ok(mapping) => Ok(mapping
                        .mapped
                        .and_then(|m| m.span)
                        .map(|s| new.text_of(s))),
                    Err(e) => Err(e.clone()),
                })
                .collect()
        })
        .collect();
    let expected: [Result<Option<&str>, AnalysisError>; 2] = [Ok(None), Ok(Some("B();"))];
    assert_eq!(texts[0], expected);
    assert_eq!(texts[1][0], Ok(Some("C();")));
    assert!(matches!(
        texts[1][1],
        Err(AnalysisError::SpanOutsideEnvelope { .. })
    ));
}

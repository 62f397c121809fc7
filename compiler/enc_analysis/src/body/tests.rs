#![allow(clippy::unwrap_used, clippy::expect_used)]

use enc_bind::SemanticInfo;
use enc_ir::{SyntaxKind, SyntaxTree};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{body, find, parse, span_of, text};

fn envelope_text<'t>(tree: &'t SyntaxTree, body: &MemberBody<'t>) -> &'t str {
    tree.text_of(body.envelope())
}

#[test]
fn test_selects_body_kinds() {
    let tree = parse(
        "class C : B {
            const int K = 1;
            int f;
            int g = 2;
            int P { get; set; } = 3;
            int Q => 4;
            int R { get { return 5; } }
            static C() { }
            C() { }
            C(int a) : base(a) { }
            void M() { }
        }",
    );
    let kind_of = |kind, prefix| {
        MemberBody::from_declaration(find(&tree, kind, prefix)).map(|b| b.kind_name())
    };
    assert_eq!(kind_of(SyntaxKind::VariableDeclarator, "K"), None);
    assert_eq!(kind_of(SyntaxKind::VariableDeclarator, "f"), None);
    assert_eq!(kind_of(SyntaxKind::VariableDeclarator, "g"), Some("field initializer"));
    assert_eq!(
        kind_of(SyntaxKind::PropertyDeclaration, "int P"),
        Some("property initializer")
    );
    assert_eq!(kind_of(SyntaxKind::PropertyDeclaration, "int Q"), Some("accessor"));
    assert_eq!(kind_of(SyntaxKind::GetAccessorDeclaration, "get;"), Some("accessor"));
    assert_eq!(kind_of(SyntaxKind::GetAccessorDeclaration, "get {"), Some("accessor"));
    assert_eq!(kind_of(SyntaxKind::ConstructorDeclaration, "static"), Some("simple member"));
    assert_eq!(
        kind_of(SyntaxKind::ConstructorDeclaration, "C()"),
        Some("instance constructor")
    );
    assert_eq!(kind_of(SyntaxKind::MethodDeclaration, "void M"), Some("simple member"));
    assert_eq!(kind_of(SyntaxKind::ClassDeclaration, "class"), None);
}

#[test]
fn test_selects_record_and_top_level_bodies() {
    let tree = parse("F();\nrecord R(int A) : B(A);\nG();");
    let record = find(&tree, SyntaxKind::RecordDeclaration, "record");
    let primary = MemberBody::from_declaration(record).unwrap();
    assert!(matches!(
        primary,
        MemberBody::PrimaryConstructor(PrimaryConstructorDeclarationBody::ExplicitInitializer(_))
    ));
    let parameter = body(&tree, SyntaxKind::Parameter, "int A");
    assert!(matches!(
        parameter,
        MemberBody::Accessor(PropertyOrIndexerAccessorDeclarationBody::RecordParameter(_))
    ));
    assert!(MemberBody::copy_constructor(record).is_some());

    let top_level = MemberBody::from_declaration(tree.root()).unwrap();
    assert_eq!(top_level.kind_name(), "top-level code");
    assert_eq!(top_level.root_nodes().len(), 2);

    let no_globals = parse("class C { }");
    assert!(MemberBody::from_declaration(no_globals.root()).is_none());
}

#[test]
fn test_constructor_envelopes() {
    let tree = parse("class C : B { public C(int a) : base(a) { F(); } public C() { G(); } }");
    let explicit = body(&tree, SyntaxKind::ConstructorDeclaration, "public C(int a)");
    assert_eq!(envelope_text(&tree, &explicit), "base(a) { F(); }");
    let implicit = body(&tree, SyntaxKind::ConstructorDeclaration, "public C()");
    assert_eq!(envelope_text(&tree, &implicit), "public C() { G(); }");

    let tokens: Vec<_> = explicit.active_tokens().map(|t| t.text()).collect();
    assert_eq!(
        tokens,
        ["base", "(", "a", ")", "{", "F", "(", ")", ";", "}"]
    );
}

#[test]
fn test_initializer_envelopes() {
    let tree = parse("class C { static int a = 1, b = 2; int P { get; } = 5; }");
    let b = body(&tree, SyntaxKind::VariableDeclarator, "b");
    assert_eq!(envelope_text(&tree, &b), "b = 2;");
    assert_eq!(b.encompassing_ancestor().kind(), SyntaxKind::FieldDeclaration);
    let p = body(&tree, SyntaxKind::PropertyDeclaration, "int P");
    assert_eq!(envelope_text(&tree, &p), "5");
}

#[test]
fn test_top_level_envelope_spans_all_globals() {
    let tree = parse("var x = 1;\nclass C { }\nF(x);");
    let top = MemberBody::from_declaration(tree.root()).unwrap();
    assert_eq!(envelope_text(&tree, &top), "var x = 1;\nclass C { }\nF(x);");
    let tokens: Vec<_> = top.active_tokens().map(|t| t.text()).collect();
    assert!(!tokens.contains(&"class"));
}

#[test]
fn test_envelope_contains_root_statements() {
    let tree = parse(
        "class C {
            void M() { if (a) { F(); } return; }
            int P { get => 1; }
            C() { G(); }
        }",
    );
    let bodies = [
        body(&tree, SyntaxKind::MethodDeclaration, "void M"),
        body(&tree, SyntaxKind::GetAccessorDeclaration, "get"),
        body(&tree, SyntaxKind::ConstructorDeclaration, "C()"),
    ];
    for b in &bodies {
        let envelope = b.envelope();
        for root in b.root_nodes() {
            for node in root.descendants().filter(|n| crate::comparer::has_label(*n)) {
                let span = crate::breakpoints::try_get_active_span(node, StatementPart::None);
                if let Some(span) = span {
                    assert!(envelope.contains_span(span), "{node:?} outside {envelope:?}");
                }
            }
        }
    }
}

#[test]
fn test_explicit_constructor_captures_union() {
    let tree = parse(
        "class C : B { C(int a, int b) : base(() => a) { Func<int> f = () => b; } }",
    );
    let model = SemanticInfo::bind(&tree);
    let ctor = body(&tree, SyntaxKind::ConstructorDeclaration, "C(");
    let names: Vec<_> = ctor
        .captured_variables(&model)
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn test_primary_constructor_excludes_parameter_spans() {
    let tree = parse("record R(int A);");
    let primary = body(&tree, SyntaxKind::RecordDeclaration, "record");
    assert_eq!(envelope_text(&tree, &primary), "record R(int A)");
    assert!(primary.is_excluded_active_statement_span_within_envelope(span_of(&tree, "int A")));
    assert!(primary.is_excluded_active_statement_span_within_envelope(span_of(&tree, "record R")));
    assert!(!primary.is_excluded_active_statement_span_within_envelope(span_of(&tree, "R(int A)")));
}

#[test]
fn test_explicit_primary_constructor_excludes_spans_outside_base_type() {
    let tree = parse("class D(int p) : B(p), I { }");
    let primary = body(&tree, SyntaxKind::ClassDeclaration, "class");
    assert!(matches!(
        primary,
        MemberBody::PrimaryConstructor(PrimaryConstructorDeclarationBody::ExplicitInitializer(_))
    ));
    assert_eq!(envelope_text(&tree, &primary), "class D(int p) : B(p)");
    assert!(primary.is_excluded_active_statement_span_within_envelope(span_of(&tree, "class D")));
    assert!(primary.is_excluded_active_statement_span_within_envelope(span_of(&tree, "int p")));
    assert!(primary.is_excluded_active_statement_span_within_envelope(span_of(&tree, ": ")));
    assert!(!primary.is_excluded_active_statement_span_within_envelope(span_of(&tree, "B(p)")));
}

#[test]
fn test_explicit_primary_constructor_captures_base_arguments() {
    let tree = parse("class D(int p, int q) : B(() => p, q) { }");
    let model = SemanticInfo::bind(&tree);
    let primary = body(&tree, SyntaxKind::ClassDeclaration, "class");
    let names: Vec<_> = primary
        .captured_variables(&model)
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["p"]);
}

#[test]
fn test_statement_in_base_argument_lambda_maps_across_edit() {
    let old = parse("class D(int p) : B(x => { F(p); }) { }");
    let new = parse("class D(int p) : B(x => { G(); F(p); }) { }");
    let old_body = body(&old, SyntaxKind::ClassDeclaration, "class");
    let new_body = body(&new, SyntaxKind::ClassDeclaration, "class");

    let found = old_body.find_statement_and_partner(span_of(&old, "F(p);"), Some(&new_body));
    assert_eq!(found.statement.kind(), SyntaxKind::ExpressionStatement);

    let mapping =
        crate::map_active_statement(&old_body, &new_body, span_of(&old, "F(p);")).unwrap();
    let mapped = mapping.mapped.unwrap();
    assert_eq!(new.text_of(mapped.span.unwrap()), "F(p);");
    assert_eq!(mapped.statement.span(), span_of(&new, "F(p);"));
    assert!(mapping.state_machine_edits.is_empty());

    let initializer = crate::map_active_statement(&old_body, &new_body, span_of(&old, "B(x"))
        .unwrap()
        .mapped
        .unwrap();
    assert_eq!(initializer.statement.kind(), SyntaxKind::PrimaryConstructorBaseType);
}

#[test]
fn test_synthesized_and_auto_bodies_capture_nothing() {
    let tree = parse("record R(int A) { int P { get; } = A; }");
    let model = SemanticInfo::bind(&tree);
    let record = find(&tree, SyntaxKind::RecordDeclaration, "record");

    let copy = MemberBody::copy_constructor(record).unwrap();
    let primary = MemberBody::from_declaration(record).unwrap();
    assert!(matches!(
        primary,
        MemberBody::PrimaryConstructor(PrimaryConstructorDeclarationBody::ImplicitInitializer(_))
    ));
    let auto = body(&tree, SyntaxKind::GetAccessorDeclaration, "get;");
    let parameter = body(&tree, SyntaxKind::Parameter, "int A");
    for b in [copy, primary, auto, parameter] {
        assert!(b.captured_variables(&model).is_empty(), "{}", b.kind_name());
    }
}

#[test]
fn test_auto_accessor_gaining_a_body() {
    let old = parse("class C { int P { get; } }");
    let new = parse("class C { int P { get => x; } int Q { get { } } }");
    let old_body = body(&old, SyntaxKind::GetAccessorDeclaration, "get");
    let accessor = find(&old, SyntaxKind::GetAccessorDeclaration, "get");

    let arrow = body(&new, SyntaxKind::GetAccessorDeclaration, "get =>");
    let (statement, part) = old_body
        .try_match_active_statement(&arrow, accessor, StatementPart::None, None)
        .unwrap();
    assert_eq!(text(statement), "x");
    assert_eq!(part, StatementPart::None);

    let empty = body(&new, SyntaxKind::GetAccessorDeclaration, "get {");
    let (statement, part) = old_body
        .try_match_active_statement(&empty, accessor, StatementPart::None, None)
        .unwrap();
    assert_eq!(statement.kind(), SyntaxKind::Block);
    assert_eq!(part, StatementPart::OpenBrace);
}

#[test]
fn test_accessor_losing_its_body() {
    let old = parse("class C { int P { get { return x; } } }");
    let new = parse("class C { int P { get; } }");
    let old_body = body(&old, SyntaxKind::GetAccessorDeclaration, "get");
    let new_body = body(&new, SyntaxKind::GetAccessorDeclaration, "get");
    let ret = find(&old, SyntaxKind::ReturnStatement, "return");
    let (statement, _) = old_body
        .try_match_active_statement(&new_body, ret, StatementPart::None, None)
        .unwrap();
    assert_eq!(text(statement), "get;");
}

#[test]
fn test_constructor_initializer_maps_across_shapes() {
    let old = parse("class C : B { C() { F(); } }");
    let new = parse("class C : B { C() : base(1) { F(); } }");
    let old_body = body(&old, SyntaxKind::ConstructorDeclaration, "C()");
    let new_body = body(&new, SyntaxKind::ConstructorDeclaration, "C()");
    let ctor = find(&old, SyntaxKind::ConstructorDeclaration, "C()");
    let (statement, part) = old_body
        .try_match_active_statement(&new_body, ctor, StatementPart::DefaultBaseConstructorCall, None)
        .unwrap();
    assert_eq!(statement.kind(), SyntaxKind::BaseConstructorInitializer);
    assert_eq!(part, StatementPart::None);

    let back = new_body
        .try_match_active_statement(&old_body, statement, StatementPart::None, None)
        .unwrap();
    assert_eq!(back, (ctor, StatementPart::DefaultBaseConstructorCall));
}

#[test]
fn test_state_machine_info_follows_declaration() {
    let tree = parse("class C { async Task M() { await F(); } IEnumerable<int> N() { yield return 1; } }");
    let m = body(&tree, SyntaxKind::MethodDeclaration, "async");
    assert!(m.state_machine_info().is_async());
    let n = body(&tree, SyntaxKind::MethodDeclaration, "IEnumerable");
    assert!(n.state_machine_info().is_iterator());
    assert!(!n.state_machine_info().is_async());
}

#[test]
fn test_syntax_equivalence_ignores_trivia() {
    let old = parse("class C { void M() { F(1); } }");
    let new = parse("class C {\n    void M()\n    {\n        F( 1 );\n    }\n}");
    let edited = parse("class C { void M() { F(2); } }");
    let old_body = body(&old, SyntaxKind::MethodDeclaration, "void");
    assert!(old_body.is_syntax_equivalent_to(&body(&new, SyntaxKind::MethodDeclaration, "void")));
    assert!(!old_body.is_syntax_equivalent_to(&body(&edited, SyntaxKind::MethodDeclaration, "void")));
}

#[test]
fn test_lambda_body_partner() {
    let old = parse("class C { void M() { F(x => x + 1); } }");
    let new = parse("class C { void M() { G(); F(x => x + 2); } }");
    let old_method: DeclarationBody<'_> = body(&old, SyntaxKind::MethodDeclaration, "void").into();
    let new_method: DeclarationBody<'_> = body(&new, SyntaxKind::MethodDeclaration, "void").into();
    let m = old_method.compute_single_root_match(&new_method, &[]).unwrap();

    let old_lambda =
        LambdaBody::from_lambda(find(&old, SyntaxKind::SimpleLambdaExpression, "x")).unwrap();
    let partner = old_lambda.try_get_partner_lambda_body(&m).unwrap();
    assert_eq!(text(partner.body()), "x + 2");
    assert_eq!(
        old_lambda.try_match_active_statement(&partner, old_lambda.body(), StatementPart::None, None),
        Some((partner.body(), StatementPart::None))
    );
}

#[test]
#[should_panic(expected = "cannot pair")]
fn test_mismatched_families_panic() {
    let tree = parse("class C { int f = 1; void M() { } }");
    let field = body(&tree, SyntaxKind::VariableDeclarator, "f");
    let method = body(&tree, SyntaxKind::MethodDeclaration, "void");
    let declarator = find(&tree, SyntaxKind::VariableDeclarator, "f");
    let _ = field.try_match_active_statement(&method, declarator, StatementPart::None, None);
}

#[test]
#[should_panic(expected = "cannot match")]
fn test_member_and_lambda_bodies_do_not_pair() {
    let tree = parse("class C { void M() { F(x => x); } }");
    let method: DeclarationBody<'_> = body(&tree, SyntaxKind::MethodDeclaration, "void").into();
    let lambda: DeclarationBody<'_> =
        LambdaBody::from_lambda(find(&tree, SyntaxKind::SimpleLambdaExpression, "x"))
            .unwrap()
            .into();
    let root = method.root_nodes()[0];
    let _ = method.try_match_active_statement(&lambda, root, StatementPart::None, None);
}

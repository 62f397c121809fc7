//! Property-based tests for statement matching.
//!
//! Generates method bodies from a small statement grammar and checks that
//! matching is deterministic, that unedited bodies map every active
//! statement to itself and that deleting one statement leaves the others
//! mapped.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use enc_analysis::breakpoints::try_get_active_span;
use enc_analysis::{map_active_statement, DeclarationBody, MemberBody, StatementPart};
use enc_ir::{Span, SyntaxKind, SyntaxTree};
use proptest::prelude::*;

// -- Code Generation Strategies --

fn callee_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "Call", "Log", "Run"]).prop_map(str::to_owned)
}

fn call_strategy() -> impl Strategy<Value = String> {
    (callee_strategy(), 0..4u8).prop_map(|(callee, arg)| format!("{callee}({arg});"))
}

fn statement_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        call_strategy(),
        (0..4u8).prop_map(|v| format!("x = {v};")),
        Just("return;".to_owned()),
        call_strategy().prop_map(|c| format!("F(() => {{ {c} }});")),
    ];
    leaf.prop_recursive(2, 12, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|body| format!("if (c) {{ {} }}", body.join(" "))),
            (prop::collection::vec(inner.clone(), 0..3), inner)
                .prop_map(|(body, other)| format!("while (c) {{ {} }} {other}", body.join(" "))),
        ]
    })
}

fn body_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(statement_strategy(), 1..6)
}

fn method(statements: &[String]) -> String {
    format!("class C {{ void M() {{ {} }} }}", statements.join(" "))
}

fn parse(source: &str) -> SyntaxTree {
    let output = enc_parse::parse(source);
    assert!(!output.has_errors(), "{source}: {:?}", output.errors);
    output.tree
}

fn method_body(tree: &SyntaxTree) -> MemberBody<'_> {
    let method = tree
        .root()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::MethodDeclaration)
        .unwrap();
    MemberBody::from_declaration(method).unwrap()
}

fn match_spans(old: &SyntaxTree, new: &SyntaxTree) -> Vec<(Span, Span)> {
    let old_body = DeclarationBody::from(method_body(old));
    let new_body = DeclarationBody::from(method_body(new));
    old_body
        .compute_single_root_match(&new_body, &[])
        .unwrap()
        .pairs()
        .into_iter()
        .map(|(o, n)| (o.span(), n.span()))
        .collect()
}

/// Spans of the expression statements outside lambdas, in source order.
fn call_spans(tree: &SyntaxTree) -> Vec<Span> {
    method_body(tree).root_nodes()[0]
        .descendants_pruned(|n| !enc_analysis::syntax::is_lambda(n))
        .filter(|n| n.kind() == SyntaxKind::ExpressionStatement)
        .map(|n| n.span())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn match_is_deterministic(old in body_strategy(), new in body_strategy()) {
        let old = parse(&method(&old));
        let new = parse(&method(&new));
        let first = match_spans(&old, &new);
        let second = match_spans(&old, &new);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn match_is_injective(old in body_strategy(), new in body_strategy()) {
        let old = parse(&method(&old));
        let new = parse(&method(&new));
        let pairs = match_spans(&old, &new);
        let mut news: Vec<_> = pairs.iter().map(|(_, n)| *n).collect();
        let count = news.len();
        news.sort_by_key(|s| (s.start, s.end));
        news.dedup();
        // Distinct nodes may share a span only through nesting, which
        // labeled statements never do.
        prop_assert_eq!(news.len(), count);
    }

    #[test]
    fn unedited_body_maps_to_itself(statements in body_strategy()) {
        let source = method(&statements);
        let old = parse(&source);
        let new = parse(&source);
        let old_body = method_body(&old);
        let new_body = method_body(&new);
        for span in call_spans(&old) {
            let mapped = map_active_statement(&old_body, &new_body, span).unwrap().mapped.unwrap();
            prop_assert_eq!(mapped.span, Some(span));
        }
    }

    #[test]
    fn deleting_a_unique_statement_keeps_the_rest(
        count in 2..6usize,
        deleted in 0..6usize,
    ) {
        let deleted = deleted % count;
        let statements: Vec<_> = (0..count).map(|i| format!("S{i}();")).collect();
        let kept: Vec<_> = statements
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != deleted)
            .map(|(_, s)| s.clone())
            .collect();
        let old = parse(&method(&statements));
        let new = parse(&method(&kept));
        let old_body = method_body(&old);
        let new_body = method_body(&new);
        for (i, span) in call_spans(&old).into_iter().enumerate() {
            let mapped = map_active_statement(&old_body, &new_body, span).unwrap().mapped;
            if i == deleted {
                prop_assert!(mapped.is_none());
            } else {
                let mapped = mapped.unwrap();
                prop_assert_eq!(new.text_of(mapped.span.unwrap()), old.text_of(span));
                prop_assert_eq!(mapped.part, StatementPart::None);
            }
        }
    }

    #[test]
    fn mapped_spans_are_breakpoint_spans(old in body_strategy(), new in body_strategy()) {
        let old = parse(&method(&old));
        let new = parse(&method(&new));
        let old_body = method_body(&old);
        let new_body = method_body(&new);
        for span in call_spans(&old) {
            if let Some(mapped) = map_active_statement(&old_body, &new_body, span).unwrap().mapped {
                prop_assert_eq!(mapped.span, try_get_active_span(mapped.statement, mapped.part));
                prop_assert!(new_body.envelope().contains_span(mapped.span.unwrap()));
            }
        }
    }
}

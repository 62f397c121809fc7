#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{SemanticInfo, SymbolKind};
use enc_ir::{SyntaxKind, SyntaxNode};
use pretty_assertions::assert_eq;

fn identifiers<'t>(info: &SemanticInfo<'t>, text: &str) -> Vec<SyntaxNode<'t>> {
    info.tree()
        .root()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::IdentifierName && n.text() == text)
        .collect()
}

#[test]
fn test_parameters_and_locals_resolve() {
    let out = enc_parse::parse("class C { int M(int a) { int b = a; return a + b + c; } }");
    let info = SemanticInfo::bind(&out.tree);

    let names: Vec<_> = info
        .symbols()
        .iter()
        .map(|s| (s.name.as_str(), s.kind))
        .collect();
    assert_eq!(
        names,
        vec![
            ("this", SymbolKind::This),
            ("a", SymbolKind::Parameter),
            ("b", SymbolKind::Local),
        ]
    );
    for a in identifiers(&info, "a") {
        assert_eq!(info.referenced_symbol(a).unwrap().name, "a");
    }
    // `c` is a field or unknown name.
    assert!(info.referenced_symbol(identifiers(&info, "c")[0]).is_none());
}

#[test]
fn test_shadowing_prefers_innermost() {
    let out = enc_parse::parse("class C { void M(int x) { F(x => x); } }");
    let info = SemanticInfo::bind(&out.tree);
    let uses = identifiers(&info, "x");
    assert_eq!(uses.len(), 1);
    let symbol = info.referenced_symbol(uses[0]).unwrap();
    // The lambda parameter, declared after the method parameter.
    assert_eq!(symbol.id, info.symbols()[2].id);
}

#[test]
fn test_member_access_name_is_not_a_variable() {
    let out = enc_parse::parse("class C { void M(int Length, string s) { F(s.Length); } }");
    let info = SemanticInfo::bind(&out.tree);
    let lengths = identifiers(&info, "Length");
    assert_eq!(lengths.len(), 1);
    assert!(info.referenced_symbol(lengths[0]).is_none());
}

#[test]
fn test_type_scope_is_a_boundary() {
    let out = enc_parse::parse("var q = 1;\nclass C { int M() => q; }");
    let info = SemanticInfo::bind(&out.tree);
    let q = identifiers(&info, "q");
    assert!(info.referenced_symbol(q[0]).is_none());
}

#[test]
fn test_primary_constructor_and_value_parameters() {
    let out = enc_parse::parse("class C(int p) { int P { set => F(value, p); } }");
    let info = SemanticInfo::bind(&out.tree);
    let value = identifiers(&info, "value");
    assert_eq!(
        info.referenced_symbol(value[0]).map(|s| s.kind),
        Some(SymbolKind::Parameter)
    );
    let p = identifiers(&info, "p");
    assert_eq!(info.referenced_symbol(p[0]).unwrap().name, "p");
}

#[test]
fn test_foreach_variable_scoped_to_body() {
    let out = enc_parse::parse("class C { void M(int[] xs) { foreach (var x in xs) Use(x); } }");
    let info = SemanticInfo::bind(&out.tree);
    let x = identifiers(&info, "x");
    assert_eq!(info.referenced_symbol(x[0]).unwrap().kind, SymbolKind::Local);
    let xs = identifiers(&info, "xs");
    assert_eq!(info.referenced_symbol(xs[0]).unwrap().kind, SymbolKind::Parameter);
}

#[test]
fn test_this_and_base_resolve_to_type() {
    let out = enc_parse::parse("class C : B { void M() { this.F(); base.G(); } }");
    let info = SemanticInfo::bind(&out.tree);
    let refs: Vec<_> = info
        .tree()
        .root()
        .descendants()
        .filter(|n| matches!(n.kind(), SyntaxKind::ThisExpression | SyntaxKind::BaseExpression))
        .map(|n| info.referenced_symbol(n).unwrap().kind)
        .collect();
    assert_eq!(refs, vec![SymbolKind::This, SymbolKind::This]);
}

use super::{first_of, parse_ok, sexp};
use enc_ir::{SyntaxKind, TokenKind};
use pretty_assertions::assert_eq;

#[test]
fn test_class_with_members() {
    let out = parse_ok(
        "class C {
            int a = 1, b;
            C() : base(1) { }
            void M(int x) => x;
            int P { get; set; } = 2;
            int this[int i] { get => i; }
        }",
    );
    let class = first_of(&out, SyntaxKind::ClassDeclaration);
    let members: Vec<_> = class.child_nodes().map(|n| n.kind()).collect();
    assert_eq!(
        members,
        vec![
            SyntaxKind::FieldDeclaration,
            SyntaxKind::ConstructorDeclaration,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::PropertyDeclaration,
            SyntaxKind::IndexerDeclaration,
        ]
    );
}

#[test]
fn test_field_shape() {
    let out = parse_ok("class C { public int a = 1, b; }");
    let field = first_of(&out, SyntaxKind::FieldDeclaration);
    assert_eq!(
        sexp(field),
        "(FieldDeclaration (VariableDeclaration Type \
         (VariableDeclarator (EqualsValueClause LiteralExpression)) VariableDeclarator))"
    );
    assert!(field.has_child_token(TokenKind::Public));
    assert!(field.has_child_token(TokenKind::Semicolon));
}

#[test]
fn test_constructor_initializers() {
    let out = parse_ok("class C { C(int x) : this(x, 1) { } C() { } }");
    let init = first_of(&out, SyntaxKind::ThisConstructorInitializer);
    assert_eq!(init.text(), ": this(x, 1)");
    assert_eq!(
        sexp(init),
        "(ThisConstructorInitializer (ArgumentList (Argument IdentifierName) (Argument LiteralExpression)))"
    );

    let out = parse_ok("class C { C() : base() => F(); }");
    let ctor = first_of(&out, SyntaxKind::ConstructorDeclaration);
    assert!(ctor.child_node(SyntaxKind::BaseConstructorInitializer).is_some());
    assert!(ctor.child_node(SyntaxKind::ArrowExpressionClause).is_some());
}

#[test]
fn test_records_and_primary_constructors() {
    let out = parse_ok("record R(int A, string B) : Base(A);");
    let record = first_of(&out, SyntaxKind::RecordDeclaration);
    assert_eq!(
        sexp(record),
        "(RecordDeclaration (ParameterList (Parameter Type) (Parameter Type)) \
         (BaseList (PrimaryConstructorBaseType Type (ArgumentList (Argument IdentifierName)))))"
    );

    let out = parse_ok("public record struct P(int X) { }");
    assert_eq!(
        out.tree.root().child_nodes().next().map(|n| n.kind()),
        Some(SyntaxKind::RecordStructDeclaration)
    );

    let out = parse_ok("class C(int a) : B, I { }");
    let bases: Vec<_> = first_of(&out, SyntaxKind::BaseList)
        .child_nodes()
        .map(|n| n.kind())
        .collect();
    assert_eq!(bases, vec![SyntaxKind::SimpleBaseType, SyntaxKind::SimpleBaseType]);
}

#[test]
fn test_accessor_shapes() {
    let out = parse_ok("class C { int P { get; init; } int Q { get { return 1; } set => x = value; } int R => 3; }");
    let kinds: Vec<_> = out
        .tree
        .root()
        .descendants()
        .filter(|n| n.kind().is_accessor())
        .map(|n| n.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::GetAccessorDeclaration,
            SyntaxKind::InitAccessorDeclaration,
            SyntaxKind::GetAccessorDeclaration,
            SyntaxKind::SetAccessorDeclaration,
        ]
    );
    let expression_bodied = out
        .tree
        .root()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::PropertyDeclaration)
        .nth(2)
        .unwrap();
    assert!(expression_bodied
        .child_node(SyntaxKind::ArrowExpressionClause)
        .is_some());
}

#[test]
fn test_generic_members_and_nested_types() {
    let out = parse_ok(
        "class Outer<T> { List<int> xs; T M<U>(U u) { return default1; } struct Inner { } }",
    );
    assert!(first_of(&out, SyntaxKind::TypeArgumentList).parent().is_some());
    assert_eq!(
        first_of(&out, SyntaxKind::StructDeclaration)
            .parent()
            .map(|p| p.kind()),
        Some(SyntaxKind::ClassDeclaration)
    );
}

#[test]
fn test_top_level_statements() {
    let out = parse_ok("var x = 1;\nConsole.WriteLine(x);\nclass C { }");
    let kinds: Vec<_> = out.tree.root().child_nodes().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::GlobalStatement,
            SyntaxKind::GlobalStatement,
            SyntaxKind::ClassDeclaration,
        ]
    );
}

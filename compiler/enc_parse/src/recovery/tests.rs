use super::*;

#[test]
fn test_token_set_empty() {
    let set = TokenSet::new();
    assert!(set.is_empty());
    assert!(!set.contains(TokenKind::Semicolon));
}

#[test]
fn test_token_set_with_and_union() {
    let a = TokenSet::new().with(TokenKind::If);
    let b = TokenSet::new().with(TokenKind::Else);
    let both = a.union(b);
    assert!(both.contains(TokenKind::If));
    assert!(both.contains(TokenKind::Else));
    assert!(!both.contains(TokenKind::While));
}

#[test]
fn test_predefined_sets() {
    assert!(MODIFIERS.contains(TokenKind::Async));
    assert!(!MODIFIERS.contains(TokenKind::Class));
    assert!(EXPR_START.contains(TokenKind::Await));
}

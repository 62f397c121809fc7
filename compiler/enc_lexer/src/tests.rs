use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        kinds("record R(int x) : B(x);"),
        vec![
            TokenKind::Record,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_identifier_prefix_of_keyword() {
    assert_eq!(
        kinds("getter record_x"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EndOfFile]
    );
}

#[test]
fn test_operators_longest_match() {
    assert_eq!(
        kinds("=> == = += ++ <="),
        vec![
            TokenKind::FatArrow,
            TokenKind::EqualsEquals,
            TokenKind::Equals,
            TokenKind::PlusEquals,
            TokenKind::PlusPlus,
            TokenKind::LessThanEquals,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_comments_are_dropped() {
    let out = lex("a // line\n/* block\n */ b");
    assert!(!out.has_errors());
    assert_eq!(out.tokens.len(), 3);
    assert_eq!(out.tokens[1].span, Span::new(23, 24));
}

#[test]
fn test_literals() {
    assert_eq!(
        kinds(r#"1 2.5 10L "s\"x""#),
        vec![
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::StringLiteral,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_unknown_input_is_reported_and_kept() {
    let out = lex("a # b");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(
        out.errors[0],
        LexError::UnrecognizedInput {
            text: "#".to_owned(),
            span: Span::new(2, 3)
        }
    );
    assert_eq!(out.tokens[1].kind, TokenKind::Unknown);
    assert_eq!(out.errors[0].to_string(), "unrecognized input \"#\" at 2..3");
}

#[test]
fn test_eof_span_is_point_at_end() {
    let out = lex("x  ");
    assert_eq!(out.tokens.last().map(|t| t.span), Some(Span::point(3)));
}

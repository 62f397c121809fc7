use super::*;

#[test]
fn test_expected_token_message() {
    let err = ParseError::ExpectedToken {
        expected: TokenKind::Semicolon,
        found: TokenKind::CloseBrace,
        span: Span::new(4, 5),
    };
    assert_eq!(err.to_string(), "expected `;`, found `}` at 4..5");
    assert_eq!(err.span(), Some(Span::new(4, 5)));
}

#[test]
fn test_expected_construct_message() {
    let err = ParseError::ExpectedConstruct {
        what: "expression",
        found: TokenKind::EndOfFile,
        span: Span::point(9),
    };
    assert_eq!(err.to_string(), "expected expression, found end of file at 9..9");
}

#[test]
fn test_lex_errors_are_transparent() {
    let lex = LexError::UnrecognizedInput {
        text: "#".to_owned(),
        span: Span::new(0, 1),
    };
    let err = ParseError::from(lex.clone());
    assert_eq!(err.to_string(), lex.to_string());
    assert_eq!(err.span(), Some(Span::new(0, 1)));
}

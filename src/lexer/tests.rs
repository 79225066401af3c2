//! Unit tests for the lexer module.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.sn".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase\n".to_string();
    let tokens = tokenize(source, Some("test.sn".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EndOfLine);
    assert_eq!(tokens.len(), 6);
}

#[test]
fn test_tokenize_booleans() {
    let tokens = tokenize("true false truely\n".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Boolean);
    assert_eq!(tokens[0].value, "true");
    assert_eq!(tokens[1].kind, TokenKind::Boolean);
    assert_eq!(tokens[1].value, "false");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_integers() {
    let tokens = tokenize("42 0 1234567\n".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "1234567");
}

#[test]
fn test_tokenize_strings_keep_quotes() {
    let source = r#""hello" "multiple words" """#.to_string() + "\n";
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "\"hello\"");
    assert_eq!(tokens[1].value, "\"multiple words\"");
    assert_eq!(tokens[2].value, "\"\"");
    assert_eq!(tokens[3].kind, TokenKind::EndOfLine);
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) = ,\n"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Assignment,
            TokenKind::Comma,
            TokenKind::EndOfLine,
        ]
    );
}

#[test]
fn test_tokenize_end_of_line_per_line() {
    assert_eq!(
        kinds("a\n\nb\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::EndOfLine,
            TokenKind::EndOfLine,
            TokenKind::Identifier,
            TokenKind::EndOfLine,
        ]
    );
}

#[test]
fn test_tokenize_appends_missing_end_of_line() {
    assert_eq!(
        kinds("print(\"x\")"),
        vec![
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::String,
            TokenKind::CloseParen,
            TokenKind::EndOfLine,
        ]
    );
}

#[test]
fn test_tokenize_empty_source() {
    assert!(kinds("").is_empty());
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("x // trailing comment\n// whole line\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::EndOfLine,
            TokenKind::EndOfLine,
        ]
    );
}

#[test]
fn test_tokenize_carriage_returns() {
    assert_eq!(
        kinds("x\r\ny\r\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::EndOfLine,
            TokenKind::Identifier,
            TokenKind::EndOfLine,
        ]
    );
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("x = \"ab\"\n".to_string(), Some("test.sn".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].span.start.0, 2);
    assert_eq!(tokens[2].span.start.0, 4);
    assert_eq!(tokens[2].span.end.0, 8);
    assert_eq!(*tokens[2].span.start.1, "test.sn");
}

#[test]
fn test_tokenize_unrecognised() {
    let result = tokenize("print(\"a\") + 1\n".to_string(), None);

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 11);
}

#[test]
fn test_debug_line() {
    let tokens = tokenize("foo(\n".to_string(), None).unwrap();

    assert_eq!(tokens[0].debug_line(), format!("{:<20}foo", "Identifier:"));
    assert_eq!(tokens[1].debug_line(), "OpenParen:");
}

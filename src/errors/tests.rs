//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Construct, Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.sn".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            construct: Construct::Argument,
            index: 3,
            expected: TokenKind::Comma,
            found: TokenKind::String,
        },
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.sn");
    assert_eq!(error.get_token_index(), Some(3));
}

#[test]
fn test_unexpected_token_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            construct: Construct::FuncCall,
            index: 0,
            expected: TokenKind::CloseParen,
            found: TokenKind::EndOfLine,
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(
        error.get_tip().to_string(),
        "Expected CloseParen in function call, found EndOfLine"
    );
}

#[test]
fn test_expected_expression_tip() {
    let found = Error::new(
        ErrorImpl::ExpectedExpression {
            construct: Construct::VarDecl,
            index: 2,
            found: Some(TokenKind::EndOfLine),
        },
        at(4),
    );
    let ended = Error::new(
        ErrorImpl::ExpectedExpression {
            construct: Construct::Compound,
            index: 1,
            found: None,
        },
        at(1),
    );

    assert_eq!(
        found.get_tip().to_string(),
        "Expected an expression in variable declaration, found EndOfLine"
    );
    assert_eq!(
        ended.get_tip().to_string(),
        "Expected an expression in parenthesized expression, but the input ended"
    );
}

#[test]
fn test_number_parse_error() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            construct: Construct::Literal,
            token: "99999999999999999999".to_string(),
            index: 0,
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert!(error.get_tip().to_string().contains("integer limit"));
}

#[test]
fn test_boolean_parse_error_names_literal() {
    let error = Error::new(
        ErrorImpl::BooleanParseError {
            construct: Construct::Literal,
            token: "maybe".to_string(),
            index: 4,
        },
        at(9),
    );

    assert_eq!(error.get_token_index(), Some(4));
    assert_eq!(
        error.to_string(),
        "error parsing literal as a boolean: \"maybe\" at test.sn:9"
    );
}

#[test]
fn test_builder_errors_have_no_token_index() {
    let error = Error::new(
        ErrorImpl::StackImbalance {
            statement: 1,
            depth: 2,
        },
        Position::null(),
    );

    assert_eq!(error.get_token_index(), None);
    assert_eq!(error.get_error_name(), "StackImbalance");
}

#[test]
fn test_malformed_unit_tip() {
    let error = Error::new(
        ErrorImpl::MalformedUnit {
            offset: 26,
            reason: "unknown opcode 0xff".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_tip().to_string(), "At byte 26: unknown opcode 0xff");
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::UnmatchedParen {
            construct: Construct::FuncCall,
            index: 1,
        },
        at(7),
    );

    assert_eq!(
        error.to_string(),
        "unmatched parenthesis in function call at token 1 at test.sn:7"
    );
}

#[test]
fn test_construct_display() {
    assert_eq!(Construct::Statement.to_string(), "statement");
    assert_eq!(Construct::ExpressionStatement.to_string(), "expression statement");
    assert_eq!(Construct::Argument.to_string(), "call argument");
}

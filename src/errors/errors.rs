use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Token index the error was raised at, for parser errors.
    pub fn get_token_index(&self) -> Option<usize> {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { index, .. }
            | ErrorImpl::UnexpectedEnd { index, .. }
            | ErrorImpl::ExpectedExpression { index, .. }
            | ErrorImpl::UnmatchedParen { index, .. }
            | ErrorImpl::NumberParseError { index, .. }
            | ErrorImpl::BooleanParseError { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEnd { .. } => "UnexpectedEnd",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::UnmatchedParen { .. } => "UnmatchedParen",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::BooleanParseError { .. } => "BooleanParseError",
            ErrorImpl::StackImbalance { .. } => "StackImbalance",
            ErrorImpl::StackUnderflow { .. } => "StackUnderflow",
            ErrorImpl::MalformedUnit { .. } => "MalformedUnit",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::ExecutionFailed { .. } => "ExecutionFailed",
            ErrorImpl::BackendError { .. } => "BackendError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken {
                construct,
                expected,
                found,
                ..
            } => ErrorTip::Suggestion(format!(
                "Expected {} in {}, found {}",
                expected, construct, found
            )),
            ErrorImpl::UnexpectedEnd {
                construct,
                expected,
                ..
            } => ErrorTip::Suggestion(format!(
                "Expected {} in {}, but the input ended",
                expected, construct
            )),
            ErrorImpl::ExpectedExpression {
                construct, found, ..
            } => match found {
                Some(found) => ErrorTip::Suggestion(format!(
                    "Expected an expression in {}, found {}",
                    construct, found
                )),
                None => ErrorTip::Suggestion(format!(
                    "Expected an expression in {}, but the input ended",
                    construct
                )),
            },
            ErrorImpl::UnmatchedParen { construct, .. } => ErrorTip::Suggestion(format!(
                "The `(` opening this {} is never closed",
                construct
            )),
            ErrorImpl::NumberParseError { token, .. } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::BooleanParseError { token, .. } => ErrorTip::Suggestion(format!(
                "Invalid boolean: `{}`, expected `true` or `false`",
                token
            )),
            ErrorImpl::StackImbalance { statement, depth } => ErrorTip::Suggestion(format!(
                "Statement {} leaves {} values on the operand stack",
                statement, depth
            )),
            ErrorImpl::StackUnderflow { op } => {
                ErrorTip::Suggestion(format!("`{}` pops an empty operand stack", op))
            }
            ErrorImpl::MalformedUnit { offset, reason } => {
                ErrorTip::Suggestion(format!("At byte {}: {}", offset, reason))
            }
            ErrorImpl::InvalidOperand { op, found } => {
                ErrorTip::Suggestion(format!("`{}` cannot operate on `{}`", op, found))
            }
            ErrorImpl::ExecutionFailed { reason } => ErrorTip::Suggestion(reason.clone()),
            ErrorImpl::BackendError { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// The grammar production that was being parsed when an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Statement,
    ExpressionStatement,
    Compound,
    FuncCall,
    Argument,
    VarDecl,
    Literal,
}

impl Display for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Construct::Statement => "statement",
            Construct::ExpressionStatement => "expression statement",
            Construct::Compound => "parenthesized expression",
            Construct::FuncCall => "function call",
            Construct::Argument => "call argument",
            Construct::VarDecl => "variable declaration",
            Construct::Literal => "literal",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token in {construct} at token {index}: expected {expected}, found {found}")]
    UnexpectedToken {
        construct: Construct,
        index: usize,
        expected: TokenKind,
        found: TokenKind,
    },
    #[error("unexpected end of input in {construct} at token {index}: expected {expected}")]
    UnexpectedEnd {
        construct: Construct,
        index: usize,
        expected: TokenKind,
    },
    #[error("expected expression in {construct} at token {index}, found {found:?}")]
    ExpectedExpression {
        construct: Construct,
        index: usize,
        found: Option<TokenKind>,
    },
    #[error("unmatched parenthesis in {construct} at token {index}")]
    UnmatchedParen { construct: Construct, index: usize },
    #[error("error parsing {construct} as a number: {token:?}")]
    NumberParseError {
        construct: Construct,
        token: String,
        index: usize,
    },
    #[error("error parsing {construct} as a boolean: {token:?}")]
    BooleanParseError {
        construct: Construct,
        token: String,
        index: usize,
    },
    #[error("statement {statement} leaves operand stack at depth {depth}")]
    StackImbalance { statement: usize, depth: usize },
    #[error("operand stack underflow at {op}")]
    StackUnderflow { op: String },
    #[error("malformed compilation unit at byte {offset}: {reason}")]
    MalformedUnit { offset: usize, reason: String },
    #[error("invalid operand for {op}: {found}")]
    InvalidOperand { op: String, found: String },
    #[error("execution failed: {reason}")]
    ExecutionFailed { reason: String },
    #[error("llvm backend error: {reason}")]
    BackendError { reason: String },
}

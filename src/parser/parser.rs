//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the Parser struct and the top-level parse loop.
//! Grammar productions live in `stmt` and `expr`; each takes the cursor by
//! value and hands back the node together with the cursor just past it.

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{ast::Program, statements::Stmt},
    config::{ParseOptions, RecoveryMode},
    errors::errors::{Construct, Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{scan::find_statement_end, stmt::parse_stmt};

/// A parsed node and the cursor immediately following it, or `None` when
/// nothing at the cursor is recognised.
pub type ParseResult<T> = Result<Option<(T, usize)>, Error>;

/// Holds the token stream and the diagnostics of one parse.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// The name of the source file being parsed
    file: Rc<String>,
    options: ParseOptions,
    /// Errors recorded in strict mode
    diagnostics: Vec<Error>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: Rc<String>, options: ParseOptions) -> Self {
        Parser {
            tokens,
            file,
            options,
            diagnostics: vec![],
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    pub fn kind_at(&self, pos: usize) -> Option<TokenKind> {
        self.tokens.get(pos).map(|token| token.kind)
    }

    pub fn is_kind(&self, pos: usize, kind: TokenKind) -> bool {
        self.kind_at(pos) == Some(kind)
    }

    pub fn get_options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn get_diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Source position of the token at `pos`, or the end of the last token
    /// when `pos` is past the end of the stream.
    pub fn get_position(&self, pos: usize) -> Position {
        match self.tokens.get(pos) {
            Some(token) => token.span.start.clone(),
            None => match self.tokens.last() {
                Some(token) => token.span.end.clone(),
                None => Position(0, Rc::clone(&self.file)),
            },
        }
    }

    pub fn error(&self, error: ErrorImpl, pos: usize) -> Error {
        Error::new(error, self.get_position(pos))
    }

    /// `expected` was required at `pos` but something else, or nothing, was there.
    pub fn mismatch(&self, construct: Construct, pos: usize, expected: TokenKind) -> Error {
        match self.kind_at(pos) {
            Some(found) => self.error(
                ErrorImpl::UnexpectedToken {
                    construct,
                    index: pos,
                    expected,
                    found,
                },
                pos,
            ),
            None => self.error(
                ErrorImpl::UnexpectedEnd {
                    construct,
                    index: pos,
                    expected,
                },
                pos,
            ),
        }
    }

    pub fn expected_expression(&self, construct: Construct, pos: usize) -> Error {
        self.error(
            ErrorImpl::ExpectedExpression {
                construct,
                index: pos,
                found: self.kind_at(pos),
            },
            pos,
        )
    }

    /// Applies the recovery mode to a statement that failed at `pos` and
    /// returns the cursor to resume from, always past `pos`.
    fn recover(&mut self, error: Error, pos: usize) -> usize {
        match self.options.recovery {
            RecoveryMode::Lenient => {
                debug!(index = pos, %error, "skipping token");
                pos + 1
            }
            RecoveryMode::Strict => {
                self.diagnostics.push(error);
                match find_statement_end(&self.tokens, pos) {
                    Some(eol) => eol + 1,
                    None => self.tokens.len(),
                }
            }
        }
    }
}

/// Parses a stream of tokens into a [`Program`].
///
/// This is the main entry point for parsing. Statements are parsed one after
/// another until the tokens run out; failures are handled according to
/// `options.recovery`.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with its recorded diagnostics)
/// - The program, or every diagnostic recorded in strict mode
pub fn parse(
    tokens: Vec<Token>,
    file: Rc<String>,
    options: &ParseOptions,
) -> (Parser, Result<Program, Vec<Error>>) {
    let mut parser = Parser::new(tokens, file, options.clone());
    let mut program = Program::new(options.unit_name.clone());

    let mut pos = 0;
    while pos < parser.len() {
        match parse_stmt(&parser, pos) {
            Ok(Some((Stmt::NoOp, next))) => pos = next,
            Ok(Some((stmt, next))) => {
                program.statements.push(stmt);
                pos = next;
            }
            Ok(None) => {
                let error = parser.expected_expression(Construct::Statement, pos);
                pos = parser.recover(error, pos);
            }
            Err(error) => pos = parser.recover(error, pos),
        }
    }

    debug!(
        unit = %program.name,
        statements = program.len(),
        diagnostics = parser.diagnostics.len(),
        "parsed program"
    );

    if parser.diagnostics.is_empty() {
        (parser, Ok(program))
    } else {
        let diagnostics = parser.diagnostics.clone();
        (parser, Err(diagnostics))
    }
}

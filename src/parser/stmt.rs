use crate::{
    ast::statements::Stmt,
    errors::errors::Construct,
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    parser::{ParseResult, Parser},
    scan::find_token,
};

/// A lone end-of-line is a no-op; anything else must be an expression statement.
pub fn parse_stmt(parser: &Parser, pos: usize) -> ParseResult<Stmt> {
    if parser.is_kind(pos, TokenKind::EndOfLine) {
        return Ok(Some((Stmt::NoOp, pos + 1)));
    }

    parse_expression_stmt(parser, pos)
}

/// One expression that ends exactly on the next end-of-line.
pub fn parse_expression_stmt(parser: &Parser, pos: usize) -> ParseResult<Stmt> {
    let Some((expression, end)) = parse_expr(parser, pos)? else {
        return Ok(None);
    };

    let eol = find_token(parser.tokens(), TokenKind::EndOfLine, pos + 1)
        .ok_or_else(|| parser.mismatch(Construct::ExpressionStatement, end, TokenKind::EndOfLine))?;

    if end != eol {
        return Err(parser.mismatch(Construct::ExpressionStatement, end, TokenKind::EndOfLine));
    }

    Ok(Some((Stmt::Expression(expression), eol + 1)))
}

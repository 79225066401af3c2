use std::ops::Range;

use crate::{
    ast::expressions::Expr,
    errors::errors::{Construct, Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    parser::{ParseResult, Parser},
    scan::{find_matching_paren, find_top_level_token},
};

/// Parses one expression starting at `pos`.
///
/// Alternatives are tried in order and the first one whose leading tokens
/// match is committed to; there is no backtracking once one is chosen.
pub fn parse_expr(parser: &Parser, pos: usize) -> ParseResult<Expr> {
    let Some(kind) = parser.kind_at(pos) else {
        return Ok(None);
    };

    let parsed = match kind {
        TokenKind::OpenParen => parse_compound_expr(parser, pos)?,
        TokenKind::String => parse_string_expr(parser, pos),
        TokenKind::Integer => parse_integer_expr(parser, pos)?,
        TokenKind::Boolean => parse_boolean_expr(parser, pos)?,
        TokenKind::Identifier => match parser.kind_at(pos + 1) {
            Some(TokenKind::OpenParen) => parse_func_call_expr(parser, pos)?,
            Some(TokenKind::Assignment) => parse_var_decl_expr(parser, pos)?,
            _ => parse_identifier_expr(parser, pos),
        },
        TokenKind::EndOfLine
        | TokenKind::CloseParen
        | TokenKind::Assignment
        | TokenKind::Comma => return Ok(None),
    };

    Ok(Some(parsed))
}

/// Literal text of the token at `pos`; callers have already checked it exists.
fn text(parser: &Parser, pos: usize) -> &str {
    parser
        .token(pos)
        .map(|token| token.value.as_str())
        .unwrap_or_default()
}

/// `( inner )`, the closing paren found by depth counting.
pub fn parse_compound_expr(parser: &Parser, pos: usize) -> Result<(Expr, usize), Error> {
    let close = find_matching_paren(parser.tokens(), pos + 1).ok_or_else(|| {
        parser.error(
            ErrorImpl::UnmatchedParen {
                construct: Construct::Compound,
                index: pos,
            },
            pos,
        )
    })?;

    let Some((inner, end)) = parse_expr(parser, pos + 1)? else {
        return Err(parser.expected_expression(Construct::Compound, pos + 1));
    };

    if end != close {
        return Err(parser.mismatch(Construct::Compound, end, TokenKind::CloseParen));
    }

    Ok((Expr::compound(inner), close + 1))
}

pub fn parse_string_expr(parser: &Parser, pos: usize) -> (Expr, usize) {
    let mut chars = text(parser, pos).chars();
    chars.next();
    chars.next_back();

    (Expr::string(chars.as_str()), pos + 1)
}

pub fn parse_integer_expr(parser: &Parser, pos: usize) -> Result<(Expr, usize), Error> {
    let token = text(parser, pos);
    let value = token.parse::<i64>().map_err(|_| {
        parser.error(
            ErrorImpl::NumberParseError {
                construct: Construct::Literal,
                token: token.to_string(),
                index: pos,
            },
            pos,
        )
    })?;

    Ok((Expr::Integer { value }, pos + 1))
}

pub fn parse_boolean_expr(parser: &Parser, pos: usize) -> Result<(Expr, usize), Error> {
    let token = text(parser, pos);
    let value = token.parse::<bool>().map_err(|_| {
        parser.error(
            ErrorImpl::BooleanParseError {
                construct: Construct::Literal,
                token: token.to_string(),
                index: pos,
            },
            pos,
        )
    })?;

    Ok((Expr::Boolean { value }, pos + 1))
}

pub fn parse_identifier_expr(parser: &Parser, pos: usize) -> (Expr, usize) {
    (Expr::identifier(text(parser, pos)), pos + 1)
}

/// `name ( args )`
pub fn parse_func_call_expr(parser: &Parser, pos: usize) -> Result<(Expr, usize), Error> {
    let name = text(parser, pos).to_string();
    let open = pos + 1;

    let close = find_matching_paren(parser.tokens(), open + 1).ok_or_else(|| {
        parser.error(
            ErrorImpl::UnmatchedParen {
                construct: Construct::FuncCall,
                index: open,
            },
            open,
        )
    })?;

    let args = parse_func_call_args(parser, open + 1, close)?
        .into_iter()
        .map(|(arg, _)| arg)
        .collect();

    Ok((Expr::call(name, args), close + 1))
}

/// Parses the arguments between `start` (just after the `(`) and its
/// matching `close` paren.
///
/// Each argument ends at the next top-level comma, the last one at `close`.
/// Returns every argument with the token range it was parsed from.
pub fn parse_func_call_args(
    parser: &Parser,
    start: usize,
    close: usize,
) -> Result<Vec<(Expr, Range<usize>)>, Error> {
    let mut args = vec![];
    let mut pos = start;

    while pos <= close {
        if pos == close && args.is_empty() {
            break;
        }

        let boundary =
            find_top_level_token(parser.tokens(), TokenKind::Comma, pos, close).unwrap_or(close);

        let Some((arg, end)) = parse_expr(parser, pos)? else {
            return Err(parser.expected_expression(Construct::Argument, pos));
        };

        if end != boundary {
            let expected = if boundary == close {
                TokenKind::CloseParen
            } else {
                TokenKind::Comma
            };
            return Err(parser.mismatch(Construct::Argument, end, expected));
        }

        args.push((arg, pos..end));
        pos = boundary + 1;

        if boundary == close {
            break;
        }
    }

    Ok(args)
}

/// `name = value`
pub fn parse_var_decl_expr(parser: &Parser, pos: usize) -> Result<(Expr, usize), Error> {
    let name = text(parser, pos).to_string();

    let Some((value, end)) = parse_expr(parser, pos + 2)? else {
        return Err(parser.expected_expression(Construct::VarDecl, pos + 2));
    };

    Ok((Expr::var_decl(name, value), end))
}

//! Linear boundary scans over the token stream.
//!
//! None of these are memoized; nested constructs rescan overlapping ranges.

use crate::lexer::tokens::{Token, TokenKind};

/// First index `>= start` holding a token of `kind`.
pub fn find_token(tokens: &[Token], kind: TokenKind, start: usize) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, token)| token.kind == kind)
        .map(|(i, _)| i)
}

/// Finds the `)` closing a `(` that sits just before `start`.
///
/// The depth starts at 1, goes up on `(` and down on `)`; the index where it
/// first reaches 0 is returned.
pub fn find_matching_paren(tokens: &[Token], start: usize) -> Option<usize> {
    let mut level = 1usize;
    for (i, token) in tokens.iter().enumerate().skip(start) {
        match token.kind {
            TokenKind::OpenParen => level += 1,
            TokenKind::CloseParen => {
                level -= 1;
                if level == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// First index in `start..end` holding `kind` outside of any nested parens.
pub fn find_top_level_token(
    tokens: &[Token],
    kind: TokenKind,
    start: usize,
    end: usize,
) -> Option<usize> {
    let mut level = 0usize;
    for (i, token) in tokens.iter().enumerate().take(end).skip(start) {
        if token.kind == kind && level == 0 {
            return Some(i);
        }
        match token.kind {
            TokenKind::OpenParen => level += 1,
            TokenKind::CloseParen => level = level.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// End-of-line closing the statement that starts at `start`.
///
/// End-of-lines inside parens do not count, so a parenthesized expression
/// spanning lines is skipped as a whole. If the parens never balance, the
/// first end-of-line after `start` is used.
pub fn find_statement_end(tokens: &[Token], start: usize) -> Option<usize> {
    let mut level = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(start) {
        match token.kind {
            TokenKind::OpenParen => level += 1,
            TokenKind::CloseParen => level = level.saturating_sub(1),
            TokenKind::EndOfLine if level == 0 => return Some(i),
            _ => {}
        }
    }

    find_token(tokens, TokenKind::EndOfLine, start)
}

//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into a [`Program`](crate::ast::ast::Program). It handles:
//!
//! - Statement recognition, one statement per line
//! - Expression parsing by ordered alternatives
//! - Parenthesis matching and argument boundaries by linear scans
//! - Error recovery and reporting, lenient or strict
//!
//! The cursor is a plain token index passed by value; every production
//! returns the node together with the index just past it.

pub mod expr;
pub mod parser;
pub mod scan;
pub mod stmt;

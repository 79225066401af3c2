//! Code generation module for the compiler.
//!
//! This module contains the builder that lowers a parsed
//! [`Program`](crate::ast::ast::Program) into a stack-machine
//! [`CompilationUnit`](unit::CompilationUnit). It handles:
//!
//! - Lowering of expressions and statements to ops
//! - Operand stack depth tracking
//! - The byte encoding of units
//! - Optionally, lowering units to LLVM IR (feature `llvm`)

pub mod codec;
pub mod compiler;
pub mod expr;
#[cfg(feature = "llvm")]
pub mod llvm;
pub mod stmt;
pub mod unit;

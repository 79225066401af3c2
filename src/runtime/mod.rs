//! In-process execution of built programs.
//!
//! [`vm::Vm`] runs a [`CompilationUnit`] op by op, [`interpreter::Interpreter`]
//! walks a [`Program`](crate::ast::ast::Program) directly. Both write the
//! output of the print built-in to any [`std::io::Write`] and produce the
//! same bytes for the same program.

use crate::{compiler::unit::CompilationUnit, errors::errors::Error};

pub mod interpreter;
pub mod value;
pub mod vm;

#[cfg(test)]
mod tests;

/// Anything that can load and run a compilation unit.
pub trait Executor {
    fn execute(&mut self, unit: &CompilationUnit) -> Result<(), Error>;
}

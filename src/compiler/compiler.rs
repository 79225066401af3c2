//! Main compiler module.
//!
//! This module contains the core Compiler structure and drives the pipeline
//! from a parsed [`Program`] to a [`CompilationUnit`]. It owns the op buffer
//! of the entry procedure and tracks the operand stack depth of every
//! emitted op.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    stmt::gen_statement,
    unit::{CompilationUnit, Op, Procedure, ENTRY_NAME},
};

/// The state of a single build.
///
/// Holds the ops emitted so far for the entry procedure, the current
/// operand stack depth and the deepest depth reached.
pub struct Compiler {
    /// Name of the unit being built
    pub unit_name: String,

    ops: Vec<Op>,
    depth: usize,
    max_depth: usize,
}

impl Compiler {
    pub fn new(unit_name: &str) -> Self {
        Compiler {
            unit_name: unit_name.to_string(),
            ops: vec![],
            depth: 0,
            max_depth: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Position used for builder errors, the unit has no source offsets.
    pub fn position(&self) -> Position {
        Position(0, Rc::new(self.unit_name.clone()))
    }

    /// Appends `op`, applying its stack effect.
    ///
    /// Fails with `StackUnderflow` if the op pops more values than are on
    /// the stack.
    pub fn emit(&mut self, op: Op) -> Result<(), Error> {
        let (pops, pushes) = op.stack_effect();

        if self.depth < pops {
            return Err(Error::new(
                ErrorImpl::StackUnderflow { op: op.to_string() },
                self.position(),
            ));
        }

        self.depth = self.depth - pops + pushes;
        self.max_depth = self.max_depth.max(self.depth);

        trace!(op = %op, depth = self.depth, "emit");
        self.ops.push(op);

        Ok(())
    }

    /// Lowers every statement of `program`, then closes the entry procedure.
    fn gen(&mut self, program: &Program) -> Result<(), Error> {
        for (index, statement) in program.iter().enumerate() {
            gen_statement(self, statement, index)?;
        }

        self.emit(Op::Return)
    }

    fn finish(self) -> CompilationUnit {
        CompilationUnit {
            name: self.unit_name,
            entry: Procedure {
                name: String::from(ENTRY_NAME),
                max_stack: self.max_depth as u32,
                ops: self.ops,
            },
        }
    }
}

/// Builds the compilation unit for `program`.
///
/// The unit is named after the program and holds a single entry procedure
/// `main`. Each top-level statement is lowered to ops that leave the stack
/// empty, and a final `Return` is appended.
pub fn generate(program: &Program) -> Result<CompilationUnit, Error> {
    let mut compiler = Compiler::new(&program.name);

    compiler.gen(program)?;

    let unit = compiler.finish();
    debug!(
        unit = unit.get_name(),
        ops = unit.ops().len(),
        max_stack = unit.entry.max_stack,
        "built unit"
    );

    Ok(unit)
}

use std::io::Write;

use tracing::{debug, trace};

use crate::{
    compiler::unit::{Builtin, CompilationUnit, Op, Sink},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{value::Value, Executor};

/// Stack machine for compilation units.
///
/// Output of the print built-in goes to `out`, whichever sink the unit
/// names.
pub struct Vm<W: Write> {
    out: W,
    stack: Vec<Value>,
}

impl<W: Write> Vm<W> {
    pub fn new(out: W) -> Self {
        Vm { out, stack: vec![] }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn push(&mut self, value: Value, max_stack: u32) -> Result<(), Error> {
        if self.stack.len() >= max_stack as usize {
            return Err(runtime_error(ErrorImpl::ExecutionFailed {
                reason: format!("operand stack exceeds max_stack {}", max_stack),
            }));
        }

        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self, op: &Op) -> Result<Value, Error> {
        self.stack
            .pop()
            .ok_or_else(|| runtime_error(ErrorImpl::StackUnderflow { op: op.to_string() }))
    }

    /// Runs the entry procedure of `unit` until `Return` or the last op.
    ///
    /// The operand stack is cleared first and must be empty again when the
    /// procedure returns.
    pub fn run(&mut self, unit: &CompilationUnit) -> Result<(), Error> {
        let max_stack = unit.entry.max_stack;
        self.stack.clear();

        for op in unit.ops() {
            trace!(op = %op, depth = self.stack.len(), "exec");

            match op {
                Op::PushNull => self.push(Value::Null, max_stack)?,
                Op::PushInt(value) => self.push(Value::Int(*value), max_stack)?,
                Op::PushStr(value) => self.push(Value::Str(value.clone()), max_stack)?,
                Op::PushBool(value) => self.push(Value::Bool(*value), max_stack)?,
                Op::GetSink(sink) => self.push(Value::Sink(*sink), max_stack)?,
                Op::Invoke { builtin, argc } => {
                    let arg = if *argc > 0 { Some(self.pop(op)?) } else { None };

                    let sink = match self.pop(op)? {
                        Value::Sink(sink) => sink,
                        other => {
                            return Err(runtime_error(ErrorImpl::InvalidOperand {
                                op: op.to_string(),
                                found: other.type_name().to_string(),
                            }))
                        }
                    };

                    invoke_builtin(&mut self.out, *builtin, sink, arg.as_ref())?;
                }
                Op::Pop => {
                    self.pop(op)?;
                }
                Op::Return => break,
            }
        }

        if !self.stack.is_empty() {
            return Err(runtime_error(ErrorImpl::ExecutionFailed {
                reason: format!(
                    "{} values left on the operand stack at return",
                    self.stack.len()
                ),
            }));
        }

        self.out.flush().map_err(io_error)?;
        debug!(unit = unit.get_name(), ops = unit.ops().len(), "executed unit");

        Ok(())
    }
}

impl<W: Write> Executor for Vm<W> {
    fn execute(&mut self, unit: &CompilationUnit) -> Result<(), Error> {
        self.run(unit)
    }
}

/// Applies `builtin` to `arg`, writing through `out`.
pub(crate) fn invoke_builtin<W: Write>(
    out: &mut W,
    builtin: Builtin,
    sink: Sink,
    arg: Option<&Value>,
) -> Result<(), Error> {
    let written = match (builtin, sink) {
        (Builtin::Println, Sink::Stdout) => match arg {
            Some(value) => writeln!(out, "{}", value),
            None => writeln!(out),
        },
    };

    written.map_err(io_error)
}

fn runtime_error(error: ErrorImpl) -> Error {
    Error::new(error, Position::null())
}

pub(crate) fn io_error(error: std::io::Error) -> Error {
    runtime_error(ErrorImpl::ExecutionFailed {
        reason: error.to_string(),
    })
}

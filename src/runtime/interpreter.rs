use std::io::Write;

use crate::{
    ast::{ast::Program, expressions::Expr, statements::Stmt},
    compiler::unit::{Builtin, Sink},
    errors::errors::Error,
};

use super::{
    value::Value,
    vm::{invoke_builtin, io_error},
};

/// Evaluates a program straight from its AST.
///
/// Follows the same rules as the builder, so the output matches running
/// the built unit on a [`Vm`](super::vm::Vm).
pub struct Interpreter<W: Write> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Interpreter { out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        for statement in program.iter() {
            self.exec(statement)?;
        }

        self.out.flush().map_err(io_error)
    }

    fn exec(&mut self, statement: &Stmt) -> Result<(), Error> {
        match statement {
            Stmt::NoOp | Stmt::Compound => Ok(()),
            Stmt::Expression(expression) => self.eval(expression).map(|_| ()),
        }
    }

    pub fn eval(&mut self, expression: &Expr) -> Result<Value, Error> {
        match expression {
            Expr::Identifier { .. } => Ok(Value::Null),
            Expr::String { value } => Ok(Value::Str(value.clone())),
            Expr::Integer { value } => Ok(Value::Int(*value)),
            Expr::Boolean { value } => Ok(Value::Bool(*value)),
            Expr::Compound { inner } => self.eval(inner),
            Expr::VarDecl { .. } => Ok(Value::Int(0)),
            Expr::FuncCall { args, .. } => {
                let mut last = None;
                for arg in args {
                    last = Some(self.eval(arg)?);
                }

                invoke_builtin(&mut self.out, Builtin::Println, Sink::Stdout, last.as_ref())?;
                Ok(Value::Int(0))
            }
        }
    }
}

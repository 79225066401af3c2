use crate::{ast::expressions::Expr, errors::errors::Error};

use super::{
    compiler::Compiler,
    unit::{Builtin, Op, Sink},
};

/// Lowers `expression`, leaving exactly one value on the stack.
pub fn gen_expression(compiler: &mut Compiler, expression: &Expr) -> Result<(), Error> {
    match expression {
        // No symbol table yet, names evaluate to a placeholder
        Expr::Identifier { .. } => compiler.emit(Op::PushNull),
        Expr::String { value } => compiler.emit(Op::PushStr(value.clone())),
        Expr::Integer { value } => compiler.emit(Op::PushInt(*value)),
        Expr::Boolean { value } => compiler.emit(Op::PushBool(*value)),
        Expr::Compound { inner } => gen_expression(compiler, inner),
        // The right-hand side is neither evaluated nor stored
        Expr::VarDecl { .. } => compiler.emit(Op::PushInt(0)),
        Expr::FuncCall { args, .. } => gen_func_call(compiler, args),
    }
}

/// Every call lowers to the print built-in applied to its last argument.
///
/// All arguments are evaluated left to right; the ones before the last are
/// discarded right away. The call itself evaluates to `0`.
fn gen_func_call(compiler: &mut Compiler, args: &[Expr]) -> Result<(), Error> {
    compiler.emit(Op::GetSink(Sink::Stdout))?;

    for (i, arg) in args.iter().enumerate() {
        gen_expression(compiler, arg)?;

        if i + 1 < args.len() {
            compiler.emit(Op::Pop)?;
        }
    }

    compiler.emit(Op::Invoke {
        builtin: Builtin::Println,
        argc: if args.is_empty() { 0 } else { 1 },
    })?;

    compiler.emit(Op::PushInt(0))
}

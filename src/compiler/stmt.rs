use crate::{
    ast::{ast::StmtType, statements::Stmt},
    errors::errors::{Error, ErrorImpl},
};

use super::{compiler::Compiler, expr::gen_expression, unit::Op};

/// Lowers one top-level statement.
///
/// An expression statement discards its value, so the stack is back at
/// depth zero once the statement has been emitted.
pub fn gen_statement(compiler: &mut Compiler, statement: &Stmt, index: usize) -> Result<(), Error> {
    match statement.get_stmt_type() {
        StmtType::NoOp | StmtType::Compound => return Ok(()),
        StmtType::ExpressionStmt => {}
    }

    if let Some(expression) = statement.expression() {
        gen_expression(compiler, expression)?;
        compiler.emit(Op::Pop)?;
    }

    if compiler.depth() != 0 {
        return Err(Error::new(
            ErrorImpl::StackImbalance {
                statement: index,
                depth: compiler.depth(),
            },
            compiler.position(),
        ));
    }

    Ok(())
}

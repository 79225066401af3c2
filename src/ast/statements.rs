use std::fmt::Display;

use super::{ast::StmtType, expressions::Expr};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A bare end-of-line. Recognised by the parser but never stored.
    NoOp,
    /// Block placeholder, no grammar rule produces it yet.
    Compound,
    Expression(Expr),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::NoOp => StmtType::NoOp,
            Stmt::Compound => StmtType::Compound,
            Stmt::Expression(_) => StmtType::ExpressionStmt,
        }
    }

    pub fn expression(&self) -> Option<&Expr> {
        match self {
            Stmt::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::NoOp => write!(f, "NoOp"),
            Stmt::Compound => write!(f, "Compound {{}}"),
            Stmt::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

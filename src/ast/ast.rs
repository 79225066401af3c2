use std::{fmt::Display, slice::Iter};

use super::statements::Stmt;

/// Statement Types
///
/// Discriminant of a [`Stmt`], used where only the kind matters.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    NoOp,
    Compound,
    ExpressionStmt,
}

/// Expression Types
///
/// Discriminant of an [`Expr`](super::expressions::Expr).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Identifier,
    String,
    Integer,
    Boolean,
    Compound,
    VarDecl,
    FuncCall,
}

/// The root of a parsed source file.
///
/// `name` becomes the name of the compilation unit built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Program {
            name: name.into(),
            statements: vec![],
        }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Program {}", self.name)?;
        for statement in &self.statements {
            writeln!(f, "  {}", statement)?;
        }
        Ok(())
    }
}

use std::fmt::Display;

use super::expressions::Expr;

/// The type a variable declaration gets from the shape of its value.
///
/// Only integer literals produce a known type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    Int,
    Untyped,
}

impl InferredType {
    /// Looks at the variant of `expr` only, never at its children.
    pub fn of(expr: &Expr) -> Self {
        match expr {
            Expr::Integer { .. } => InferredType::Int,
            _ => InferredType::Untyped,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != InferredType::Untyped
    }
}

impl Display for InferredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferredType::Int => write!(f, "int"),
            InferredType::Untyped => write!(f, "?"),
        }
    }
}

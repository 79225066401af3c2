use std::fmt::Display;

use super::{ast::ExprType, types::InferredType};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier {
        name: String,
    },
    /// The literal text without its surrounding quotes.
    String {
        value: String,
    },
    Integer {
        value: i64,
    },
    Boolean {
        value: bool,
    },
    /// A parenthesized expression, evaluates to `inner`.
    Compound {
        inner: Box<Expr>,
    },
    /// `name = value`
    VarDecl {
        inferred_type: InferredType,
        name: String,
        value: Box<Expr>,
    },
    FuncCall {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Identifier { .. } => ExprType::Identifier,
            Expr::String { .. } => ExprType::String,
            Expr::Integer { .. } => ExprType::Integer,
            Expr::Boolean { .. } => ExprType::Boolean,
            Expr::Compound { .. } => ExprType::Compound,
            Expr::VarDecl { .. } => ExprType::VarDecl,
            Expr::FuncCall { .. } => ExprType::FuncCall,
        }
    }

    pub fn compound(inner: Expr) -> Self {
        Expr::Compound {
            inner: Box::new(inner),
        }
    }

    pub fn var_decl(name: impl Into<String>, value: Expr) -> Self {
        Expr::VarDecl {
            inferred_type: InferredType::of(&value),
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::FuncCall {
            name: name.into(),
            args,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::String {
            value: value.into(),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier { name } => write!(f, "{}", name),
            Expr::String { value } => write!(f, "{:?}", value),
            Expr::Integer { value } => write!(f, "{}", value),
            Expr::Boolean { value } => write!(f, "{}", value),
            Expr::Compound { inner } => write!(f, "({})", inner),
            Expr::VarDecl {
                inferred_type,
                name,
                value,
            } => write!(f, "{}: {} = {}", name, inferred_type, value),
            Expr::FuncCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

use super::{
    ast::{ExprType, Program, StmtType},
    expressions::Expr,
    statements::Stmt,
    types::InferredType,
};

#[test]
fn test_var_decl_infers_int_from_integer_literal() {
    let decl = Expr::var_decl("x", Expr::Integer { value: 5 });

    match decl {
        Expr::VarDecl { inferred_type, .. } => assert_eq!(inferred_type, InferredType::Int),
        _ => panic!("Expected var decl"),
    }
}

#[test]
fn test_var_decl_inference_is_structural() {
    // A parenthesized integer is not itself an integer literal
    let wrapped = Expr::var_decl("x", Expr::compound(Expr::Integer { value: 5 }));
    let string = Expr::var_decl("y", Expr::string("a"));

    for decl in [wrapped, string] {
        match decl {
            Expr::VarDecl { inferred_type, .. } => {
                assert_eq!(inferred_type, InferredType::Untyped);
                assert!(!inferred_type.is_known());
            }
            _ => panic!("Expected var decl"),
        }
    }
}

#[test]
fn test_discriminants() {
    assert_eq!(Expr::identifier("a").get_expr_type(), ExprType::Identifier);
    assert_eq!(Expr::string("a").get_expr_type(), ExprType::String);
    assert_eq!(Expr::Integer { value: 1 }.get_expr_type(), ExprType::Integer);
    assert_eq!(Expr::Boolean { value: true }.get_expr_type(), ExprType::Boolean);
    assert_eq!(Expr::compound(Expr::identifier("a")).get_expr_type(), ExprType::Compound);
    assert_eq!(Expr::call("print", vec![]).get_expr_type(), ExprType::FuncCall);

    assert_eq!(Stmt::NoOp.get_stmt_type(), StmtType::NoOp);
    assert_eq!(Stmt::Compound.get_stmt_type(), StmtType::Compound);
    assert_eq!(
        Stmt::Expression(Expr::identifier("a")).get_stmt_type(),
        StmtType::ExpressionStmt
    );
}

#[test]
fn test_display() {
    let mut program = Program::new("main");
    program.statements.push(Stmt::Expression(Expr::call(
        "print",
        vec![
            Expr::string("hi"),
            Expr::var_decl("x", Expr::Integer { value: 1 }),
            Expr::compound(Expr::Boolean { value: false }),
        ],
    )));

    assert_eq!(
        program.to_string(),
        "Program main\n  print(\"hi\", x: int = 1, (false))\n"
    );
}

//! Unit tests for the VM and the tree-walking interpreter.

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    compiler::{
        compiler::generate,
        unit::{Builtin, CompilationUnit, Op, Procedure, Sink},
    },
    config::ParseOptions,
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::{interpreter::Interpreter, value::Value, vm::Vm, Executor};

fn program(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.sn".to_string())).unwrap();
    parse(tokens, Rc::new("test.sn".to_string()), &ParseOptions::default())
        .1
        .unwrap()
}

fn run_vm(source: &str) -> String {
    let unit = generate(&program(source)).unwrap();
    let mut vm = Vm::new(Vec::new());
    vm.run(&unit).unwrap();
    String::from_utf8(vm.into_output()).unwrap()
}

fn run_interpreter(source: &str) -> String {
    let mut interpreter = Interpreter::new(Vec::new());
    interpreter.run(&program(source)).unwrap();
    String::from_utf8(interpreter.into_output()).unwrap()
}

fn unit(max_stack: u32, ops: Vec<Op>) -> CompilationUnit {
    CompilationUnit {
        name: "t".to_string(),
        entry: Procedure {
            name: "main".to_string(),
            max_stack,
            ops,
        },
    }
}

fn vm_error(unit: &CompilationUnit) -> ErrorImpl {
    let mut vm = Vm::new(Vec::new());
    vm.run(unit).unwrap_err().get_internal_error().clone()
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Int(-12).to_string(), "-12");
    assert_eq!(Value::Str("a b".to_string()).to_string(), "a b");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Sink(Sink::Stdout).to_string(), "<stdout>");
}

#[test]
fn test_vm_hello() {
    assert_eq!(run_vm("print(\"Hello, world\")\n"), "Hello, world\n");
}

#[test]
fn test_vm_prints_each_value_kind() {
    let output = run_vm("f(name)\nf(42)\nf(true)\nf(x = \"s\")\nf((\"p\"))\n");

    assert_eq!(output, "null\n42\ntrue\n0\np\n");
}

#[test]
fn test_vm_empty_call_prints_empty_line() {
    assert_eq!(run_vm("f()\nf()"), "\n\n");
}

#[test]
fn test_vm_last_argument_wins() {
    assert_eq!(run_vm("f(\"a\", \"b\", \"c\")"), "c\n");
}

#[test]
fn test_vm_nested_calls_print_inner_first() {
    assert_eq!(run_vm("f(g(\"inner\"))"), "inner\n0\n");
}

#[test]
fn test_vm_stops_at_return() {
    let unit = unit(
        1,
        vec![
            Op::Return,
            Op::GetSink(Sink::Stdout),
            Op::Invoke {
                builtin: Builtin::Println,
                argc: 0,
            },
        ],
    );

    let mut vm = Vm::new(Vec::new());
    vm.execute(&unit).unwrap();

    assert!(vm.output().is_empty());
}

#[test]
fn test_vm_underflow() {
    assert_eq!(
        vm_error(&unit(1, vec![Op::Pop, Op::Return])),
        ErrorImpl::StackUnderflow {
            op: "pop".to_string()
        }
    );
}

#[test]
fn test_vm_rejects_non_sink_receiver() {
    let unit = unit(
        1,
        vec![
            Op::PushInt(1),
            Op::Invoke {
                builtin: Builtin::Println,
                argc: 0,
            },
            Op::Return,
        ],
    );

    assert_eq!(
        vm_error(&unit),
        ErrorImpl::InvalidOperand {
            op: "invoke println 0".to_string(),
            found: "int".to_string()
        }
    );
}

#[test]
fn test_vm_requires_empty_stack_at_return() {
    let error = vm_error(&unit(1, vec![Op::PushInt(1), Op::Return]));

    assert!(matches!(error, ErrorImpl::ExecutionFailed { .. }));
}

#[test]
fn test_vm_enforces_max_stack() {
    let error = vm_error(&unit(0, vec![Op::PushNull, Op::Pop, Op::Return]));

    assert!(matches!(error, ErrorImpl::ExecutionFailed { .. }));
}

#[test]
fn test_interpreter_matches_vm() {
    let sources = [
        "print(\"Hello\")\n",
        "a(\"1\", b(2), c())\nx = 3\n(y)\n",
        "\n\nf(true)\n\nf(false, (\"last\"))\n",
        "x = f(\"never printed\")\nf(x)\n",
    ];

    for source in sources {
        assert_eq!(run_interpreter(source), run_vm(source), "for {:?}", source);
    }
}

#[test]
fn test_interpreter_var_decl_does_not_evaluate_value() {
    assert_eq!(run_interpreter("x = f(\"never\")"), "");
}

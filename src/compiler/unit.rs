//! The executable artifact produced by the builder.

use std::fmt::Display;

/// Name of the synthesized entry procedure.
pub const ENTRY_NAME: &str = "main";

/// Side-effect handles that built-ins write through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Stdout,
}

impl Display for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Stdout => write!(f, "stdout"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Writes its argument (or nothing) followed by a newline to the sink.
    Println,
}

impl Builtin {
    pub fn max_args(&self) -> u8 {
        match self {
            Builtin::Println => 1,
        }
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Builtin::Println => write!(f, "println"),
        }
    }
}

/// Stack machine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    PushNull,
    PushInt(i64),
    PushStr(String),
    PushBool(bool),
    GetSink(Sink),
    /// Pops `argc` arguments, then the sink beneath them.
    Invoke { builtin: Builtin, argc: u8 },
    Pop,
    Return,
}

impl Op {
    /// Values popped and pushed by this op.
    pub fn stack_effect(&self) -> (usize, usize) {
        match self {
            Op::PushNull | Op::PushInt(_) | Op::PushStr(_) | Op::PushBool(_) | Op::GetSink(_) => {
                (0, 1)
            }
            Op::Invoke { argc, .. } => (*argc as usize + 1, 0),
            Op::Pop => (1, 0),
            Op::Return => (0, 0),
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::PushNull => write!(f, "push_null"),
            Op::PushInt(value) => write!(f, "push_int {}", value),
            Op::PushStr(value) => write!(f, "push_str {:?}", value),
            Op::PushBool(value) => write!(f, "push_bool {}", value),
            Op::GetSink(sink) => write!(f, "get_sink {}", sink),
            Op::Invoke { builtin, argc } => write!(f, "invoke {} {}", builtin, argc),
            Op::Pop => write!(f, "pop"),
            Op::Return => write!(f, "return"),
        }
    }
}

/// A procedure with no parameters and no return value.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub name: String,
    /// Deepest operand stack reached by `ops`
    pub max_stack: u32,
    pub ops: Vec<Op>,
}

/// A named container holding one entry procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub name: String,
    pub entry: Procedure,
}

impl CompilationUnit {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn ops(&self) -> &[Op] {
        &self.entry.ops
    }
}

impl Display for CompilationUnit {
    /// Disassembly listing.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "unit {}", self.name)?;
        writeln!(
            f,
            "proc {} (max_stack {})",
            self.entry.name, self.entry.max_stack
        )?;
        for (i, op) in self.entry.ops.iter().enumerate() {
            writeln!(f, "  {:04} {}", i, op)?;
        }
        Ok(())
    }
}

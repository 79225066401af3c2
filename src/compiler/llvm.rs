//! Lowers a compilation unit to LLVM IR.
//!
//! The op stream is replayed against a compile-time stack of LLVM values,
//! so the emitted `main` contains only the print calls and a `return 0`.

use std::path::Path;

use inkwell::{
    builder::Builder,
    context::Context,
    execution_engine::JitFunction,
    module::{Linkage, Module},
    targets::{InitializationConfig, Target},
    values::{BasicMetadataValueEnum, FunctionValue, IntValue, PointerValue},
    AddressSpace, OptimizationLevel,
};
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    runtime::Executor,
    Position,
};

use super::unit::{CompilationUnit, Op};

type EntryFn = unsafe extern "C" fn() -> i32;

/// A value on the compile-time stack.
enum Slot<'a> {
    Sink,
    Text(PointerValue<'a>),
    Int(IntValue<'a>),
}

impl Slot<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Slot::Sink => "sink",
            Slot::Text(_) => "text",
            Slot::Int(_) => "int",
        }
    }
}

fn backend_error(reason: impl ToString) -> Error {
    Error::new(
        ErrorImpl::BackendError {
            reason: reason.to_string(),
        },
        Position::null(),
    )
}

pub struct LlvmBackend<'a> {
    /// Reference to the LLVM context
    pub context: &'a Context,
    /// The LLVM module being built
    pub module: Module<'a>,
    /// The LLVM IR builder
    pub builder: Builder<'a>,

    entry_name: Option<String>,
}

impl<'a> LlvmBackend<'a> {
    pub fn new(context: &'a Context, module_name: &str) -> Self {
        LlvmBackend {
            context,
            module: context.create_module(module_name),
            builder: context.create_builder(),
            entry_name: None,
        }
    }

    /// Writes the textual IR of the module to `output_file`.
    pub fn save_module_to_file(&self, output_file: &Path) -> Result<(), Error> {
        self.module.print_to_file(output_file).map_err(backend_error)
    }

    /// Emits the entry procedure of `unit` as an LLVM function returning
    /// `i32 0`, then verifies the module. Lowering again starts over in a
    /// fresh module of the same name.
    pub fn lower(&mut self, unit: &CompilationUnit) -> Result<(), Error> {
        if self.module.get_first_function().is_some() {
            let name = self.module.get_name().to_string_lossy().into_owned();
            self.module = self.context.create_module(&name);
            self.entry_name = None;
        }

        let i32_type = self.context.i32_type();
        let function = self.module.add_function(
            &unit.entry.name,
            i32_type.fn_type(&[], false),
            Some(Linkage::External),
        );
        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);

        let mut stack: Vec<Slot<'a>> = vec![];

        for op in unit.ops() {
            match op {
                Op::PushNull => stack.push(Slot::Text(self.global_str("null", "null")?)),
                Op::PushInt(value) => stack.push(Slot::Int(
                    self.context.i64_type().const_int(*value as u64, true),
                )),
                Op::PushStr(value) => stack.push(Slot::Text(self.global_str(value, "str")?)),
                Op::PushBool(value) => {
                    let text = if *value { "true" } else { "false" };
                    stack.push(Slot::Text(self.global_str(text, "bool")?));
                }
                Op::GetSink(_) => stack.push(Slot::Sink),
                Op::Invoke { argc, .. } => {
                    let arg = if *argc > 0 {
                        Some(pop(&mut stack, op)?)
                    } else {
                        None
                    };

                    let receiver = pop(&mut stack, op)?;
                    if !matches!(receiver, Slot::Sink) {
                        return Err(Error::new(
                            ErrorImpl::InvalidOperand {
                                op: op.to_string(),
                                found: receiver.describe().to_string(),
                            },
                            Position::null(),
                        ));
                    }

                    self.build_println(arg)?;
                }
                Op::Pop => {
                    pop(&mut stack, op)?;
                }
                Op::Return => break,
            }
        }

        self.build_flush()?;
        self.builder
            .build_return(Some(&i32_type.const_zero()))
            .map_err(backend_error)?;

        self.module.verify().map_err(backend_error)?;
        self.entry_name = Some(unit.entry.name.clone());

        debug!(module = %unit.get_name(), "lowered unit to llvm ir");

        Ok(())
    }

    /// Runs the lowered entry function in a JIT execution engine.
    pub fn run_jit(&self) -> Result<i32, Error> {
        let entry_name = self
            .entry_name
            .as_deref()
            .ok_or_else(|| backend_error("no unit has been lowered"))?;

        Target::initialize_native(&InitializationConfig::default()).map_err(backend_error)?;

        let engine = self
            .module
            .create_jit_execution_engine(OptimizationLevel::None)
            .map_err(backend_error)?;

        // SAFETY: the entry function was emitted by `lower` with the
        // `EntryFn` signature.
        let entry: JitFunction<EntryFn> =
            unsafe { engine.get_function(entry_name) }.map_err(backend_error)?;

        Ok(unsafe { entry.call() })
    }

    fn global_str(&self, value: &str, name: &str) -> Result<PointerValue<'a>, Error> {
        self.builder
            .build_global_string_ptr(value, name)
            .map(|global| global.as_pointer_value())
            .map_err(backend_error)
    }

    fn external_function(&self, name: &str, variadic: bool) -> FunctionValue<'a> {
        if let Some(function) = self.module.get_function(name) {
            return function;
        }

        let i8_ptr_type = self.context.i8_type().ptr_type(AddressSpace::default());
        let function_type = self
            .context
            .i32_type()
            .fn_type(&[i8_ptr_type.into()], variadic);

        self.module
            .add_function(name, function_type, Some(Linkage::External))
    }

    fn build_println(&self, arg: Option<Slot<'a>>) -> Result<(), Error> {
        let printf = self.external_function("printf", true);

        let args: Vec<BasicMetadataValueEnum<'a>> = match arg {
            None => vec![self.global_str("\n", "fmt_line")?.into()],
            Some(Slot::Text(text)) => vec![self.global_str("%s\n", "fmt_str")?.into(), text.into()],
            Some(Slot::Int(value)) => {
                vec![self.global_str("%lld\n", "fmt_int")?.into(), value.into()]
            }
            Some(Slot::Sink) => {
                return Err(Error::new(
                    ErrorImpl::InvalidOperand {
                        op: String::from("invoke println"),
                        found: String::from("sink"),
                    },
                    Position::null(),
                ))
            }
        };

        self.builder
            .build_call(printf, &args, "")
            .map_err(backend_error)?;

        Ok(())
    }

    /// `fflush(NULL)` so JIT output reaches stdout before control returns.
    fn build_flush(&self) -> Result<(), Error> {
        let fflush = self.external_function("fflush", false);
        let null = self
            .context
            .i8_type()
            .ptr_type(AddressSpace::default())
            .const_null();

        self.builder
            .build_call(fflush, &[null.into()], "")
            .map_err(backend_error)?;

        Ok(())
    }
}

impl Executor for LlvmBackend<'_> {
    fn execute(&mut self, unit: &CompilationUnit) -> Result<(), Error> {
        self.lower(unit)?;
        self.run_jit().map(|_| ())
    }
}

fn pop<'a>(stack: &mut Vec<Slot<'a>>, op: &Op) -> Result<Slot<'a>, Error> {
    stack.pop().ok_or_else(|| {
        Error::new(
            ErrorImpl::StackUnderflow { op: op.to_string() },
            Position::null(),
        )
    })
}

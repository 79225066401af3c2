use std::{
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
    time::Instant,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use snc::{
    ast::ast::Program,
    compiler::{compiler::generate, unit::CompilationUnit},
    config::{
        output_path, sibling_path, unit_name_for, ParseOptions, RecoveryMode, UNIT_EXTENSION,
    },
    display_error,
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
    runtime::{interpreter::Interpreter, vm::Vm, Executor},
};

#[derive(Parser)]
#[command(name = "snc")]
#[command(about = "Compiler and runner for .sn scripts", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Source file
    input: PathBuf,

    /// Report every malformed statement and stop before building
    #[arg(long)]
    strict: bool,

    /// Unit name, defaults to the file stem
    #[arg(long)]
    name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source file and run it in-process
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Walk the AST instead of running the built unit
        #[arg(long)]
        interpret: bool,

        /// Print the token stream
        #[arg(long)]
        tokens: bool,

        /// Print the AST
        #[arg(long)]
        ast: bool,

        /// Print the disassembled unit
        #[arg(long)]
        disasm: bool,
    },

    /// Compile a source file to a .snbc unit
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write textual LLVM IR next to the output unit
        #[arg(long)]
        llvm: bool,
    },

    /// Run a serialized .snbc unit
    Exec {
        /// Unit file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SNC_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            source,
            interpret,
            tokens,
            ast,
            disasm,
        } => {
            let (tokens_out, program) = front_end(&source)?;

            if tokens {
                for token in &tokens_out {
                    println!("{}", token.debug_line());
                }
            }
            if ast {
                print!("{}", program);
            }

            let start = Instant::now();
            if interpret {
                Interpreter::new(io::stdout().lock())
                    .run(&program)
                    .map_err(lift)?;
            } else {
                let unit = build(&program)?;
                if disasm {
                    print!("{}", unit);
                }
                Vm::new(io::stdout().lock()).execute(&unit).map_err(lift)?;
            }
            info!("Ran in {:?}", start.elapsed());
        }
        Commands::Build {
            source,
            output,
            llvm,
        } => {
            let (_, program) = front_end(&source)?;
            let unit = build(&program)?;

            let directory = source
                .input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            let output = output
                .unwrap_or_else(|| output_path(&directory, unit.get_name(), UNIT_EXTENSION));

            fs::write(&output, unit.to_bytes())
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote {}", output.display());

            if llvm {
                let ir_output = sibling_path(&output, "ll");
                write_llvm(&unit, &ir_output)?;
                info!("Wrote {}", ir_output.display());
            }
        }
        Commands::Exec { input } => {
            let bytes =
                fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let unit = CompilationUnit::from_bytes(&bytes).map_err(lift)?;

            Vm::new(io::stdout().lock()).execute(&unit).map_err(lift)?;
        }
    }

    Ok(())
}

/// Tokenizes and parses `args.input`, rendering any diagnostics.
fn front_end(args: &SourceArgs) -> Result<(Vec<Token>, Program)> {
    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let recovery = if args.strict {
        RecoveryMode::Strict
    } else {
        RecoveryMode::Lenient
    };
    let options = ParseOptions::default()
        .with_unit_name(
            args.name
                .clone()
                .unwrap_or_else(|| unit_name_for(&args.input)),
        )
        .with_recovery(recovery);

    let start = Instant::now();
    let tokens = tokenize(source.clone(), Some(file_name.clone())).map_err(|error| {
        display_error(&error, &source);
        lift(error)
    })?;
    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (_, parsed) = parse(tokens.clone(), Rc::new(file_name.clone()), &options);
    info!("Parsed in {:?}", parse_start.elapsed());

    match parsed {
        Ok(program) => Ok((tokens, program)),
        Err(errors) => {
            for error in &errors {
                display_error(error, &source);
            }
            bail!("{} malformed statements in {}", errors.len(), file_name)
        }
    }
}

fn build(program: &Program) -> Result<CompilationUnit> {
    let start = Instant::now();
    let unit = generate(program).map_err(lift)?;
    info!("Built in {:?}", start.elapsed());

    Ok(unit)
}

#[cfg(feature = "llvm")]
fn write_llvm(unit: &CompilationUnit, output: &Path) -> Result<()> {
    use inkwell::context::Context;
    use snc::compiler::llvm::LlvmBackend;

    let context = Context::create();
    let mut backend = LlvmBackend::new(&context, unit.get_name());
    backend.lower(unit).map_err(lift)?;
    backend.save_module_to_file(output).map_err(lift)
}

#[cfg(not(feature = "llvm"))]
fn write_llvm(_unit: &CompilationUnit, _output: &Path) -> Result<()> {
    bail!("snc was built without the `llvm` feature")
}

/// Errors hold an `Rc` to their file name, so they are rendered into the
/// report rather than boxed.
fn lift(error: Error) -> anyhow::Error {
    anyhow!("{}", error)
}

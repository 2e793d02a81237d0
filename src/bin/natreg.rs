use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

use natreg::{Compiler, NatRegError, Repl, overrides};

#[derive(Parser)]
#[command(author, version, about = "NatReg to regular expression compiler")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a file containing NatReg statements
    Compile {
        target_file: PathBuf,
        /// File containing newline-delimited name=value definitions to inject
        #[arg(short, long = "env", value_name = "ENVIRONMENT")]
        env: Vec<PathBuf>,
    },
    /// Compile a snippet of NatReg source
    Eval {
        source: String,
        #[arg(short, long = "env", value_name = "ENVIRONMENT")]
        env: Vec<PathBuf>,
    },
    /// Start an interactive session
    Repl {
        #[arg(short, long = "env", value_name = "ENVIRONMENT")]
        env: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Repl { env: Vec::new() });
    let result = match command {
        Command::Compile { target_file, env } => compile_file(target_file, &env),
        Command::Eval { source, env } => compile_snippet(&source, &env),
        Command::Repl { env } => {
            compiler_with_overrides(&env).and_then(|compiler| Repl::with_compiler(compiler).run())
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[{}]: {err}", err.label());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays the bare pattern. Without `RUST_LOG`
/// only warnings are shown.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn compiler_with_overrides(env_files: &[PathBuf]) -> Result<Compiler, NatRegError> {
    let mut compiler = Compiler::new();
    for path in env_files {
        overrides::load_override_file(compiler.environment_mut(), path)?;
    }
    Ok(compiler)
}

fn compile_file(target_file: PathBuf, env_files: &[PathBuf]) -> Result<(), NatRegError> {
    let mut compiler = compiler_with_overrides(env_files)?;
    let source = fs::read_to_string(&target_file)?;
    println!("{}", compiler.compile_source(&source)?);
    Ok(())
}

fn compile_snippet(source: &str, env_files: &[PathBuf]) -> Result<(), NatRegError> {
    let mut compiler = compiler_with_overrides(env_files)?;
    println!("{}", compiler.compile_source(source)?);
    Ok(())
}

//! `ls8` - run an LS-8 program file

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use ls8_loader::{load_file, LoadMode};
use ls8_runtime::{IOHandler, VMConfig, VM};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ls8", version, about = "Run an LS-8 program")]
struct Cli {
    /// Program file, one binary byte per line
    program: PathBuf,

    /// Log every executed instruction to stderr
    #[arg(long)]
    trace: bool,

    /// Stop after N instructions
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Fail on malformed lines instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Print a listing of the loaded program and exit
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn default_filter(&self) -> &'static str {
        match (self.verbose, self.trace) {
            (0, false) => "warn",
            (0, true) => "warn,ls8_runtime=trace",
            (1, false) => "debug",
            (1, true) => "debug,ls8_runtime=trace",
            _ => "trace",
        }
    }

    fn load_mode(&self) -> LoadMode {
        if self.strict {
            LoadMode::Strict
        } else {
            LoadMode::Lenient
        }
    }

    fn vm_config(&self) -> VMConfig {
        VMConfig {
            max_cycles: self.max_cycles,
            trace: self.trace,
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    run(&cli)
}

/// Load and run the program. Any stop other than HLT is an error.
fn run(cli: &Cli) -> Result<()> {
    let program = load_file(&cli.program, cli.load_mode())
        .with_context(|| format!("failed to load {}", cli.program.display()))?;

    if cli.list {
        print!("{}", program);
        return Ok(());
    }

    let output = IOHandler::with_writer(io::stdout());
    let mut vm = VM::with_io(program, output, cli.vm_config())?;
    let result = vm
        .run()
        .with_context(|| format!("{} stopped with a fault", cli.program.display()))?;

    if !result.halt_reason.is_graceful() {
        bail!(
            "{} stopped without HLT after {} cycles: {:?}",
            cli.program.display(),
            result.cycles,
            result.halt_reason
        );
    }

    tracing::info!(cycles = result.cycles, "program halted");
    Ok(())
}

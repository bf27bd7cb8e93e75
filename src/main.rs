use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ndtm::run_program;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ndtm",
    about = "Simulate a nondeterministic Turing machine against input strings"
)]
struct Cli {
    /// Machine program file; read from stdin when omitted
    program: Option<PathBuf>,

    /// Emit debug-level diagnostics to stderr
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let stdout = io::stdout();
    let mut output = stdout.lock();

    match &cli.program {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            run_program(&mut BufReader::new(file), &mut output)
        }
        None => {
            let stdin = io::stdin();
            run_program(&mut stdin.lock(), &mut output)
        }
    }
    .context("simulation failed")?;

    Ok(())
}

fn init_tracing(trace: bool) {
    let default_level = if trace { "ndtm=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

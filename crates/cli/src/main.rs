//! Selector control unit simulator CLI.
//!
//! This binary provides a single entry point for the verification harness. It performs:
//! 1. **Reference run:** the built-in bring-up and selector sweep.
//! 2. **Script run:** a JSON stimulus script (drive, clock, expect steps).
//!
//! Every clock edge goes through the conformance monitors; the first failure
//! is printed and the process exits with status 1.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use selsim_core::common::{ConfigError, VerifyError};
use selsim_core::config::Config;
use selsim_core::sim::report::TraceWriter;
use selsim_core::sim::{RunSummary, Runner, Script, scenario};

#[derive(Parser, Debug)]
#[command(
    name = "selsim",
    author,
    version,
    about = "Cycle-accurate selector control unit simulator",
    long_about = "Run the reference scenario or a JSON stimulus script against the selector control unit model.\n\nExamples:\n  selsim reference --trace\n  selsim run scripts/commit.json --config board.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file (pin layout, timing, cycle budget).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print one report line per clock cycle.
    #[arg(short, long, global = true)]
    trace: bool,

    /// Print the run summary as JSON instead of the statistics banner.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the built-in reference scenario.
    Reference,

    /// Run a JSON stimulus script.
    Run {
        /// Script path.
        script: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{script}: {source}")]
    Verify {
        script: String,
        #[source]
        source: VerifyError,
    },

    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.general.trace |= cli.trace;
    Ok(config)
}

fn run(cli: &Cli) -> Result<RunSummary, CliError> {
    let config = load_config(cli)?;
    let script = match &cli.command {
        Commands::Reference => scenario::reference(),
        Commands::Run { script } => Script::from_file(script)?,
    };

    let mut runner = Runner::new(&config);
    if config.general.trace {
        runner = runner.with_observer(Box::new(TraceWriter::new(io::stdout(), config.pins)));
    }
    runner.run(&script).map_err(|source| CliError::Verify {
        script: script.name.clone(),
        source,
    })
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let summary = match run(&cli) {
        Ok(summary) => summary,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        name = %summary.name,
        cycles = summary.cycles,
        expectations = summary.expectations,
        "PASS"
    );

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                error!("{}", CliError::from(err));
                return ExitCode::FAILURE;
            }
        }
    } else {
        summary.stats.print();
    }
    ExitCode::SUCCESS
}

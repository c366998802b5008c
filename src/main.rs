// Command-line entry point for Delineate.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use delineate::application::DelineateUsecase;
use delineate::config::DelineateConfig;
use delineate::domain::coverage::{self, FileCoverage, FunctionRecord};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the element, documentation, data and expression streams of
    /// one or more translation units
    Unit {
        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Syntax tree dump(s); several inputs get one subdirectory each
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// List the mapped regions of coverage records
    Regions {
        /// Function records (JSON)
        records: PathBuf,
    },

    /// List the source files named by coverage records
    Sources {
        /// Function records (JSON)
        records: PathBuf,
    },

    /// List the counted region entries of merged file coverage
    Counters {
        /// File coverage (JSON)
        coverage: PathBuf,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid records in {}", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    let config = DelineateConfig::load(cli.config.as_deref()).context("Cannot load configuration")?;
    init_logging(&config.log_level);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Command::Unit { output, inputs } => {
            let usecase = DelineateUsecase { config: &config };
            match inputs.as_slice() {
                [] => bail!("No input given"),
                [input] => {
                    usecase
                        .run_file(input, &output)
                        .with_context(|| format!("Failed to delineate {}", input.display()))?;
                }
                _ => {
                    let summaries = usecase
                        .run_batch(&inputs, &output)
                        .context("Batch run failed")?;
                    tracing::info!(units = summaries.len(), output = %output.display(), "batch complete");
                }
            }
        }
        Command::Regions { records } => {
            let records: Vec<FunctionRecord> = read_json(&records)?;
            coverage::write_regions(&mut out, &records)?;
        }
        Command::Sources { records } => {
            let records: Vec<FunctionRecord> = read_json(&records)?;
            coverage::write_sources(&mut out, &records)?;
        }
        Command::Counters { coverage: path } => {
            let files: Vec<FileCoverage> = read_json(&path)?;
            coverage::write_counters(&mut out, &files)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            ExitCode::from(1)
        }
    }
}

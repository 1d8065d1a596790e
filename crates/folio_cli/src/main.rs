//! Folio CLI
//!
//! Runs JSON book scenarios against an in-memory surface and prints a
//! machine-readable report. Also prints or checks `folio.toml` files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_book::headless_runner::{run_loaded_scenario, HeadlessRunConfig};
use folio_book::{FolioConfig, HeadlessScenario};

/// Headless driver for Folio books
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Run Folio book scenarios headlessly")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario file and print its report
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Configuration file (folio.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frame length for wait steps, in milliseconds
        #[arg(long, default_value = "16")]
        tick_ms: u64,

        /// Also write the report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the default configuration, or validate a file
    Config {
        /// File to validate instead
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run {
            scenario,
            config,
            tick_ms,
            report,
        } => {
            let passed = run(&scenario, config.as_deref(), tick_ms, report.as_deref())?;
            if !passed {
                std::process::exit(1);
            }
        }
        Command::Config { check: Some(path) } => {
            load_config(Some(&path))?;
            tracing::info!(path = %path.display(), "configuration is valid");
        }
        Command::Config { check: None } => {
            print!("{}", FolioConfig::default().to_toml()?);
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<FolioConfig> {
    match path {
        Some(path) => FolioConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(FolioConfig::default()),
    }
}

/// Returns whether every assertion passed
fn run(
    scenario: &Path,
    config: Option<&Path>,
    tick_ms: u64,
    report_path: Option<&Path>,
) -> Result<bool> {
    let config = load_config(config)?;
    let scenario = HeadlessScenario::from_path(scenario)?;
    tracing::info!(
        name = scenario.name.as_deref().unwrap_or("unnamed"),
        steps = scenario.steps.len(),
        "running scenario"
    );

    let report = run_loaded_scenario(&scenario, &config, HeadlessRunConfig { tick_ms })?;
    report.write_to_writer(&mut std::io::stdout().lock())?;

    if let Some(path) = report_path {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        report.write_to_writer(&mut file)?;
    }

    if report.is_failed() {
        tracing::warn!(
            step = ?report.failed_step_index,
            message = report.message.as_deref().unwrap_or(""),
            "scenario failed"
        );
    }
    Ok(!report.is_failed())
}

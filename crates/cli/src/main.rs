use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use periodcost_costing::{CostingConfig, CostingEngine};

mod scenario;

use scenario::{ReplayReport, Scenario};

/// Periodic inventory consumption and costing.
#[derive(Debug, Parser)]
#[command(name = "periodcost", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a JSON scenario period by period and print the settled records.
    Replay {
        /// Scenario file (catalogs plus one entry per work period).
        scenario: PathBuf,
        /// Write the report here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON report.
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    periodcost_observability::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{err:#}");
            tracing::error!(error = %message, "replay failed");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Replay {
            scenario,
            output,
            pretty,
        } => {
            let raw = fs::read_to_string(&scenario)
                .with_context(|| format!("failed to read {}", scenario.display()))?;
            let parsed: Scenario = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", scenario.display()))?;

            let engine = CostingEngine::new(CostingConfig::from_env());
            let records = scenario::replay(&engine, &parsed)
                .with_context(|| format!("failed to replay {}", scenario.display()))?;
            let report = ReplayReport::new(records);

            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };

            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => {
                    let mut stdout = io::stdout().lock();
                    writeln!(stdout, "{json}")?;
                }
            }
            Ok(())
        }
    }
}

//! Ledger Token - Local Scenario Runner
//!
//! Executes scenario files against an in-memory host so contract behaviour
//! can be checked without a node. Storage can be carried between runs with
//! `--state`.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ledger_common::{constants::token, types::EntryPoint, MockHost};
use ledger_token::scenario::{parse_scenario, run_scenario};

#[derive(Parser)]
#[command(name = "ledger-token-app", version, about = "Run ledger token scenarios locally")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a scenario file and print one JSON outcome per step
    Run {
        /// Path to the scenario JSON
        scenario: PathBuf,
        /// Borsh state snapshot to start from
        #[arg(long)]
        state: Option<PathBuf>,
        /// Write the final state back to --state
        #[arg(long, requires = "state")]
        save_state: bool,
    },
    /// List the exported entry points
    Abi,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            scenario,
            state,
            save_state,
        } => match run(&scenario, state.as_ref(), save_state) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::from(1),
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::from(2)
            }
        },
        Command::Abi => {
            println!("{} ({})", token::NAME, token::SYMBOL);
            for entry in EntryPoint::ALL {
                let kind = if entry.is_readonly() { "view" } else { "update" };
                println!("  {:<12} args={} {}", entry.name(), entry.argument_count(), kind);
            }
            ExitCode::SUCCESS
        }
    }
}

/// Returns whether every step matched its expectation
fn run(
    scenario_path: &PathBuf,
    state_path: Option<&PathBuf>,
    save_state: bool,
) -> anyhow::Result<bool> {
    let text = fs::read_to_string(scenario_path)
        .with_context(|| format!("reading {}", scenario_path.display()))?;
    let scenario = parse_scenario(&text)?;

    let mut host = MockHost::new();
    if let Some(path) = state_path {
        if path.exists() {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            host.import_state(&bytes)
                .with_context(|| format!("{} is not a valid state snapshot", path.display()))?;
        }
    }

    let outcomes = run_scenario(&mut host, &scenario)?;
    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }

    if save_state {
        if let Some(path) = state_path {
            fs::write(path, host.export_state())
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }

    Ok(outcomes.iter().all(|o| o.as_expected))
}

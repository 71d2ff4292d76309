//! Skirmish runner.
//!
//! Loads a JSON scenario and either plays one combat (printing the outcome as
//! JSON, or the debrief with `--debrief`) or a batch of combats (printing the
//! batch report as JSON).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use skirmish_core::{Outcome, Scenario};
use tracing_subscriber::EnvFilter;

/// Skirmish - simulate tabletop combat outcomes
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Simulate combats between two teams and report the outcome")]
struct Args {
    /// Scenario file (JSON)
    #[arg(long)]
    scenario: PathBuf,

    /// Number of combats to run; more than one prints a batch report
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Seed for a single run, master seed for a batch
    #[arg(long)]
    seed: Option<u64>,

    /// Log every action
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Print the human-readable debrief of a single run
    #[arg(long)]
    debrief: bool,
}

/// JSON output of a single run
#[derive(Serialize)]
struct RunResult<'a> {
    scenario: &'a str,
    seed: u64,
    outcome: Outcome,
    summary: String,
}

/// Log level used when `RUST_LOG` is unset.
const fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(args.verbose)));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let json = fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading scenario {}", args.scenario.display()))?;
    let mut scenario = Scenario::from_json(&json).with_context(|| format!("parsing {}", args.scenario.display()))?;
    let name = args.scenario.display().to_string();

    if args.runs > 1 {
        let master_seed = args.seed.or(scenario.config.seed).unwrap_or_else(rand::random);
        tracing::info!(runs = args.runs, master_seed, "running batch");
        let report = scenario.run_batch(args.runs, master_seed)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(seed) = args.seed {
        scenario.config.seed = Some(seed);
    }
    let mut combat = scenario.manager()?;
    let outcome = combat.run_combat();

    if args.debrief {
        for line in combat.fight_debrief() {
            println!("{line}");
        }
    } else {
        let result = RunResult {
            scenario: &name,
            seed: combat.seed(),
            outcome,
            summary: outcome.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

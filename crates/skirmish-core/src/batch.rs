//! Many independent combats of the same match-up.
//!
//! Each run gets its own seed drawn from one master ChaCha stream, so a batch
//! is reproducible from the master seed alone. Runs share nothing and are
//! spread over the rayon thread pool; results are collected in run order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::combat::{CombatManager, EndReason, Outcome};
use crate::config::CombatConfig;
use crate::entity::{Team, TeamSide};
use crate::error::Result;
use crate::policy::PolicyCatalog;

/// One finished run of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Position in the batch.
    pub index: usize,
    /// Seed the run was played with.
    pub seed: u64,
    /// How the run ended.
    pub outcome: Outcome,
    /// Remaining health per actor, in id order.
    pub health: Vec<f32>,
}

/// Average remaining health of one actor over a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorHealth {
    /// Actor name.
    pub name: String,
    /// Team the actor fought on.
    pub side: TeamSide,
    /// Mean final health across runs.
    pub mean_health: f32,
}

/// Aggregate statistics of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Master seed the per-run seeds were drawn from.
    pub master_seed: u64,
    /// Number of combats run.
    pub runs: usize,
    /// Runs won by team A.
    pub team_a_wins: usize,
    /// Runs won by team B.
    pub team_b_wins: usize,
    /// Mutual eliminations.
    pub draws: usize,
    /// Runs stopped by the round cap.
    pub timeouts: usize,
    /// Share of runs team A won.
    pub win_rate_a: f64,
    /// Mean rounds played.
    pub mean_rounds: f64,
    /// Mean turns played.
    pub mean_turns: f64,
    /// Per-actor health summary in roster order.
    pub actors: Vec<ActorHealth>,
    /// Every run, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<RunSummary>,
}

/// Draws `runs` seeds from the master stream.
#[must_use]
pub fn run_seeds(master_seed: u64, runs: usize) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(master_seed);
    (0..runs).map(|_| rng.gen()).collect()
}

/// Plays `runs` combats of `team_a` against `team_b`.
///
/// The seed stored in `config` is ignored; every run is seeded from the
/// master stream instead.
///
/// # Errors
///
/// Returns the construction error of the match-up, if any.
pub fn run_batch(
    team_a: &Team,
    team_b: &Team,
    config: &CombatConfig,
    runs: usize,
    master_seed: u64,
) -> Result<BatchReport> {
    let catalog = PolicyCatalog::default_catalog();
    let seeds = run_seeds(master_seed, runs);

    let summaries = seeds
        .into_par_iter()
        .enumerate()
        .map(|(index, seed)| {
            let mut combat = CombatManager::with_catalog(
                team_a.clone(),
                team_b.clone(),
                config.clone().with_seed(seed),
                &catalog,
            )?;
            let outcome = combat.run_combat();
            let health = combat.arena().iter().map(crate::state::ActorState::health).collect();
            Ok(RunSummary {
                index,
                seed,
                outcome,
                health,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let report = summarize(team_a, team_b, master_seed, summaries);
    info!(
        runs = report.runs,
        win_rate_a = report.win_rate_a,
        mean_rounds = report.mean_rounds,
        "batch finished"
    );
    Ok(report)
}

#[allow(clippy::cast_precision_loss)]
fn summarize(team_a: &Team, team_b: &Team, master_seed: u64, summaries: Vec<RunSummary>) -> BatchReport {
    let runs = summaries.len();
    let count = |pred: &dyn Fn(&Outcome) -> bool| summaries.iter().filter(|s| pred(&s.outcome)).count();
    let team_a_wins = count(&|o| o.winner == Some(TeamSide::A));
    let team_b_wins = count(&|o| o.winner == Some(TeamSide::B));
    let draws = count(&|o| o.end == EndReason::MutualElimination);
    let timeouts = count(&|o| o.end == EndReason::RoundLimit);

    let mean = |total: f64| if runs == 0 { 0.0 } else { total / runs as f64 };
    let mean_rounds = mean(summaries.iter().map(|s| f64::from(s.outcome.rounds_elapsed)).sum());
    let mean_turns = mean(summaries.iter().map(|s| f64::from(s.outcome.turns)).sum());

    let templates = team_a
        .iter()
        .map(|a| (a, TeamSide::A))
        .chain(team_b.iter().map(|b| (b, TeamSide::B)));
    let actors = templates
        .enumerate()
        .map(|(slot, (template, side))| {
            let total: f64 = summaries
                .iter()
                .filter_map(|s| s.health.get(slot))
                .map(|h| f64::from(*h))
                .sum();
            #[allow(clippy::cast_possible_truncation)]
            let mean_health = mean(total) as f32;
            ActorHealth {
                name: template.name.clone(),
                side,
                mean_health,
            }
        })
        .collect();

    BatchReport {
        master_seed,
        runs,
        team_a_wins,
        team_b_wins,
        draws,
        timeouts,
        win_rate_a: mean(team_a_wins as f64),
        mean_rounds,
        mean_turns,
        actors,
        summaries,
    }
}

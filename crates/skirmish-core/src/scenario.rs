//! JSON scenario files.
//!
//! A scenario is two lists of actor templates plus an optional combat
//! configuration:
//!
//! ```json
//! {
//!   "team_a": [{ "name": "Knight", "items": [] }],
//!   "team_b": [{ "name": "Goblin" }],
//!   "config": { "initiative_dc": 12, "max_rounds": 50 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::batch::{run_batch, BatchReport};
use crate::combat::CombatManager;
use crate::config::CombatConfig;
use crate::entity::{Actor, Team};
use crate::error::{ConfigError, Result};

/// A match-up loaded from or saved to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// First side.
    pub team_a: Vec<Actor>,
    /// Second side.
    pub team_b: Vec<Actor>,
    /// Combat configuration.
    #[serde(default)]
    pub config: CombatConfig,
}

impl Scenario {
    /// Parses a scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Scenario`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Scenario(e.to_string()))
    }

    /// Serializes the scenario as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Scenario`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Scenario(e.to_string()))
    }

    /// Both teams ready to share between runs.
    #[must_use]
    pub fn teams(&self) -> (Team, Team) {
        (
            self.team_a.iter().cloned().collect(),
            self.team_b.iter().cloned().collect(),
        )
    }

    /// A combat manager for one run of this scenario.
    ///
    /// # Errors
    ///
    /// See [`CombatManager::new`].
    pub fn manager(&self) -> Result<CombatManager> {
        let (team_a, team_b) = self.teams();
        CombatManager::new(team_a, team_b, self.config.clone())
    }

    /// Plays `runs` combats of this scenario. See [`run_batch`].
    ///
    /// # Errors
    ///
    /// Returns the construction error of the match-up, if any.
    pub fn run_batch(&self, runs: usize, master_seed: u64) -> Result<BatchReport> {
        let (team_a, team_b) = self.teams();
        run_batch(&team_a, &team_b, &self.config, runs, master_seed)
    }
}

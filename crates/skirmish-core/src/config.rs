//! Combat configuration.
//!
//! [`CombatConfig`] carries the per-combat knobs (initiative DC, round cap,
//! seed). [`RuleConstants`] names every number of the rules formulas so
//! table variants are data, not code.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Numbers of the attack and action rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConstants {
    /// Natural roll needed for a critical hit before modifiers.
    pub base_critical_threshold: u32,
    /// Lowest threshold modifiers can push crits to.
    pub min_critical_threshold: u32,
    /// Margin over defense that makes a hit heavy.
    pub heavy_hit_margin: i32,
    /// Each further margin of this size makes the hit one step more brutal.
    pub brutal_hit_step: i32,
    /// Damage a heavy hit adds before modifiers.
    pub base_heavy_hit_damage: i32,
    /// Damage each brutal step adds before modifiers.
    pub base_brutal_hit_damage: i32,
    /// Action point cost of Defend.
    pub defend_cost: u32,
    /// Attacks per turn before each further attack rolls with disadvantage.
    pub attacks_before_penalty: u32,
    /// Help die sizes for the first, second, ... help in one turn. The last
    /// entry repeats.
    pub help_dice: Vec<u32>,
}

impl Default for RuleConstants {
    fn default() -> Self {
        Self {
            base_critical_threshold: 20,
            min_critical_threshold: 2,
            heavy_hit_margin: 5,
            brutal_hit_step: 5,
            base_heavy_hit_damage: 1,
            base_brutal_hit_damage: 1,
            defend_cost: 2,
            attacks_before_penalty: 1,
            help_dice: vec![8, 6, 4],
        }
    }
}

impl RuleConstants {
    /// Help die for the `nth` help (0-based) given in one turn.
    #[must_use]
    pub fn help_die(&self, nth: u32) -> u32 {
        let index = usize::try_from(nth).unwrap_or(usize::MAX);
        self.help_dice
            .get(index)
            .or_else(|| self.help_dice.last())
            .copied()
            .unwrap_or(0)
    }

    fn validate(&self) -> Result<()> {
        if self.defend_cost == 0 {
            return Err(ConfigError::InvalidRules("defend_cost must be at least 1".into()));
        }
        if self.help_dice.is_empty() || self.help_dice.contains(&0) {
            return Err(ConfigError::InvalidRules(
                "help_dice must list at least one die with one or more sides".into(),
            ));
        }
        if self.heavy_hit_margin <= 0 || self.brutal_hit_step <= 0 {
            return Err(ConfigError::InvalidRules(
                "heavy_hit_margin and brutal_hit_step must be positive".into(),
            ));
        }
        if self.min_critical_threshold == 0
            || self.min_critical_threshold > self.base_critical_threshold
        {
            return Err(ConfigError::InvalidRules(
                "critical thresholds must satisfy 1 <= min <= base".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration of one combat.
///
/// # Example
///
/// ```
/// use skirmish_core::config::CombatConfig;
///
/// let config = CombatConfig::new(12).with_max_rounds(30).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Team A goes first when its best initiative meets this.
    pub initiative_dc: i32,
    /// The combat ends as a timeout after this many rounds.
    pub max_rounds: u32,
    /// Seed of the dice stream; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Rule constants.
    pub rules: RuleConstants,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            initiative_dc: 10,
            max_rounds: 100,
            seed: None,
            rules: RuleConstants::default(),
        }
    }
}

impl CombatConfig {
    /// Default configuration with the given initiative DC.
    #[must_use]
    pub fn new(initiative_dc: i32) -> Self {
        Self {
            initiative_dc,
            ..Self::default()
        }
    }

    /// Sets the round limit.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the rule constants.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleConstants) -> Self {
        self.rules = rules;
        self
    }

    /// Fails fast on values that cannot describe a combat.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NegativeInitiativeDc`], [`ConfigError::InvalidMaxRounds`]
    /// or [`ConfigError::InvalidRules`].
    pub fn validate(&self) -> Result<()> {
        if self.initiative_dc < 0 {
            return Err(ConfigError::NegativeInitiativeDc(self.initiative_dc));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds(self.max_rounds));
        }
        self.rules.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CombatConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_dc_fails() {
        assert_eq!(
            CombatConfig::new(-1).validate(),
            Err(ConfigError::NegativeInitiativeDc(-1))
        );
    }

    #[test]
    fn zero_rounds_fails() {
        assert_eq!(
            CombatConfig::default().with_max_rounds(0).validate(),
            Err(ConfigError::InvalidMaxRounds(0))
        );
    }

    #[test]
    fn free_defend_fails() {
        let rules = RuleConstants {
            defend_cost: 0,
            ..RuleConstants::default()
        };
        let err = CombatConfig::default().with_rules(rules).validate();
        assert!(matches!(err, Err(ConfigError::InvalidRules(_))));
    }

    #[test]
    fn empty_help_dice_fail() {
        let rules = RuleConstants {
            help_dice: Vec::new(),
            ..RuleConstants::default()
        };
        let err = CombatConfig::default().with_rules(rules).validate();
        assert!(matches!(err, Err(ConfigError::InvalidRules(_))));
    }

    #[test]
    fn zero_sided_help_die_fails() {
        let rules = RuleConstants {
            help_dice: vec![8, 0],
            ..RuleConstants::default()
        };
        let err = CombatConfig::default().with_rules(rules).validate();
        assert!(matches!(err, Err(ConfigError::InvalidRules(_))));
    }

    #[test]
    fn help_die_repeats_last_size() {
        let rules = RuleConstants::default();
        assert_eq!(rules.help_die(0), 8);
        assert_eq!(rules.help_die(1), 6);
        assert_eq!(rules.help_die(2), 4);
        assert_eq!(rules.help_die(9), 4);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: CombatConfig =
            serde_json::from_str(r#"{"initiative_dc": 14, "seed": 3}"#).unwrap();
        assert_eq!(config.initiative_dc, 14);
        assert_eq!(config.max_rounds, 100);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.rules, RuleConstants::default());
    }
}

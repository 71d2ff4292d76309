//! Structured record of everything that happened in one combat.
//!
//! The [`ActionLog`] is owned by its `CombatManager` and lives exactly as
//! long as the run. Every resolved action appends one [`ActionRecord`]; the
//! `Display` impl gives the human-readable line used by the debrief.

use std::fmt;

use serde::Serialize;

use crate::entity::ActorId;
use crate::policy::ActionKind;
use crate::resolver::attack::AttackRoll;
use crate::resolver::AppliedDamage;
use crate::state::Expiry;

/// Why a requested action was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The weapon index does not exist.
    NoWeapon,
    /// No living enemy to attack.
    NoTarget,
    /// No ally to help.
    NoAlly,
    /// No concentration spell to maintain, or already maintained.
    NoConcentration,
    /// Not enough action points left.
    InsufficientActionPoints,
    /// Defend while already defending.
    AlreadyDefending,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWeapon => write!(f, "no weapon"),
            Self::NoTarget => write!(f, "no target"),
            Self::NoAlly => write!(f, "no ally"),
            Self::NoConcentration => write!(f, "nothing to concentrate on"),
            Self::InsufficientActionPoints => write!(f, "not enough action points"),
            Self::AlreadyDefending => write!(f, "already defending"),
        }
    }
}

/// A requested action that could not be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fallback {
    /// Action the policy asked for.
    pub requested: ActionKind,
    /// Why it could not be taken.
    pub reason: FallbackReason,
}

/// One resolved action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRecord {
    /// Round the action happened in.
    pub round: u32,
    /// Combat-wide turn counter.
    pub turn: u32,
    /// Acting actor.
    pub actor: ActorId,
    /// Acting actor name.
    pub actor_name: String,
    /// What was actually done.
    pub kind: ActionKind,
    /// Target, if the action had one.
    pub target: Option<ActorId>,
    /// Target name.
    pub target_name: Option<String>,
    /// Dice and grading of an attack.
    pub attack: Option<AttackRoll>,
    /// Damage dealt by a hit.
    pub damage: Option<AppliedDamage>,
    /// Bonus granted by a help.
    pub help_bonus: Option<i32>,
    /// Target health after the action.
    pub target_health: Option<f32>,
    /// Set when the strategy's choice was replaced.
    pub fallback: Option<Fallback>,
    /// Durations that ran out at the end of this turn.
    pub expired: Vec<Expiry>,
}

impl ActionRecord {
    /// A record with only the actor and action filled in.
    #[must_use]
    pub fn new(round: u32, turn: u32, actor: ActorId, actor_name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            round,
            turn,
            actor,
            actor_name: actor_name.into(),
            kind,
            target: None,
            target_name: None,
            attack: None,
            damage: None,
            help_bonus: None,
            target_health: None,
            fallback: None,
            expired: Vec::new(),
        }
    }
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}.{}] {} {}", self.round, self.turn, self.actor_name, self.kind)?;
        if let Some(name) = &self.target_name {
            write!(f, " {name}")?;
        }
        if let Some(fallback) = &self.fallback {
            write!(f, " (instead of {}: {})", fallback.requested.label(), fallback.reason)?;
        }
        if let Some(roll) = &self.attack {
            write!(f, ": rolled {} ({} vs {}), {}", roll.natural, roll.total, roll.defense, roll.quality)?;
            if roll.critical {
                write!(f, ", critical")?;
            }
        }
        if let Some(damage) = &self.damage {
            write!(f, ", {} damage", damage.total)?;
            let parts: Vec<String> = damage
                .breakdown
                .iter()
                .map(|e| format!("{} {}", e.amount, e.damage_type))
                .collect();
            if !parts.is_empty() {
                write!(f, " ({})", parts.join(", "))?;
            }
        }
        if let Some(bonus) = self.help_bonus {
            write!(f, ": +{bonus} to hit")?;
        }
        if let (Some(health), Some(name)) = (self.target_health, &self.target_name) {
            if self.damage.is_some() {
                write!(f, ", {name} at {health}")?;
            }
        }
        for expiry in &self.expired {
            write!(f, "; {expiry}")?;
        }
        Ok(())
    }
}

/// Ordered action records of one combat.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActionLog {
    records: Vec<ActionRecord>,
}

impl ActionLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: ActionRecord) {
        self.records.push(record);
    }

    /// All records in order.
    #[must_use]
    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut ActionRecord> {
        self.records.last_mut()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one actor in order.
    pub fn by_actor(&self, actor: ActorId) -> impl Iterator<Item = &ActionRecord> {
        self.records.iter().filter(move |r| r.actor == actor)
    }
}

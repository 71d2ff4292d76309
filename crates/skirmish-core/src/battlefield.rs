//! Read-only snapshots handed to decision policies.
//!
//! Policies never see live actor state. Before each decision the combat
//! manager captures a [`Combatant`] per actor, so strategies and targeting
//! stay pure functions of what they are given.

use serde::Serialize;

use crate::entity::{ActorId, Conditions, TeamSide};

/// What a policy may know about one actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combatant {
    /// Stable actor id.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Team the actor fights on.
    pub side: TeamSide,
    /// Current health.
    pub health: f32,
    /// Health ceiling after traits.
    pub max_health: f32,
    /// Effective combat mastery, used as threat.
    pub combat_mastery: i32,
    /// Conditions currently shown.
    pub conditions: Conditions,
    /// Whom the actor is currently attacking.
    pub current_target: Option<ActorId>,
    /// Action points left this turn.
    pub action_points: u32,
    /// Action points at the start of a turn.
    pub max_action_points: u32,
    /// Attacks made this turn.
    pub attacks_made: u32,
    /// Unspent advantage.
    pub advantage: u32,
    /// Disadvantage the next attack would carry from the multiple attack
    /// penalty.
    pub next_attack_penalty: u32,
    /// Helps given this turn.
    pub helps_given: u32,
    /// Defending until its next turn.
    pub defending: bool,
    /// Defend is affordable and not already active.
    pub can_defend: bool,
    /// Holds a concentration spell.
    pub concentrating: bool,
    /// Concentration already sustained this turn.
    pub sustained: bool,
    /// Number of equipped weapons.
    pub weapon_count: usize,
}

impl Combatant {
    /// Health above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Health over max health, 0 for a zero max.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.max_health
        }
    }

    /// Returns true if a living member of `enemies` is attacking this actor.
    #[must_use]
    pub fn is_targeted_by(&self, enemies: &[Combatant]) -> bool {
        enemies
            .iter()
            .any(|e| e.is_alive() && e.current_target == Some(self.id))
    }
}

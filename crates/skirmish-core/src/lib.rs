//! # Skirmish Core
//!
//! Outcome simulator for tabletop skirmish combat.
//!
//! This crate resolves whole combats between two teams of actors: initiative,
//! a per-turn action economy, attack rolls with advantage and critical hits,
//! and a damage pipeline fed by rule modifiers from items, traits and spells.
//!
//! ## Architecture
//!
//! - **Templates** ([`entity`]): actors, items, traits and spells as plain data
//! - **Rules** ([`modifier`], [`resolver`]): modifier aggregation, attack
//!   classification and the damage pipeline
//! - **State** ([`state`], [`arena`]): live actor state derived from templates
//! - **Policies** ([`policy`], [`policies`]): strategy and targeting decisions
//!   on read-only snapshots
//! - **Driver** ([`combat`], [`batch`]): the turn state machine and repeated runs
//!
//! ## Usage
//!
//! ```
//! use skirmish_core::prelude::*;
//!
//! let knight = Actor::new("Knight")
//!     .with_item(Item::weapon("Sword", vec![DamageInstance::new(DamageType::Slashing, 3.0)]));
//! let goblin = Actor::new("Goblin")
//!     .with_item(Item::weapon("Knife", vec![DamageInstance::new(DamageType::Piercing, 1.0)]));
//!
//! let mut combat = CombatManager::new(vec![knight], vec![goblin], CombatConfig::new(10).with_seed(1))?;
//! let outcome = combat.run_combat();
//! println!("{outcome}");
//! # Ok::<(), skirmish_core::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod batch;
pub mod battlefield;
pub mod combat;
pub mod config;
pub mod damage;
pub mod dice;
pub mod entity;
pub mod error;
pub mod initiative;
pub mod log;
pub mod modifier;
pub mod policies;
pub mod policy;
pub mod resolver;
pub mod scenario;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;

pub use batch::{run_batch, BatchReport, RunSummary};
pub use combat::{CombatManager, EndReason, Outcome, Phase};
pub use config::{CombatConfig, RuleConstants};
pub use error::{ConfigError, Result};
pub use scenario::Scenario;

/// Types needed to assemble and run a combat.
pub mod prelude {
    pub use crate::combat::{CombatManager, EndReason, Outcome};
    pub use crate::config::{CombatConfig, RuleConstants};
    pub use crate::damage::{DamageCategory, DamageInstance, DamageType};
    pub use crate::entity::{Actor, ActorId, Conditions, Item, ItemSlot, Spell, Team, TeamSide, Trait};
    pub use crate::modifier::{DamageFilter, EffectTag, ModifierSet, RuleModifier};
    pub use crate::policy::{ActionIntent, PolicyCatalog, Strategy, Targeting};
    pub use crate::stats::{StatBlock, StatDelta};
}

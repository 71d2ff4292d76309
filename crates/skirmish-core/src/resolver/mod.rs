//! Pure resolution math.
//!
//! Resolvers compute results from read-only inputs and never touch actor
//! state. The combat manager applies what they return.
//!
//! - [`damage`]: raw damage instances to applied damage
//! - [`attack`]: critical thresholds, hit quality and pre-pipeline bonuses

pub mod attack;
pub mod damage;

pub use attack::{classify_hit, critical_threshold, is_critical, quality_bonus, with_first_bonus, AttackRoll, HitQuality};
pub use damage::{resolve_attack, AppliedDamage, DamageEntry};

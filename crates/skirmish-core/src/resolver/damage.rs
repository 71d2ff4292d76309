//! The damage pipeline.
//!
//! [`resolve_attack`] turns an ordered list of [`DamageInstance`]s into the
//! amount a defender loses. Per instance, in this order:
//!
//! 1. double the base value on a critical hit
//! 2. add the defender's summed flat changes for the type
//! 3. multiply by the defender's product of multipliers for the type
//! 4. clamp at zero
//!
//! The per-instance results are summed. Attacker-side bonuses (heavy hits,
//! weapon styles) are folded into the instances by the attack resolver
//! before they get here, which keeps `critical = 2 x base` exact.

use serde::{Deserialize, Serialize};

use crate::damage::{DamageInstance, DamageType};
use crate::modifier::ModifierSet;

/// Final amount of one damage instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageEntry {
    /// Type the entry was dealt as.
    pub damage_type: DamageType,
    /// Amount after modifiers, never negative.
    pub amount: f32,
}

/// Result of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedDamage {
    /// Sum over the breakdown.
    pub total: f32,
    /// One entry per input instance, in input order.
    pub breakdown: Vec<DamageEntry>,
}

/// Resolves damage instances against a defender's modifiers.
///
/// A defender without a matching modifier takes the instance unchanged.
///
/// # Example
///
/// ```
/// use skirmish_core::damage::{DamageInstance, DamageType};
/// use skirmish_core::modifier::{DamageFilter, ModifierSet, RuleModifier};
/// use skirmish_core::resolver::resolve_attack;
///
/// let mut defender = ModifierSet::new();
/// defender.push(RuleModifier::immunity("Fireproof", DamageFilter::Exact(DamageType::Fire)));
///
/// let hit = [
///     DamageInstance::new(DamageType::Fire, 5.0),
///     DamageInstance::new(DamageType::Slashing, 2.0),
/// ];
/// let applied = resolve_attack(&defender, &hit, true);
/// assert!((applied.total - 4.0).abs() < f32::EPSILON);
/// assert_eq!(applied.breakdown.len(), 2);
/// ```
#[must_use]
pub fn resolve_attack(
    defender: &ModifierSet,
    instances: &[DamageInstance],
    is_critical: bool,
) -> AppliedDamage {
    let breakdown: Vec<DamageEntry> = instances
        .iter()
        .map(|instance| DamageEntry {
            damage_type: instance.damage_type,
            amount: resolve_instance(defender, instance, is_critical),
        })
        .collect();
    AppliedDamage {
        total: breakdown.iter().map(|e| e.amount).sum(),
        breakdown,
    }
}

fn resolve_instance(defender: &ModifierSet, instance: &DamageInstance, is_critical: bool) -> f32 {
    let base = if is_critical {
        instance.base_value * 2.0
    } else {
        instance.base_value
    };
    let flat = base + defender.flat_delta(instance.damage_type);
    let scaled = flat * defender.multiplier(instance.damage_type);
    scaled.max(0.0)
}

// =============================================================================
// Tests
// =============================================================================

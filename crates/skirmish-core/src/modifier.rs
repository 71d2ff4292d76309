//! Rule modifiers and their per-actor aggregation.
//!
//! A [`RuleModifier`] is one named effect. Traits bundle modifiers, and every
//! trait an actor carries (directly, through an equipped item, or through an
//! active spell) contributes to that actor's [`ModifierSet`].
//!
//! # Composition
//!
//! Damage-taken modifiers come in two classes that never mix:
//!
//! - [`DamageChange::Flat`] deltas are summed (negative values reduce damage)
//! - [`DamageChange::Scale`] multipliers are multiplied (0 is immunity)
//!
//! The damage pipeline applies the flat sum first, then the product, then
//! clamps at zero.
//!
//! Rule bonuses that older tables wrote as literals (heavy hit damage, to-hit
//! bonuses) are [`ModifierKind::Effect`] entries keyed by an [`EffectTag`].
//!
//! # Example
//!
//! ```
//! use skirmish_core::damage::{DamageCategory, DamageType};
//! use skirmish_core::modifier::{DamageFilter, ModifierSet, RuleModifier};
//!
//! let mut set = ModifierSet::new();
//! set.push(RuleModifier::resistance("Leather", DamageFilter::Category(DamageCategory::Physical), 1.0));
//! set.push(RuleModifier::immunity("Fireproof", DamageFilter::Exact(DamageType::Fire)));
//!
//! assert!((set.flat_delta(DamageType::Slashing) + 1.0).abs() < f32::EPSILON);
//! assert!(set.multiplier(DamageType::Fire).abs() < f32::EPSILON);
//! assert!((set.multiplier(DamageType::Cold) - 1.0).abs() < f32::EPSILON);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::damage::{DamageCategory, DamageType};
use crate::entity::{Conditions, Trait};
use crate::stats::StatDelta;

// =============================================================================
// Modifier Kinds
// =============================================================================

/// Which damage a damage-taken modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageFilter {
    /// Every damage type.
    Any,
    /// Every type of one category.
    Category(DamageCategory),
    /// One exact type.
    Exact(DamageType),
}

impl DamageFilter {
    /// Returns true if damage of `damage_type` is affected.
    #[must_use]
    pub fn matches(self, damage_type: DamageType) -> bool {
        match self {
            Self::Any => true,
            Self::Category(category) => damage_type.category() == category,
            Self::Exact(exact) => exact == damage_type,
        }
    }
}

/// How a damage-taken modifier changes the amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageChange {
    /// Added to the damage; negative values are reductions.
    Flat(f32),
    /// Multiplies the damage; 0 is immunity, above 1 is a vulnerability.
    Scale(f32),
}

/// Named rule bonuses read by the attack resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTag {
    /// Extra damage on a heavy hit.
    HeavyHitDamage,
    /// Extra damage per brutal step beyond a heavy hit.
    BrutalHitDamage,
    /// Added to attack rolls.
    HitBonus,
    /// Added to the first damage instance of every hit.
    HitDamage,
}

impl fmt::Display for EffectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeavyHitDamage => write!(f, "heavy hit damage"),
            Self::BrutalHitDamage => write!(f, "brutal hit damage"),
            Self::HitBonus => write!(f, "hit bonus"),
            Self::HitDamage => write!(f, "hit damage"),
        }
    }
}

/// What a single modifier does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Changes damage taken by the carrier.
    DamageTaken {
        /// Affected damage.
        filter: DamageFilter,
        /// Flat or multiplicative change.
        change: DamageChange,
    },
    /// Added to initiative rolls.
    Initiative(i32),
    /// Shifts the natural roll needed for a critical hit; negative widens.
    CriticalThreshold(i32),
    /// Data-driven rule bonus.
    Effect {
        /// Rule the bonus applies to.
        tag: EffectTag,
        /// Bonus amount.
        value: f32,
    },
    /// Bonus damage when the target has any of `against`.
    ConditionalDamage {
        /// Conditions that trigger the bonus.
        against: Conditions,
        /// Extra damage dealt.
        bonus: f32,
    },
}

// =============================================================================
// Rule Modifier
// =============================================================================

/// One named rule effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleModifier {
    /// Human readable source, e.g. "Fire Immunity".
    pub name: String,
    /// The effect itself.
    pub kind: ModifierKind,
}

impl RuleModifier {
    /// Creates a modifier from parts.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ModifierKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Flat reduction of `amount` for matching damage.
    #[must_use]
    pub fn resistance(name: impl Into<String>, filter: DamageFilter, amount: f32) -> Self {
        Self::new(
            name,
            ModifierKind::DamageTaken {
                filter,
                change: DamageChange::Flat(-amount),
            },
        )
    }

    /// Flat increase of `amount` for matching damage.
    #[must_use]
    pub fn vulnerability(name: impl Into<String>, filter: DamageFilter, amount: f32) -> Self {
        Self::new(
            name,
            ModifierKind::DamageTaken {
                filter,
                change: DamageChange::Flat(amount),
            },
        )
    }

    /// Multiplies matching damage by `multiplier`.
    #[must_use]
    pub fn scale(name: impl Into<String>, filter: DamageFilter, multiplier: f32) -> Self {
        Self::new(
            name,
            ModifierKind::DamageTaken {
                filter,
                change: DamageChange::Scale(multiplier),
            },
        )
    }

    /// Matching damage is multiplied by zero.
    #[must_use]
    pub fn immunity(name: impl Into<String>, filter: DamageFilter) -> Self {
        Self::scale(name, filter, 0.0)
    }

    /// Initiative modifier.
    #[must_use]
    pub fn initiative(name: impl Into<String>, delta: i32) -> Self {
        Self::new(name, ModifierKind::Initiative(delta))
    }

    /// Critical threshold modifier.
    #[must_use]
    pub fn critical_threshold(name: impl Into<String>, delta: i32) -> Self {
        Self::new(name, ModifierKind::CriticalThreshold(delta))
    }

    /// Effect modifier.
    #[must_use]
    pub fn effect(name: impl Into<String>, tag: EffectTag, value: f32) -> Self {
        Self::new(name, ModifierKind::Effect { tag, value })
    }

    /// Weapon-style bonus against targets showing any of `against`.
    #[must_use]
    pub fn conditional_damage(name: impl Into<String>, against: Conditions, bonus: f32) -> Self {
        Self::new(name, ModifierKind::ConditionalDamage { against, bonus })
    }

    /// Rejects values the pipeline cannot compose.
    ///
    /// # Errors
    ///
    /// Returns a description when a number is not finite or a multiplier is
    /// negative.
    pub fn validate(&self) -> Result<(), String> {
        let finite = match &self.kind {
            ModifierKind::DamageTaken {
                change: DamageChange::Scale(m),
                ..
            } => {
                if *m < 0.0 {
                    return Err(format!("{}: multiplier {m} is negative", self.name));
                }
                m.is_finite()
            }
            ModifierKind::DamageTaken {
                change: DamageChange::Flat(v),
                ..
            }
            | ModifierKind::Effect { value: v, .. }
            | ModifierKind::ConditionalDamage { bonus: v, .. } => v.is_finite(),
            ModifierKind::Initiative(_) | ModifierKind::CriticalThreshold(_) => true,
        };
        if finite {
            Ok(())
        } else {
            Err(format!("{}: value is not finite", self.name))
        }
    }
}

// =============================================================================
// Modifier Set
// =============================================================================

/// Effective modifiers of one actor at one point in time.
///
/// Built from traits and cached by the actor state; rebuilt whenever a source
/// appears or expires. Besides rule modifiers it carries the summed stat
/// deltas and the union of conditions the traits impose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierSet {
    modifiers: Vec<RuleModifier>,
    stats: StatDelta,
    conditions: Conditions,
}

impl ModifierSet {
    /// Creates an empty set; every query returns the neutral value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges every trait in iteration order.
    #[must_use]
    pub fn from_traits<'a>(traits: impl IntoIterator<Item = &'a Trait>) -> Self {
        let mut set = Self::new();
        for source in traits {
            set.absorb(source);
        }
        set
    }

    /// Adds the modifiers, stats and conditions of one trait.
    pub fn absorb(&mut self, source: &Trait) {
        self.modifiers.extend(source.modifiers.iter().cloned());
        self.stats += source.stats;
        self.conditions |= source.conditions;
    }

    /// Adds a single modifier.
    pub fn push(&mut self, modifier: RuleModifier) {
        self.modifiers.push(modifier);
    }

    /// Number of rule modifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Returns true if no rule modifier is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Iterates over rule modifiers in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleModifier> {
        self.modifiers.iter()
    }

    /// Summed stat deltas.
    #[must_use]
    pub const fn stats(&self) -> &StatDelta {
        &self.stats
    }

    /// Conditions imposed on the carrier.
    #[must_use]
    pub const fn conditions(&self) -> Conditions {
        self.conditions
    }

    fn damage_changes(&self, damage_type: DamageType) -> impl Iterator<Item = DamageChange> + '_ {
        self.modifiers.iter().filter_map(move |m| match m.kind {
            ModifierKind::DamageTaken { filter, change } if filter.matches(damage_type) => {
                Some(change)
            }
            _ => None,
        })
    }

    /// Sum of flat changes for `damage_type`; 0 when none match.
    #[must_use]
    pub fn flat_delta(&self, damage_type: DamageType) -> f32 {
        self.damage_changes(damage_type)
            .filter_map(|c| match c {
                DamageChange::Flat(v) => Some(v),
                DamageChange::Scale(_) => None,
            })
            .sum()
    }

    /// Product of multipliers for `damage_type`; 1 when none match.
    #[must_use]
    pub fn multiplier(&self, damage_type: DamageType) -> f32 {
        self.damage_changes(damage_type)
            .filter_map(|c| match c {
                DamageChange::Scale(m) => Some(m),
                DamageChange::Flat(_) => None,
            })
            .product()
    }

    /// Summed initiative modifiers.
    #[must_use]
    pub fn initiative_delta(&self) -> i32 {
        self.modifiers
            .iter()
            .filter_map(|m| match m.kind {
                ModifierKind::Initiative(d) => Some(d),
                _ => None,
            })
            .sum()
    }

    /// Summed critical threshold shifts.
    #[must_use]
    pub fn critical_threshold_delta(&self) -> i32 {
        self.modifiers
            .iter()
            .filter_map(|m| match m.kind {
                ModifierKind::CriticalThreshold(d) => Some(d),
                _ => None,
            })
            .sum()
    }

    /// Summed value of every effect carrying `tag`.
    #[must_use]
    pub fn effect(&self, tag: EffectTag) -> f32 {
        self.modifiers
            .iter()
            .filter_map(|m| match m.kind {
                ModifierKind::Effect { tag: t, value } if t == tag => Some(value),
                _ => None,
            })
            .sum()
    }

    /// Summed weapon-style bonus that applies against `target`.
    #[must_use]
    pub fn conditional_bonus(&self, target: Conditions) -> f32 {
        self.modifiers
            .iter()
            .filter_map(|m| match m.kind {
                ModifierKind::ConditionalDamage { against, bonus } if against.intersects(target) => {
                    Some(bonus)
                }
                _ => None,
            })
            .sum()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_immune() -> Trait {
        Trait::new("Salamander").with_modifier(RuleModifier::immunity(
            "Fire Immunity",
            DamageFilter::Exact(DamageType::Fire),
        ))
    }

    mod filter_tests {
        use super::*;

        #[test]
        fn category_filter_matches_members_only() {
            let physical = DamageFilter::Category(DamageCategory::Physical);
            assert!(physical.matches(DamageType::Slashing));
            assert!(physical.matches(DamageType::Fire));
            assert!(!physical.matches(DamageType::Psychic));
        }

        #[test]
        fn exact_filter_matches_one_type() {
            let fire = DamageFilter::Exact(DamageType::Fire);
            assert!(fire.matches(DamageType::Fire));
            assert!(!fire.matches(DamageType::Cold));
            assert!(DamageFilter::Any.matches(DamageType::Umbral));
        }
    }

    mod aggregation_tests {
        use super::*;

        #[test]
        fn empty_set_is_neutral() {
            let set = ModifierSet::new();
            for t in DamageType::ALL {
                assert!(set.flat_delta(t).abs() < f32::EPSILON);
                assert!((set.multiplier(t) - 1.0).abs() < f32::EPSILON);
            }
            assert_eq!(set.initiative_delta(), 0);
            assert_eq!(set.critical_threshold_delta(), 0);
        }

        #[test]
        fn flat_sums_and_scales_multiply() {
            let mut set = ModifierSet::new();
            let physical = DamageFilter::Category(DamageCategory::Physical);
            set.push(RuleModifier::resistance("Hide", physical, 1.0));
            set.push(RuleModifier::vulnerability("Brittle", DamageFilter::Exact(DamageType::Bludgeoning), 3.0));
            set.push(RuleModifier::scale("Half", physical, 0.5));
            set.push(RuleModifier::scale("Double", DamageFilter::Any, 2.0));

            assert!((set.flat_delta(DamageType::Bludgeoning) - 2.0).abs() < f32::EPSILON);
            assert!((set.flat_delta(DamageType::Slashing) + 1.0).abs() < f32::EPSILON);
            assert!((set.multiplier(DamageType::Slashing) - 1.0).abs() < f32::EPSILON);
            assert!((set.multiplier(DamageType::Radiant) - 2.0).abs() < f32::EPSILON);
        }

        #[test]
        fn traits_merge_stats_and_conditions() {
            let bleeding = Trait::new("Cut")
                .with_conditions(Conditions::BLEEDING)
                .with_stats(StatDelta {
                    physical_defense: -1,
                    ..StatDelta::ZERO
                });
            let set = ModifierSet::from_traits([&fire_immune(), &bleeding]);
            assert_eq!(set.len(), 1);
            assert!(set.conditions().contains(Conditions::BLEEDING));
            assert_eq!(set.stats().physical_defense, -1);
            assert!(set.multiplier(DamageType::Fire).abs() < f32::EPSILON);
        }

        #[test]
        fn tagged_effects_sum_per_tag() {
            let mut set = ModifierSet::new();
            set.push(RuleModifier::effect("Savage", EffectTag::HeavyHitDamage, 2.0));
            set.push(RuleModifier::effect("Rage", EffectTag::HitDamage, 1.0));
            set.push(RuleModifier::effect("Fury", EffectTag::HitDamage, 1.0));
            assert!((set.effect(EffectTag::HeavyHitDamage) - 2.0).abs() < f32::EPSILON);
            assert!((set.effect(EffectTag::HitDamage) - 2.0).abs() < f32::EPSILON);
            assert!(set.effect(EffectTag::HitBonus).abs() < f32::EPSILON);
        }

        #[test]
        fn conditional_bonus_needs_matching_condition() {
            let mut set = ModifierSet::new();
            set.push(RuleModifier::conditional_damage(
                "Hammer Style",
                Conditions::DAZED | Conditions::PETRIFIED,
                1.0,
            ));
            assert!(set.conditional_bonus(Conditions::empty()).abs() < f32::EPSILON);
            assert!((set.conditional_bonus(Conditions::DAZED) - 1.0).abs() < f32::EPSILON);
            assert!(set.conditional_bonus(Conditions::BLEEDING).abs() < f32::EPSILON);
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn negative_multiplier_is_rejected() {
            let bad = RuleModifier::scale("Odd", DamageFilter::Any, -1.0);
            assert!(bad.validate().is_err());
            let nan = RuleModifier::resistance("Nan", DamageFilter::Any, f32::NAN);
            assert!(nan.validate().is_err());
            assert!(RuleModifier::immunity("Ok", DamageFilter::Any).validate().is_ok());
        }
    }
}

//! Attack roll rules.
//!
//! An attack hits when its total meets the target's defense or when the
//! natural roll is critical. Beating defense by the heavy margin makes the
//! hit heavy, every further brutal step makes it one step more brutal.
//! Heavy and brutal bonuses land on the first damage instance only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RuleConstants;
use crate::damage::DamageInstance;
use crate::modifier::{EffectTag, ModifierSet};

/// How well an attack landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitQuality {
    /// Fell short of defense.
    Miss,
    /// Met defense.
    Hit,
    /// Beat defense by the heavy margin.
    Heavy,
    /// Beat defense by the heavy margin plus this many brutal steps.
    Brutal(u32),
}

impl HitQuality {
    /// Returns true for every quality except [`HitQuality::Miss`].
    #[must_use]
    pub const fn is_hit(self) -> bool {
        !matches!(self, Self::Miss)
    }
}

impl fmt::Display for HitQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Miss => write!(f, "miss"),
            Self::Hit => write!(f, "hit"),
            Self::Heavy => write!(f, "heavy hit"),
            Self::Brutal(1) => write!(f, "brutal hit"),
            Self::Brutal(n) => write!(f, "brutal hit x{n}"),
        }
    }
}

/// Everything rolled for one attack, kept for the action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRoll {
    /// The kept d20.
    pub natural: u32,
    /// Every d20 thrown.
    pub dice: Vec<u32>,
    /// Natural roll plus all bonuses.
    pub total: i32,
    /// Defense the total was compared against.
    pub defense: i32,
    /// Natural roll reached the critical threshold.
    pub critical: bool,
    /// Hit quality against the target defense.
    pub quality: HitQuality,
}

/// Natural roll needed for a critical hit given the attacker's summed delta.
///
/// The result is clamped to `[min_critical_threshold, base_critical_threshold]`.
#[must_use]
pub fn critical_threshold(delta: i32, rules: &RuleConstants) -> u32 {
    let base = i64::from(rules.base_critical_threshold);
    let shifted = (base + i64::from(delta)).clamp(i64::from(rules.min_critical_threshold), base);
    u32::try_from(shifted).unwrap_or(rules.base_critical_threshold)
}

/// Returns true when `natural` meets the shifted threshold.
///
/// # Example
///
/// ```
/// use skirmish_core::config::RuleConstants;
/// use skirmish_core::resolver::is_critical;
///
/// let rules = RuleConstants::default();
/// assert!(is_critical(19, -1, &rules));
/// assert!(!is_critical(18, -1, &rules));
/// assert!(!is_critical(19, 0, &rules));
/// ```
#[must_use]
pub fn is_critical(natural: u32, delta: i32, rules: &RuleConstants) -> bool {
    natural >= critical_threshold(delta, rules)
}

/// Grades an attack total against a defense.
#[must_use]
pub fn classify_hit(total: i32, defense: i32, critical: bool, rules: &RuleConstants) -> HitQuality {
    let margin = total - defense;
    if margin < 0 && !critical {
        return HitQuality::Miss;
    }
    if margin < rules.heavy_hit_margin {
        return HitQuality::Hit;
    }
    let steps = (margin - rules.heavy_hit_margin) / rules.brutal_hit_step;
    match u32::try_from(steps) {
        Ok(0) | Err(_) => HitQuality::Heavy,
        Ok(n) => HitQuality::Brutal(n),
    }
}

/// Extra first-instance damage a hit of `quality` earns.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quality_bonus(quality: HitQuality, attacker: &ModifierSet, rules: &RuleConstants) -> f32 {
    let heavy = rules.base_heavy_hit_damage as f32 + attacker.effect(EffectTag::HeavyHitDamage);
    let brutal = rules.base_brutal_hit_damage as f32 + attacker.effect(EffectTag::BrutalHitDamage);
    match quality {
        HitQuality::Miss | HitQuality::Hit => 0.0,
        HitQuality::Heavy => heavy,
        HitQuality::Brutal(n) => heavy + n as f32 * brutal,
    }
}

/// Copies a weapon's damage with `bonus` added to the first instance.
#[must_use]
pub fn with_first_bonus(damages: &[DamageInstance], bonus: f32) -> Vec<DamageInstance> {
    damages
        .iter()
        .enumerate()
        .map(|(i, d)| if i == 0 { d.with_bonus(bonus) } else { *d })
        .collect()
}

//! Damage types and raw damage instances.
//!
//! Every weapon carries an ordered list of [`DamageInstance`]s. Each instance
//! is tagged with a [`DamageType`], and every type belongs to one
//! [`DamageCategory`]. Resistances and vulnerabilities match on the exact
//! type or on the whole category (see [`crate::modifier::DamageFilter`]).
//!
//! # Example
//!
//! ```
//! use skirmish_core::damage::{DamageCategory, DamageInstance, DamageType};
//!
//! let slash = DamageInstance::new(DamageType::Slashing, 2.0);
//! assert_eq!(slash.damage_type.category(), DamageCategory::Physical);
//! assert_eq!(DamageType::Radiant.category(), DamageCategory::Mystical);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Damage Category
// =============================================================================

/// Broad family a damage type belongs to.
///
/// Armor reduction and defense selection work per category: physical attacks
/// are checked against physical defense, mystical ones against mystical
/// defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCategory {
    /// Bodily and elemental harm.
    Physical,
    /// Harm to mind or soul.
    Mystical,
}

impl fmt::Display for DamageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical => write!(f, "Physical"),
            Self::Mystical => write!(f, "Mystical"),
        }
    }
}

// =============================================================================
// Damage Type
// =============================================================================

/// Tag used to match damage against resistance and vulnerability rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Blunt impact.
    Bludgeoning,
    /// Freezing.
    Cold,
    /// Acid and rot.
    Corrosion,
    /// Burning.
    Fire,
    /// Electric shock.
    Lightning,
    /// Points and bolts.
    Piercing,
    /// Toxins.
    Poison,
    /// Edged blades.
    Slashing,
    /// Mind attacks.
    Psychic,
    /// Holy light.
    Radiant,
    /// Sound and thunder.
    Sonic,
    /// Shadow.
    Umbral,
}

impl DamageType {
    /// Every damage type, physical ones first.
    pub const ALL: [Self; 12] = [
        Self::Bludgeoning,
        Self::Cold,
        Self::Corrosion,
        Self::Fire,
        Self::Lightning,
        Self::Piercing,
        Self::Poison,
        Self::Slashing,
        Self::Psychic,
        Self::Radiant,
        Self::Sonic,
        Self::Umbral,
    ];

    /// Returns the category this type belongs to.
    #[must_use]
    pub const fn category(self) -> DamageCategory {
        match self {
            Self::Psychic | Self::Radiant | Self::Sonic | Self::Umbral => DamageCategory::Mystical,
            _ => DamageCategory::Physical,
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// Damage Instance
// =============================================================================

/// One source of damage before any modifier is applied.
///
/// Instances are `Copy` and never mutated in place; bonuses produce a new
/// instance through [`DamageInstance::with_bonus`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageInstance {
    /// Type used for modifier matching.
    pub damage_type: DamageType,
    /// Raw amount.
    pub base_value: f32,
}

impl DamageInstance {
    /// Creates a new damage instance.
    #[must_use]
    pub const fn new(damage_type: DamageType, base_value: f32) -> Self {
        Self {
            damage_type,
            base_value,
        }
    }

    /// Returns a copy with `bonus` added to the base value.
    #[must_use]
    pub fn with_bonus(self, bonus: f32) -> Self {
        Self {
            base_value: self.base_value + bonus,
            ..self
        }
    }
}

impl fmt::Display for DamageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.base_value, self.damage_type)
    }
}

// =============================================================================
// Tests
// =============================================================================

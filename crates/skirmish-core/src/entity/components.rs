//! Read-only templates an actor is assembled from.
//!
//! These types are the construction surface of the simulator. They are plain
//! serde data so scenarios can be loaded from JSON, and they offer builder
//! methods for code that assembles actors directly.

use serde::{Deserialize, Serialize};

use super::Conditions;
use crate::damage::DamageInstance;
use crate::modifier::RuleModifier;
use crate::policy::{StrategyId, TargetingId};
use crate::stats::{StatBlock, StatDelta};

// =============================================================================
// Trait
// =============================================================================

/// A named bundle of rule modifiers, stat deltas and imposed conditions.
///
/// A trait with a `duration` is timed: it expires after its carrier finishes
/// that many of its own turns. Traits granted by items never expire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trait {
    /// Display name.
    pub name: String,
    /// Rule modifiers the trait applies.
    pub modifiers: Vec<RuleModifier>,
    /// Stat adjustments the trait applies.
    pub stats: StatDelta,
    /// Conditions the carrier shows while the trait is active.
    pub conditions: Conditions,
    /// Own turns until expiry; `None` is permanent.
    pub duration: Option<u32>,
}

impl Trait {
    /// Creates an empty, permanent trait.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a rule modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: RuleModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Sets the stat adjustments.
    #[must_use]
    pub fn with_stats(mut self, stats: StatDelta) -> Self {
        self.stats = stats;
        self
    }

    /// Sets the conditions shown while active.
    #[must_use]
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Makes the trait expire after `turns` own turns.
    #[must_use]
    pub fn lasting(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    fn validate(&self) -> Result<(), String> {
        self.modifiers.iter().try_for_each(RuleModifier::validate)
    }
}

// =============================================================================
// Item
// =============================================================================

/// Where an item is worn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSlot {
    /// Primary hand.
    #[default]
    MainHand,
    /// Secondary hand.
    OffHand,
    /// Body armor.
    Armor,
    /// Ring, amulet or similar.
    Accessory,
}

/// Equipment. Any item with damage is a weapon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Slot the item occupies.
    pub slot: ItemSlot,
    /// Traits granted while equipped.
    pub traits: Vec<Trait>,
    /// Ordered damage dealt on a hit.
    pub damages: Vec<DamageInstance>,
}

impl Item {
    /// A main-hand weapon.
    #[must_use]
    pub fn weapon(name: impl Into<String>, damages: Vec<DamageInstance>) -> Self {
        Self {
            name: name.into(),
            slot: ItemSlot::MainHand,
            traits: Vec::new(),
            damages,
        }
    }

    /// A non-weapon item in `slot`.
    #[must_use]
    pub fn gear(name: impl Into<String>, slot: ItemSlot) -> Self {
        Self {
            name: name.into(),
            slot,
            traits: Vec::new(),
            damages: Vec::new(),
        }
    }

    /// Adds a granted trait.
    #[must_use]
    pub fn with_trait(mut self, granted: Trait) -> Self {
        self.traits.push(granted);
        self
    }

    /// Returns true if the item deals damage.
    #[must_use]
    pub fn is_weapon(&self) -> bool {
        !self.damages.is_empty()
    }
}

// =============================================================================
// Spell
// =============================================================================

/// A spell already in effect when combat starts.
///
/// Only its bookkeeping takes part in combat: the remaining duration, whether
/// it needs concentration, and the trait it grants while active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    /// Display name.
    pub name: String,
    /// Own turns the effect lasts.
    pub duration: u32,
    /// Must be sustained each own turn.
    #[serde(default)]
    pub concentration: bool,
    /// Effect on the caster while active.
    #[serde(default)]
    pub grants: Option<Trait>,
}

impl Spell {
    /// Spell lasting `duration` own turns.
    #[must_use]
    pub fn new(name: impl Into<String>, duration: u32, concentration: bool) -> Self {
        Self {
            name: name.into(),
            duration,
            concentration,
            grants: None,
        }
    }

    /// Sets the trait granted while active.
    #[must_use]
    pub fn granting(mut self, effect: Trait) -> Self {
        self.grants = Some(effect);
        self
    }
}

// =============================================================================
// Actor
// =============================================================================

/// Template of one combat participant.
///
/// The actor names its decision policies by id; the combat resolves them
/// through a [`crate::policy::PolicyCatalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Base stats before traits.
    #[serde(default)]
    pub stats: StatBlock,
    /// Equipped items; the first weapon is used for attacks.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Traits carried directly.
    #[serde(default)]
    pub traits: Vec<Trait>,
    /// Strategy id resolved through the catalog.
    #[serde(default)]
    pub strategy: StrategyId,
    /// Targeting id resolved through the catalog.
    #[serde(default)]
    pub targeting: TargetingId,
    /// Spell in effect at combat start.
    #[serde(default)]
    pub active_spell: Option<Spell>,
    /// Health at combat start; full health when absent.
    #[serde(default)]
    pub starting_health: Option<f32>,
}

impl Actor {
    /// Creates an actor with default stats and policies.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: StatBlock::default(),
            items: Vec::new(),
            traits: Vec::new(),
            strategy: StrategyId::default(),
            targeting: TargetingId::default(),
            active_spell: None,
            starting_health: None,
        }
    }

    /// Sets the base stats.
    #[must_use]
    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = stats;
        self
    }

    /// Equips an item.
    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Adds a carried trait.
    #[must_use]
    pub fn with_trait(mut self, carried: Trait) -> Self {
        self.traits.push(carried);
        self
    }

    /// Sets the strategy id.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Into<StrategyId>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Sets the targeting id.
    #[must_use]
    pub fn with_targeting(mut self, targeting: impl Into<TargetingId>) -> Self {
        self.targeting = targeting.into();
        self
    }

    /// Sets the spell in effect.
    #[must_use]
    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.active_spell = Some(spell);
        self
    }

    /// Starts combat below full health.
    #[must_use]
    pub fn with_starting_health(mut self, health: f32) -> Self {
        self.starting_health = Some(health);
        self
    }

    /// Equipped weapons in item order.
    pub fn weapons(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_weapon())
    }

    /// Checks the template before it enters a combat.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.stats.validate()?;
        if let Some(health) = self.starting_health {
            if !health.is_finite() || health < 0.0 {
                return Err(format!("starting_health must be non-negative, got {health}"));
            }
        }
        for item in &self.items {
            for damage in &item.damages {
                if !damage.base_value.is_finite() || damage.base_value < 0.0 {
                    return Err(format!("{}: damage must be non-negative", item.name));
                }
            }
            item.traits.iter().try_for_each(Trait::validate)?;
        }
        self.traits.iter().try_for_each(Trait::validate)?;
        if let Some(effect) = self.active_spell.as_ref().and_then(|s| s.grants.as_ref()) {
            effect.validate()?;
        }
        Ok(())
    }
}

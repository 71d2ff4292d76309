//! Static stat blocks and the deltas traits apply to them.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::damage::DamageCategory;

/// The static numbers describing one actor.
///
/// Missing fields deserialize to the defaults of a plain humanoid: 10 health,
/// defenses of 8, 4 action points and zero everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    /// Health at full rest.
    pub max_health: f32,
    /// Target number for physical attacks.
    pub physical_defense: i32,
    /// Target number for mystical attacks.
    pub mystical_defense: i32,
    /// Added to every attack roll.
    pub combat_mastery: i32,
    /// Might attribute.
    pub might: i32,
    /// Agility attribute.
    pub agility: i32,
    /// Intelligence attribute.
    pub intelligence: i32,
    /// Charisma attribute.
    pub charisma: i32,
    /// Added to the initiative roll.
    pub initiative: i32,
    /// Budget spent on actions during each own turn.
    pub action_points: u32,
    /// Flat reduction against physical damage (armor).
    pub physical_reduction: f32,
    /// Flat reduction against mystical damage.
    pub mystical_reduction: f32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            physical_defense: 8,
            mystical_defense: 8,
            combat_mastery: 0,
            might: 0,
            agility: 0,
            intelligence: 0,
            charisma: 0,
            initiative: 0,
            action_points: 4,
            physical_reduction: 0.0,
            mystical_reduction: 0.0,
        }
    }
}

impl StatBlock {
    /// Highest of the four attributes, added to attack rolls.
    #[must_use]
    pub fn prime_modifier(&self) -> i32 {
        self.might
            .max(self.agility)
            .max(self.intelligence)
            .max(self.charisma)
    }

    /// Defense an attack of the given category has to meet.
    #[must_use]
    pub const fn defense_against(&self, category: DamageCategory) -> i32 {
        match category {
            DamageCategory::Physical => self.physical_defense,
            DamageCategory::Mystical => self.mystical_defense,
        }
    }

    /// Returns the block with `delta` applied.
    ///
    /// Health and reductions never drop below zero, action points saturate.
    #[must_use]
    pub fn apply(&self, delta: &StatDelta) -> Self {
        let action_points = i64::from(self.action_points) + i64::from(delta.action_points);
        Self {
            max_health: (self.max_health + delta.max_health).max(0.0),
            physical_defense: self.physical_defense + delta.physical_defense,
            mystical_defense: self.mystical_defense + delta.mystical_defense,
            combat_mastery: self.combat_mastery + delta.combat_mastery,
            might: self.might + delta.might,
            agility: self.agility + delta.agility,
            intelligence: self.intelligence + delta.intelligence,
            charisma: self.charisma + delta.charisma,
            initiative: self.initiative + delta.initiative,
            action_points: u32::try_from(action_points.max(0)).unwrap_or(u32::MAX),
            physical_reduction: (self.physical_reduction + delta.physical_reduction).max(0.0),
            mystical_reduction: (self.mystical_reduction + delta.mystical_reduction).max(0.0),
        }
    }

    /// Checks the values a combat cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            return Err(format!("max_health must be positive, got {}", self.max_health));
        }
        if !self.physical_reduction.is_finite() || self.physical_reduction < 0.0 {
            return Err("physical_reduction must be a non-negative number".to_string());
        }
        if !self.mystical_reduction.is_finite() || self.mystical_reduction < 0.0 {
            return Err("mystical_reduction must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// Additive adjustment to a [`StatBlock`], contributed by traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDelta {
    /// Added to maximum health.
    pub max_health: f32,
    /// Added to physical defense.
    pub physical_defense: i32,
    /// Added to mystical defense.
    pub mystical_defense: i32,
    /// Added to combat mastery.
    pub combat_mastery: i32,
    /// Added to might.
    pub might: i32,
    /// Added to agility.
    pub agility: i32,
    /// Added to intelligence.
    pub intelligence: i32,
    /// Added to charisma.
    pub charisma: i32,
    /// Added to the initiative bonus.
    pub initiative: i32,
    /// Added to action points per turn.
    pub action_points: i32,
    /// Added to physical damage reduction.
    pub physical_reduction: f32,
    /// Added to mystical damage reduction.
    pub mystical_reduction: f32,
}

impl StatDelta {
    /// A delta that changes nothing.
    pub const ZERO: Self = Self {
        max_health: 0.0,
        physical_defense: 0,
        mystical_defense: 0,
        combat_mastery: 0,
        might: 0,
        agility: 0,
        intelligence: 0,
        charisma: 0,
        initiative: 0,
        action_points: 0,
        physical_reduction: 0.0,
        mystical_reduction: 0.0,
    };
}

impl Add for StatDelta {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for StatDelta {
    fn add_assign(&mut self, rhs: Self) {
        self.max_health += rhs.max_health;
        self.physical_defense += rhs.physical_defense;
        self.mystical_defense += rhs.mystical_defense;
        self.combat_mastery += rhs.combat_mastery;
        self.might += rhs.might;
        self.agility += rhs.agility;
        self.intelligence += rhs.intelligence;
        self.charisma += rhs.charisma;
        self.initiative += rhs.initiative;
        self.action_points += rhs.action_points;
        self.physical_reduction += rhs.physical_reduction;
        self.mystical_reduction += rhs.mystical_reduction;
    }
}

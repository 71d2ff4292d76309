//! Combat participants and their static templates.
//!
//! This module provides the identity and template types of the simulator:
//! - [`ActorId`]: Identifier of one participant within a combat
//! - [`TeamSide`]: Which of the two teams an actor fights for
//! - [`Conditions`]: Bit set of conditions an actor can show
//! - [`Team`]: An ordered, shareable list of actor templates
//! - [`components`]: The [`Actor`], [`Item`], [`Trait`] and [`Spell`] templates
//!
//! # Architecture
//!
//! Templates are read-only during a combat. Each run wraps them in
//! [`Arc`] and derives its own mutable [`crate::state::ActorState`], so
//! many independent runs can share one template set across threads.
//!
//! # Example
//!
//! ```
//! use skirmish_core::damage::{DamageInstance, DamageType};
//! use skirmish_core::entity::{Actor, Item, Team};
//!
//! let sword = Item::weapon("Sword", vec![DamageInstance::new(DamageType::Slashing, 2.0)]);
//! let team = Team::new(vec![Actor::new("Knight").with_item(sword)]);
//!
//! assert_eq!(team.len(), 1);
//! assert_eq!(team.iter().next().map(|a| a.name.as_str()), Some("Knight"));
//! ```

pub mod components;

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use components::{Actor, Item, ItemSlot, Spell, Trait};

/// Identifier of one actor within a combat.
///
/// Team A members are numbered first in input order, then team B. The
/// numeric order is the iteration order of every roster.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new `ActorId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ActorId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// One of the two sides of a combat.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    /// The side that wins initiative ties against the DC.
    A,
    /// The other side.
    B,
}

impl TeamSide {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "Team A"),
            Self::B => write!(f, "Team B"),
        }
    }
}

bitflags! {
    /// Conditions an actor can show.
    ///
    /// Traits impose them; weapon styles read them through
    /// [`crate::modifier::ModifierKind::ConditionalDamage`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Conditions: u16 {
        /// Bleeding out.
        const BLEEDING = 1 << 0;
        /// Guard opened.
        const EXPOSED = 1 << 1;
        /// Stunned by a blow.
        const DAZED = 1 << 2;
        /// Turned to stone, possibly partially.
        const PETRIFIED = 1 << 3;
        /// Held by an opponent.
        const GRAPPLED = 1 << 4;
        /// Weakened.
        const IMPAIRED = 1 << 5;
        /// Hampered movement.
        const HINDERED = 1 << 6;
        /// Slowed down.
        const SLOWED = 1 << 7;
    }
}

/// Ordered list of actor templates fighting on one side.
///
/// Cloning a team only clones the `Arc`s.
#[derive(Debug, Clone, Default)]
pub struct Team {
    actors: Vec<Arc<Actor>>,
}

impl Team {
    /// Wraps owned templates.
    #[must_use]
    pub fn new(actors: Vec<Actor>) -> Self {
        Self {
            actors: actors.into_iter().map(Arc::new).collect(),
        }
    }

    /// Builds a team from templates that are already shared.
    #[must_use]
    pub fn from_shared(actors: Vec<Arc<Actor>>) -> Self {
        Self { actors }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True when the team has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Iterates over templates in team order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Actor>> {
        self.actors.iter()
    }
}

impl From<Vec<Actor>> for Team {
    fn from(actors: Vec<Actor>) -> Self {
        Self::new(actors)
    }
}

impl FromIterator<Actor> for Team {
    fn from_iter<I: IntoIterator<Item = Actor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

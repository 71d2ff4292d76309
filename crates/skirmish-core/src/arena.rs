//! Roster of actor states for one combat.
//!
//! The Arena owns every [`ActorState`] of a run, keyed by [`ActorId`] in a
//! `BTreeMap` so iteration order is the numeric id order on every platform.
//! Team A members receive the lowest ids in input order, then team B.
//!
//! # Example
//!
//! ```
//! use skirmish_core::arena::Arena;
//! use skirmish_core::entity::{Actor, Team, TeamSide};
//!
//! let arena = Arena::new(
//!     &Team::new(vec![Actor::new("Knight")]),
//!     &Team::new(vec![Actor::new("Goblin"), Actor::new("Goblin")]),
//! );
//!
//! assert_eq!(arena.len(), 3);
//! assert_eq!(arena.living(TeamSide::B), 2);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::battlefield::Combatant;
use crate::config::RuleConstants;
use crate::entity::{ActorId, Team, TeamSide};
use crate::state::ActorState;

/// Every actor state of one combat.
#[derive(Debug, Clone)]
pub struct Arena {
    actors: BTreeMap<ActorId, ActorState>,
    team_a: Vec<ActorId>,
    team_b: Vec<ActorId>,
}

impl Arena {
    /// Builds fresh states from both teams' templates.
    #[must_use]
    pub fn new(team_a: &Team, team_b: &Team) -> Self {
        let mut actors = BTreeMap::new();
        let mut next = 0u32;
        let mut enrol = |team: &Team, side: TeamSide| -> Vec<ActorId> {
            team.iter()
                .map(|template| {
                    let id = ActorId::new(next);
                    next += 1;
                    actors.insert(id, ActorState::new(id, side, Arc::clone(template)));
                    id
                })
                .collect()
        };
        let team_a = enrol(team_a, TeamSide::A);
        let team_b = enrol(team_b, TeamSide::B);
        Self {
            actors,
            team_a,
            team_b,
        }
    }

    /// Number of actors on both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True when no actors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// State of one actor.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    /// Mutable state of one actor.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    /// Ids of one team in input order.
    #[must_use]
    pub fn team(&self, side: TeamSide) -> &[ActorId] {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    /// States of one team in input order.
    pub fn members(&self, side: TeamSide) -> impl Iterator<Item = &ActorState> {
        self.team(side).iter().filter_map(|id| self.actors.get(id))
    }

    /// All states in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    /// Living members of one team.
    #[must_use]
    pub fn living(&self, side: TeamSide) -> usize {
        self.members(side).filter(|s| s.is_alive()).count()
    }

    /// Snapshots of one team for policy decisions, dead members included.
    #[must_use]
    pub fn snapshot(&self, side: TeamSide, rules: &RuleConstants) -> Vec<Combatant> {
        self.members(side).map(|s| s.snapshot(rules)).collect()
    }
}

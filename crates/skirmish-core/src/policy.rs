//! Decision policies for automated actors.
//!
//! Two capability traits drive every actor without human input:
//!
//! - [`Strategy`] picks the next [`ActionIntent`] from read-only snapshots
//! - [`Targeting`] picks a target among candidate [`Combatant`]s
//!
//! # Architecture
//!
//! Actors reference policies by id ([`StrategyId`], [`TargetingId`]) and a
//! [`PolicyCatalog`] resolves those ids to shared implementations when a
//! combat is built. Swapping a policy never touches the actor definition, and
//! new policies are registered like plugins.
//!
//! Policies must be `Send + Sync`: one catalog serves many combats running
//! in parallel. They receive only the snapshots passed in, so the same input
//! always yields the same decision (randomized targeting draws from the
//! combat's own dice stream).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use skirmish_core::battlefield::Combatant;
//! use skirmish_core::policy::{ActionIntent, PolicyCatalog, Strategy, StrategyId};
//!
//! struct Coward;
//!
//! impl Strategy for Coward {
//!     fn choose_action(&self, _actor: &Combatant, _allies: &[Combatant], _enemies: &[Combatant]) -> ActionIntent {
//!         ActionIntent::Defend
//!     }
//! }
//!
//! let mut catalog = PolicyCatalog::default_catalog();
//! catalog.register_strategy(StrategyId::new("coward"), Arc::new(Coward));
//!
//! assert!(catalog.strategy(&StrategyId::new("coward")).is_some());
//! assert!(catalog.strategy(&StrategyId::new("standard")).is_some());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::battlefield::Combatant;
use crate::entity::ActorId;

// =============================================================================
// Policy Identifiers
// =============================================================================

macro_rules! policy_id {
    ($(#[$meta:meta])* $name:ident, $default:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from a name.
            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Returns the name.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new($default)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }
    };
}

policy_id!(
    /// Name of a registered [`Strategy`]; defaults to `standard`.
    StrategyId,
    "standard"
);

policy_id!(
    /// Name of a registered [`Targeting`] policy; defaults to `lowest_health`.
    TargetingId,
    "lowest_health"
);

// =============================================================================
// Actions
// =============================================================================

/// What an actor wants to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionIntent {
    /// Attack the current hostile target with the weapon at this index.
    Attack {
        /// Index into the actor's equipped weapons.
        weapon: usize,
    },
    /// Improve the next attack roll by one advantage.
    GainAdvantage,
    /// Impose disadvantage on attackers until the next own turn.
    Defend,
    /// Grant an ally a one-time hit bonus.
    Help,
    /// Sustain the active concentration spell for this turn.
    MaintainConcentration,
    /// End the turn.
    Pass,
}

impl ActionIntent {
    /// Attack with the first weapon.
    pub const ATTACK: Self = Self::Attack { weapon: 0 };

    /// The kind of this intent, without payload.
    #[must_use]
    pub const fn kind(self) -> ActionKind {
        match self {
            Self::Attack { .. } => ActionKind::Attack,
            Self::GainAdvantage => ActionKind::GainAdvantage,
            Self::Defend => ActionKind::Defend,
            Self::Help => ActionKind::Help,
            Self::MaintainConcentration => ActionKind::MaintainConcentration,
            Self::Pass => ActionKind::Pass,
        }
    }
}

/// Payload-free action tag used in logs and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Weapon attack.
    Attack,
    /// Spend points to gain advantage.
    GainAdvantage,
    /// Defend until the next own turn.
    Defend,
    /// Grant an ally a help die.
    Help,
    /// Sustain a concentration spell.
    MaintainConcentration,
    /// End the turn.
    Pass,
}

impl ActionKind {
    /// Imperative name, e.g. "gain advantage".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::GainAdvantage => "gain advantage",
            Self::Defend => "defend",
            Self::Help => "help",
            Self::MaintainConcentration => "maintain concentration",
            Self::Pass => "pass",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "attacks"),
            Self::GainAdvantage => write!(f, "gains advantage"),
            Self::Defend => write!(f, "defends"),
            Self::Help => write!(f, "helps"),
            Self::MaintainConcentration => write!(f, "maintains concentration"),
            Self::Pass => write!(f, "passes"),
        }
    }
}

// =============================================================================
// Policy Traits
// =============================================================================

/// Chooses an actor's next action.
///
/// # Implementation Guidelines
///
/// Read only what is passed in. `allies` contains the acting actor itself;
/// `enemies` is the opposing team. Dead actors are included in both so a
/// strategy can reason about losses.
pub trait Strategy: Send + Sync {
    /// Picks the next action for `actor`.
    fn choose_action(&self, actor: &Combatant, allies: &[Combatant], enemies: &[Combatant]) -> ActionIntent;
}

/// Situation a target is chosen in.
#[derive(Debug, Clone, Copy)]
pub struct TargetContext<'a> {
    /// Who is choosing.
    pub actor: &'a Combatant,
    /// The actor's team, itself included.
    pub allies: &'a [Combatant],
    /// True for attacks, false for support actions.
    pub hostile: bool,
}

/// Chooses a target among candidates.
///
/// Implementations must ignore dead candidates and, for hostile actions,
/// members of the actor's own team; [`eligible`] applies both rules.
/// Returning `None` means nobody qualified.
pub trait Targeting: Send + Sync {
    /// Picks one candidate.
    fn select(
        &self,
        ctx: &TargetContext<'_>,
        candidates: &[Combatant],
        rng: &mut dyn RngCore,
    ) -> Option<ActorId>;
}

/// Candidates a policy may pick in `ctx`.
///
/// Hostile actions keep living members of the other team. Support actions
/// keep living members of the actor's team other than the actor itself.
pub fn eligible<'a>(
    ctx: &TargetContext<'a>,
    candidates: &'a [Combatant],
) -> impl Iterator<Item = &'a Combatant> + 'a {
    let actor_id = ctx.actor.id;
    let side = ctx.actor.side;
    let hostile = ctx.hostile;
    candidates.iter().filter(move |c| {
        c.is_alive()
            && if hostile {
                c.side != side
            } else {
                c.side == side && c.id != actor_id
            }
    })
}

// =============================================================================
// Policy Catalog
// =============================================================================

/// Registry of strategies and targeting policies by id.
#[derive(Default, Clone)]
pub struct PolicyCatalog {
    strategies: BTreeMap<StrategyId, Arc<dyn Strategy>>,
    targeting: BTreeMap<TargetingId, Arc<dyn Targeting>>,
}

impl PolicyCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a strategy, replacing any previous one with the same id.
    pub fn register_strategy(&mut self, id: StrategyId, strategy: Arc<dyn Strategy>) {
        self.strategies.insert(id, strategy);
    }

    /// Registers a targeting policy, replacing any previous one with the same id.
    pub fn register_targeting(&mut self, id: TargetingId, targeting: Arc<dyn Targeting>) {
        self.targeting.insert(id, targeting);
    }

    /// Strategy registered under `id`.
    #[must_use]
    pub fn strategy(&self, id: &StrategyId) -> Option<Arc<dyn Strategy>> {
        self.strategies.get(id).cloned()
    }

    /// Targeting policy registered under `id`.
    #[must_use]
    pub fn targeting(&self, id: &TargetingId) -> Option<Arc<dyn Targeting>> {
        self.targeting.get(id).cloned()
    }

    /// Registered strategy ids in order.
    pub fn strategy_ids(&self) -> impl Iterator<Item = &StrategyId> {
        self.strategies.keys()
    }

    /// Registered targeting ids in order.
    pub fn targeting_ids(&self) -> impl Iterator<Item = &TargetingId> {
        self.targeting.keys()
    }

    /// Creates a catalog with every built-in policy.
    ///
    /// Strategies: `standard`, `full_attack`, `cautious`, `support`.
    /// Targeting: `lowest_health`, `highest_health`, `random`,
    /// `highest_threat`, `protect_ally`.
    ///
    /// # Example
    ///
    /// ```
    /// use skirmish_core::policy::PolicyCatalog;
    ///
    /// let catalog = PolicyCatalog::default_catalog();
    /// assert_eq!(catalog.strategy_ids().count(), 4);
    /// assert_eq!(catalog.targeting_ids().count(), 5);
    /// ```
    #[must_use]
    pub fn default_catalog() -> Self {
        use crate::policies::{
            Cautious, FullAttack, HighestHealth, HighestThreat, LowestHealth, ProtectAlly,
            RandomTarget, Standard, Support,
        };

        let mut catalog = Self::new();

        catalog.register_strategy(StrategyId::new("standard"), Arc::new(Standard));
        catalog.register_strategy(StrategyId::new("full_attack"), Arc::new(FullAttack));
        catalog.register_strategy(StrategyId::new("cautious"), Arc::new(Cautious));
        catalog.register_strategy(StrategyId::new("support"), Arc::new(Support));

        catalog.register_targeting(TargetingId::new("lowest_health"), Arc::new(LowestHealth));
        catalog.register_targeting(TargetingId::new("highest_health"), Arc::new(HighestHealth));
        catalog.register_targeting(TargetingId::new("random"), Arc::new(RandomTarget));
        catalog.register_targeting(TargetingId::new("highest_threat"), Arc::new(HighestThreat));
        catalog.register_targeting(TargetingId::new("protect_ally"), Arc::new(ProtectAlly));

        catalog
    }
}

impl fmt::Debug for PolicyCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyCatalog")
            .field("strategies", &self.strategies.keys().collect::<Vec<_>>())
            .field("targeting", &self.targeting.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

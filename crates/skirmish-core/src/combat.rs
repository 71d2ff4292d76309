//! The combat manager and its turn state machine.
//!
//! `CombatManager` drives one combat from setup to outcome:
//!
//! 1. **NotStarted**: a team with no living actor ends the combat at once
//! 2. **RollingInitiative**: every actor rolls, one fixed turn order results
//! 3. **InRound(n)**: the round begins at the first living actor in the order
//! 4. **ActorTurn**: the actor's strategy is consulted until its action
//!    points run out or it passes; its durations tick at the end of the turn
//! 5. **Ended**: one side fell, both fell, or the round cap was reached
//!
//! The terminal condition is checked after every individual action. Dead
//! actors keep their slot in the order and are skipped.
//!
//! # Determinism
//!
//! All randomness (dice and random targeting) draws from one ChaCha stream
//! seeded from the configuration. Actors are iterated by id, so a seed fully
//! reproduces a combat.
//!
//! # Example
//!
//! ```
//! use skirmish_core::combat::CombatManager;
//! use skirmish_core::config::CombatConfig;
//! use skirmish_core::damage::{DamageInstance, DamageType};
//! use skirmish_core::entity::{Actor, Item};
//!
//! let fighter = |name: &str| {
//!     Actor::new(name).with_item(Item::weapon("Sword", vec![DamageInstance::new(DamageType::Slashing, 2.0)]))
//! };
//!
//! let mut combat = CombatManager::new(
//!     vec![fighter("Alice")],
//!     vec![fighter("Bob")],
//!     CombatConfig::new(10).with_seed(42),
//! )
//! .unwrap();
//!
//! let outcome = combat.run_combat();
//! assert!(outcome.rounds_elapsed <= 100);
//! assert!(!combat.fight_debrief().is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::arena::Arena;
use crate::config::CombatConfig;
use crate::damage::{DamageCategory, DamageInstance};
use crate::dice::Dice;
use crate::entity::{ActorId, Conditions, Team, TeamSide};
use crate::error::{ConfigError, Result};
use crate::initiative::{turn_order, InitiativeEntry};
use crate::log::{ActionLog, ActionRecord, Fallback, FallbackReason};
use crate::modifier::EffectTag;
use crate::policy::{eligible, ActionIntent, ActionKind, PolicyCatalog, Strategy, TargetContext, Targeting};
use crate::resolver::{classify_hit, is_critical, quality_bonus, resolve_attack, with_first_bonus, AttackRoll};
use crate::state::ActorState;

// =============================================================================
// Outcome
// =============================================================================

/// Why a combat ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// One team has no living actor.
    Victory,
    /// Both teams have no living actor.
    MutualElimination,
    /// The round cap was reached with both teams standing.
    RoundLimit,
}

/// Result of a finished combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Winning side; `None` for a draw or a timeout.
    pub winner: Option<TeamSide>,
    /// Round the combat ended in, 0 when it ended before initiative.
    pub rounds_elapsed: u32,
    /// Turns taken by living actors over the whole combat.
    pub turns: u32,
    /// Why the combat stopped.
    pub end: EndReason,
}

impl Outcome {
    /// Returns true if no side won.
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.end, self.winner) {
            (EndReason::Victory, Some(side)) => write!(
                f,
                "{side} wins after {} rounds ({} turns)",
                self.rounds_elapsed, self.turns
            ),
            (EndReason::RoundLimit, _) => {
                write!(f, "Draw: round limit of {} reached", self.rounds_elapsed)
            }
            _ => write!(f, "Draw: both teams fell in round {}", self.rounds_elapsed),
        }
    }
}

// =============================================================================
// Phase
// =============================================================================

/// State of the turn state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, nothing rolled yet.
    NotStarted,
    /// Next step rolls initiative.
    RollingInitiative,
    /// Next step opens round `n`.
    InRound(u32),
    /// Next step plays this actor's turn.
    ActorTurn {
        /// Round being played.
        round: u32,
        /// Position in the turn order.
        slot: usize,
        /// Actor whose turn it is.
        actor: ActorId,
    },
    /// Finished.
    Ended(Outcome),
}

// =============================================================================
// Combat Manager
// =============================================================================

struct Policies {
    strategy: Arc<dyn Strategy>,
    targeting: Arc<dyn Targeting>,
}

/// Owner of one combat run.
///
/// `CombatManager` manages:
/// - The [`Arena`] of fresh actor states built from both teams
/// - The resolved strategy and targeting policy of every actor
/// - The dice stream, turn order, round and turn counters
/// - The [`ActionLog`] of the run
pub struct CombatManager {
    config: CombatConfig,
    arena: Arena,
    policies: BTreeMap<ActorId, Policies>,
    dice: Dice,
    seed: u64,
    order: Vec<ActorId>,
    phase: Phase,
    round: u32,
    turns: u32,
    log: ActionLog,
}

impl fmt::Debug for CombatManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatManager")
            .field("config", &self.config)
            .field("arena", &self.arena)
            .field("seed", &self.seed)
            .field("order", &self.order)
            .field("phase", &self.phase)
            .field("log", &format!("[{} records]", self.log.len()))
            .finish_non_exhaustive()
    }
}

impl CombatManager {
    /// Creates a combat with the built-in policy catalog.
    ///
    /// # Errors
    ///
    /// See [`CombatManager::with_catalog`].
    pub fn new(team_a: impl Into<Team>, team_b: impl Into<Team>, config: CombatConfig) -> Result<Self> {
        Self::with_catalog(team_a, team_b, config, &PolicyCatalog::default_catalog())
    }

    /// Creates a combat resolving policy ids through `catalog`.
    ///
    /// # Errors
    ///
    /// Fails fast with a [`ConfigError`] when the configuration is invalid,
    /// a team is empty, a template fails validation, or an actor names a
    /// policy the catalog does not know.
    pub fn with_catalog(
        team_a: impl Into<Team>,
        team_b: impl Into<Team>,
        config: CombatConfig,
        catalog: &PolicyCatalog,
    ) -> Result<Self> {
        let team_a = team_a.into();
        let team_b = team_b.into();
        config.validate()?;
        if team_a.is_empty() {
            return Err(ConfigError::EmptyTeam { side: TeamSide::A });
        }
        if team_b.is_empty() {
            return Err(ConfigError::EmptyTeam { side: TeamSide::B });
        }
        for actor in team_a.iter().chain(team_b.iter()) {
            actor.validate().map_err(|reason| ConfigError::InvalidActor {
                actor: actor.name.clone(),
                reason,
            })?;
        }

        let arena = Arena::new(&team_a, &team_b);
        let mut policies = BTreeMap::new();
        for state in arena.iter() {
            let template = state.template();
            let strategy = catalog
                .strategy(&template.strategy)
                .ok_or_else(|| ConfigError::UnknownStrategy {
                    actor: template.name.clone(),
                    strategy: template.strategy.to_string(),
                })?;
            let targeting = catalog
                .targeting(&template.targeting)
                .ok_or_else(|| ConfigError::UnknownTargeting {
                    actor: template.name.clone(),
                    targeting: template.targeting.to_string(),
                })?;
            policies.insert(state.id(), Policies { strategy, targeting });
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            arena,
            policies,
            dice: Dice::new(seed),
            seed,
            order: Vec::new(),
            phase: Phase::NotStarted,
            round: 0,
            turns: 0,
            log: ActionLog::new(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current step of the combat state machine.
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Live actor states.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Actions recorded so far.
    #[must_use]
    pub const fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Fixed turn order; empty before initiative.
    #[must_use]
    pub fn turn_order(&self) -> &[ActorId] {
        &self.order
    }

    /// Seed of the dice stream, drawn from entropy if none was configured.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration the combat runs under.
    #[must_use]
    pub const fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// The outcome once the combat has ended.
    #[must_use]
    pub const fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    // =========================================================================
    // State Machine
    // =========================================================================

    /// Runs the state machine to completion.
    pub fn run_combat(&mut self) -> Outcome {
        loop {
            if let Phase::Ended(outcome) = &self.phase {
                return *outcome;
            }
            self.step();
        }
    }

    /// Advances the state machine by one transition.
    ///
    /// Calling `step` on an ended combat does nothing.
    pub fn step(&mut self) -> &Phase {
        let next = match std::mem::replace(&mut self.phase, Phase::NotStarted) {
            Phase::NotStarted => match self.terminal() {
                Some((winner, end)) => Phase::Ended(self.finish(winner, end)),
                None => Phase::RollingInitiative,
            },
            Phase::RollingInitiative => {
                self.roll_initiative();
                Phase::InRound(1)
            }
            Phase::InRound(round) => {
                self.round = round;
                debug!(round, "round started");
                match self.next_living_slot(0) {
                    Some(slot) => Phase::ActorTurn {
                        round,
                        slot,
                        actor: self.order[slot],
                    },
                    None => {
                        let (winner, end) = self.terminal().unwrap_or((None, EndReason::MutualElimination));
                        Phase::Ended(self.finish(winner, end))
                    }
                }
            }
            Phase::ActorTurn { round, slot, actor } => {
                self.execute_turn(actor, round);
                if let Some((winner, end)) = self.terminal() {
                    Phase::Ended(self.finish(winner, end))
                } else if let Some(next) = self.next_living_slot(slot + 1) {
                    Phase::ActorTurn {
                        round,
                        slot: next,
                        actor: self.order[next],
                    }
                } else if round >= self.config.max_rounds {
                    Phase::Ended(self.finish(None, EndReason::RoundLimit))
                } else {
                    Phase::InRound(round + 1)
                }
            }
            ended @ Phase::Ended(_) => ended,
        };
        self.phase = next;
        &self.phase
    }

    fn terminal(&self) -> Option<(Option<TeamSide>, EndReason)> {
        match (self.arena.living(TeamSide::A), self.arena.living(TeamSide::B)) {
            (0, 0) => Some((None, EndReason::MutualElimination)),
            (0, _) => Some((Some(TeamSide::B), EndReason::Victory)),
            (_, 0) => Some((Some(TeamSide::A), EndReason::Victory)),
            _ => None,
        }
    }

    fn finish(&self, winner: Option<TeamSide>, end: EndReason) -> Outcome {
        let outcome = Outcome {
            winner,
            rounds_elapsed: self.round,
            turns: self.turns,
            end,
        };
        info!(seed = self.seed, %outcome, "combat ended");
        outcome
    }

    fn next_living_slot(&self, from: usize) -> Option<usize> {
        (from..self.order.len()).find(|&slot| {
            self.arena
                .get(self.order[slot])
                .is_some_and(ActorState::is_alive)
        })
    }

    /// Every actor rolls, dead or not, so a fallen actor keeps its slot and
    /// still consumes a d20.
    fn roll_initiative(&mut self) {
        let mut entries: [Vec<InitiativeEntry>; 2] = [Vec::new(), Vec::new()];
        for (side, out) in [TeamSide::A, TeamSide::B].into_iter().zip(entries.iter_mut()) {
            for id in self.arena.team(side).to_vec() {
                let Some(state) = self.arena.get_mut(id) else {
                    continue;
                };
                let natural = i32::try_from(self.dice.d20()).unwrap_or_default();
                let roll = natural + state.stats().initiative + state.modifiers().initiative_delta();
                state.set_initiative(roll);
                trace!(actor = state.name(), natural, roll, "initiative roll");
                out.push(InitiativeEntry::new(id, roll, state.stats().combat_mastery));
            }
        }
        self.order = turn_order(&entries[0], &entries[1], self.config.initiative_dc);
        let names: Vec<&str> = self
            .order
            .iter()
            .filter_map(|id| self.arena.get(*id).map(ActorState::name))
            .collect();
        info!(seed = self.seed, order = ?names, "initiative rolled");
    }

    // =========================================================================
    // Turns
    // =========================================================================

    fn execute_turn(&mut self, id: ActorId, round: u32) {
        let Some(state) = self.arena.get_mut(id) else {
            return;
        };
        if !state.is_alive() {
            return;
        }
        state.begin_turn();
        let name = state.name().to_string();
        self.turns += 1;
        let turn = self.turns;
        let first_record = self.log.len();

        while self.arena.get(id).is_some_and(|s| s.action_points() > 0) {
            let intent = self.choose(id);
            let (record, ends_turn) = self.perform(id, intent, round, turn);
            debug!(round, turn, "{record}");
            self.log.push(record);
            if ends_turn || self.terminal().is_some() {
                break;
            }
        }
        if self.log.len() == first_record {
            self.log.push(ActionRecord::new(round, turn, id, name, ActionKind::Pass));
        }

        let expired = self.arena.get_mut(id).map(ActorState::end_turn).unwrap_or_default();
        if !expired.is_empty() {
            for expiry in &expired {
                debug!(round, turn, "{expiry}");
            }
            if let Some(last) = self.log.last_mut() {
                last.expired = expired;
            }
        }
    }

    fn choose(&self, id: ActorId) -> ActionIntent {
        let rules = &self.config.rules;
        let (Some(state), Some(policies)) = (self.arena.get(id), self.policies.get(&id)) else {
            return ActionIntent::Pass;
        };
        let allies = self.arena.snapshot(state.side(), rules);
        let enemies = self.arena.snapshot(state.side().opponent(), rules);
        match allies.iter().find(|c| c.id == id) {
            Some(me) => policies.strategy.choose_action(me, &allies, &enemies),
            None => ActionIntent::Pass,
        }
    }

    fn perform(&mut self, id: ActorId, intent: ActionIntent, round: u32, turn: u32) -> (ActionRecord, bool) {
        match intent {
            ActionIntent::Pass => self.pass(id, round, turn, None),
            ActionIntent::Attack { weapon } => self.attack(id, weapon, round, turn),
            ActionIntent::GainAdvantage => {
                let gained = self.arena.get_mut(id).is_some_and(|state| {
                    let paid = state.spend(1);
                    if paid {
                        state.gain_advantage();
                    }
                    paid
                });
                if gained {
                    (self.record(id, round, turn, ActionKind::GainAdvantage), false)
                } else {
                    let fallback = Fallback {
                        requested: ActionKind::GainAdvantage,
                        reason: FallbackReason::InsufficientActionPoints,
                    };
                    self.pass(id, round, turn, Some(fallback))
                }
            }
            ActionIntent::Defend => self.defend(id, round, turn, None),
            ActionIntent::Help => self.help(id, round, turn),
            ActionIntent::MaintainConcentration => {
                let sustained = self.arena.get_mut(id).is_some_and(|state| {
                    state
                        .active_spell()
                        .is_some_and(|a| a.spell.concentration && !a.sustained)
                        && state.spend(1)
                        && state.sustain()
                });
                if sustained {
                    (self.record(id, round, turn, ActionKind::MaintainConcentration), false)
                } else {
                    let fallback = Fallback {
                        requested: ActionKind::MaintainConcentration,
                        reason: FallbackReason::NoConcentration,
                    };
                    self.defend(id, round, turn, Some(fallback))
                }
            }
        }
    }

    fn record(&self, id: ActorId, round: u32, turn: u32, kind: ActionKind) -> ActionRecord {
        let name = self.arena.get(id).map_or("", ActorState::name);
        ActionRecord::new(round, turn, id, name, kind)
    }

    fn target_name(&self, id: ActorId) -> Option<String> {
        self.arena.get(id).map(|s| s.name().to_string())
    }

    /// Ends the turn.
    fn pass(&self, id: ActorId, round: u32, turn: u32, fallback: Option<Fallback>) -> (ActionRecord, bool) {
        let mut record = self.record(id, round, turn, ActionKind::Pass);
        record.fallback = fallback;
        (record, true)
    }

    /// Defends if possible, otherwise passes. A fallback given in means
    /// Defend stands in for another action; its reason is kept on the record.
    fn defend(&mut self, id: ActorId, round: u32, turn: u32, fallback: Option<Fallback>) -> (ActionRecord, bool) {
        let cost = self.config.rules.defend_cost;
        let refusal = match self.arena.get_mut(id) {
            Some(state) if state.defending() => Some(FallbackReason::AlreadyDefending),
            Some(state) => {
                if state.spend(cost) {
                    state.defend();
                    None
                } else {
                    Some(FallbackReason::InsufficientActionPoints)
                }
            }
            None => Some(FallbackReason::InsufficientActionPoints),
        };
        match refusal {
            None => {
                let mut record = self.record(id, round, turn, ActionKind::Defend);
                record.fallback = fallback;
                (record, false)
            }
            Some(reason) => {
                let fallback = fallback.unwrap_or(Fallback {
                    requested: ActionKind::Defend,
                    reason,
                });
                self.pass(id, round, turn, Some(fallback))
            }
        }
    }

    /// Current hostile target, reselected when missing, dead or friendly.
    ///
    /// Reselection prefers living enemies that are attacking the actor. A
    /// pick outside the eligible candidates is discarded.
    fn hostile_target(&mut self, id: ActorId) -> Option<ActorId> {
        let rules = &self.config.rules;
        let state = self.arena.get(id)?;
        let side = state.side();
        if let Some(current) = state.current_target() {
            if self
                .arena
                .get(current)
                .is_some_and(|t| t.is_alive() && t.side() != side)
            {
                return Some(current);
            }
        }

        let allies = self.arena.snapshot(side, rules);
        let enemies = self.arena.snapshot(side.opponent(), rules);
        let me = allies.iter().find(|c| c.id == id)?;
        let attacking_me: Vec<_> = enemies
            .iter()
            .filter(|e| e.is_alive() && e.current_target == Some(id))
            .cloned()
            .collect();
        let candidates = if attacking_me.is_empty() {
            &enemies
        } else {
            &attacking_me
        };
        let ctx = TargetContext {
            actor: me,
            allies: &allies,
            hostile: true,
        };
        let pick = self
            .policies
            .get(&id)?
            .targeting
            .select(&ctx, candidates, self.dice.rng_mut())
            .filter(|pick| eligible(&ctx, candidates).any(|c| c.id == *pick));
        if let Some(state) = self.arena.get_mut(id) {
            state.set_current_target(pick);
        }
        pick
    }

    fn attack(&mut self, id: ActorId, weapon: usize, round: u32, turn: u32) -> (ActionRecord, bool) {
        let damages: Option<Vec<DamageInstance>> = self
            .arena
            .get(id)
            .and_then(|s| s.template().weapons().nth(weapon).map(|w| w.damages.clone()));
        let Some(damages) = damages else {
            let fallback = Fallback {
                requested: ActionKind::Attack,
                reason: FallbackReason::NoWeapon,
            };
            return self.defend(id, round, turn, Some(fallback));
        };
        let Some(target) = self.hostile_target(id) else {
            let fallback = Fallback {
                requested: ActionKind::Attack,
                reason: FallbackReason::NoTarget,
            };
            return self.pass(id, round, turn, Some(fallback));
        };

        let category = damages
            .first()
            .map_or(DamageCategory::Physical, |d| d.damage_type.category());
        let (defense, target_defending, target_conditions): (i32, bool, Conditions) =
            match self.arena.get(target) {
                Some(t) => (t.stats().defense_against(category), t.defending(), t.conditions()),
                None => return self.pass(id, round, turn, None),
            };

        let rules = &self.config.rules;
        let Some(attacker) = self.arena.get_mut(id) else {
            return self.pass(id, round, turn, None);
        };
        if !attacker.spend(1) {
            let fallback = Fallback {
                requested: ActionKind::Attack,
                reason: FallbackReason::InsufficientActionPoints,
            };
            return self.pass(id, round, turn, Some(fallback));
        }
        let disadvantage = attacker.record_attack(rules) + u32::from(target_defending);
        let advantage = attacker.advantage();
        let helped = attacker.take_hit_bonus();
        let d20 = self.dice.d20_with(advantage, disadvantage);
        if advantage > disadvantage {
            attacker.clear_advantage();
        }

        let mods = attacker.modifiers();
        let stats = attacker.stats();
        #[allow(clippy::cast_possible_truncation)]
        let effect_bonus = mods.effect(EffectTag::HitBonus).round() as i32;
        let natural = i32::try_from(d20.natural).unwrap_or_default();
        let total = natural + stats.prime_modifier() + stats.combat_mastery + helped + effect_bonus;
        let critical = is_critical(d20.natural, mods.critical_threshold_delta(), rules);
        let quality = classify_hit(total, defense, critical, rules);
        let instances = quality.is_hit().then(|| {
            let bonus = quality_bonus(quality, mods, rules)
                + mods.effect(EffectTag::HitDamage)
                + mods.conditional_bonus(target_conditions);
            with_first_bonus(&damages, bonus)
        });

        let mut record = self.record(id, round, turn, ActionKind::Attack);
        record.target = Some(target);
        record.target_name = self.target_name(target);
        record.attack = Some(AttackRoll {
            natural: d20.natural,
            dice: d20.rolls,
            total,
            defense,
            critical,
            quality,
        });
        if let Some(target_state) = self.arena.get_mut(target) {
            if let Some(instances) = instances {
                let applied = resolve_attack(target_state.modifiers(), &instances, critical);
                target_state.take_damage(applied.total);
                if !target_state.is_alive() {
                    debug!(round, turn, target = target_state.name(), "actor fell");
                }
                record.damage = Some(applied);
            }
            record.target_health = Some(target_state.health());
        }
        (record, false)
    }

    fn help(&mut self, id: ActorId, round: u32, turn: u32) -> (ActionRecord, bool) {
        let rules = &self.config.rules;
        let pick = self.arena.get(id).and_then(|state| {
            let allies = self.arena.snapshot(state.side(), rules);
            let me = allies.iter().find(|c| c.id == id)?;
            let ctx = TargetContext {
                actor: me,
                allies: &allies,
                hostile: false,
            };
            self.policies
                .get(&id)?
                .targeting
                .select(&ctx, &allies, self.dice.rng_mut())
                .filter(|pick| eligible(&ctx, &allies).any(|c| c.id == *pick))
        });
        let Some(ally) = pick else {
            let fallback = Fallback {
                requested: ActionKind::Help,
                reason: FallbackReason::NoAlly,
            };
            return self.defend(id, round, turn, Some(fallback));
        };

        let nth = self
            .arena
            .get_mut(id)
            .and_then(|state| state.spend(1).then(|| state.record_help()));
        let Some(nth) = nth else {
            let fallback = Fallback {
                requested: ActionKind::Help,
                reason: FallbackReason::InsufficientActionPoints,
            };
            return self.pass(id, round, turn, Some(fallback));
        };
        let die = self.config.rules.help_die(nth);
        let bonus = i32::try_from(self.dice.roll(die)).unwrap_or_default();
        if let Some(ally_state) = self.arena.get_mut(ally) {
            ally_state.grant_hit_bonus(bonus);
        }

        let mut record = self.record(id, round, turn, ActionKind::Help);
        record.target = Some(ally);
        record.target_name = self.target_name(ally);
        record.help_bonus = Some(bonus);
        (record, false)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Human-readable summary: every action record, the outcome, then the
    /// status of each actor by team.
    #[must_use]
    pub fn fight_debrief(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.log.records().iter().map(ToString::to_string).collect();
        if let Some(outcome) = self.outcome() {
            lines.push(outcome.to_string());
        }
        for side in [TeamSide::A, TeamSide::B] {
            lines.push(format!("{side}:"));
            for state in self.arena.members(side) {
                let status = if state.is_alive() { "Alive" } else { "Dead" };
                lines.push(format!("  {} - {status}, HP: {}", state.name(), state.health()));
            }
        }
        lines
    }
}

// =============================================================================
// Tests
// =============================================================================

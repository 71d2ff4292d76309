//! Mutable combat-time state of one actor.
//!
//! An [`ActorState`] is created from a shared [`Actor`] template when a
//! combat starts and dropped when it ends. It owns everything that changes
//! during a fight: health, the per-turn action economy, the active spell and
//! timed traits, and the cached [`ModifierSet`] derived from all of them.
//!
//! # Invariants
//!
//! - health stays in `[0, max_health]`
//! - the modifier cache is rebuilt whenever a source appears or expires
//! - at most one spell is active

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::battlefield::Combatant;
use crate::config::RuleConstants;
use crate::damage::DamageCategory;
use crate::entity::{Actor, ActorId, Conditions, Spell, TeamSide, Trait};
use crate::modifier::{DamageFilter, ModifierSet, RuleModifier};
use crate::stats::StatBlock;

/// Spell in effect on its caster.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSpell {
    /// Spell template.
    pub spell: Spell,
    /// Own turns left.
    pub remaining: u32,
    /// Concentration was maintained during the current turn.
    pub sustained: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct TimedTrait {
    effect: Trait,
    remaining: u32,
}

/// Something that ran out at the end of an actor's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum Expiry {
    /// A concentration spell was not maintained.
    ConcentrationBroken(String),
    /// A spell reached the end of its duration.
    SpellExpired(String),
    /// A timed trait reached the end of its duration.
    TraitExpired(String),
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConcentrationBroken(name) => write!(f, "concentration on {name} broken"),
            Self::SpellExpired(name) => write!(f, "{name} expired"),
            Self::TraitExpired(name) => write!(f, "{name} wore off"),
        }
    }
}

/// Live state of one combatant.
#[derive(Debug, Clone)]
pub struct ActorState {
    id: ActorId,
    side: TeamSide,
    template: Arc<Actor>,
    health: f32,
    stats: StatBlock,
    modifiers: ModifierSet,
    timed: Vec<TimedTrait>,
    spell: Option<ActiveSpell>,
    initiative: Option<i32>,
    action_points: u32,
    attacks_made: u32,
    advantage: u32,
    helps_given: u32,
    defending: bool,
    hit_bonus: i32,
    current_target: Option<ActorId>,
    turns_taken: u32,
}

impl ActorState {
    /// Fresh state at combat start.
    ///
    /// Health starts at the template's starting health (full when absent).
    /// A spell with zero duration never becomes active.
    #[must_use]
    pub fn new(id: ActorId, side: TeamSide, template: Arc<Actor>) -> Self {
        let timed = template
            .traits
            .iter()
            .filter_map(|t| {
                t.duration.map(|remaining| TimedTrait {
                    effect: t.clone(),
                    remaining,
                })
            })
            .filter(|t| t.remaining > 0)
            .collect();
        let spell = template
            .active_spell
            .clone()
            .filter(|s| s.duration > 0)
            .map(|spell| ActiveSpell {
                remaining: spell.duration,
                spell,
                sustained: false,
            });
        let mut state = Self {
            id,
            side,
            health: 0.0,
            stats: template.stats,
            modifiers: ModifierSet::new(),
            timed,
            spell,
            initiative: None,
            action_points: 0,
            attacks_made: 0,
            advantage: 0,
            helps_given: 0,
            defending: false,
            hit_bonus: 0,
            current_target: None,
            turns_taken: 0,
            template,
        };
        state.refresh_modifiers();
        state.health = state
            .template
            .starting_health
            .unwrap_or(state.stats.max_health)
            .clamp(0.0, state.stats.max_health);
        state
    }

    /// Rebuilds the modifier cache and effective stats from every live source.
    fn refresh_modifiers(&mut self) {
        let item_traits = self.template.items.iter().flat_map(|i| i.traits.iter());
        let permanent = self.template.traits.iter().filter(|t| t.duration.is_none());
        let timed = self.timed.iter().map(|t| &t.effect);
        let spell = self.spell.iter().filter_map(|s| s.spell.grants.as_ref());

        let mut modifiers = ModifierSet::from_traits(item_traits.chain(permanent).chain(timed).chain(spell));
        let stats = self.template.stats.apply(modifiers.stats());
        if stats.physical_reduction > 0.0 {
            modifiers.push(RuleModifier::resistance(
                "Physical reduction",
                DamageFilter::Category(DamageCategory::Physical),
                stats.physical_reduction,
            ));
        }
        if stats.mystical_reduction > 0.0 {
            modifiers.push(RuleModifier::resistance(
                "Mystical reduction",
                DamageFilter::Category(DamageCategory::Mystical),
                stats.mystical_reduction,
            ));
        }
        self.modifiers = modifiers;
        self.stats = stats;
        self.health = self.health.min(self.stats.max_health);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Stable id.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Team side.
    #[must_use]
    pub const fn side(&self) -> TeamSide {
        self.side
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// The read-only template this state was built from.
    #[must_use]
    pub fn template(&self) -> &Actor {
        &self.template
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Alive while health is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Template stats with every active delta applied.
    #[must_use]
    pub const fn stats(&self) -> &StatBlock {
        &self.stats
    }

    /// Current effective modifiers.
    #[must_use]
    pub const fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    /// Conditions from active traits.
    #[must_use]
    pub const fn conditions(&self) -> Conditions {
        self.modifiers.conditions()
    }

    /// Spell still in effect.
    #[must_use]
    pub const fn active_spell(&self) -> Option<&ActiveSpell> {
        self.spell.as_ref()
    }

    /// Names of timed traits still running.
    pub fn timed_traits(&self) -> impl Iterator<Item = (&str, u32)> {
        self.timed.iter().map(|t| (t.effect.name.as_str(), t.remaining))
    }

    /// Initiative roll, once rolled.
    #[must_use]
    pub const fn initiative(&self) -> Option<i32> {
        self.initiative
    }

    pub(crate) fn set_initiative(&mut self, roll: i32) {
        self.initiative = Some(roll);
    }

    /// Action points left this turn.
    #[must_use]
    pub const fn action_points(&self) -> u32 {
        self.action_points
    }

    /// Defending until the next own turn.
    #[must_use]
    pub const fn defending(&self) -> bool {
        self.defending
    }

    /// Current hostile target.
    #[must_use]
    pub const fn current_target(&self) -> Option<ActorId> {
        self.current_target
    }

    pub(crate) fn set_current_target(&mut self, target: Option<ActorId>) {
        self.current_target = target;
    }

    /// Own turns completed.
    #[must_use]
    pub const fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Subtracts `amount` from health, clamping at zero. Returns health lost.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount.max(0.0)).max(0.0);
        before - self.health
    }

    /// Resets the per-turn economy. Defending ends here.
    pub(crate) fn begin_turn(&mut self) {
        self.action_points = self.stats.action_points;
        self.attacks_made = 0;
        self.advantage = 0;
        self.helps_given = 0;
        self.defending = false;
        if let Some(active) = &mut self.spell {
            active.sustained = false;
        }
    }

    /// Spends `cost` action points if available.
    pub(crate) fn spend(&mut self, cost: u32) -> bool {
        if self.action_points < cost {
            return false;
        }
        self.action_points -= cost;
        true
    }

    /// Counts an attack and returns the disadvantage the penalty imposes on it.
    pub(crate) fn record_attack(&mut self, rules: &RuleConstants) -> u32 {
        self.attacks_made += 1;
        self.attacks_made.saturating_sub(rules.attacks_before_penalty)
    }

    pub(crate) fn gain_advantage(&mut self) {
        self.advantage += 1;
    }

    pub(crate) const fn advantage(&self) -> u32 {
        self.advantage
    }

    pub(crate) fn clear_advantage(&mut self) {
        self.advantage = 0;
    }

    pub(crate) fn defend(&mut self) {
        self.defending = true;
    }

    /// Counts a help and returns how many were given before it this turn.
    pub(crate) fn record_help(&mut self) -> u32 {
        let before = self.helps_given;
        self.helps_given += 1;
        before
    }

    pub(crate) fn grant_hit_bonus(&mut self, bonus: i32) {
        self.hit_bonus += bonus;
    }

    /// Takes the pending one-time hit bonus.
    pub(crate) fn take_hit_bonus(&mut self) -> i32 {
        std::mem::take(&mut self.hit_bonus)
    }

    /// Marks concentration as maintained. False without a concentration spell
    /// or when already sustained this turn.
    pub(crate) fn sustain(&mut self) -> bool {
        match &mut self.spell {
            Some(active) if active.spell.concentration && !active.sustained => {
                active.sustained = true;
                true
            }
            _ => false,
        }
    }

    /// Ticks durations owned by this actor at the end of its turn.
    ///
    /// An unsustained concentration spell breaks. Any other spell, and every
    /// timed trait, loses one turn and expires at zero.
    pub(crate) fn end_turn(&mut self) -> Vec<Expiry> {
        self.turns_taken += 1;
        let mut expired = Vec::new();

        if let Some(active) = &mut self.spell {
            if active.spell.concentration && !active.sustained {
                expired.push(Expiry::ConcentrationBroken(active.spell.name.clone()));
            } else {
                active.remaining = active.remaining.saturating_sub(1);
                if active.remaining == 0 {
                    expired.push(Expiry::SpellExpired(active.spell.name.clone()));
                }
            }
            if !expired.is_empty() {
                self.spell = None;
            }
        }

        for timed in &mut self.timed {
            timed.remaining = timed.remaining.saturating_sub(1);
            if timed.remaining == 0 {
                expired.push(Expiry::TraitExpired(timed.effect.name.clone()));
            }
        }
        self.timed.retain(|t| t.remaining > 0);

        if !expired.is_empty() {
            self.refresh_modifiers();
        }
        expired
    }

    /// Captures what policies may see.
    #[must_use]
    pub fn snapshot(&self, rules: &RuleConstants) -> Combatant {
        Combatant {
            id: self.id,
            name: self.template.name.clone(),
            side: self.side,
            health: self.health,
            max_health: self.stats.max_health,
            combat_mastery: self.stats.combat_mastery,
            conditions: self.conditions(),
            current_target: self.current_target,
            action_points: self.action_points,
            max_action_points: self.stats.action_points,
            attacks_made: self.attacks_made,
            advantage: self.advantage,
            next_attack_penalty: (self.attacks_made + 1).saturating_sub(rules.attacks_before_penalty),
            helps_given: self.helps_given,
            defending: self.defending,
            can_defend: !self.defending && self.action_points >= rules.defend_cost,
            concentrating: self.spell.as_ref().is_some_and(|s| s.spell.concentration),
            sustained: self.spell.as_ref().is_some_and(|s| s.sustained),
            weapon_count: self.template.weapons().count(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

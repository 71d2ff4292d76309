//! Integration tests for whole combats.
//!
//! These tests drive [`CombatManager`] end-to-end and check:
//! - Victory, elimination and timeout outcomes
//! - The damage pipeline as seen through the action log
//! - Concentration and timed effects across turns
//! - Fallbacks when an action cannot be performed
//! - Custom policies registered on a catalog
//! - Targeting picks outside the eligible candidates

use std::sync::Arc;

use rand::RngCore;

use crate::battlefield::Combatant;
use crate::combat::{CombatManager, EndReason};
use crate::config::RuleConstants;
use crate::damage::DamageType;
use crate::entity::{ActorId, Conditions, TeamSide, Trait};
use crate::log::FallbackReason;
use crate::modifier::{DamageFilter, RuleModifier};
use crate::policy::{ActionIntent, ActionKind, PolicyCatalog, Strategy, TargetContext, Targeting};
use crate::resolver::{is_critical, HitQuality};
use crate::state::Expiry;

use super::helpers::{armed, bystander, caster, duelist, expiries, run, seeded};

// =============================================================================
// Test Policies
// =============================================================================

/// Helps on every action.
struct AlwaysHelp;

impl Strategy for AlwaysHelp {
    fn choose_action(&self, _actor: &Combatant, _allies: &[Combatant], _enemies: &[Combatant]) -> ActionIntent {
        ActionIntent::Help
    }
}

/// Attacks with a weapon slot nobody has.
struct SecondWeapon;

impl Strategy for SecondWeapon {
    fn choose_action(&self, _actor: &Combatant, _allies: &[Combatant], _enemies: &[Combatant]) -> ActionIntent {
        ActionIntent::Attack { weapon: 1 }
    }
}

/// Always picks the acting actor.
struct TargetSelf;

impl Targeting for TargetSelf {
    fn select(&self, ctx: &TargetContext<'_>, _candidates: &[Combatant], _rng: &mut dyn RngCore) -> Option<ActorId> {
        Some(ctx.actor.id)
    }
}

fn catalog_with(id: &str, strategy: Arc<dyn Strategy>) -> PolicyCatalog {
    let mut catalog = PolicyCatalog::default_catalog();
    catalog.register_strategy(id.into(), strategy);
    catalog
}

// =============================================================================
// Outcomes
// =============================================================================

mod outcome_tests {
    use super::*;

    #[test]
    fn duel_ends_in_one_victory_or_timeout() {
        for seed in 0..10 {
            let combat = run(vec![duelist("Alice")], vec![duelist("Bob")], seeded(seed));
            let outcome = *combat.outcome().unwrap();
            match outcome.winner {
                Some(side) => {
                    assert_eq!(outcome.end, EndReason::Victory);
                    assert_eq!(combat.arena().living(side), 1);
                    assert_eq!(combat.arena().living(side.opponent()), 0);
                }
                None => assert_eq!(outcome.end, EndReason::RoundLimit),
            }
        }
    }

    #[test]
    fn combat_stops_at_the_killing_blow() {
        for seed in 0..10 {
            let combat = run(vec![duelist("Alice")], vec![duelist("Bob")], seeded(seed));
            let Some(winner) = combat.outcome().and_then(|o| o.winner) else {
                continue;
            };
            let last = combat.log().records().last().unwrap();
            assert_eq!(last.kind, ActionKind::Attack);
            assert_eq!(last.target_health, Some(0.0));

            let survivor = combat.arena().members(winner).next().unwrap();
            let taken: f32 = combat
                .log()
                .records()
                .iter()
                .filter(|r| r.target == Some(survivor.id()))
                .filter_map(|r| r.damage.as_ref())
                .map(|d| d.total)
                .sum();
            assert!((survivor.health() - (8.0 - taken).max(0.0)).abs() < 1e-4);
        }
    }

    #[test]
    fn fallen_team_ends_combat_before_round_one() {
        let fallen = duelist("Ghost").with_starting_health(0.0);
        let combat = run(vec![duelist("Alice")], vec![fallen], seeded(1));
        let outcome = combat.outcome().unwrap();
        assert_eq!(outcome.winner, Some(TeamSide::A));
        assert_eq!(outcome.rounds_elapsed, 0);
        assert!(combat.turn_order().is_empty());
    }

    #[test]
    fn two_fallen_teams_draw() {
        let combat = run(
            vec![duelist("A").with_starting_health(0.0)],
            vec![duelist("B").with_starting_health(0.0)],
            seeded(1),
        );
        let outcome = combat.outcome().unwrap();
        assert_eq!(outcome.end, EndReason::MutualElimination);
        assert_eq!(outcome.rounds_elapsed, 0);
        assert!(outcome.is_draw());
    }

    #[test]
    fn dead_actors_never_act() {
        let fallen = duelist("Ghost").with_starting_health(0.0);
        let combat = run(vec![duelist("Alice"), fallen], vec![duelist("Bob")], seeded(3));
        assert_eq!(combat.log().by_actor(ActorId::new(1)).count(), 0);
        assert!(combat
            .log()
            .records()
            .iter()
            .all(|r| r.target != Some(ActorId::new(1))));
    }
}

// =============================================================================
// Damage
// =============================================================================

mod damage_tests {
    use super::*;

    #[test]
    fn immune_defender_takes_nothing() {
        let salamander = bystander("Salamander").with_trait(
            Trait::new("Fireborn").with_modifier(RuleModifier::immunity("Fireproof", DamageFilter::Exact(DamageType::Fire))),
        );
        let torch = armed("Torch", 10.0, DamageType::Fire, 5.0).with_strategy("full_attack");
        let combat = run(vec![torch], vec![salamander], seeded(7).with_max_rounds(5));

        let outcome = combat.outcome().unwrap();
        assert_eq!(outcome.end, EndReason::RoundLimit);
        let hits: Vec<_> = combat.log().records().iter().filter_map(|r| r.damage.as_ref()).collect();
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|d| d.total == 0.0));
    }

    #[test]
    fn widened_critical_range() {
        let rules = RuleConstants::default();
        assert!(is_critical(19, -1, &rules));
        assert!(!is_critical(18, -1, &rules));
        assert!(!is_critical(19, 0, &rules));
    }

    #[test]
    fn conditional_damage_applies_to_matching_targets() {
        let hunter = armed("Hunter", 10.0, DamageType::Piercing, 2.0)
            .with_strategy("full_attack")
            .with_trait(Trait::new("Serrated").with_modifier(RuleModifier::conditional_damage(
                "Serrated",
                Conditions::BLEEDING,
                3.0,
            )));
        let prey = bystander("Prey").with_trait(Trait::new("Wounded").with_conditions(Conditions::BLEEDING));
        let combat = run(vec![hunter], vec![prey], seeded(4).with_max_rounds(10));

        let plain_hits: Vec<f32> = combat
            .log()
            .records()
            .iter()
            .filter(|r| {
                r.attack
                    .as_ref()
                    .is_some_and(|a| a.quality == HitQuality::Hit && !a.critical)
            })
            .filter_map(|r| r.damage.as_ref().map(|d| d.total))
            .collect();
        assert!(!plain_hits.is_empty());
        assert!(plain_hits.iter().all(|&d| (d - 5.0).abs() < 1e-4));
    }

    #[test]
    fn misses_deal_no_damage() {
        let combat = run(vec![duelist("Alice")], vec![duelist("Bob")], seeded(12));
        for record in combat.log().records() {
            if let Some(attack) = &record.attack {
                assert_eq!(record.damage.is_some(), attack.quality.is_hit());
            }
        }
    }
}

// =============================================================================
// Durations
// =============================================================================

mod duration_tests {
    use super::*;

    #[test]
    fn concentration_expires_after_two_own_turns() {
        let combat = run(
            vec![caster("Sage", "Bless", 2)],
            vec![bystander("Rock"), bystander("Stone")],
            seeded(8).with_max_rounds(4),
        );
        let sage = ActorId::new(0);
        let expired: Vec<_> = expiries(&combat, |e| *e == Expiry::SpellExpired("Bless".into())).collect();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].actor, sage);

        let mut own_turns: Vec<u32> = combat
            .log()
            .by_actor(sage)
            .filter(|r| r.turn <= expired[0].turn)
            .map(|r| r.turn)
            .collect();
        own_turns.dedup();
        assert_eq!(own_turns.len(), 2);
        assert_eq!(expiries(&combat, |e| matches!(e, Expiry::ConcentrationBroken(_))).count(), 0);
    }

    #[test]
    fn timed_trait_wears_off() {
        let hasted = bystander("Quick").with_trait(
            Trait::new("Haste")
                .with_modifier(RuleModifier::initiative("Haste", 5))
                .lasting(1),
        );
        let combat = run(vec![hasted], vec![bystander("Slow")], seeded(2).with_max_rounds(2));
        let worn: Vec<_> = expiries(&combat, |e| *e == Expiry::TraitExpired("Haste".into())).collect();
        assert_eq!(worn.len(), 1);
        assert_eq!(combat.arena().get(ActorId::new(0)).unwrap().timed_traits().count(), 0);
    }
}

// =============================================================================
// Actions and Fallbacks
// =============================================================================

mod action_tests {
    use super::*;

    #[test]
    fn help_without_ally_falls_back_to_defend() {
        let loner = duelist("Loner").with_strategy("always_help");
        let catalog = catalog_with("always_help", Arc::new(AlwaysHelp));
        let mut combat =
            CombatManager::with_catalog(vec![loner], vec![bystander("Rock")], seeded(1).with_max_rounds(1), &catalog)
                .unwrap();
        combat.run_combat();

        let first = combat.log().by_actor(ActorId::new(0)).next().unwrap();
        assert_eq!(first.kind, ActionKind::Defend);
        assert_eq!(first.fallback.map(|f| f.reason), Some(FallbackReason::NoAlly));
    }

    #[test]
    fn missing_weapon_slot_falls_back() {
        let clumsy = duelist("Clumsy").with_strategy("second_weapon");
        let catalog = catalog_with("second_weapon", Arc::new(SecondWeapon));
        let mut combat =
            CombatManager::with_catalog(vec![clumsy], vec![bystander("Rock")], seeded(1).with_max_rounds(1), &catalog)
                .unwrap();
        combat.run_combat();

        let records: Vec<_> = combat.log().by_actor(ActorId::new(0)).collect();
        assert_eq!(records[0].kind, ActionKind::Defend);
        assert_eq!(records[0].fallback.map(|f| f.reason), Some(FallbackReason::NoWeapon));
        assert_eq!(records.last().unwrap().kind, ActionKind::Pass);
    }

    #[test]
    fn supporter_helps_an_ally_first() {
        let medic = bystander("Medic").with_strategy("support");
        let combat = run(
            vec![medic, duelist("Tank")],
            vec![bystander("Rock")],
            seeded(6).with_max_rounds(1),
        );
        let help = combat.log().by_actor(ActorId::new(0)).next().unwrap();
        assert_eq!(help.kind, ActionKind::Help);
        assert_eq!(help.target, Some(ActorId::new(1)));
        assert!(help.help_bonus.is_some_and(|b| (1..=8).contains(&b)));
    }

    #[test]
    fn later_attacks_roll_with_disadvantage() {
        // Rock attacks harmlessly instead of defending, so no defend disadvantage.
        let brawler = armed("Brawler", 100.0, DamageType::Slashing, 2.0).with_strategy("full_attack");
        let rock = armed("Rock", 10_000.0, DamageType::Bludgeoning, 0.0).with_strategy("full_attack");
        let combat = run(vec![brawler], vec![rock], seeded(10).with_max_rounds(1));

        let dice: Vec<usize> = combat
            .log()
            .by_actor(ActorId::new(0))
            .filter_map(|r| r.attack.as_ref().map(|a| a.dice.len()))
            .collect();
        assert_eq!(dice, vec![1, 2, 3, 4]);
    }
}

// =============================================================================
// Targeting
// =============================================================================

mod targeting_tests {
    use super::*;

    fn self_targeting_catalog() -> PolicyCatalog {
        let mut catalog = catalog_with("always_help", Arc::new(AlwaysHelp));
        catalog.register_targeting("target_self".into(), Arc::new(TargetSelf));
        catalog
    }

    #[test]
    fn attack_on_self_is_refused() {
        let fool = duelist("Fool").with_strategy("full_attack").with_targeting("target_self");
        let mut combat = CombatManager::with_catalog(
            vec![fool],
            vec![bystander("Rock")],
            seeded(3).with_max_rounds(2),
            &self_targeting_catalog(),
        )
        .unwrap();
        combat.run_combat();

        let fool_id = ActorId::new(0);
        let records: Vec<_> = combat.log().by_actor(fool_id).collect();
        assert!(!records.is_empty());
        for record in &records {
            assert_ne!(record.target, Some(fool_id));
            assert_eq!(record.kind, ActionKind::Pass);
            let fallback = record.fallback.unwrap();
            assert_eq!(fallback.requested, ActionKind::Attack);
            assert_eq!(fallback.reason, FallbackReason::NoTarget);
        }
        let fool = combat.arena().get(fool_id).unwrap();
        assert!(fool.is_alive());
        assert!((fool.health() - 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn help_on_self_falls_back_to_defend() {
        let helper = duelist("Helper").with_strategy("always_help").with_targeting("target_self");
        let mut combat = CombatManager::with_catalog(
            vec![helper, duelist("Ally")],
            vec![bystander("Rock")],
            seeded(4).with_max_rounds(1),
            &self_targeting_catalog(),
        )
        .unwrap();
        combat.run_combat();

        let first = combat.log().by_actor(ActorId::new(0)).next().unwrap();
        assert_eq!(first.kind, ActionKind::Defend);
        assert_ne!(first.target, Some(ActorId::new(0)));
        assert!(first.help_bonus.is_none());
        assert_eq!(first.fallback.map(|f| f.reason), Some(FallbackReason::NoAlly));
    }
}

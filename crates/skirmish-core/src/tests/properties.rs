//! Property tests for the damage pipeline and the combat driver.

use proptest::prelude::*;

use crate::combat::{CombatManager, Phase};
use crate::damage::{DamageInstance, DamageType};
use crate::modifier::{DamageFilter, ModifierSet, RuleModifier};
use crate::resolver::resolve_attack;

use super::helpers::{armed, duelist, seeded};

fn damage_type() -> impl Strategy<Value = DamageType> {
    prop::sample::select(DamageType::ALL.to_vec())
}

fn defender(flat: f32, scale: f32, target: DamageType) -> ModifierSet {
    let mut set = ModifierSet::new();
    set.push(RuleModifier::resistance("Hide", DamageFilter::Exact(target), flat));
    set.push(RuleModifier::scale("Ward", DamageFilter::Exact(target), scale));
    set
}

proptest! {
    #[test]
    fn immunity_zeroes_its_type(
        immune in damage_type(),
        base in 0.0f32..1000.0,
        critical in any::<bool>(),
        flat in -20.0f32..20.0,
    ) {
        let mut set = defender(flat, 1.5, immune);
        set.push(RuleModifier::immunity("Immune", DamageFilter::Exact(immune)));
        let applied = resolve_attack(&set, &[DamageInstance::new(immune, base)], critical);
        prop_assert_eq!(applied.breakdown[0].amount, 0.0);
        prop_assert_eq!(applied.total, 0.0);
    }

    #[test]
    fn critical_doubles_the_base(
        kind in damage_type(),
        base in 0.0f32..500.0,
        flat in -20.0f32..20.0,
        scale in 0.0f32..3.0,
    ) {
        let set = defender(flat, scale, kind);
        let critical = resolve_attack(&set, &[DamageInstance::new(kind, base)], true);
        let doubled = resolve_attack(&set, &[DamageInstance::new(kind, base * 2.0)], false);
        prop_assert_eq!(critical, doubled);
    }

    #[test]
    fn more_reduction_never_hurts_more(
        kind in damage_type(),
        base in 0.0f32..500.0,
        low in 0.0f32..50.0,
        extra in 0.0f32..50.0,
        scale in 0.0f32..3.0,
        critical in any::<bool>(),
    ) {
        let hit = [DamageInstance::new(kind, base)];
        let weak = resolve_attack(&defender(low, scale, kind), &hit, critical);
        let strong = resolve_attack(&defender(low + extra, scale, kind), &hit, critical);
        prop_assert!(strong.total <= weak.total);
    }

    #[test]
    fn unmatched_types_pass_through(base in 0.0f32..500.0) {
        let set = defender(5.0, 0.0, DamageType::Fire);
        let applied = resolve_attack(&set, &[DamageInstance::new(DamageType::Cold, base)], false);
        prop_assert_eq!(applied.total, base);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn combat_terminates_within_max_rounds(seed in any::<u64>(), max_rounds in 1u32..15) {
        let mut combat = CombatManager::new(
            vec![duelist("A"), armed("A2", 6.0, DamageType::Fire, 1.0).with_strategy("support")],
            vec![duelist("B").with_strategy("cautious"), armed("B2", 12.0, DamageType::Cold, 1.0)],
            seeded(seed).with_max_rounds(max_rounds),
        ).unwrap();
        let outcome = combat.run_combat();
        prop_assert!(outcome.rounds_elapsed <= max_rounds);
        prop_assert!(matches!(combat.phase(), Phase::Ended(_)));
    }

    #[test]
    fn turn_order_depends_only_on_the_seed(seed in any::<u64>()) {
        let order = || {
            let mut combat = CombatManager::new(
                vec![duelist("A"), duelist("A2")],
                vec![duelist("B"), duelist("B2"), duelist("B3")],
                seeded(seed),
            ).unwrap();
            combat.step();
            combat.step();
            combat.turn_order().to_vec()
        };
        let first = order();
        prop_assert_eq!(first.len(), 5);
        prop_assert_eq!(first, order());
    }
}

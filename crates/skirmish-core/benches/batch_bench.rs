use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skirmish_core::prelude::*;
use skirmish_core::resolver::resolve_attack;
use skirmish_core::run_batch;

fn fighter(name: &str, damage_type: DamageType, damage: f32) -> Actor {
    Actor::new(name).with_item(Item::weapon("Weapon", vec![DamageInstance::new(damage_type, damage)]))
}

fn teams() -> (Team, Team) {
    (
        vec![
            fighter("Knight", DamageType::Slashing, 3.0),
            fighter("Cleric", DamageType::Radiant, 1.0).with_strategy("support"),
        ]
        .into(),
        vec![
            fighter("Orc", DamageType::Bludgeoning, 3.0),
            fighter("Shaman", DamageType::Fire, 2.0).with_targeting("random"),
        ]
        .into(),
    )
}

fn bench_resolve_attack(c: &mut Criterion) {
    let mut defender = ModifierSet::new();
    defender.push(RuleModifier::resistance("Mail", DamageFilter::Category(DamageCategory::Physical), 1.0));
    defender.push(RuleModifier::scale("Wet", DamageFilter::Exact(DamageType::Fire), 0.5));
    let hit = [
        DamageInstance::new(DamageType::Slashing, 4.0),
        DamageInstance::new(DamageType::Fire, 2.0),
    ];

    c.bench_function("resolve_attack", |b| {
        b.iter(|| black_box(resolve_attack(black_box(&defender), black_box(&hit), false)))
    });
}

fn bench_single_combat(c: &mut Criterion) {
    let (team_a, team_b) = teams();
    let mut seed = 0u64;

    c.bench_function("single_combat", |b| {
        b.iter(|| {
            seed += 1;
            let mut combat =
                CombatManager::new(team_a.clone(), team_b.clone(), CombatConfig::new(10).with_seed(seed)).unwrap();
            black_box(combat.run_combat())
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let (team_a, team_b) = teams();
    let config = CombatConfig::default();

    c.bench_function("batch_1000", |b| {
        b.iter(|| black_box(run_batch(&team_a, &team_b, &config, 1000, black_box(7)).unwrap()))
    });
}

criterion_group!(benches, bench_resolve_attack, bench_single_combat, bench_batch);
criterion_main!(benches);

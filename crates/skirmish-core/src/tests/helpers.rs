//! Factories for actors, teams and combats used across the crate tests.

use crate::combat::CombatManager;
use crate::config::CombatConfig;
use crate::damage::{DamageInstance, DamageType};
use crate::entity::{Actor, Item, Spell};
use crate::log::ActionRecord;
use crate::state::Expiry;
use crate::stats::StatBlock;

// =============================================================================
// Actors
// =============================================================================

/// Actor with the given health and one single-type weapon.
pub fn armed(name: &str, health: f32, damage_type: DamageType, damage: f32) -> Actor {
    Actor::new(name)
        .with_stats(StatBlock {
            max_health: health,
            ..StatBlock::default()
        })
        .with_item(Item::weapon(
            format!("{name}'s weapon"),
            vec![DamageInstance::new(damage_type, damage)],
        ))
}

/// Actor with 2 Slashing damage and 8 health.
pub fn duelist(name: &str) -> Actor {
    armed(name, 8.0, DamageType::Slashing, 2.0)
}

/// Unarmed actor that cannot realistically be killed.
pub fn bystander(name: &str) -> Actor {
    Actor::new(name).with_stats(StatBlock {
        max_health: 10_000.0,
        ..StatBlock::default()
    })
}

/// Bystander concentrating on `spell` for `duration` turns.
pub fn caster(name: &str, spell: &str, duration: u32) -> Actor {
    bystander(name).with_spell(Spell::new(spell, duration, true))
}

// =============================================================================
// Combats
// =============================================================================

/// Config with a fixed seed and the default DC.
pub fn seeded(seed: u64) -> CombatConfig {
    CombatConfig::new(10).with_seed(seed)
}

/// Runs `team_a` against `team_b` to completion.
pub fn run(team_a: Vec<Actor>, team_b: Vec<Actor>, config: CombatConfig) -> CombatManager {
    let mut combat = CombatManager::new(team_a, team_b, config).expect("valid combat");
    combat.run_combat();
    combat
}

/// Records carrying an expiry matching `pred`.
pub fn expiries<'a>(
    combat: &'a CombatManager,
    pred: impl Fn(&Expiry) -> bool + 'a,
) -> impl Iterator<Item = &'a ActionRecord> + 'a {
    combat
        .log()
        .records()
        .iter()
        .filter(move |r| r.expired.iter().any(&pred))
}

//! Built-in targeting policies.
//!
//! Every policy filters candidates through [`eligible`] first. Ties go to
//! the candidate listed first, which keeps selection deterministic.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::battlefield::Combatant;
use crate::entity::ActorId;
use crate::policy::{eligible, TargetContext, Targeting};

/// First candidate for which no later one is strictly `better`.
fn first_best<'a>(
    candidates: impl Iterator<Item = &'a Combatant>,
    better: impl Fn(&Combatant, &Combatant) -> bool,
) -> Option<&'a Combatant> {
    candidates.fold(None, |best, c| match best {
        Some(b) if !better(c, b) => Some(b),
        _ => Some(c),
    })
}

/// Weakest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestHealth;

impl Targeting for LowestHealth {
    fn select(&self, ctx: &TargetContext<'_>, candidates: &[Combatant], _rng: &mut dyn RngCore) -> Option<ActorId> {
        first_best(eligible(ctx, candidates), |c, b| c.health < b.health).map(|c| c.id)
    }
}

/// Healthiest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestHealth;

impl Targeting for HighestHealth {
    fn select(&self, ctx: &TargetContext<'_>, candidates: &[Combatant], _rng: &mut dyn RngCore) -> Option<ActorId> {
        first_best(eligible(ctx, candidates), |c, b| c.health > b.health).map(|c| c.id)
    }
}

/// Uniformly random among the eligible.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTarget;

impl Targeting for RandomTarget {
    fn select(&self, ctx: &TargetContext<'_>, candidates: &[Combatant], rng: &mut dyn RngCore) -> Option<ActorId> {
        let pool: Vec<&Combatant> = eligible(ctx, candidates).collect();
        pool.choose(rng).map(|c| c.id)
    }
}

/// Highest combat mastery first.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestThreat;

impl Targeting for HighestThreat {
    fn select(&self, ctx: &TargetContext<'_>, candidates: &[Combatant], _rng: &mut dyn RngCore) -> Option<ActorId> {
        first_best(eligible(ctx, candidates), |c, b| c.combat_mastery > b.combat_mastery).map(|c| c.id)
    }
}

/// Guards the weakest ally.
///
/// For support actions it picks the weakest other living ally. For attacks
/// it goes after whoever the weakest living ally is fighting, falling back to
/// the weakest eligible enemy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtectAlly;

impl Targeting for ProtectAlly {
    fn select(&self, ctx: &TargetContext<'_>, candidates: &[Combatant], rng: &mut dyn RngCore) -> Option<ActorId> {
        if !ctx.hostile {
            return LowestHealth.select(ctx, candidates, rng);
        }
        let weakest_ally = first_best(
            ctx.allies
                .iter()
                .filter(|a| a.is_alive() && a.id != ctx.actor.id),
            |c, b| c.health < b.health,
        );
        let protected = weakest_ally.and_then(|ally| ally.current_target).filter(|target| {
            eligible(ctx, candidates).any(|c| c.id == *target)
        });
        protected.or_else(|| LowestHealth.select(ctx, candidates, rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::battlefield::fixtures::combatant;
    use crate::entity::TeamSide;

    fn hostile<'a>(actor: &'a Combatant, allies: &'a [Combatant]) -> TargetContext<'a> {
        TargetContext {
            actor,
            allies,
            hostile: true,
        }
    }

    fn enemies() -> Vec<Combatant> {
        let mut tank = combatant(10, TeamSide::B, 9.0);
        tank.combat_mastery = 1;
        let mut glass = combatant(11, TeamSide::B, 2.0);
        glass.combat_mastery = 4;
        let dead = combatant(12, TeamSide::B, 0.0);
        let twin = combatant(13, TeamSide::B, 2.0);
        vec![tank, glass, dead, twin]
    }

    #[test]
    fn lowest_health_breaks_ties_by_order() {
        let me = combatant(0, TeamSide::A, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let pick = LowestHealth.select(&hostile(&me, &[]), &enemies(), &mut rng);
        assert_eq!(pick, Some(ActorId::new(11)));
    }

    #[test]
    fn highest_health_and_threat() {
        let me = combatant(0, TeamSide::A, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let ctx = hostile(&me, &[]);
        assert_eq!(HighestHealth.select(&ctx, &enemies(), &mut rng), Some(ActorId::new(10)));
        assert_eq!(HighestThreat.select(&ctx, &enemies(), &mut rng), Some(ActorId::new(11)));
    }

    #[test]
    fn random_never_picks_dead_or_friend() {
        let me = combatant(0, TeamSide::A, 10.0);
        let mut pool = enemies();
        pool.push(combatant(1, TeamSide::A, 1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..200 {
            let pick = RandomTarget.select(&hostile(&me, &[]), &pool, &mut rng).unwrap();
            assert!(pick != ActorId::new(12) && pick != ActorId::new(1));
        }
    }

    #[test]
    fn nobody_eligible_yields_none() {
        let me = combatant(0, TeamSide::A, 10.0);
        let pool = vec![combatant(12, TeamSide::B, 0.0), combatant(1, TeamSide::A, 3.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ctx = hostile(&me, &[]);
        assert_eq!(LowestHealth.select(&ctx, &pool, &mut rng), None);
        assert_eq!(RandomTarget.select(&ctx, &pool, &mut rng), None);
        assert_eq!(ProtectAlly.select(&ctx, &pool, &mut rng), None);
    }

    #[test]
    fn protect_ally_follows_weakest_ally() {
        let me = combatant(0, TeamSide::A, 10.0);
        let mut hurt = combatant(1, TeamSide::A, 3.0);
        hurt.current_target = Some(ActorId::new(10));
        let healthy = combatant(2, TeamSide::A, 8.0);
        let allies = vec![me.clone(), hurt, healthy];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let pick = ProtectAlly.select(&hostile(&me, &allies), &enemies(), &mut rng);
        assert_eq!(pick, Some(ActorId::new(10)));
    }

    #[test]
    fn protect_ally_support_picks_weakest_friend() {
        let me = combatant(0, TeamSide::A, 1.0);
        let hurt = combatant(1, TeamSide::A, 3.0);
        let healthy = combatant(2, TeamSide::A, 8.0);
        let allies = vec![me.clone(), hurt, healthy];
        let ctx = TargetContext {
            actor: &me,
            allies: &allies,
            hostile: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(ProtectAlly.select(&ctx, &allies, &mut rng), Some(ActorId::new(1)));
    }
}

//! Built-in strategies.

use crate::battlefield::Combatant;
use crate::policy::{ActionIntent, Strategy};

/// Attack or gain advantage depending on the attack penalty.
///
/// The first attack of a turn and the last action point always go to an
/// attack. In between, an attack is made once banked advantage covers the
/// disadvantage the multiple attack penalty would impose; otherwise the
/// actor gains advantage first.
fn press_attack(actor: &Combatant) -> ActionIntent {
    if actor.attacks_made == 0
        || actor.action_points == 1
        || actor.advantage >= actor.next_attack_penalty
    {
        ActionIntent::ATTACK
    } else {
        ActionIntent::GainAdvantage
    }
}

/// Sustains concentration, then presses the attack.
#[derive(Debug, Clone, Copy, Default)]
pub struct Standard;

impl Strategy for Standard {
    fn choose_action(&self, actor: &Combatant, _allies: &[Combatant], _enemies: &[Combatant]) -> ActionIntent {
        if actor.concentrating && !actor.sustained {
            return ActionIntent::MaintainConcentration;
        }
        press_attack(actor)
    }
}

/// Spends every action point on attacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullAttack;

impl Strategy for FullAttack {
    fn choose_action(&self, _actor: &Combatant, _allies: &[Combatant], _enemies: &[Combatant]) -> ActionIntent {
        ActionIntent::ATTACK
    }
}

/// Defends while under attack, otherwise plays [`Standard`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Cautious;

impl Strategy for Cautious {
    fn choose_action(&self, actor: &Combatant, allies: &[Combatant], enemies: &[Combatant]) -> ActionIntent {
        if actor.can_defend && actor.is_targeted_by(enemies) {
            return ActionIntent::Defend;
        }
        Standard.choose_action(actor, allies, enemies)
    }
}

/// Opens each turn by helping an ally, otherwise plays [`Standard`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Support;

impl Strategy for Support {
    fn choose_action(&self, actor: &Combatant, allies: &[Combatant], enemies: &[Combatant]) -> ActionIntent {
        let fresh_turn = actor.action_points == actor.max_action_points && actor.helps_given == 0;
        let someone_to_help = allies.iter().any(|a| a.id != actor.id && a.is_alive());
        if fresh_turn && someone_to_help {
            return ActionIntent::Help;
        }
        Standard.choose_action(actor, allies, enemies)
    }
}

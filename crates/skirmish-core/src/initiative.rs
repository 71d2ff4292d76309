//! Turn order from initiative rolls.
//!
//! The order is a pure function of the rolls:
//!
//! 1. each team is ranked by roll, highest first; ties go to higher combat
//!    mastery, then to team input order
//! 2. team A opens if its best roll meets the initiative DC, team B otherwise
//! 3. the teams alternate, and the rest of the larger team goes last
//!
//! # Example
//!
//! ```
//! use skirmish_core::entity::ActorId;
//! use skirmish_core::initiative::{turn_order, InitiativeEntry};
//!
//! let a = [InitiativeEntry::new(ActorId::new(0), 4, 0), InitiativeEntry::new(ActorId::new(1), 15, 0)];
//! let b = [InitiativeEntry::new(ActorId::new(2), 18, 0)];
//!
//! // Team A's best roll (15) meets DC 12, so team A opens.
//! let order = turn_order(&a, &b, 12);
//! assert_eq!(order, vec![ActorId::new(1), ActorId::new(2), ActorId::new(0)]);
//! ```

use serde::{Deserialize, Serialize};

use crate::entity::ActorId;

/// One actor's initiative result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeEntry {
    /// Actor rolling.
    pub id: ActorId,
    /// d20 plus initiative bonuses.
    pub roll: i32,
    /// Tie-breaker.
    pub combat_mastery: i32,
}

impl InitiativeEntry {
    /// Entry for one actor.
    #[must_use]
    pub const fn new(id: ActorId, roll: i32, combat_mastery: i32) -> Self {
        Self {
            id,
            roll,
            combat_mastery,
        }
    }
}

/// Ranks one team, highest roll first. The sort is stable, so entries that
/// tie on roll and mastery keep input order.
#[must_use]
pub fn rank_team(entries: &[InitiativeEntry]) -> Vec<InitiativeEntry> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|x, y| {
        y.roll
            .cmp(&x.roll)
            .then_with(|| y.combat_mastery.cmp(&x.combat_mastery))
    });
    ranked
}

/// Interleaves two teams into one fixed turn order.
#[must_use]
pub fn turn_order(team_a: &[InitiativeEntry], team_b: &[InitiativeEntry], initiative_dc: i32) -> Vec<ActorId> {
    let a = rank_team(team_a);
    let b = rank_team(team_b);
    let a_opens = a.first().is_some_and(|best| best.roll >= initiative_dc);
    let (first, second) = if a_opens { (a, b) } else { (b, a) };

    let mut order = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter();
    let mut second = second.into_iter();
    loop {
        match (first.next(), second.next()) {
            (None, None) => break,
            (x, y) => order.extend(x.into_iter().chain(y).map(|e| e.id)),
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, roll: i32, mastery: i32) -> InitiativeEntry {
        InitiativeEntry::new(ActorId::new(id), roll, mastery)
    }

    fn ids(raw: &[u32]) -> Vec<ActorId> {
        raw.iter().copied().map(ActorId::new).collect()
    }

    #[test]
    fn ties_break_by_mastery_then_input_order() {
        let ranked = rank_team(&[entry(0, 10, 0), entry(1, 10, 2), entry(2, 10, 0), entry(3, 12, 0)]);
        let order: Vec<_> = ranked.iter().map(|e| e.id.as_u32()).collect();
        assert_eq!(order, vec![3, 1, 0, 2]);
    }

    #[test]
    fn team_b_opens_below_dc() {
        let a = [entry(0, 9, 0)];
        let b = [entry(1, 3, 0)];
        assert_eq!(turn_order(&a, &b, 10), ids(&[1, 0]));
        assert_eq!(turn_order(&a, &b, 9), ids(&[0, 1]));
    }

    #[test]
    fn remainder_of_larger_team_goes_last() {
        let a = [entry(0, 20, 0)];
        let b = [entry(1, 5, 0), entry(2, 15, 0), entry(3, 10, 0)];
        assert_eq!(turn_order(&a, &b, 10), ids(&[0, 2, 3, 1]));
    }

    #[test]
    fn same_rolls_same_order() {
        let a = [entry(0, 7, 1), entry(1, 7, 1), entry(2, 14, 0)];
        let b = [entry(3, 7, 0), entry(4, 2, 5)];
        assert_eq!(turn_order(&a, &b, 11), turn_order(&a, &b, 11));
    }
}

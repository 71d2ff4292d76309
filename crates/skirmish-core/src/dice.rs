//! Seeded dice.
//!
//! Every random decision of a combat draws from one [`Dice`] stream, so a
//! combat is fully reproduced by its seed.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Result of a d20 roll with advantage or disadvantage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct D20Roll {
    /// The kept die.
    pub natural: u32,
    /// Every die thrown, in throw order.
    pub rolls: Vec<u32>,
}

/// Deterministic dice stream for one combat.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    /// Creates a stream from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rolls one die with `sides` faces. A zero-sided die rolls 0.
    pub fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(1..=sides)
    }

    /// Rolls a single d20.
    pub fn d20(&mut self) -> u32 {
        self.roll(20)
    }

    /// Rolls a d20 under advantage and disadvantage.
    ///
    /// The counts cancel one for one. Each remaining point adds a die; net
    /// advantage keeps the highest, net disadvantage the lowest.
    pub fn d20_with(&mut self, advantage: u32, disadvantage: u32) -> D20Roll {
        let extra = advantage.abs_diff(disadvantage);
        let rolls: Vec<u32> = (0..=extra).map(|_| self.d20()).collect();
        let kept = if advantage > disadvantage {
            rolls.iter().max()
        } else {
            rolls.iter().min()
        };
        D20Roll {
            natural: kept.copied().unwrap_or(1),
            rolls,
        }
    }

    /// Borrow the underlying generator for policy decisions.
    pub fn rng_mut(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

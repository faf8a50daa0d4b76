//! Seeded random number generation.
//!
//! The simulation carries one stateful generator per map so that a fixed
//! seed reproduces the exact same cycle of AI rolls, damage ranges, and
//! wander directions. The generator is a PCG (Permuted Congruential
//! Generator), PCG-XSH-RR variant: 64-bit state, 32-bit output, excellent
//! statistical quality for a single multiply + xorshift + rotate.
//!
//! Reference: <https://www.pcg-random.org/>

use crate::action::Direction;

/// Stateful, deterministic PCG-XSH-RR generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        // One warm-up step so trivially similar seeds diverge immediately.
        let mut rng = Self { state: seed };
        rng.step();
        rng
    }

    /// Advances the LCG state: `state' = state * mult + inc (mod 2^64)`.
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation over the current state.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.step();
        Self::output(self.state)
    }

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    pub fn below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "rng bound must be non-zero");
        self.next_u32() % bound
    }

    /// Uniform integer in the closed range `[lower, upper]`.
    pub fn range_inclusive(&mut self, lower: u32, upper: u32) -> u32 {
        if lower >= upper {
            return lower;
        }
        lower + self.below(upper - lower + 1)
    }

    /// A "1 in n" chance roll. `one_in(1)` always succeeds.
    pub fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.below(n) == 0
    }

    /// Uniform pick over the 8 compass directions. Never yields a zero
    /// offset, so forced movement always leaves the current cell.
    pub fn direction(&mut self) -> Direction {
        Direction::ALL[self.below(Direction::ALL.len() as u32) as usize]
    }
}

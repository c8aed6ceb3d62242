//! Injectable random source for combat rolls and turn-order tie breaks.
//!
//! # Determinism
//!
//! Every implementation must be deterministic for a given seed: two battles
//! built with the same seed, roster, and command sequence produce identical
//! turn orders, rolls, and events.

use std::collections::VecDeque;

/// Random source consumed by the engine.
///
/// Implementations are stateful; each call advances the stream.
pub trait RngSource: Send {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform roll in `[0, 1)`.
    fn next_unit(&mut self) -> f32 {
        // 24 bits fit the f32 mantissa exactly, so the result never rounds up to 1.0.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 64-bit LCG state, 32-bit permuted output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        // One warm-up step so nearby seeds diverge immediately.
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.state = Self::pcg_step(rng.state);
        rng
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Test double replaying a fixed sequence of unit rolls.
///
/// `next_unit` pops the queued values in order; once the queue is exhausted it
/// keeps returning `fallback`. `next_u32` pops from a separate integer queue
/// (falling back to 0) so tie-break draws never consume scripted rolls.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<f32>,
    words: VecDeque<u32>,
    fallback: f32,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = f32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            words: VecDeque::new(),
            fallback: 0.0,
        }
    }

    /// Roll returned after the script runs out.
    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Integer draws returned by `next_u32`, in order.
    pub fn with_words(mut self, words: impl IntoIterator<Item = u32>) -> Self {
        self.words = words.into_iter().collect();
        self
    }

    pub fn push_roll(&mut self, roll: f32) {
        self.rolls.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RngSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.words.pop_front().unwrap_or(0)
    }

    fn next_unit(&mut self) -> f32 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}

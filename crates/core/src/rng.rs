//! RNG module - uniform piece selection and bubble rolls
//!
//! Every random decision in a session flows through a seedable [`GameRng`], so a fixed
//! seed reproduces the same piece sequence and the same bubble outcomes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy, remembering the drawn seed so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw one of the seven standard kinds with equal probability.
    pub fn next_standard_kind(&mut self) -> PieceKind {
        *PieceKind::STANDARD
            .choose(&mut self.rng)
            .unwrap_or(&PieceKind::T)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Uniform value in `[low, high)`. Returns `low` when the range is empty.
    pub fn next_range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Uniform float in `[low, high)`.
    pub fn next_f32(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(1)
    }
}

//! Random move selection
//!
//! All draws go through an injected [`Rng`] so matches can be replayed
//! from a seed. Production play seeds from the OS.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::moves::Move;

/// Random number generator used by the engine
pub type GameRng = SmallRng;

/// Deterministic generator: same seed = same sequence of draws
pub fn seeded(seed: u64) -> GameRng {
    SmallRng::seed_from_u64(seed)
}

/// Generator seeded from operating-system entropy
pub fn from_entropy() -> GameRng {
    SmallRng::from_os_rng()
}

/// Uniform draw over all five moves
pub fn uniform_move<R: Rng + ?Sized>(rng: &mut R) -> Move {
    Move::ALL[rng.random_range(0..Move::ALL.len())]
}

/// Uniform draw over `candidates`, or over all moves when empty
pub fn choose_from<R: Rng + ?Sized>(rng: &mut R, candidates: &[Move]) -> Move {
    match candidates.choose(rng) {
        Some(m) => *m,
        None => uniform_move(rng),
    }
}

/// Weighted draw over [`Move::ALL`]
///
/// Probability of each move is its weight divided by the sum of weights.
/// Degenerate weights (all zero, negative, NaN) fall back to a uniform draw.
pub fn weighted_move<R: Rng + ?Sized>(rng: &mut R, weights: &[f64; 5]) -> Move {
    match WeightedIndex::<f64>::new(weights.iter().copied()) {
        Ok(dist) => Move::ALL[dist.sample(rng)],
        Err(e) => {
            log::warn!("invalid move weights {:?}: {}", weights, e);
            uniform_move(rng)
        }
    }
}

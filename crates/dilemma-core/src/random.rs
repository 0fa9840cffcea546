//! Seeded pseudo-random number generation
//!
//! One generator drives a whole run: opponent draws and the random
//! strategy's moves consume the same stream, in match order. Same seed,
//! same run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Generator used by [`crate::Simulation`] unless one is injected
pub type SimRng = ChaCha12Rng;

/// Create the run's generator, drawing a seed from entropy when none is given
pub fn seeded_rng(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::seed_from_u64(rand::random()),
    }
}

/// Draw a uniform index in `[0, len)` that differs from `exclude`
///
/// Redraws until the value differs, so `len` must be at least 2.
pub fn draw_other_index<R: Rng + ?Sized>(rng: &mut R, len: usize, exclude: usize) -> usize {
    debug_assert!(len >= 2, "need at least two candidates");
    loop {
        let idx = rng.gen_range(0..len);
        if idx != exclude {
            return idx;
        }
    }
}

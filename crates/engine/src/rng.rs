//! Seeded RNG stream derivation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment; keeps per-rank streams apart for any run seed.
const RANK_STREAM_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derive the deterministic RNG stream for one worker rank (or reference
/// thread id).
///
/// Every rank owns its RNG exclusively; given the same run seed the whole
/// run replays identically.
pub fn worker_rng(seed: u64, rank: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add((rank as u64).wrapping_mul(RANK_STREAM_STEP)))
}

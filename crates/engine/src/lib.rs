//! Forest-fire automaton engine.
//!
//! The pure, halo-aware update rule shared by the sequential, threaded, and
//! distributed strategies, plus seeded RNG derivation and burn-count
//! statistics. The rule is the single piece of behavior that must produce
//! statistically equivalent dynamics regardless of how execution is
//! orchestrated.

mod rng;
mod stats;
mod update;

pub use rng::worker_rng;
pub use stats::BurnSeries;
pub use update::update_block;

//! Reference execution strategies.
//!
//! Two simpler renditions of the same automaton, used for correctness and
//! performance comparison against the distributed workers:
//!
//! - [`sequential`]: the whole grid as one partition, no ghosts;
//! - [`threaded`]: row-partitioned scoped threads over one shared arena.
//!
//! Both consume the exact update rule the distributed workers do, so all
//! three strategies produce statistically equivalent dynamics (and bitwise
//! identical ones when `p = f = 0`, where no draw can change a cell).

pub mod sequential;
pub mod threaded;

mod summary;

pub use summary::RunSummary;

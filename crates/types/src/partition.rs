//! 1-D row partitioning of the global grid across worker ranks.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Contiguous range of global row indices `[i0, i1)` owned by one rank.
///
/// Ranges are computed once at startup and immutable thereafter; across all
/// ranks they tile `[0, nx)` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub rank: usize,
    pub i0: usize,
    pub i1: usize,
}

impl Partition {
    /// Number of rows this rank owns.
    pub fn rows(&self) -> usize {
        self.i1 - self.i0
    }
}

/// Plan the row partition for one rank.
///
/// Every rank gets `nx / num_workers` rows except the last, which absorbs
/// the remainder, so the union of all ranges always covers the full grid.
pub fn plan(nx: usize, num_workers: usize, rank: usize) -> Result<Partition, ConfigError> {
    if num_workers == 0 {
        return Err(ConfigError::NoWorkers);
    }
    if rank >= num_workers {
        return Err(ConfigError::RankOutOfRange { rank, num_workers });
    }
    if nx < num_workers {
        return Err(ConfigError::GridTooShort { nx, num_workers });
    }

    let rows_per = nx / num_workers;
    let i0 = rank * rows_per;
    let i1 = if rank == num_workers - 1 {
        nx
    } else {
        (rank + 1) * rows_per
    };
    Ok(Partition { rank, i0, i1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ranges are pairwise disjoint, contiguous, ordered by rank, and their
    /// union is exactly `[0, nx)`, for every valid (nx, num_workers).
    #[test]
    fn test_partition_tiles_grid_exactly() {
        for nx in 1..=48 {
            for num_workers in 1..=nx {
                let mut next_row = 0;
                for rank in 0..num_workers {
                    let part = plan(nx, num_workers, rank).unwrap();
                    assert_eq!(part.rank, rank);
                    assert_eq!(part.i0, next_row, "gap or overlap at rank {rank}");
                    assert!(part.rows() > 0);
                    next_row = part.i1;
                }
                assert_eq!(next_row, nx, "union must cover [0, {nx})");
            }
        }
    }

    #[test]
    fn test_remainder_goes_to_last_rank() {
        let last = plan(10, 3, 2).unwrap();
        assert_eq!((last.i0, last.i1), (6, 10));
        assert_eq!(plan(10, 3, 0).unwrap().rows(), 3);
        assert_eq!(plan(10, 3, 1).unwrap().rows(), 3);
    }

    #[test]
    fn test_invalid_configurations_rejected() {
        assert_eq!(plan(10, 0, 0), Err(ConfigError::NoWorkers));
        assert_eq!(
            plan(2, 5, 0),
            Err(ConfigError::GridTooShort {
                nx: 2,
                num_workers: 5
            })
        );
        assert_eq!(
            plan(10, 2, 2),
            Err(ConfigError::RankOutOfRange {
                rank: 2,
                num_workers: 2
            })
        );
    }
}

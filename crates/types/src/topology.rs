//! The linear worker chain.

/// Workers form a chain ordered by rank: rank `r` is row-adjacent to `r - 1`
/// (above) and `r + 1` (below). The first rank has no upper neighbor and the
/// last has no lower neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    rank: usize,
    num_workers: usize,
}

impl Topology {
    pub fn new(rank: usize, num_workers: usize) -> Self {
        debug_assert!(rank < num_workers);
        Self { rank, num_workers }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Rank of the neighbor above, if any.
    pub fn up(&self) -> Option<usize> {
        self.rank.checked_sub(1)
    }

    /// Rank of the neighbor below, if any.
    pub fn down(&self) -> Option<usize> {
        let below = self.rank + 1;
        (below < self.num_workers).then_some(below)
    }
}

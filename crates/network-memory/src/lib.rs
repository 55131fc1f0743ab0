//! In-process channel backend.
//!
//! [`channel_pair`] returns two connected [`RowChannel`]s over an in-memory
//! duplex stream. They satisfy the same opaque byte-stream contract as the
//! TCP backend, so multi-worker runs can be wired up inside one process for
//! deterministic tests: no ports, no startup races.

use firegrid_network::RowChannel;
use tokio::io::DuplexStream;

/// Channel over an in-memory duplex stream.
pub type MemoryRowChannel = RowChannel<DuplexStream>;

/// Connected channel pair for rows of length `ny`.
///
/// The buffer holds a few rows; with concurrent send/receive per exchange
/// even a one-byte buffer would work, this just avoids pointless wakeups.
pub fn channel_pair(ny: usize) -> (MemoryRowChannel, MemoryRowChannel) {
    let (a, b) = tokio::io::duplex(ny.max(16) * 4);
    (RowChannel::new(a, ny), RowChannel::new(b, ny))
}

#[cfg(test)]
mod tests {
    use super::*;
    use firegrid_types::Cell;

    #[tokio::test]
    async fn test_pair_exchanges_both_directions() {
        let ny = 6;
        let (mut upper, mut lower) = channel_pair(ny);
        let upper_row = vec![Cell::Tree; ny];
        let lower_row = vec![Cell::Burning; ny];

        let (got_lower, got_upper) =
            tokio::join!(upper.exchange(&upper_row), lower.exchange(&lower_row));
        assert_eq!(got_lower.unwrap(), lower_row);
        assert_eq!(got_upper.unwrap(), upper_row);
    }
}

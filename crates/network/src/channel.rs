//! Full-duplex row exchange over an opaque byte stream.

use crate::wire;
use firegrid_types::{Cell, InvalidCellCode};
use std::io;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};

/// Errors from the per-step ghost-row exchange.
///
/// All of these are fatal mid-run: a missing or corrupt ghost row would
/// silently corrupt the simulation, so there is no partial-data fallback.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The peer disconnected before a full ghost row was transferred.
    #[error("channel closed before a full ghost row was transferred")]
    ChannelClosed,

    /// A received byte was not a valid cell code.
    #[error(transparent)]
    Wire(#[from] InvalidCellCode),

    /// Any other transport failure.
    #[error("channel I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One reliable, ordered, bidirectional channel to a row-adjacent neighbor.
///
/// Created once at setup and reused for every step until the run ends. The
/// stream is split so each exchange drives its send and its receive
/// concurrently: both endpoints run the same symmetric exchange, and since
/// neither side waits for its send to complete before reading, the protocol
/// cannot deadlock on transport buffering for any row length.
#[derive(Debug)]
pub struct RowChannel<S> {
    reader: ReadHalf<S>,
    writer: WriteHalf<S>,
    ny: usize,
}

impl<S: AsyncRead + AsyncWrite + Send + Unpin> RowChannel<S> {
    /// Wrap an established stream for rows of length `ny`.
    pub fn new(stream: S, ny: usize) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self { reader, writer, ny }
    }

    /// Row length this channel carries.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Send our boundary row and receive the neighbor's, concurrently.
    ///
    /// Exactly `ny` cells are read; a short read means the peer went away
    /// mid-run and is fatal ([`ExchangeError::ChannelClosed`]).
    pub async fn exchange(&mut self, own_row: &[Cell]) -> Result<Vec<Cell>, ExchangeError> {
        debug_assert_eq!(own_row.len(), self.ny);
        let outgoing = wire::encode_row(own_row);
        let mut incoming = vec![0u8; self.ny];
        let (sent, received) = tokio::join!(
            self.writer.write_all(&outgoing),
            self.reader.read_exact(&mut incoming),
        );
        sent.map_err(map_closed)?;
        received.map_err(map_closed)?;
        Ok(wire::decode_row(&incoming)?)
    }

    /// Flush and close the write side, signalling end of run to the peer.
    pub async fn shutdown(&mut self) -> Result<(), ExchangeError> {
        self.writer.shutdown().await.map_err(map_closed)
    }
}

/// Peer-disconnect error kinds collapse into `ChannelClosed`.
fn map_closed(error: io::Error) -> ExchangeError {
    match error.kind() {
        io::ErrorKind::UnexpectedEof
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted => ExchangeError::ChannelClosed,
        _ => ExchangeError::Io(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ny: usize) -> (Vec<Cell>, Vec<Cell>) {
        let left: Vec<Cell> = (0..ny)
            .map(|j| if j % 2 == 0 { Cell::Tree } else { Cell::Empty })
            .collect();
        let right = vec![Cell::Burning; ny];
        (left, right)
    }

    #[tokio::test]
    async fn test_symmetric_exchange() {
        let ny = 8;
        let (a, b) = tokio::io::duplex(64);
        let mut left = RowChannel::new(a, ny);
        let mut right = RowChannel::new(b, ny);
        let (left_row, right_row) = rows(ny);

        let (from_right, from_left) =
            tokio::join!(left.exchange(&left_row), right.exchange(&right_row));
        assert_eq!(from_right.unwrap(), right_row);
        assert_eq!(from_left.unwrap(), left_row);
    }

    #[tokio::test]
    async fn test_channel_reused_across_steps() {
        let ny = 4;
        let (a, b) = tokio::io::duplex(64);
        let mut left = RowChannel::new(a, ny);
        let mut right = RowChannel::new(b, ny);

        for _ in 0..10 {
            let (left_row, right_row) = rows(ny);
            let (got_right, got_left) =
                tokio::join!(left.exchange(&left_row), right.exchange(&right_row));
            assert_eq!(got_right.unwrap(), right_row);
            assert_eq!(got_left.unwrap(), left_row);
        }
    }

    #[tokio::test]
    async fn test_exchange_survives_tiny_transport_buffer() {
        // Rows much larger than the transport buffer: the old
        // send-then-receive pattern would deadlock here; concurrent halves
        // must not.
        let ny = 4096;
        let (a, b) = tokio::io::duplex(16);
        let mut left = RowChannel::new(a, ny);
        let mut right = RowChannel::new(b, ny);
        let (left_row, right_row) = rows(ny);

        let (from_right, from_left) =
            tokio::join!(left.exchange(&left_row), right.exchange(&right_row));
        assert_eq!(from_right.unwrap(), right_row);
        assert_eq!(from_left.unwrap(), left_row);
    }

    #[tokio::test]
    async fn test_short_read_is_channel_closed() {
        let ny = 4;
        let (a, mut raw) = tokio::io::duplex(64);
        let mut channel = RowChannel::new(a, ny);

        // Peer sends only half a row, then goes away.
        raw.write_all(&[1, 1]).await.unwrap();
        drop(raw);

        let (row, _) = rows(ny);
        let err = channel.exchange(&row).await.unwrap_err();
        assert!(matches!(err, ExchangeError::ChannelClosed), "{err:?}");
    }

    #[tokio::test]
    async fn test_invalid_cell_code_is_wire_error() {
        let ny = 4;
        let (a, mut raw) = tokio::io::duplex(64);
        let mut channel = RowChannel::new(a, ny);

        raw.write_all(&[0, 1, 9, 2]).await.unwrap();

        let (row, _) = rows(ny);
        let err = channel.exchange(&row).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Wire(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_shutdown_closes_write_side() {
        let ny = 4;
        let (a, b) = tokio::io::duplex(64);
        let mut left = RowChannel::new(a, ny);
        let mut right = RowChannel::new(b, ny);

        left.shutdown().await.unwrap();

        let (row, _) = rows(ny);
        let err = right.exchange(&row).await.unwrap_err();
        assert!(matches!(err, ExchangeError::ChannelClosed), "{err:?}");
    }
}

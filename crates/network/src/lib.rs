//! Transport-independent ghost-row exchange protocol.
//!
//! - [`wire`]: the raw row codec (one byte per cell, no framing)
//! - [`RowChannel`]: full-duplex row exchange over any async byte stream
//!
//! Backends supply the streams and keep the channel abstraction opaque:
//! `firegrid-network-tcp` for distributed worker processes,
//! `firegrid-network-memory` for deterministic in-process tests. Both
//! satisfy the same contract.

pub mod wire;

mod channel;

pub use channel::{ExchangeError, RowChannel};

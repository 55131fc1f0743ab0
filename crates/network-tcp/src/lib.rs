//! TCP backend for neighbor channels.
//!
//! Establishes one [`RowChannel`] per row-adjacent worker pair without
//! deadlock, tolerating arbitrary startup ordering of the worker processes.
//! Rank `r` listens on `base_port + r`; that mapping is the entire discovery
//! mechanism; there is no registry and no handshake beyond TCP
//! connect/accept.

mod setup;

pub use setup::{connect_neighbors, NeighborConfig, Neighbors, SetupError, TcpRowChannel};

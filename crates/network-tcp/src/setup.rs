//! Neighbor connection establishment.

use firegrid_network::RowChannel;
use firegrid_types::Topology;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace};

/// Channel over an established TCP stream.
pub type TcpRowChannel = RowChannel<TcpStream>;

/// Addressing and retry policy for neighbor setup.
#[derive(Debug, Clone)]
pub struct NeighborConfig {
    /// Interface workers bind and dial on.
    pub host: String,
    /// Rank `r` listens on `base_port + r`.
    pub base_port: u16,
    /// Delay between connect attempts while the upper neighbor is not yet
    /// listening.
    pub retry_delay: Duration,
    /// Total time allowed for the upper neighbor to start listening before
    /// setup fails with [`SetupError::ConnectTimeout`].
    pub connect_deadline: Duration,
}

impl Default for NeighborConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            base_port: 9000,
            retry_delay: Duration::from_millis(50),
            connect_deadline: Duration::from_secs(10),
        }
    }
}

/// Non-transient failure during neighbor setup. Fatal; aborts the worker.
///
/// Connection-refused while the peer has not yet reached its listen call is
/// *not* represented here; that transient race is absorbed inside
/// [`connect_neighbors`] by the bounded retry.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to bind listener on {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("failed to accept lower neighbor: {0}")]
    Accept(#[source] io::Error),

    #[error("accept task failed: {0}")]
    AcceptTask(#[from] tokio::task::JoinError),

    #[error("failed to connect to upper neighbor at {addr}: {source}")]
    Connect { addr: String, source: io::Error },

    #[error("upper neighbor at {addr} not listening after {waited:?}")]
    ConnectTimeout { addr: String, waited: Duration },

    #[error("failed to configure stream: {0}")]
    Configure(#[source] io::Error),
}

/// Channels to the row-adjacent neighbors; either side is absent at the
/// chain ends.
#[derive(Debug)]
pub struct Neighbors {
    pub up: Option<TcpRowChannel>,
    pub down: Option<TcpRowChannel>,
}

/// Establish this rank's neighbor channels without deadlock, whatever order
/// the worker processes start in.
///
/// Asymmetric roles break the cyclic-wait hazard:
///
/// - every rank but the last binds its listener *first*, then accepts
///   exactly one inbound connection (its lower neighbor) on a concurrent
///   task whose join handle is the one-shot accept handoff;
/// - every rank but the first then dials its upper neighbor's rank-derived
///   address, absorbing connection-refused with a fixed-delay, bounded
///   retry;
/// - middle ranks do both, and the accept is joined before returning, so
///   callers never enter the exchange phase with a channel missing.
pub async fn connect_neighbors(
    topology: Topology,
    config: &NeighborConfig,
    ny: usize,
) -> Result<Neighbors, SetupError> {
    // Bind before anything else so a lower neighbor that started earlier
    // finds the listener as soon as possible.
    let accept: Option<JoinHandle<Result<TcpStream, SetupError>>> = match topology.down() {
        Some(below) => {
            let addr = neighbor_addr(config, topology.rank());
            let listener = TcpListener::bind(&addr).await.map_err(|source| SetupError::Bind {
                addr: addr.clone(),
                source,
            })?;
            debug!(rank = topology.rank(), %addr, below, "listening for lower neighbor");
            Some(tokio::spawn(async move {
                // Exactly one inbound connection is accepted; dropping the
                // listener afterwards closes the endpoint.
                let (stream, peer) = listener.accept().await.map_err(SetupError::Accept)?;
                debug!(%peer, "accepted lower neighbor");
                stream.set_nodelay(true).map_err(SetupError::Configure)?;
                Ok(stream)
            }))
        }
        None => None,
    };

    let up = match topology.up() {
        Some(above) => {
            let addr = neighbor_addr(config, above);
            let stream = connect_with_retry(&addr, config).await?;
            stream.set_nodelay(true).map_err(SetupError::Configure)?;
            info!(rank = topology.rank(), %addr, above, "connected to upper neighbor");
            Some(RowChannel::new(stream, ny))
        }
        None => None,
    };

    let down = match accept {
        Some(handle) => {
            let stream = handle.await??;
            info!(rank = topology.rank(), "lower neighbor connected");
            Some(RowChannel::new(stream, ny))
        }
        None => None,
    };

    Ok(Neighbors { up, down })
}

fn neighbor_addr(config: &NeighborConfig, rank: usize) -> String {
    format!("{}:{}", config.host, config.base_port + rank as u16)
}

/// Dial `addr`, retrying while the peer is not yet listening.
///
/// Connection-refused is the startup race and is retried with a fixed delay
/// up to the configured deadline; every other error is immediately fatal.
async fn connect_with_retry(
    addr: &str,
    config: &NeighborConfig,
) -> Result<TcpStream, SetupError> {
    let started = Instant::now();
    loop {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(source) if source.kind() == io::ErrorKind::ConnectionRefused => {
                let waited = started.elapsed();
                if waited >= config.connect_deadline {
                    return Err(SetupError::ConnectTimeout {
                        addr: addr.to_string(),
                        waited,
                    });
                }
                trace!(%addr, ?waited, "upper neighbor not yet listening, retrying");
                tokio::time::sleep(config.retry_delay).await;
            }
            Err(source) => {
                return Err(SetupError::Connect {
                    addr: addr.to_string(),
                    source,
                })
            }
        }
    }
}

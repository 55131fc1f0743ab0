//! The per-worker simulation loop.

use crate::config::WorkerConfig;
use crate::report::WorkerReport;
use firegrid_engine::{update_block, worker_rng};
use firegrid_network::{ExchangeError, RowChannel};
use firegrid_network_tcp::{connect_neighbors, Neighbors, SetupError};
use firegrid_types::{plan, Cell, ConfigError, GridBlock, Partition, SimParams, Topology};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, trace};

/// Fatal worker failure.
///
/// Propagates to the launcher; there is no checkpoint/restart, so nothing is
/// recovered mid-run.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("neighbor setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("ghost-row exchange failed: {0}")]
    Exchange(#[from] ExchangeError),
}

/// A worker mid-run: its block, neighbor channels, RNG stream, and timing
/// counters.
///
/// Generic over the channel's byte stream so TCP worker processes and
/// in-process test workers drive the identical loop.
pub struct Worker<S> {
    partition: Partition,
    params: SimParams,
    block: GridBlock,
    up: Option<RowChannel<S>>,
    down: Option<RowChannel<S>>,
    rng: ChaCha8Rng,
    compute_time: Duration,
    exchange_time: Duration,
    steps_done: usize,
}

impl<S: AsyncRead + AsyncWrite + Send + Unpin> Worker<S> {
    /// Wrap an already-seeded block and established channels.
    ///
    /// `up`/`down` must be `Some` exactly where the topology has a neighbor;
    /// an absent channel reads as the synthetic all-`Empty` ghost row.
    pub fn new(
        partition: Partition,
        params: SimParams,
        block: GridBlock,
        up: Option<RowChannel<S>>,
        down: Option<RowChannel<S>>,
        rng: ChaCha8Rng,
    ) -> Self {
        debug_assert_eq!(block.rows(), partition.rows());
        debug_assert_eq!(block.ny(), params.ny);
        Self {
            partition,
            params,
            block,
            up,
            down,
            rng,
            compute_time: Duration::ZERO,
            exchange_time: Duration::ZERO,
            steps_done: 0,
        }
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn block(&self) -> &GridBlock {
        &self.block
    }

    /// Exchange boundary rows with both neighbors.
    ///
    /// Both endpoints of a channel run the same symmetric exchange, so each
    /// side's send satisfies the other's receive. Boundary rows are captured
    /// before any I/O, so neighbors always observe the step-start snapshot,
    /// never a partially updated or future-step row.
    async fn exchange_ghost_rows(
        &mut self,
    ) -> Result<(Option<Vec<Cell>>, Option<Vec<Cell>>), ExchangeError> {
        let top_row = self.block.top_row().to_vec();
        let bottom_row = self.block.bottom_row().to_vec();

        let top_ghost = match self.up.as_mut() {
            Some(channel) => Some(channel.exchange(&top_row).await?),
            None => None,
        };
        let bottom_ghost = match self.down.as_mut() {
            Some(channel) => Some(channel.exchange(&bottom_row).await?),
            None => None,
        };
        Ok((top_ghost, bottom_ghost))
    }

    /// Run one step: exchange, then update, then commit the new block.
    pub async fn step(&mut self) -> Result<(), WorkerError> {
        let exchange_started = Instant::now();
        let (top_ghost, bottom_ghost) = self.exchange_ghost_rows().await?;
        self.exchange_time += exchange_started.elapsed();

        let compute_started = Instant::now();
        let next = update_block(
            self.block.view(),
            top_ghost.as_deref(),
            bottom_ghost.as_deref(),
            self.params.p,
            self.params.f,
            &mut self.rng,
        );
        self.block.replace(next);
        self.compute_time += compute_started.elapsed();

        self.steps_done += 1;
        trace!(
            rank = self.partition.rank,
            step = self.steps_done,
            burning = self.block.count(Cell::Burning),
            "step committed"
        );
        Ok(())
    }

    /// Drive all remaining steps to completion, then close both channels.
    pub async fn run(&mut self) -> Result<(), WorkerError> {
        while self.steps_done < self.params.nsteps {
            self.step().await?;
        }
        self.close().await?;
        Ok(())
    }

    /// Closing phase: shut both channels down. The TCP listener was already
    /// dropped after its single accept.
    async fn close(&mut self) -> Result<(), ExchangeError> {
        if let Some(channel) = self.up.as_mut() {
            channel.shutdown().await?;
        }
        if let Some(channel) = self.down.as_mut() {
            channel.shutdown().await?;
        }
        debug!(rank = self.partition.rank, "channels closed");
        Ok(())
    }

    /// Final statistics for the reporting collaborator.
    pub fn report(&self) -> WorkerReport {
        WorkerReport {
            rank: self.partition.rank,
            i0: self.partition.i0,
            i1: self.partition.i1,
            nx: self.params.nx,
            ny: self.params.ny,
            nsteps: self.steps_done,
            p: self.params.p,
            f: self.params.f,
            compute_secs: self.compute_time.as_secs_f64(),
            exchange_secs: self.exchange_time.as_secs_f64(),
            total_secs: (self.compute_time + self.exchange_time).as_secs_f64(),
            empty: self.block.count(Cell::Empty),
            trees: self.block.count(Cell::Tree),
            burning: self.block.count(Cell::Burning),
        }
    }
}

/// Run one TCP worker end to end.
///
/// Initializing: plan the partition and seed the block from this rank's RNG
/// stream. ConnectingNeighbors: establish both channels or fail setup.
/// Running/Closing/Done: delegate to [`Worker::run`] and emit the report.
pub async fn run_worker(config: &WorkerConfig) -> Result<WorkerReport, WorkerError> {
    config.validate()?;
    let partition = plan(config.params.nx, config.num_workers, config.rank)?;
    let topology = Topology::new(config.rank, config.num_workers);
    info!(
        rank = config.rank,
        i0 = partition.i0,
        i1 = partition.i1,
        nsteps = config.params.nsteps,
        "initializing worker"
    );

    let mut rng = worker_rng(config.seed, config.rank);
    let block = GridBlock::random(partition.rows(), config.params.ny, config.params.d0, &mut rng);

    let Neighbors { up, down } =
        connect_neighbors(topology, &config.neighbors, config.params.ny).await?;

    let mut worker = Worker::new(partition, config.params, block, up, down, rng);
    worker.run().await?;

    let report = worker.report();
    info!(
        rank = report.rank,
        compute_secs = report.compute_secs,
        exchange_secs = report.exchange_secs,
        trees = report.trees,
        burning = report.burning,
        "worker done"
    );
    Ok(report)
}

//! Distributed worker: one process per grid partition.
//!
//! Each worker owns one [`GridBlock`](firegrid_types::GridBlock) and two
//! optional neighbor channels, and moves through a fixed sequence of phases:
//!
//! ```text
//! Initializing → ConnectingNeighbors → Running(step 0..nsteps) → Closing → Done
//! ```
//!
//! Within every step the ghost-row exchange happens strictly before the
//! update, and a worker never starts step `t+1`'s exchange before committing
//! step `t`'s block, so each neighbor always observes boundary rows exactly
//! as they were at the end of the previous step. There is no global barrier;
//! cross-worker ordering rests entirely on the pairwise blocking rendezvous
//! of each channel.

mod config;
mod report;
mod worker_loop;

pub use config::WorkerConfig;
pub use report::{ReportSink, VecSink, WorkerReport};
pub use worker_loop::{run_worker, Worker, WorkerError};

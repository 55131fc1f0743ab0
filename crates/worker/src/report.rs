//! Final per-worker statistics and the reporting interface.

use serde::{Deserialize, Serialize};
use std::io;

/// Per-worker statistics emitted once, at `Done`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerReport {
    pub rank: usize,
    /// Assigned global row range `[i0, i1)`.
    pub i0: usize,
    pub i1: usize,
    /// Full-grid dimensions, for cross-worker aggregation.
    pub nx: usize,
    pub ny: usize,
    /// Steps actually completed.
    pub nsteps: usize,
    pub p: f64,
    pub f: f64,
    /// Elapsed time in the update rule.
    pub compute_secs: f64,
    /// Elapsed time in the ghost-row exchange.
    pub exchange_secs: f64,
    pub total_secs: f64,
    /// Final cell-state counts over this worker's block.
    pub empty: usize,
    pub trees: usize,
    pub burning: usize,
}

/// Where worker reports go.
///
/// Format and persistence are the collaborator's concern: the CLI writes one
/// JSON file per rank, tests collect reports in memory.
pub trait ReportSink {
    fn record(&mut self, report: &WorkerReport) -> io::Result<()>;
}

/// Collects reports in memory; handy for tests and in-process runs.
#[derive(Debug, Default)]
pub struct VecSink {
    pub reports: Vec<WorkerReport>,
}

impl ReportSink for VecSink {
    fn record(&mut self, report: &WorkerReport) -> io::Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

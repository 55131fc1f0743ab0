//! Run summaries for the reporting collaborator.

use serde::Serialize;

/// Summary of one reference-variant run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// `"seq"` or `"threads"`.
    pub mode: &'static str,
    pub nx: usize,
    pub ny: usize,
    pub nsteps: usize,
    /// 1 for the sequential variant.
    pub nthreads: usize,
    pub p: f64,
    pub f: f64,
    pub total_secs: f64,
    /// Mean burning-cell count across steps.
    pub avg_burning: f64,
}

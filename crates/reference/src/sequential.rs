//! Single-process reference variant: the whole grid as one partition.

use crate::RunSummary;
use firegrid_engine::{update_block, worker_rng, BurnSeries};
use firegrid_types::{Cell, ConfigError, GridBlock, SimParams};
use rand::Rng;
use std::time::Instant;
use tracing::info;

/// Advance `grid` by `nsteps` with no neighbors (both ghosts absent),
/// recording the burning count after each step.
pub fn run_from<R: Rng>(
    mut grid: GridBlock,
    nsteps: usize,
    p: f64,
    f: f64,
    rng: &mut R,
) -> (GridBlock, BurnSeries) {
    let mut series = BurnSeries::with_capacity(nsteps);
    for _ in 0..nsteps {
        let next = update_block(grid.view(), None, None, p, f, rng);
        grid.replace(next);
        series.record(grid.count(Cell::Burning));
    }
    (grid, series)
}

/// Full sequential run: seed, simulate, time, summarize.
pub fn run(params: &SimParams, seed: u64) -> Result<RunSummary, ConfigError> {
    params.validate()?;
    let mut rng = worker_rng(seed, 0);
    let grid = GridBlock::random(params.nx, params.ny, params.d0, &mut rng);

    let started = Instant::now();
    let (_, series) = run_from(grid, params.nsteps, params.p, params.f, &mut rng);
    let total_secs = started.elapsed().as_secs_f64();

    info!(
        nx = params.nx,
        ny = params.ny,
        nsteps = params.nsteps,
        total_secs,
        avg_burning = series.mean(),
        "sequential run complete"
    );
    Ok(RunSummary {
        mode: "seq",
        nx: params.nx,
        ny: params.ny,
        nsteps: params.nsteps,
        nthreads: 1,
        p: params.p,
        f: params.f,
        total_secs,
        avg_burning: series.mean(),
    })
}

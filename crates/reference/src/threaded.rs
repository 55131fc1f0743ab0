//! Shared-memory reference variant.
//!
//! The step barrier is expressed through ownership instead of a shared
//! mutable grid: per step, scoped threads each take a disjoint `&mut` slice
//! of the output arena (split by the same partition planner the distributed
//! workers use) plus a shared read-only view of the old grid. The scope join
//! is the synchronization point, and the controlling thread alone swaps the
//! arenas between steps, so no two threads ever hold overlapping mutable
//! access.

use crate::RunSummary;
use firegrid_engine::{update_block, worker_rng, BurnSeries};
use firegrid_types::{plan, Cell, ConfigError, GridBlock, Partition, SimParams};
use std::time::Instant;
use tracing::info;

/// Advance `grid` by `nsteps` across `nthreads` row-partitioned threads,
/// recording the burning count after each step.
///
/// Each thread runs the same update rule as the other strategies; its
/// vertical ghost rows are simply the adjacent rows of the old grid.
pub fn run_from(
    mut grid: GridBlock,
    nthreads: usize,
    nsteps: usize,
    p: f64,
    f: f64,
    seed: u64,
) -> Result<(GridBlock, BurnSeries), ConfigError> {
    let nx = grid.rows();
    let ny = grid.ny();
    let partitions: Vec<Partition> = (0..nthreads)
        .map(|tid| plan(nx, nthreads, tid))
        .collect::<Result<_, _>>()?;

    // One RNG stream per thread, carried across steps.
    let mut rngs: Vec<_> = (0..nthreads).map(|tid| worker_rng(seed, tid)).collect();

    let mut scratch = vec![Cell::Empty; nx * ny];
    let mut series = BurnSeries::with_capacity(nsteps);

    for _ in 0..nsteps {
        std::thread::scope(|scope| {
            let grid = &grid;
            let mut rest: &mut [Cell] = &mut scratch;
            for (&part, rng) in partitions.iter().zip(rngs.iter_mut()) {
                let (out, tail) = rest.split_at_mut(part.rows() * ny);
                rest = tail;
                scope.spawn(move || {
                    let block = grid.rows_view(part.i0, part.i1);
                    let top_ghost = (part.i0 > 0).then(|| grid.row(part.i0 - 1));
                    let bottom_ghost = (part.i1 < nx).then(|| grid.row(part.i1));
                    let updated = update_block(block, top_ghost, bottom_ghost, p, f, rng);
                    out.copy_from_slice(&updated);
                });
            }
        });

        // The scope join above is the step barrier; only this thread touches
        // the arenas between steps.
        grid.swap_cells(&mut scratch);
        series.record(grid.count(Cell::Burning));
    }

    Ok((grid, series))
}

/// Full threaded run: seed, simulate, time, summarize.
pub fn run(params: &SimParams, nthreads: usize, seed: u64) -> Result<RunSummary, ConfigError> {
    params.validate()?;
    let mut rng = worker_rng(seed, 0);
    let grid = GridBlock::random(params.nx, params.ny, params.d0, &mut rng);

    let started = Instant::now();
    let (_, series) = run_from(grid, nthreads, params.nsteps, params.p, params.f, seed)?;
    let total_secs = started.elapsed().as_secs_f64();

    info!(
        nx = params.nx,
        ny = params.ny,
        nsteps = params.nsteps,
        nthreads,
        total_secs,
        avg_burning = series.mean(),
        "threaded run complete"
    );
    Ok(RunSummary {
        mode: "threads",
        nx: params.nx,
        ny: params.ny,
        nsteps: params.nsteps,
        nthreads,
        p: params.p,
        f: params.f,
        total_secs,
        avg_burning: series.mean(),
    })
}

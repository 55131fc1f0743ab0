//! firegrid command-line interface.
//!
//! One subcommand per execution strategy, plus a local launcher:
//!
//! ```bash
//! # Sequential reference run
//! firegrid seq --nx 512 --ny 512 --nsteps 500
//!
//! # Shared-memory threaded run
//! firegrid threads --nthreads 4 --nx 512 --ny 512 --nsteps 300
//!
//! # One distributed worker (usually started by `launch`)
//! firegrid worker --rank 0 --num-workers 4 --base-port 9000 --nx 256 --ny 256
//!
//! # Spawn all distributed workers locally and wait for them
//! firegrid launch --num-workers 4 --base-port 9000 --nx 256 --ny 256
//! ```
//!
//! Workers persist one `result_worker_{rank}.json` each; the reference
//! variants print their summary to stdout (or `--out`).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use firegrid_network_tcp::NeighborConfig;
use firegrid_types::SimParams;
use firegrid_worker::{run_worker, ReportSink, WorkerConfig, WorkerReport};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "firegrid", version, about = "Forest-fire cellular automaton runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

/// Grid and dynamics parameters, shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct GridArgs {
    /// Grid height (total rows)
    #[arg(long, default_value = "512")]
    nx: usize,

    /// Grid width (columns)
    #[arg(long, default_value = "512")]
    ny: usize,

    /// Number of simulation steps
    #[arg(long, default_value = "500")]
    nsteps: usize,

    /// Tree growth probability per empty cell per step
    #[arg(long, default_value = "0.01")]
    p: f64,

    /// Spontaneous ignition probability per tree per step
    #[arg(long, default_value = "0.0001")]
    f: f64,

    /// Initial tree density
    #[arg(long, default_value = "0.6")]
    d0: f64,

    /// Run seed for reproducible results
    #[arg(long, default_value = "42")]
    seed: u64,
}

impl GridArgs {
    fn params(&self) -> SimParams {
        SimParams {
            nx: self.nx,
            ny: self.ny,
            nsteps: self.nsteps,
            p: self.p,
            f: self.f,
            d0: self.d0,
        }
    }
}

/// Distributed-run addressing, shared by `worker` and `launch`.
#[derive(Args, Debug, Clone)]
struct NetArgs {
    /// Total number of worker processes
    #[arg(long, default_value = "4")]
    num_workers: usize,

    /// Rank r listens on base_port + r
    #[arg(long, default_value = "9000")]
    base_port: u16,

    /// Interface workers bind and dial on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Run the single-process sequential reference variant
    Seq {
        #[command(flatten)]
        grid: GridArgs,

        /// Write the run summary as JSON to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run the shared-memory threaded reference variant
    Threads {
        #[command(flatten)]
        grid: GridArgs,

        /// Number of worker threads
        #[arg(long, default_value = "4")]
        nthreads: usize,

        /// Write the run summary as JSON to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run one distributed worker process
    Worker {
        #[command(flatten)]
        grid: GridArgs,

        #[command(flatten)]
        net: NetArgs,

        /// This worker's rank
        #[arg(long)]
        rank: usize,

        /// Directory for result_worker_{rank}.json
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Spawn all distributed workers locally and wait for them
    Launch {
        #[command(flatten)]
        grid: GridArgs,

        #[command(flatten)]
        net: NetArgs,

        /// Directory the workers write their reports into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        CliCommand::Seq { grid, out } => {
            let summary = firegrid_reference::sequential::run(&grid.params(), grid.seed)?;
            emit_summary(&summary, out.as_deref())
        }
        CliCommand::Threads {
            grid,
            nthreads,
            out,
        } => {
            let summary =
                firegrid_reference::threaded::run(&grid.params(), nthreads, grid.seed)?;
            emit_summary(&summary, out.as_deref())
        }
        CliCommand::Worker {
            grid,
            net,
            rank,
            out_dir,
        } => worker(grid, net, rank, out_dir),
        CliCommand::Launch { grid, net, out_dir } => launch(grid, net, out_dir),
    }
}

fn emit_summary(summary: &firegrid_reference::RunSummary, out: Option<&std::path::Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    match out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn worker(grid: GridArgs, net: NetArgs, rank: usize, out_dir: PathBuf) -> Result<()> {
    let config = WorkerConfig {
        rank,
        num_workers: net.num_workers,
        params: grid.params(),
        seed: grid.seed,
        neighbors: NeighborConfig {
            host: net.host,
            base_port: net.base_port,
            ..NeighborConfig::default()
        },
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let report = runtime.block_on(run_worker(&config))?;

    JsonDirSink { dir: out_dir.clone() }
        .record(&report)
        .with_context(|| format!("writing worker report into {}", out_dir.display()))?;
    Ok(())
}

/// Writes one `result_worker_{rank}.json` per report.
struct JsonDirSink {
    dir: PathBuf,
}

impl ReportSink for JsonDirSink {
    fn record(&mut self, report: &WorkerReport) -> io::Result<()> {
        let path = self.dir.join(format!("result_worker_{}.json", report.rank));
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()
    }
}

fn launch(grid: GridArgs, net: NetArgs, out_dir: PathBuf) -> Result<()> {
    if net.num_workers == 0 {
        bail!("--num-workers must be positive");
    }
    let exe = std::env::current_exe().context("cannot locate own executable")?;

    let mut children = Vec::with_capacity(net.num_workers);
    for rank in 0..net.num_workers {
        let child = Command::new(&exe)
            .arg("worker")
            .args(["--rank", &rank.to_string()])
            .args(["--num-workers", &net.num_workers.to_string()])
            .args(["--base-port", &net.base_port.to_string()])
            .args(["--host", &net.host])
            .args(["--nx", &grid.nx.to_string()])
            .args(["--ny", &grid.ny.to_string()])
            .args(["--nsteps", &grid.nsteps.to_string()])
            .args(["--p", &grid.p.to_string()])
            .args(["--f", &grid.f.to_string()])
            .args(["--d0", &grid.d0.to_string()])
            .args(["--seed", &grid.seed.to_string()])
            .arg("--out-dir")
            .arg(&out_dir)
            .spawn()
            .with_context(|| format!("failed to spawn worker {rank}"))?;
        info!(rank, pid = child.id(), "spawned worker");
        children.push((rank, child));

        // Brief stagger so the listeners come up in rank order.
        std::thread::sleep(Duration::from_millis(50));
    }

    let mut failed = 0;
    for (rank, mut child) in children {
        let status = child
            .wait()
            .with_context(|| format!("waiting for worker {rank}"))?;
        if status.success() {
            info!(rank, "worker finished");
        } else {
            warn!(rank, %status, "worker failed");
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{failed} worker(s) exited with failure");
    }
    info!(
        num_workers = net.num_workers,
        out_dir = %out_dir.display(),
        "all workers finished"
    );
    Ok(())
}

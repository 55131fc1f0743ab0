//! Core types for the firegrid forest-fire simulation.
//!
//! This crate provides the foundation layer shared by every execution
//! strategy:
//!
//! - **Cell states**: [`Cell`] and its wire code
//! - **Grids**: [`GridBlock`] (owned) and [`BlockView`] (borrowed)
//! - **Partitioning**: [`plan`] and [`Partition`] for the 1-D row split
//! - **Topology**: the linear worker chain
//! - **Configuration**: [`SimParams`] with startup validation
//!
//! It depends on no other workspace crate.

mod cell;
mod config;
mod grid;
mod partition;
mod topology;

pub use cell::{Cell, InvalidCellCode};
pub use config::{ConfigError, SimParams};
pub use grid::{BlockView, GridBlock};
pub use partition::{plan, Partition};
pub use topology::Topology;

//! Simulation parameters and startup validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation parameters shared by all three execution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Total grid height in rows (the partitioned dimension).
    pub nx: usize,
    /// Grid width in columns (also the ghost-row length).
    pub ny: usize,
    /// Number of simulation steps, identical across all workers.
    pub nsteps: usize,
    /// Probability an `Empty` cell grows a `Tree` per step.
    pub p: f64,
    /// Probability a `Tree` spontaneously ignites per step.
    pub f: f64,
    /// Initial tree density.
    pub d0: f64,
}

impl SimParams {
    /// Reject malformed parameters at startup.
    ///
    /// Probabilities are checked here once, never per cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nx == 0 || self.ny == 0 {
            return Err(ConfigError::EmptyGrid {
                nx: self.nx,
                ny: self.ny,
            });
        }
        for (name, value) in [("p", self.p), ("f", self.f), ("d0", self.d0)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Malformed startup configuration. Fatal, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("num_workers must be positive")]
    NoWorkers,

    #[error("rank {rank} out of range for {num_workers} workers")]
    RankOutOfRange { rank: usize, num_workers: usize },

    #[error("grid height {nx} is smaller than the {num_workers} workers to split it over")]
    GridTooShort { nx: usize, num_workers: usize },

    #[error("grid must be non-empty, got {nx}x{ny}")]
    EmptyGrid { nx: usize, ny: usize },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SimParams {
        SimParams {
            nx: 64,
            ny: 64,
            nsteps: 10,
            p: 0.01,
            f: 0.0001,
            d0: 0.6,
        }
    }

    #[test]
    fn test_valid_params_accepted() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let params = SimParams { nx: 0, ..valid() };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_probabilities_bounds_checked() {
        for (p, f, d0) in [(1.5, 0.0, 0.5), (0.0, -0.1, 0.5), (0.0, 0.0, 2.0)] {
            let params = SimParams { p, f, d0, ..valid() };
            assert!(matches!(
                params.validate(),
                Err(ConfigError::ProbabilityOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_nan_probability_rejected() {
        let params = SimParams {
            p: f64::NAN,
            ..valid()
        };
        assert!(params.validate().is_err());
    }
}

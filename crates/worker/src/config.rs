//! Consolidated configuration for one worker process.

use firegrid_network_tcp::NeighborConfig;
use firegrid_types::{ConfigError, SimParams};

/// Everything one distributed worker needs, supplied by the launcher.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// This worker's rank in the chain.
    pub rank: usize,
    /// Total worker count; `nsteps` and grid dimensions must match across
    /// all of them (a mismatch is a launcher usage error, not detected here).
    pub num_workers: usize,
    /// Simulation parameters, identical across workers.
    pub params: SimParams,
    /// Run seed; each rank derives its own RNG stream from it.
    pub seed: u64,
    /// Neighbor addressing and retry policy.
    pub neighbors: NeighborConfig,
}

impl WorkerConfig {
    /// Reject malformed configuration before any I/O happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        firegrid_types::plan(self.params.nx, self.num_workers, self.rank)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> WorkerConfig {
        WorkerConfig {
            rank: 0,
            num_workers: 2,
            params: SimParams {
                nx: 16,
                ny: 16,
                nsteps: 4,
                p: 0.01,
                f: 0.001,
                d0: 0.5,
            },
            seed: 1,
            neighbors: NeighborConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_accepted() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_bad_partition_rejected() {
        let config = WorkerConfig {
            num_workers: 32,
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooShort { .. })
        ));
    }

    #[test]
    fn test_bad_probability_rejected() {
        let mut config = base();
        config.params.f = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));
    }
}

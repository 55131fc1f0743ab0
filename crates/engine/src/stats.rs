//! Per-step burn statistics.

use serde::Serialize;

/// Burning-cell counts recorded after each step.
///
/// The reference variants expose these to the reporting collaborator; the
/// mean is what the original study compared across strategies.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BurnSeries {
    counts: Vec<usize>,
}

impl BurnSeries {
    pub fn with_capacity(nsteps: usize) -> Self {
        Self {
            counts: Vec::with_capacity(nsteps),
        }
    }

    pub fn record(&mut self, burning: usize) {
        self.counts.push(burning);
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Mean burning count across recorded steps; 0.0 when nothing recorded.
    pub fn mean(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        self.counts.iter().sum::<usize>() as f64 / self.counts.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_series_is_zero() {
        assert_eq!(BurnSeries::default().mean(), 0.0);
    }

    #[test]
    fn test_mean_and_counts() {
        let mut series = BurnSeries::with_capacity(3);
        series.record(2);
        series.record(4);
        series.record(6);
        assert_eq!(series.counts(), &[2, 4, 6]);
        assert_eq!(series.mean(), 4.0);
        assert_eq!(series.len(), 3);
    }
}

//! Peaks over threshold
//!
//! One of the two fundamental sampling approaches in extreme value theory:
//! keep the observations strictly above a fixed threshold. The tail values
//! feed the order-statistic estimators; the excesses (value minus
//! threshold) feed the generalized Pareto fit.

use crate::Dataset;
use evt_core::{Error, Result};

/// Observations of a dataset exceeding a fixed threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PeaksOverThreshold {
    threshold: f64,
    tail: Vec<f64>,
}

impl PeaksOverThreshold {
    /// Select the peaks of `dataset` above `threshold`.
    ///
    /// The threshold must be non-negative (shift the data if necessary) and
    /// at least one observation must exceed it.
    pub fn new(dataset: &Dataset, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidInput(
                "The threshold must be non-negative. Consider shifting the data".to_string(),
            ));
        }

        let tail: Vec<f64> = dataset
            .values()
            .iter()
            .copied()
            .filter(|&x| x > threshold)
            .collect();
        if tail.is_empty() {
            return Err(Error::InvalidInput(format!(
                "No observations exceed the threshold {threshold}"
            )));
        }

        Ok(Self { threshold, tail })
    }

    /// The threshold the peaks were selected against.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The observations above the threshold, in their original order.
    pub fn tail(&self) -> &[f64] {
        &self.tail
    }

    /// Number of peaks.
    pub fn len(&self) -> usize {
        self.tail.len()
    }

    /// Always false: construction requires at least one peak.
    pub fn is_empty(&self) -> bool {
        self.tail.is_empty()
    }

    /// Excesses over the threshold, `x - threshold` for each peak.
    ///
    /// All values are strictly positive; this is the sequence the
    /// generalized Pareto maximum likelihood fit consumes.
    pub fn excesses(&self) -> Vec<f64> {
        self.tail.iter().map(|x| x - self.threshold).collect()
    }
}

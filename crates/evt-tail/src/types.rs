//! Value objects produced by the tail index estimators

use evt_core::AsymptoticallyNormal;
use std::fmt;

/// A tail index estimate from the top k order statistics of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailIndexEstimate {
    /// Estimated tail index
    pub tail_index: f64,
    /// Asymptotic variance of the estimate
    pub variance: f64,
    /// Number of top order statistics used (k)
    pub order_statistics: usize,
    /// Size of the underlying sample (n)
    pub sample_size: usize,
}

impl AsymptoticallyNormal for TailIndexEstimate {
    fn point(&self) -> f64 {
        self.tail_index
    }

    fn variance(&self) -> f64 {
        self.variance
    }
}

impl fmt::Display for TailIndexEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tail index {:.4} (k = {}, n = {})",
            self.tail_index, self.order_statistics, self.sample_size
        )
    }
}

/// An estimator's output for every admissible order statistic count.
///
/// One [`TailIndexEstimate`] per k in `2..=n-1`, in increasing k order.
/// Stability plots read the curve to pick a k inside the bias-variance
/// trade-off region; each point carries its own variance so the plot can
/// band the curve with confidence bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateCurve {
    points: Vec<TailIndexEstimate>,
}

impl EstimateCurve {
    pub(crate) fn new(points: Vec<TailIndexEstimate>) -> Self {
        Self { points }
    }

    /// The per-k estimates, ordered by increasing k.
    pub fn points(&self) -> &[TailIndexEstimate] {
        &self.points
    }

    /// Number of points on the curve (`n - 2` for a sample of size n).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the curve holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The estimate computed with `k` order statistics, if on the curve.
    pub fn at(&self, k: usize) -> Option<&TailIndexEstimate> {
        k.checked_sub(2).and_then(|i| self.points.get(i))
    }

    /// Iterate over `(k, tail_index)` pairs, the stability plot's axes.
    pub fn tail_indices(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.points
            .iter()
            .map(|p| (p.order_statistics, p.tail_index))
    }
}

//! Core trait for order-statistic tail index estimators

use crate::{EstimateCurve, TailIndexEstimate};
use evt_core::{Error, OrderStatistics, Result};

/// Smallest admissible number of top order statistics.
pub const MIN_ORDER_STATISTICS: usize = 2;

/// A tail index estimator driven by the top k order statistics.
///
/// Implementors share the same contract: `estimate` consumes a borrowed,
/// pre-sorted [`OrderStatistics`] sequence (derived once per sample, so
/// repeated calls across k never re-sort) and returns a point estimate
/// with its asymptotic variance. The estimators form a closed set; the
/// confidence-interval crate operates on their output through
/// `evt_core::AsymptoticallyNormal` without knowing which kind produced it.
pub trait TailIndexEstimator {
    /// Estimate the tail index from the top `k` order statistics,
    /// `2 <= k <= n - 1`.
    fn estimate(&self, order: &OrderStatistics, k: usize) -> Result<TailIndexEstimate>;

    /// Asymptotic variance of the estimate at the given tail index and k.
    fn asymptotic_variance(&self, tail_index: f64, k: usize) -> Result<f64>;

    /// Estimate for every admissible k, enabling stability plots.
    ///
    /// Any invalid k fails the whole curve; silently missing points would
    /// corrupt stability-plot interpretation. Each point is computed
    /// independently, so the `parallel` feature may evaluate them
    /// concurrently without changing the result.
    fn estimate_curve(&self, order: &OrderStatistics) -> Result<EstimateCurve>
    where
        Self: Sync,
    {
        let n = order.len();
        if n < 3 {
            return Err(Error::InsufficientData {
                expected: 3,
                actual: n,
            });
        }

        #[cfg(feature = "parallel")]
        let points = {
            use rayon::prelude::*;
            (MIN_ORDER_STATISTICS..n)
                .into_par_iter()
                .map(|k| self.estimate(order, k))
                .collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let points = (MIN_ORDER_STATISTICS..n)
            .map(|k| self.estimate(order, k))
            .collect::<Result<Vec<_>>>()?;

        Ok(EstimateCurve::new(points))
    }
}

/// Shared admissibility checks for `estimate(order, k)`.
pub(crate) fn validate_order_statistics(order: &OrderStatistics, k: usize) -> Result<()> {
    let n = order.len();
    if n < 3 {
        return Err(Error::InsufficientData {
            expected: 3,
            actual: n,
        });
    }
    if k < MIN_ORDER_STATISTICS || k > n - 1 {
        return Err(Error::invalid_order_statistics(k, n));
    }
    Ok(())
}

/// The Hill and moment estimators take logarithms of the order statistics,
/// so every sample value must be strictly positive.
pub(crate) fn validate_positive(order: &OrderStatistics) -> Result<()> {
    if order.smallest() <= 0.0 {
        return Err(Error::non_positive("sample values"));
    }
    Ok(())
}

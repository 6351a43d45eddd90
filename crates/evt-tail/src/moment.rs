//! Moment (Dekkers-Einmahl-de Haan) estimator
//!
//! Generalizes the Hill estimator to tail indices of any sign. Two moments
//! of the log-excesses over the (k+1)-th order statistic are combined as
//!
//! ```text
//! M1 = (1/k) * sum ln(X_(i) / X_(k+1))
//! M2 = (1/k) * sum ln(X_(i) / X_(k+1))^2
//! xi = M1 + 1 - 1 / (2 * (1 - M1^2 / M2))
//! ```
//!
//! M1 is the Hill estimate itself. Confidence intervals use the asymptotic
//! variances derived in the 1989 paper, which differ between the xi >= 0
//! and xi < 0 regimes; bias is not taken into account.
//!
//! Dekkers, Arnold L. M., John H. J. Einmahl, and Laurens de Haan.
//! "A moment estimator for the index of an extreme-value distribution."
//! The Annals of Statistics (1989): 1833-1855.

use crate::traits::{validate_order_statistics, validate_positive, TailIndexEstimator};
use crate::TailIndexEstimate;
use evt_core::{Error, OrderStatistics, Result};

/// Moment (Dekkers-Einmahl-de Haan) tail index estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Moment;

impl Moment {
    pub fn new() -> Self {
        Self
    }

    /// First and second empirical moments of the log-excesses over
    /// `X_(k+1)`. The first moment is exactly the Hill estimate for the
    /// same k on the same sample.
    pub fn log_moments(&self, order: &OrderStatistics, k: usize) -> Result<(f64, f64)> {
        validate_order_statistics(order, k)?;
        validate_positive(order)?;

        let values = order.values();
        let log_of_kth = values[k].ln();
        let mut m1 = 0.0;
        let mut m2 = 0.0;
        for x in &values[..k] {
            let log_excess = x.ln() - log_of_kth;
            m1 += log_excess;
            m2 += log_excess * log_excess;
        }
        Ok((m1 / k as f64, m2 / k as f64))
    }
}

impl TailIndexEstimator for Moment {
    fn estimate(&self, order: &OrderStatistics, k: usize) -> Result<TailIndexEstimate> {
        let (m1, m2) = self.log_moments(order, k)?;

        if m2 == 0.0 {
            return Err(Error::InvalidInput(
                "degenerate sample: the top k order statistics all equal X_(k+1)".to_string(),
            ));
        }
        let denominator = 1.0 - m1 * m1 / m2;
        if denominator == 0.0 {
            return Err(Error::InvalidInput(
                "degenerate sample: the log-excesses over X_(k+1) are all equal".to_string(),
            ));
        }

        let tail_index = m1 + 1.0 - 0.5 / denominator;

        Ok(TailIndexEstimate {
            tail_index,
            variance: self.asymptotic_variance(tail_index, k)?,
            order_statistics: k,
            sample_size: order.len(),
        })
    }

    /// Asymptotic variance from the Dekkers-Einmahl-de Haan derivation,
    /// per sign regime:
    ///
    /// * xi >= 0: `(1 + xi^2) / k`
    /// * xi < 0:  `(1-xi)^2 (1-2xi) (1-xi+6xi^2) / ((1-3xi)(1-4xi) k)`
    fn asymptotic_variance(&self, tail_index: f64, k: usize) -> Result<f64> {
        if k == 0 {
            return Err(Error::InvalidInput(
                "number of order statistics cannot be 0".to_string(),
            ));
        }

        let xi = tail_index;
        let variance = if xi >= 0.0 {
            1.0 + xi * xi
        } else {
            ((1.0 - xi).powi(2) * (1.0 - 2.0 * xi) * (1.0 - xi + 6.0 * xi * xi))
                / ((1.0 - 3.0 * xi) * (1.0 - 4.0 * xi))
        };
        Ok(variance / k as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hill;
    use approx::assert_relative_eq;

    fn exponential_order() -> OrderStatistics {
        let sample: Vec<f64> = (0..5).map(|e| (e as f64).exp()).collect();
        OrderStatistics::from_sample(&sample).unwrap()
    }

    #[test]
    fn test_negative_regime_estimate() {
        let estimate = Moment.estimate(&exponential_order(), 3).unwrap();
        // M1 = 2, M2 = 14/3: 2 + 1 - 0.5/(1 - 4/(14/3)) = -0.5
        assert_relative_eq!(estimate.tail_index, -0.5, epsilon = 1e-12);
        // (1.5^2 * 2 * 3) / (2.5 * 3) = 1.8, scaled by 1/k
        assert_relative_eq!(estimate.variance, 1.8 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_positive_regime_estimate() {
        let estimate = Moment.estimate(&exponential_order(), 4).unwrap();
        // M1 = 2.5, M2 = 7.5: 2.5 + 1 - 0.5/(1 - 6.25/7.5) = 0.5
        assert_relative_eq!(estimate.tail_index, 0.5, epsilon = 1e-12);
        assert_relative_eq!(estimate.variance, 1.25 / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_moment_is_hill() {
        let order = OrderStatistics::from_sample(&[3.0, 9.0, 1.0, 27.0, 5.0, 2.0, 81.0]).unwrap();
        for k in 2..=6 {
            let (m1, _) = Moment.log_moments(&order, k).unwrap();
            let hill = Hill.estimate(&order, k).unwrap();
            assert_relative_eq!(m1, hill.tail_index, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_sample_fails() {
        // top k equal to X_(k+1): every log-excess is zero, M2 = 0
        let order = OrderStatistics::from_sample(&[2.0, 2.0, 2.0, 2.0, 1.0]).unwrap();
        assert!(Moment.estimate(&order, 3).is_err());
    }

    #[test]
    fn test_equal_log_excesses_fail() {
        // top k strictly above X_(k+1) but all equal: M1^2 = M2
        let order = OrderStatistics::from_sample(&[4.0, 4.0, 4.0, 2.0, 1.0]).unwrap();
        assert!(Moment.estimate(&order, 3).is_err());
    }

    #[test]
    fn test_order_statistic_bounds() {
        assert!(Moment.estimate(&exponential_order(), 0).is_err());
        assert!(Moment.estimate(&exponential_order(), 5).is_err());
    }

    #[test]
    fn test_estimate_curve_matches_pointwise() {
        let order = exponential_order();
        let curve = Moment.estimate_curve(&order).unwrap();
        assert_eq!(curve.len(), 3);

        for k in 2..=4 {
            let point = curve.at(k).unwrap();
            let direct = Moment.estimate(&order, k).unwrap();
            assert_relative_eq!(point.tail_index, direct.tail_index);
        }
    }

    #[test]
    fn test_idempotent() {
        let order = exponential_order();
        assert_eq!(
            Moment.estimate(&order, 4).unwrap(),
            Moment.estimate(&order, 4).unwrap()
        );
    }
}

//! Hill estimator
//!
//! Classical estimator for the tail index of a heavy (Pareto-type) right
//! tail, computed from the top k order statistics:
//!
//! ```text
//! xi = (1/k) * sum_{i=1..k} ln X_(i)  -  ln X_(k+1)
//! ```
//!
//! Only applicable for xi > 0 and strictly positive data. Confidence
//! intervals follow from the asymptotic normality of the estimate with
//! variance xi^2 / k; bias is not taken into account.
//!
//! Hill, Bruce M. "A simple general approach to inference about the tail
//! of a distribution." The Annals of Statistics (1975): 1163-1174.

use crate::traits::{validate_order_statistics, validate_positive, TailIndexEstimator};
use crate::TailIndexEstimate;
use evt_core::{Error, OrderStatistics, Result};

/// Hill tail index estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hill;

impl Hill {
    pub fn new() -> Self {
        Self
    }
}

impl TailIndexEstimator for Hill {
    fn estimate(&self, order: &OrderStatistics, k: usize) -> Result<TailIndexEstimate> {
        validate_order_statistics(order, k)?;
        validate_positive(order)?;

        let values = order.values();
        let log_of_kth = values[k].ln();
        let sum: f64 = values[..k].iter().map(|x| x.ln() - log_of_kth).sum();
        let tail_index = sum / k as f64;

        Ok(TailIndexEstimate {
            tail_index,
            variance: self.asymptotic_variance(tail_index, k)?,
            order_statistics: k,
            sample_size: order.len(),
        })
    }

    /// Standard Hill asymptotic normal approximation: `xi^2 / k`.
    fn asymptotic_variance(&self, tail_index: f64, k: usize) -> Result<f64> {
        if k == 0 {
            return Err(Error::InvalidInput(
                "number of order statistics cannot be 0".to_string(),
            ));
        }
        Ok(tail_index * tail_index / k as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// e^0 .. e^4: a log-spaced series whose Hill sums are exact integers.
    fn exponential_order() -> OrderStatistics {
        let sample: Vec<f64> = (0..5).map(|e| (e as f64).exp()).collect();
        OrderStatistics::from_sample(&sample).unwrap()
    }

    #[test]
    fn test_exponential_series_estimate() {
        let estimate = Hill.estimate(&exponential_order(), 3).unwrap();
        // (1/3)(4 + 3 + 2) - 1 = 2
        assert_relative_eq!(estimate.tail_index, 2.0, epsilon = 1e-12);
        assert_relative_eq!(estimate.variance, 4.0 / 3.0, epsilon = 1e-12);
        assert_eq!(estimate.order_statistics, 3);
        assert_eq!(estimate.sample_size, 5);
    }

    #[test]
    fn test_hand_computed_value() {
        let order =
            OrderStatistics::from_sample(&[1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0]).unwrap();
        let estimate = Hill.estimate(&order, 3).unwrap();
        let expected = (34.0f64.ln() + 21.0f64.ln() + 13.0f64.ln()) / 3.0 - 8.0f64.ln();
        assert_relative_eq!(estimate.tail_index, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_order_statistics() {
        assert!(Hill.estimate(&exponential_order(), 0).is_err());
        assert!(Hill.estimate(&exponential_order(), 1).is_err());
    }

    #[test]
    fn test_too_many_order_statistics() {
        // 5 datapoints: k = 5 would need the 6th order statistic
        assert!(Hill.estimate(&exponential_order(), 5).is_err());
        assert!(Hill.estimate(&exponential_order(), 6).is_err());
    }

    #[test]
    fn test_non_positive_sample_fails() {
        let order = OrderStatistics::from_sample(&[-1.0, 1.0, 2.0, 3.0]).unwrap();
        assert!(Hill.estimate(&order, 2).is_err());

        let order = OrderStatistics::from_sample(&[0.0, 1.0, 2.0, 3.0]).unwrap();
        assert!(Hill.estimate(&order, 2).is_err());
    }

    #[test]
    fn test_estimate_curve_matches_pointwise() {
        let order = exponential_order();
        let curve = Hill.estimate_curve(&order).unwrap();
        assert_eq!(curve.len(), 3); // k = 2, 3, 4

        for k in 2..=4 {
            let point = curve.at(k).unwrap();
            let direct = Hill.estimate(&order, k).unwrap();
            assert_relative_eq!(point.tail_index, direct.tail_index);
            assert_relative_eq!(point.variance, direct.variance);
        }
    }

    #[test]
    fn test_idempotent() {
        let order = exponential_order();
        let first = Hill.estimate(&order, 3).unwrap();
        let second = Hill.estimate(&order, 3).unwrap();
        assert_eq!(first, second);
    }
}

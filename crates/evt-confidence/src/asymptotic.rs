//! Asymptotic confidence intervals based on the normal approximation
//!
//! Every estimator in the workspace is asymptotically normal; its interval
//! at level `c` is `point +- z sqrt(variance)` where `z` is the two-sided
//! standard normal quantile `Phi^-1(1/2 + c/2)`.

use crate::ConfidenceInterval;
use evt_core::{AsymptoticallyNormal, Error, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Number of standard deviations covering a two-sided confidence level.
pub fn confidence_level_to_std(confidence_level: f64) -> Result<f64> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(Error::invalid_confidence_level(confidence_level));
    }
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| Error::InvalidInput(format!("Failed to create normal distribution: {e}")))?;
    Ok(normal.inverse_cdf(0.5 + confidence_level / 2.0))
}

/// Normal-approximation confidence interval estimator.
#[derive(Debug, Clone, Copy)]
pub struct AsymptoticCI {
    confidence_level: f64,
    std_factor: f64,
}

impl AsymptoticCI {
    /// Create an interval estimator at the given confidence level.
    ///
    /// Fails when the level is outside (0, 1).
    pub fn new(confidence_level: f64) -> Result<Self> {
        Ok(Self {
            confidence_level,
            std_factor: confidence_level_to_std(confidence_level)?,
        })
    }

    /// The configured confidence level.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Interval around a point estimate with the given asymptotic variance.
    ///
    /// Fails when the variance is not positive: the normal approximation is
    /// undefined there and silently returning a degenerate interval would
    /// misrepresent the estimator's uncertainty.
    pub fn interval(&self, point: f64, variance: f64) -> Result<ConfidenceInterval> {
        if !point.is_finite() {
            return Err(Error::non_finite("point estimate"));
        }
        if !(variance > 0.0) || !variance.is_finite() {
            return Err(Error::InvalidInput(format!(
                "asymptotic variance {variance} must be strictly positive and finite"
            )));
        }

        let margin = self.std_factor * variance.sqrt();
        Ok(ConfidenceInterval::new(
            point - margin,
            point + margin,
            point,
            self.confidence_level,
        ))
    }

    /// Interval for any estimate exposing its asymptotic variance.
    pub fn interval_for<E: AsymptoticallyNormal>(&self, estimate: &E) -> Result<ConfidenceInterval> {
        self.interval(estimate.point(), estimate.variance())
    }
}

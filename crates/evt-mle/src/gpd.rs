//! Generalized Pareto maximum likelihood
//!
//! Fits a GPD to excesses over a threshold by maximizing
//!
//! ```text
//! l(xi, sigma) = -n ln(sigma) - (1 + 1/xi) * sum ln(1 + xi * x_i / sigma)
//! ```
//!
//! with the exponential log-likelihood as the xi -> 0 limit. The
//! optimization runs unconstrained over (ln sigma, xi), so sigma > 0 is
//! structural, and support violations `1 + xi x / sigma <= 0` are penalized
//! with an infinite objective the minimizer cannot cross.
//!
//! The maximum likelihood estimator behaves irregularly for xi <= -1/2;
//! requesting the asymptotic covariance there fails.

use crate::optimizer::{Minimizer, NelderMead, OptimizerConfig};
use crate::XI_TOLERANCE;
use evt_core::{Error, ParameterEstimate, Result};
use nalgebra::{Matrix2, Vector2};
use tracing::{debug, instrument};

/// GPD log-likelihood of a set of excesses at the given parameters.
///
/// Returns `f64::NEG_INFINITY` outside the support or for a non-positive
/// scale.
pub fn gpd_log_likelihood(excesses: &[f64], tail_index: f64, scale: f64) -> f64 {
    -gpd_negative_log_likelihood(excesses, tail_index, scale)
}

pub(crate) fn gpd_negative_log_likelihood(excesses: &[f64], xi: f64, sigma: f64) -> f64 {
    if !(sigma > 0.0) || !sigma.is_finite() {
        return f64::INFINITY;
    }

    let n = excesses.len() as f64;
    let mut nll = n * sigma.ln();
    if xi.abs() < XI_TOLERANCE {
        // exponential limit
        nll += excesses.iter().sum::<f64>() / sigma;
    } else {
        let inv_xi = 1.0 / xi;
        for &x in excesses {
            let t = 1.0 + xi * x / sigma;
            if t <= 0.0 {
                return f64::INFINITY;
            }
            nll += (1.0 + inv_xi) * t.ln();
        }
    }
    nll
}

/// Maximum likelihood estimator for the generalized Pareto distribution.
#[derive(Debug, Clone, Default)]
pub struct GpdMle {
    config: OptimizerConfig,
}

impl GpdMle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom optimizer configuration. An `initial_guess`, when set,
    /// is interpreted as `(tail index, scale)`.
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Fit the GPD to strictly positive excesses over a threshold.
    #[instrument(skip(self, excesses), fields(n = excesses.len()))]
    pub fn fit(&self, excesses: &[f64]) -> Result<GpdFit> {
        validate_excesses(excesses)?;
        let start = self.starting_point(excesses)?;

        let optimizer = NelderMead::with_config(OptimizerConfig {
            initial_guess: None,
            ..self.config.clone()
        });
        let minimum = optimizer.minimize(
            |params| gpd_negative_log_likelihood(excesses, params[1], params[0].exp()),
            &start,
        )?;

        if !minimum.value.is_finite() {
            return Err(Error::Convergence {
                iterations: minimum.iterations,
                reason: "support constraint could not be satisfied".to_string(),
            });
        }

        let scale = minimum.position[0].exp();
        let tail_index = minimum.position[1];
        debug!(tail_index, scale, iterations = minimum.iterations, "GPD fit converged");

        Ok(GpdFit {
            tail_index,
            scale,
            sample_size: excesses.len(),
            log_likelihood: -minimum.value,
            iterations: minimum.iterations,
        })
    }

    /// Method-of-moments starting point in `(ln sigma, xi)` coordinates:
    /// `xi0 = (1 - m^2/s^2) / 2`, `sigma0 = m (m^2/s^2 + 1) / 2`, with the
    /// exponential fit as fallback for degenerate spread.
    fn starting_point(&self, excesses: &[f64]) -> Result<[f64; 2]> {
        if let Some(guess) = &self.config.initial_guess {
            if guess.len() != 2 {
                return Err(Error::InvalidInput(
                    "initial guess for a GPD fit must be (tail index, scale)".to_string(),
                ));
            }
            let (xi, sigma) = (guess[0], guess[1]);
            if !(sigma > 0.0) || !sigma.is_finite() || !xi.is_finite() {
                return Err(Error::InvalidInput(
                    "initial guess scale must be strictly positive and finite".to_string(),
                ));
            }
            return Ok([sigma.ln(), xi]);
        }

        let n = excesses.len() as f64;
        let mean = excesses.iter().sum::<f64>() / n;
        let variance = excesses.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        if variance <= 0.0 {
            return Ok([mean.ln(), 0.1]);
        }

        let ratio = mean * mean / variance;
        let mut xi = 0.5 * (1.0 - ratio);
        let sigma = 0.5 * mean * (ratio + 1.0);
        if xi < 0.0 {
            // keep the start inside the support constraint
            let largest = excesses.iter().fold(f64::MIN, |acc, &x| acc.max(x));
            xi = xi.max(-0.95 * sigma / largest);
        }
        Ok([sigma.ln(), xi])
    }
}

fn validate_excesses(excesses: &[f64]) -> Result<()> {
    if excesses.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: excesses.len(),
        });
    }
    if excesses.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite("excesses"));
    }
    if excesses.iter().any(|&x| x <= 0.0) {
        return Err(Error::non_positive("excesses"));
    }
    Ok(())
}

/// A fitted generalized Pareto distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct GpdFit {
    /// Estimated tail index
    pub tail_index: f64,
    /// Estimated scale
    pub scale: f64,
    /// Number of excesses behind the fit
    pub sample_size: usize,
    /// Log-likelihood at the optimum
    pub log_likelihood: f64,
    /// Optimizer iterations spent
    pub iterations: usize,
}

impl GpdFit {
    /// Asymptotic covariance of `(tail index, scale)`: the inverse of the
    /// expected Fisher information at the fitted parameters,
    ///
    /// ```text
    /// (1 + xi)/n * [ 1 + xi      -sigma     ]
    ///              [ -sigma    2 sigma^2    ]
    /// ```
    ///
    /// valid for a tail index above -1/2 (de Haan & Ferreira, Smith).
    pub fn covariance(&self) -> Result<Matrix2<f64>> {
        let xi = self.tail_index;
        if xi <= -0.5 {
            return Err(Error::InvalidInput(format!(
                "asymptotic covariance is undefined for tail index {xi} <= -1/2"
            )));
        }
        let scale = self.scale;
        let factor = (1.0 + xi) / self.sample_size as f64;
        Ok(Matrix2::new(
            factor * (1.0 + xi),
            -factor * scale,
            -factor * scale,
            2.0 * factor * scale * scale,
        ))
    }

    /// The tail index with its asymptotic variance.
    pub fn tail_index_estimate(&self) -> Result<ParameterEstimate> {
        let covariance = self.covariance()?;
        Ok(ParameterEstimate::new(
            self.tail_index,
            covariance[(0, 0)],
            self.sample_size,
        ))
    }

    /// The scale with its asymptotic variance.
    pub fn scale_estimate(&self) -> Result<ParameterEstimate> {
        let covariance = self.covariance()?;
        Ok(ParameterEstimate::new(
            self.scale,
            covariance[(1, 1)],
            self.sample_size,
        ))
    }

    /// The `p`-quantile of the fitted excess distribution,
    /// `sigma/xi ((1-p)^(-xi) - 1)`.
    pub fn quantile(&self, p: f64) -> Result<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidInput(format!(
                "quantile probability {p} must be in (0, 1)"
            )));
        }
        let survival = 1.0 - p;
        let xi = self.tail_index;
        Ok(if xi.abs() < XI_TOLERANCE {
            -self.scale * survival.ln()
        } else {
            self.scale / xi * (survival.powf(-xi) - 1.0)
        })
    }

    /// Gradient of [`Self::quantile`] with respect to
    /// `(tail index, scale)`, for delta-method variances against
    /// [`Self::covariance`].
    pub fn quantile_gradient(&self, p: f64) -> Result<Vector2<f64>> {
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidInput(format!(
                "quantile probability {p} must be in (0, 1)"
            )));
        }
        let log_survival = (1.0 - p).ln();
        let xi = self.tail_index;
        let sigma = self.scale;
        Ok(if xi.abs() < XI_TOLERANCE {
            Vector2::new(sigma * log_survival * log_survival / 2.0, -log_survival)
        } else {
            let powered = (1.0 - p).powf(-xi);
            Vector2::new(
                -sigma / xi * ((powered - 1.0) / xi + powered * log_survival),
                (powered - 1.0) / xi,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// e^0 .. e^4 as excesses over threshold zero, a log-spaced series
    /// with a known maximum likelihood solution.
    fn exponential_excesses() -> Vec<f64> {
        (0..5).map(|e| (e as f64).exp()).collect()
    }

    #[test]
    fn test_fit_exponential_series() {
        let fit = GpdMle::new().fit(&exponential_excesses()).unwrap();
        assert_relative_eq!(fit.tail_index, 0.485066, epsilon = 1e-2);
        assert_relative_eq!(fit.scale, 10.164192, max_relative = 1e-2);
        assert_eq!(fit.sample_size, 5);
        assert!(fit.log_likelihood.is_finite());
    }

    #[test]
    fn test_fit_maximizes_likelihood() {
        let excesses = exponential_excesses();
        let fit = GpdMle::new().fit(&excesses).unwrap();

        let fitted = gpd_log_likelihood(&excesses, fit.tail_index, fit.scale);
        assert_relative_eq!(fitted, fit.log_likelihood, epsilon = 1e-9);

        for (xi, sigma) in [(0.1, 8.0), (0.5, 12.0), (1.0, 10.0)] {
            assert!(fitted >= gpd_log_likelihood(&excesses, xi, sigma));
        }
    }

    #[test]
    fn test_too_few_excesses() {
        assert!(matches!(
            GpdMle::new().fit(&[1.0]),
            Err(Error::InsufficientData { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_non_positive_excesses() {
        assert!(GpdMle::new().fit(&[1.0, 0.0, 2.0]).is_err());
        assert!(GpdMle::new().fit(&[1.0, -0.5, 2.0]).is_err());
    }

    #[test]
    fn test_iteration_budget_surfaces_as_convergence_error() {
        let mle = GpdMle::with_config(OptimizerConfig::new().with_max_iterations(1));
        assert!(matches!(
            mle.fit(&exponential_excesses()),
            Err(Error::Convergence { iterations: 1, .. })
        ));
    }

    #[test]
    fn test_initial_guess_override() {
        let mle = GpdMle::with_config(
            OptimizerConfig::new().with_initial_guess(vec![0.4, 9.0]),
        );
        let fit = mle.fit(&exponential_excesses()).unwrap();
        assert_relative_eq!(fit.tail_index, 0.485066, epsilon = 1e-2);
    }

    #[test]
    fn test_bad_initial_guess_rejected() {
        let mle =
            GpdMle::with_config(OptimizerConfig::new().with_initial_guess(vec![0.4, -1.0]));
        assert!(mle.fit(&exponential_excesses()).is_err());

        let mle = GpdMle::with_config(OptimizerConfig::new().with_initial_guess(vec![0.4]));
        assert!(mle.fit(&exponential_excesses()).is_err());
    }

    #[test]
    fn test_covariance_shape() {
        let fit = GpdMle::new().fit(&exponential_excesses()).unwrap();
        let covariance = fit.covariance().unwrap();
        assert!(covariance[(0, 0)] > 0.0);
        assert!(covariance[(1, 1)] > 0.0);
        // scale and tail index estimates are anti-correlated
        assert!(covariance[(0, 1)] < 0.0);
        assert_relative_eq!(covariance[(0, 1)], covariance[(1, 0)]);
    }

    #[test]
    fn test_covariance_undefined_below_minus_half() {
        let fit = GpdFit {
            tail_index: -0.6,
            scale: 1.0,
            sample_size: 100,
            log_likelihood: 0.0,
            iterations: 1,
        };
        assert!(fit.covariance().is_err());
        assert!(fit.tail_index_estimate().is_err());
    }

    #[test]
    fn test_quantile_monotonic() {
        let fit = GpdMle::new().fit(&exponential_excesses()).unwrap();
        let q50 = fit.quantile(0.5).unwrap();
        let q90 = fit.quantile(0.9).unwrap();
        let q99 = fit.quantile(0.99).unwrap();
        assert!(0.0 < q50 && q50 < q90 && q90 < q99);

        assert!(fit.quantile(0.0).is_err());
        assert!(fit.quantile(1.0).is_err());
    }

    #[test]
    fn test_exponential_limit_quantile() {
        let fit = GpdFit {
            tail_index: 0.0,
            scale: 2.0,
            sample_size: 100,
            log_likelihood: 0.0,
            iterations: 1,
        };
        let q = fit.quantile(0.5).unwrap();
        assert_relative_eq!(q, -2.0 * 0.5f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_gradient_matches_finite_differences() {
        let at = |xi: f64, sigma: f64| GpdFit {
            tail_index: xi,
            scale: sigma,
            sample_size: 100,
            log_likelihood: 0.0,
            iterations: 1,
        };
        let (xi, sigma, p, h) = (0.3, 2.0, 0.9, 1e-6);
        let gradient = at(xi, sigma).quantile_gradient(p).unwrap();

        let d_xi = (at(xi + h, sigma).quantile(p).unwrap()
            - at(xi - h, sigma).quantile(p).unwrap())
            / (2.0 * h);
        let d_sigma = (at(xi, sigma + h).quantile(p).unwrap()
            - at(xi, sigma - h).quantile(p).unwrap())
            / (2.0 * h);
        assert_relative_eq!(gradient[0], d_xi, epsilon = 1e-4);
        assert_relative_eq!(gradient[1], d_sigma, epsilon = 1e-4);
    }

    #[test]
    fn test_idempotent() {
        let excesses = exponential_excesses();
        let first = GpdMle::new().fit(&excesses).unwrap();
        let second = GpdMle::new().fit(&excesses).unwrap();
        assert_eq!(first, second);
    }
}

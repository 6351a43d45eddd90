//! Generalized extreme value maximum likelihood
//!
//! Fits a GEV to block maxima by maximizing
//!
//! ```text
//! l(xi, sigma, mu) = -n ln(sigma) - (1 + 1/xi) * sum ln(1 + xi z_i)
//!                    - sum (1 + xi z_i)^(-1/xi),    z_i = (x_i - mu)/sigma
//! ```
//!
//! with the Gumbel log-likelihood as the xi -> 0 limit. As for the GPD
//! fit, the optimization runs over (mu, ln sigma, xi) and support
//! violations are penalized with an infinite objective.
//!
//! Confidence intervals use the observed Fisher information at the
//! optimum, inverted to a covariance over (xi, sigma, mu).

use crate::fisher::observed_information;
use crate::optimizer::{Minimizer, NelderMead, OptimizerConfig};
use crate::XI_TOLERANCE;
use evt_core::{Error, ParameterEstimate, Result};
use nalgebra::{Matrix3, Vector3};
use tracing::{debug, instrument};

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// GEV log-likelihood of a set of block maxima at the given parameters.
///
/// Returns `f64::NEG_INFINITY` outside the support or for a non-positive
/// scale.
pub fn gev_log_likelihood(block_maxima: &[f64], tail_index: f64, scale: f64, location: f64) -> f64 {
    -gev_negative_log_likelihood(block_maxima, tail_index, scale, location)
}

pub(crate) fn gev_negative_log_likelihood(data: &[f64], xi: f64, sigma: f64, mu: f64) -> f64 {
    if !(sigma > 0.0) || !sigma.is_finite() {
        return f64::INFINITY;
    }

    let n = data.len() as f64;
    let mut nll = n * sigma.ln();
    if xi.abs() < XI_TOLERANCE {
        // Gumbel limit
        for &x in data {
            let z = (x - mu) / sigma;
            nll += z + (-z).exp();
        }
    } else {
        let inv_xi = 1.0 / xi;
        for &x in data {
            let t = 1.0 + xi * (x - mu) / sigma;
            if t <= 0.0 {
                return f64::INFINITY;
            }
            nll += (1.0 + inv_xi) * t.ln() + t.powf(-inv_xi);
        }
    }
    nll
}

/// Maximum likelihood estimator for the generalized extreme value
/// distribution.
#[derive(Debug, Clone, Default)]
pub struct GevMle {
    config: OptimizerConfig,
}

impl GevMle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom optimizer configuration. An `initial_guess`, when set,
    /// is interpreted as `(tail index, scale, location)`.
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Fit the GEV to a sequence of block maxima.
    #[instrument(skip(self, block_maxima), fields(n = block_maxima.len()))]
    pub fn fit(&self, block_maxima: &[f64]) -> Result<GevFit> {
        validate_maxima(block_maxima)?;
        let start = self.starting_point(block_maxima)?;

        let optimizer = NelderMead::with_config(OptimizerConfig {
            initial_guess: None,
            ..self.config.clone()
        });
        let minimum = optimizer.minimize(
            |params| {
                gev_negative_log_likelihood(block_maxima, params[2], params[1].exp(), params[0])
            },
            &start,
        )?;

        if !minimum.value.is_finite() {
            return Err(Error::Convergence {
                iterations: minimum.iterations,
                reason: "support constraint could not be satisfied".to_string(),
            });
        }

        let location = minimum.position[0];
        let scale = minimum.position[1].exp();
        let tail_index = minimum.position[2];
        debug!(
            tail_index,
            scale,
            location,
            iterations = minimum.iterations,
            "GEV fit converged"
        );

        // Observed information over the natural parameters (xi, sigma, mu);
        // a stencil crossing the support boundary or a singular Hessian
        // leaves the covariance undetermined.
        let covariance = observed_information(
            |theta: &[f64; 3]| gev_negative_log_likelihood(block_maxima, theta[0], theta[1], theta[2]),
            &[tail_index, scale, location],
        )
        .and_then(|information| information.try_inverse())
        .filter(|covariance| (0..3).all(|i| covariance[(i, i)].is_finite() && covariance[(i, i)] > 0.0));

        Ok(GevFit {
            tail_index,
            scale,
            location,
            sample_size: block_maxima.len(),
            log_likelihood: -minimum.value,
            iterations: minimum.iterations,
            covariance,
        })
    }

    /// Gumbel method-of-moments starting point in `(mu, ln sigma, xi)`
    /// coordinates: `sigma0 = s sqrt(6)/pi`, `mu0 = m - gamma sigma0`,
    /// `xi0 = 0.1`.
    fn starting_point(&self, data: &[f64]) -> Result<[f64; 3]> {
        if let Some(guess) = &self.config.initial_guess {
            if guess.len() != 3 {
                return Err(Error::InvalidInput(
                    "initial guess for a GEV fit must be (tail index, scale, location)"
                        .to_string(),
                ));
            }
            let (xi, sigma, mu) = (guess[0], guess[1], guess[2]);
            if !(sigma > 0.0) || !sigma.is_finite() || !xi.is_finite() || !mu.is_finite() {
                return Err(Error::InvalidInput(
                    "initial guess scale must be strictly positive and finite".to_string(),
                ));
            }
            return Ok([mu, sigma.ln(), xi]);
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let sigma = (variance.sqrt() * 6.0f64.sqrt() / std::f64::consts::PI).max(1e-10);
        let mu = mean - EULER_MASCHERONI * sigma;
        Ok([mu, sigma.ln(), 0.1])
    }
}

fn validate_maxima(block_maxima: &[f64]) -> Result<()> {
    if block_maxima.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: block_maxima.len(),
        });
    }
    if block_maxima.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite("block maxima"));
    }
    Ok(())
}

/// A fitted generalized extreme value distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct GevFit {
    /// Estimated tail index
    pub tail_index: f64,
    /// Estimated scale
    pub scale: f64,
    /// Estimated location
    pub location: f64,
    /// Number of block maxima behind the fit
    pub sample_size: usize,
    /// Log-likelihood at the optimum
    pub log_likelihood: f64,
    /// Optimizer iterations spent
    pub iterations: usize,
    covariance: Option<Matrix3<f64>>,
}

impl GevFit {
    /// Asymptotic covariance of `(tail index, scale, location)`: the
    /// inverse observed Fisher information at the fitted parameters.
    pub fn covariance(&self) -> Result<Matrix3<f64>> {
        self.covariance.ok_or_else(|| Error::Convergence {
            iterations: self.iterations,
            reason: "observed Fisher information is not invertible at the optimum".to_string(),
        })
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

    /// The location with its asymptotic variance.
    pub fn location_estimate(&self) -> Result<ParameterEstimate> {
        let covariance = self.covariance()?;
        Ok(ParameterEstimate::new(
            self.location,
            covariance[(2, 2)],
            self.sample_size,
        ))
    }

    /// The T-block return level: the value exceeded on average once every
    /// `return_period` blocks,
    /// `mu + sigma/xi ((-ln(1 - 1/T))^(-xi) - 1)`.
    pub fn return_level(&self, return_period: f64) -> Result<f64> {
        if !(return_period > 1.0) || !return_period.is_finite() {
            return Err(Error::InvalidInput(format!(
                "return period {return_period} must be finite and > 1"
            )));
        }
        let y = -(1.0 - 1.0 / return_period).ln();
        let xi = self.tail_index;
        Ok(if xi.abs() < XI_TOLERANCE {
            self.location - self.scale * y.ln()
        } else {
            self.location + self.scale / xi * (y.powf(-xi) - 1.0)
        })
    }

    /// Gradient of [`Self::return_level`] with respect to
    /// `(tail index, scale, location)`, for delta-method variances against
    /// [`Self::covariance`].
    pub fn return_level_gradient(&self, return_period: f64) -> Result<Vector3<f64>> {
        if !(return_period > 1.0) || !return_period.is_finite() {
            return Err(Error::InvalidInput(format!(
                "return period {return_period} must be finite and > 1"
            )));
        }
        let y = -(1.0 - 1.0 / return_period).ln();
        let log_y = y.ln();
        let xi = self.tail_index;
        let sigma = self.scale;
        Ok(if xi.abs() < XI_TOLERANCE {
            Vector3::new(sigma * log_y * log_y / 2.0, -log_y, 1.0)
        } else {
            let powered = y.powf(-xi);
            Vector3::new(
                -sigma / xi * ((powered - 1.0) / xi + powered * log_y),
                (powered - 1.0) / xi,
                1.0,
            )
        })
    }
}

//! Derivative-free numerical minimization
//!
//! The likelihood fits in this crate run behind the [`Minimizer`] trait so
//! the algorithm can be swapped without touching the estimators;
//! convergence robustness is the main operational risk of maximum
//! likelihood estimation. The provided implementation is the Nelder-Mead
//! downhill simplex, which needs no gradients and tolerates the infinite
//! penalty values the likelihood objectives use to encode support
//! constraints.

use evt_core::{Error, Result};
use tracing::debug;

/// Configuration for a numerical minimization.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Hard stop criterion: exceeding this fails with a convergence error
    /// instead of looping.
    pub max_iterations: usize,
    /// Convergence threshold, applied in scaled form to both the simplex
    /// value spread and the simplex diameter.
    pub tolerance: f64,
    /// Override for the estimator's default starting point. Likelihood
    /// fits interpret this in their natural parameter order; see the fit
    /// documentation.
    pub initial_guess: Option<Vec<f64>>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-8,
            initial_guess: None,
        }
    }
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Override the default starting point.
    pub fn with_initial_guess(mut self, guess: Vec<f64>) -> Self {
        self.initial_guess = Some(guess);
        self
    }
}

/// A located minimum of an objective function.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Position of the minimum
    pub position: Vec<f64>,
    /// Objective value at the minimum
    pub value: f64,
    /// Iterations spent
    pub iterations: usize,
}

/// A numerical minimizer of scalar objectives.
///
/// Objectives may return `f64::INFINITY` to mark a point as infeasible;
/// the minimizer never steps through such a point but fails with a
/// convergence error when nothing feasible is reachable.
pub trait Minimizer {
    fn minimize<F>(&self, objective: F, initial: &[f64]) -> Result<Minimum>
    where
        F: Fn(&[f64]) -> f64;
}

// Standard Nelder-Mead coefficients
const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

// Initial simplex perturbation per coordinate
const NONZERO_STEP: f64 = 0.05;
const ZERO_STEP: f64 = 0.00025;

/// Nelder-Mead downhill simplex minimizer.
#[derive(Debug, Clone, Default)]
pub struct NelderMead {
    config: OptimizerConfig,
}

impl NelderMead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }
}

impl Minimizer for NelderMead {
    fn minimize<F>(&self, objective: F, initial: &[f64]) -> Result<Minimum>
    where
        F: Fn(&[f64]) -> f64,
    {
        let start = match &self.config.initial_guess {
            Some(guess) if guess.len() != initial.len() => {
                return Err(Error::InvalidInput(format!(
                    "initial guess has {} coordinates, objective expects {}",
                    guess.len(),
                    initial.len()
                )));
            }
            Some(guess) => guess.clone(),
            None => initial.to_vec(),
        };
        let dim = start.len();
        if dim == 0 {
            return Err(Error::InvalidInput(
                "cannot minimize over zero parameters".to_string(),
            ));
        }

        let f_start = objective(&start);
        if !f_start.is_finite() {
            return Err(Error::Convergence {
                iterations: 0,
                reason: "objective is not finite at the starting point".to_string(),
            });
        }

        // Initial simplex: the start plus one perturbed vertex per coordinate.
        let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
        simplex.push((start.clone(), f_start));
        for i in 0..dim {
            let mut vertex = start.clone();
            if vertex[i] != 0.0 {
                vertex[i] *= 1.0 + NONZERO_STEP;
            } else {
                vertex[i] = ZERO_STEP;
            }
            let value = objective(&vertex);
            simplex.push((vertex, value));
        }

        let tolerance = self.config.tolerance;
        for iteration in 1..=self.config.max_iterations {
            simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
            let worst = dim;

            // Scaled convergence test on both the value spread and the
            // simplex diameter around the best vertex.
            let (best_point, best_value) = (&simplex[0].0, simplex[0].1);
            let value_scale = 1.0 + best_value.abs();
            let position_scale = 1.0
                + best_point
                    .iter()
                    .fold(0.0f64, |acc, x| acc.max(x.abs()));
            let value_spread = (simplex[worst].1 - best_value).abs();
            let diameter = simplex[1..]
                .iter()
                .flat_map(|(v, _)| v.iter().zip(best_point).map(|(a, b)| (a - b).abs()))
                .fold(0.0f64, f64::max);
            if best_value.is_finite()
                && value_spread <= tolerance * value_scale
                && diameter <= tolerance * position_scale
            {
                debug!(iteration, value = best_value, "minimizer converged");
                return Ok(Minimum {
                    position: simplex[0].0.clone(),
                    value: simplex[0].1,
                    iterations: iteration,
                });
            }

            // Centroid of every vertex except the worst.
            let mut centroid = vec![0.0; dim];
            for (vertex, _) in &simplex[..worst] {
                for (c, x) in centroid.iter_mut().zip(vertex) {
                    *c += x;
                }
            }
            for c in &mut centroid {
                *c /= dim as f64;
            }

            let reflected: Vec<f64> = centroid
                .iter()
                .zip(&simplex[worst].0)
                .map(|(c, w)| c + REFLECTION * (c - w))
                .collect();
            let f_reflected = objective(&reflected);

            if f_reflected < simplex[0].1 {
                let expanded: Vec<f64> = centroid
                    .iter()
                    .zip(&reflected)
                    .map(|(c, r)| c + EXPANSION * (r - c))
                    .collect();
                let f_expanded = objective(&expanded);
                simplex[worst] = if f_expanded < f_reflected {
                    (expanded, f_expanded)
                } else {
                    (reflected, f_reflected)
                };
            } else if f_reflected < simplex[worst - 1].1 {
                simplex[worst] = (reflected, f_reflected);
            } else {
                // Contract toward the better of the reflection and the
                // worst vertex; shrink the whole simplex when even that
                // fails to improve.
                let contracted: Vec<f64> = if f_reflected < simplex[worst].1 {
                    centroid
                        .iter()
                        .zip(&reflected)
                        .map(|(c, r)| c + CONTRACTION * (r - c))
                        .collect()
                } else {
                    centroid
                        .iter()
                        .zip(&simplex[worst].0)
                        .map(|(c, w)| c - CONTRACTION * (c - w))
                        .collect()
                };
                let f_contracted = objective(&contracted);

                if f_contracted < simplex[worst].1.min(f_reflected) {
                    simplex[worst] = (contracted, f_contracted);
                } else {
                    let best_point = simplex[0].0.clone();
                    for (vertex, value) in &mut simplex[1..] {
                        for (x, b) in vertex.iter_mut().zip(&best_point) {
                            *x = b + SHRINK * (*x - b);
                        }
                        *value = objective(vertex.as_slice());
                    }
                }
            }
        }

        Err(Error::Convergence {
            iterations: self.config.max_iterations,
            reason: "maximum iterations exceeded".to_string(),
        })
    }
}

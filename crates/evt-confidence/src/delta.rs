//! Delta method
//!
//! First-order Taylor propagation of a parameter covariance matrix to a
//! scalar derived quantity: `Var[g(theta)] ~= grad g' Sigma grad g`. The
//! resulting variance feeds [`crate::AsymptoticCI::interval`] like any
//! other asymptotic variance.

use evt_core::{Error, Result};
use nalgebra::{SMatrix, SVector};

/// Variance of a derived scalar quantity with gradient `gradient`, under a
/// parameter estimate with covariance `covariance`.
///
/// Fails when the quadratic form is not positive, which signals a
/// non-positive-definite covariance or a gradient of zeros; an interval
/// built from it would be meaningless.
pub fn delta_variance<const D: usize>(
    covariance: &SMatrix<f64, D, D>,
    gradient: &SVector<f64, D>,
) -> Result<f64> {
    let variance = (gradient.transpose() * covariance * gradient)[(0, 0)];
    if !(variance > 0.0) || !variance.is_finite() {
        return Err(Error::InvalidInput(format!(
            "delta-method variance {variance} must be strictly positive and finite"
        )));
    }
    Ok(variance)
}

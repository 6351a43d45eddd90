//! Observed Fisher information
//!
//! Finite-difference Hessian of a negative log-likelihood at its optimum.
//! Inverting it yields the asymptotic covariance of the maximum likelihood
//! estimate when no closed form is available.

use nalgebra::SMatrix;

// Relative step for the central differences.
const STEP_SCALE: f64 = 1e-5;

/// Observed information matrix: the Hessian of `negative_log_likelihood`
/// at `theta`, approximated by central differences with per-coordinate
/// scaled steps.
///
/// Returns `None` when any evaluation is non-finite, which happens when
/// the optimum sits too close to the support boundary for the stencil.
pub(crate) fn observed_information<const D: usize>(
    negative_log_likelihood: impl Fn(&[f64; D]) -> f64,
    theta: &[f64; D],
) -> Option<SMatrix<f64, D, D>> {
    let f = negative_log_likelihood;
    let f_center = f(theta);
    if !f_center.is_finite() {
        return None;
    }

    let mut steps = [0.0; D];
    for (step, t) in steps.iter_mut().zip(theta) {
        *step = STEP_SCALE * t.abs().max(1.0);
    }

    let mut hessian = SMatrix::<f64, D, D>::zeros();
    for i in 0..D {
        let mut up = *theta;
        up[i] += steps[i];
        let mut down = *theta;
        down[i] -= steps[i];
        let (f_up, f_down) = (f(&up), f(&down));
        if !f_up.is_finite() || !f_down.is_finite() {
            return None;
        }
        hessian[(i, i)] = (f_up - 2.0 * f_center + f_down) / (steps[i] * steps[i]);

        for j in (i + 1)..D {
            let mut stencil = [*theta; 4];
            stencil[0][i] += steps[i];
            stencil[0][j] += steps[j];
            stencil[1][i] += steps[i];
            stencil[1][j] -= steps[j];
            stencil[2][i] -= steps[i];
            stencil[2][j] += steps[j];
            stencil[3][i] -= steps[i];
            stencil[3][j] -= steps[j];

            let values = [f(&stencil[0]), f(&stencil[1]), f(&stencil[2]), f(&stencil[3])];
            if values.iter().any(|v| !v.is_finite()) {
                return None;
            }
            let mixed = (values[0] - values[1] - values[2] + values[3])
                / (4.0 * steps[i] * steps[j]);
            hessian[(i, j)] = mixed;
            hessian[(j, i)] = mixed;
        }
    }
    Some(hessian)
}

//! Maximum likelihood fits for extreme value distributions
//!
//! Two numerical-likelihood estimators:
//!
//! - [`GpdMle`]: fits a generalized Pareto distribution to excesses over a
//!   threshold, returning `(tail index, scale)`
//! - [`GevMle`]: fits a generalized extreme value distribution to block
//!   maxima, returning `(tail index, scale, location)`
//!
//! Both maximize their log-likelihood with the swappable [`Minimizer`]
//! machinery (Nelder-Mead by default), start from method-of-moments
//! guesses, and expose asymptotic covariances via Fisher information for
//! confidence intervals and delta-method derived quantities (GPD excess
//! quantiles, GEV return levels).
//!
//! # Example
//!
//! ```rust
//! use evt_mle::GpdMle;
//!
//! let excesses = vec![0.3, 1.2, 0.7, 2.9, 0.4, 1.6, 0.9, 5.2];
//! let fit = GpdMle::new().fit(&excesses).unwrap();
//! assert!(fit.scale > 0.0);
//! ```

mod fisher;
pub mod gev;
pub mod gpd;
pub mod optimizer;

pub use gev::{gev_log_likelihood, GevFit, GevMle};
pub use gpd::{gpd_log_likelihood, GpdFit, GpdMle};
pub use optimizer::{Minimizer, Minimum, NelderMead, OptimizerConfig};

/// Below this magnitude the tail index is treated as zero and the
/// exponential/Gumbel limiting forms of the likelihoods apply.
pub(crate) const XI_TOLERANCE: f64 = 1e-8;

//! Extreme value theory estimation toolkit
//!
//! Statistical estimation of tail behavior for heavy-tailed datasets: a
//! sample enters through a validated [`Dataset`], is reduced to an extreme
//! subsample by [`PeaksOverThreshold`] or [`BlockMaxima`], and is handed to
//! one of four estimators:
//!
//! - [`Hill`]: tail index of a heavy (Pareto-type) right tail
//! - [`Moment`]: Dekkers-Einmahl-de Haan generalization for any tail index
//! - [`GpdMle`]: generalized Pareto fit to threshold excesses
//! - [`GevMle`]: generalized extreme value fit to block maxima
//!
//! All estimator outputs carry asymptotic variances, which
//! [`AsymptoticCI`] converts to normal-approximation confidence intervals;
//! [`delta_variance`] extends this to derived quantities like return
//! levels.
//!
//! # Example
//!
//! ```rust
//! use evt_stats::{
//!     AsymptoticCI, Dataset, Hill, OrderStatistics, PeaksOverThreshold, TailIndexEstimator,
//! };
//!
//! let dataset = Dataset::new(vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0]).unwrap();
//! let peaks = PeaksOverThreshold::new(&dataset, 0.5).unwrap();
//!
//! let order = OrderStatistics::from_sample(peaks.tail()).unwrap();
//! let estimate = Hill.estimate(&order, 3).unwrap();
//!
//! let ci = AsymptoticCI::new(0.95).unwrap().interval_for(&estimate).unwrap();
//! assert!(ci.lower <= estimate.tail_index && estimate.tail_index <= ci.upper);
//! ```

// Re-export workspace crates
pub use evt_confidence::{confidence_level_to_std, delta_variance, AsymptoticCI, ConfidenceInterval};
pub use evt_core::{AsymptoticallyNormal, Error, OrderStatistics, ParameterEstimate, Result};
pub use evt_mle::{
    gev_log_likelihood, gpd_log_likelihood, GevFit, GevMle, GpdFit, GpdMle, Minimizer, Minimum,
    NelderMead, OptimizerConfig,
};
pub use evt_sampling::{
    empirical_cdf, maximum_to_sum, mean_excess, BlockMaxima, Dataset, PeaksOverThreshold,
};
pub use evt_tail::{
    EstimateCurve, Hill, Moment, TailIndexEstimate, TailIndexEstimator, MIN_ORDER_STATISTICS,
};

//! Sampling transforms for extreme value analysis
//!
//! A raw [`Dataset`] enters an extreme value analysis through one of two
//! transforms:
//!
//! - [`PeaksOverThreshold`]: keep observations above a threshold; the
//!   excesses feed the generalized Pareto fit and the tail feeds the
//!   order-statistic estimators.
//! - [`BlockMaxima`]: keep per-block maxima; these feed the generalized
//!   extreme value fit.
//!
//! The [`diagnostics`] module computes the data behind threshold-selection
//! plots (empirical CDF, mean excess, maximum-to-sum ratios); rendering is
//! out of scope for this workspace.
//!
//! # Example
//!
//! ```rust
//! use evt_sampling::{Dataset, PeaksOverThreshold};
//!
//! let dataset = Dataset::new(vec![0.2, 1.5, 0.9, 2.4]).unwrap();
//! let pot = PeaksOverThreshold::new(&dataset, 1.0).unwrap();
//! assert_eq!(pot.tail(), &[1.5, 2.4]);
//! ```

pub mod block_maxima;
pub mod dataset;
pub mod diagnostics;
pub mod peaks_over_threshold;

pub use block_maxima::BlockMaxima;
pub use dataset::Dataset;
pub use diagnostics::{empirical_cdf, maximum_to_sum, mean_excess};
pub use peaks_over_threshold::PeaksOverThreshold;

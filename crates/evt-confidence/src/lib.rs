//! Asymptotic confidence intervals for extreme value estimators
//!
//! Converts a point estimate plus its asymptotic variance into an interval
//! at a caller-chosen confidence level:
//!
//! - [`AsymptoticCI`]: normal-approximation intervals, generic over
//!   anything implementing `evt_core::AsymptoticallyNormal`
//! - [`delta_variance`]: delta-method propagation of a covariance matrix
//!   into the variance of a derived scalar quantity (return levels,
//!   quantiles of a fitted distribution)
//!
//! # Example
//!
//! ```rust
//! use evt_confidence::AsymptoticCI;
//!
//! let ci = AsymptoticCI::new(0.95).unwrap().interval(2.0, 4.0 / 3.0).unwrap();
//! assert!(ci.lower <= 2.0 && 2.0 <= ci.upper);
//! ```

pub mod asymptotic;
pub mod delta;
pub mod types;

pub use asymptotic::{confidence_level_to_std, AsymptoticCI};
pub use delta::delta_variance;
pub use types::ConfidenceInterval;

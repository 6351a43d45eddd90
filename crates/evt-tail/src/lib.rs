//! Tail index estimation from order statistics
//!
//! This crate provides the two order-statistic estimators for the extreme
//! value index:
//!
//! - [`Hill`]: the classical estimator for heavy (Pareto-type) tails,
//!   xi > 0
//! - [`Moment`]: the Dekkers-Einmahl-de Haan generalization admitting any
//!   real tail index
//!
//! Both consume a shared [`evt_core::OrderStatistics`] sequence and return
//! [`TailIndexEstimate`] values carrying the asymptotic variance used for
//! confidence intervals, plus an [`EstimateCurve`] across every admissible
//! k for stability plots.
//!
//! # Example
//!
//! ```rust
//! use evt_core::OrderStatistics;
//! use evt_tail::{Hill, TailIndexEstimator};
//!
//! let sample = vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0];
//! let order = OrderStatistics::from_sample(&sample).unwrap();
//! let estimate = Hill.estimate(&order, 3).unwrap();
//! assert!(estimate.tail_index > 0.0);
//! ```

pub mod hill;
pub mod moment;
pub mod traits;
pub mod types;

pub use hill::Hill;
pub use moment::Moment;
pub use traits::{TailIndexEstimator, MIN_ORDER_STATISTICS};
pub use types::{EstimateCurve, TailIndexEstimate};

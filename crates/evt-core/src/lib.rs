//! Core types for extreme value theory estimation
//!
//! This crate provides the pieces every estimator in the workspace shares:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`OrderStatistics`]: a sample sorted descending, derived once and
//!   borrowed by every order-statistic estimator
//! - [`ParameterEstimate`]: a scalar estimate with its asymptotic variance
//! - [`AsymptoticallyNormal`]: the capability the confidence-interval
//!   component consumes
//!
//! # Example
//!
//! ```rust
//! use evt_core::OrderStatistics;
//!
//! let order = OrderStatistics::from_sample(&[1.0, 8.0, 3.0]).unwrap();
//! assert_eq!(order.values(), &[8.0, 3.0, 1.0]);
//! ```

pub mod error;
pub mod order;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use order::OrderStatistics;
pub use traits::AsymptoticallyNormal;
pub use types::ParameterEstimate;

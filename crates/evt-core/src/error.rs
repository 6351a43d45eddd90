//! Error types for extreme value estimation
//!
//! Provides a unified error type for all evt-stats crates.

use thiserror::Error;

/// Core error type for extreme value estimation
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or out-of-domain input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical optimization failed to reach a valid stationary point
    #[error("Convergence failure after {iterations} iterations: {reason}")]
    Convergence { iterations: usize, reason: String },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for values that must be strictly positive
    pub fn non_positive(context: &str) -> Self {
        Self::InvalidInput(format!("{context} must be strictly positive"))
    }

    /// Create an error for an invalid confidence level
    pub fn invalid_confidence_level(level: f64) -> Self {
        Self::InvalidInput(format!("Confidence level {level} must be in (0, 1)"))
    }

    /// Create an error for an out-of-range order statistic count
    pub fn invalid_order_statistics(k: usize, n: usize) -> Self {
        Self::InvalidInput(format!(
            "Number of order statistics {k} must be in 2..={} for a sample of size {n}",
            n.saturating_sub(1)
        ))
    }
}

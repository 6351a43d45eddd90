//! Validated raw dataset
//!
//! The entry point of an extreme value analysis. Estimators downstream
//! assume validation already happened here and only re-check constraints
//! specific to themselves (positivity, minimum size, non-degeneracy).

use evt_core::{Error, Result};

/// A raw dataset that has passed sanity checks.
///
/// Checks performed on construction:
///
/// * the data cannot be empty,
/// * the data cannot contain NaN,
/// * the data cannot contain non-finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
}

impl Dataset {
    /// Validate and take ownership of a raw series.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::empty_input());
        }
        let bad = values.iter().filter(|x| !x.is_finite()).count();
        if bad > 0 {
            return Err(Error::InvalidInput(format!(
                "There are {bad} NaN or non-finite values in the dataset"
            )));
        }
        Ok(Self { values })
    }

    /// The validated observations, in their original order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty data.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

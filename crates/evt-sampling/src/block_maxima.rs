//! Block maxima
//!
//! The second fundamental sampling approach: partition the dataset into
//! consecutive blocks of fixed length and keep each block's maximum. A
//! trailing partial block contributes its maximum as well.

use crate::Dataset;
use evt_core::{Error, Result};

/// Per-block maxima of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMaxima {
    block_length: usize,
    maxima: Vec<f64>,
}

impl BlockMaxima {
    /// Partition `dataset` into blocks of `block_length` observations and
    /// record each block's maximum.
    pub fn new(dataset: &Dataset, block_length: usize) -> Result<Self> {
        if block_length < 1 {
            return Err(Error::InvalidInput(format!(
                "Number of datapoints per block {block_length} must be >= 1"
            )));
        }

        let maxima = dataset
            .values()
            .chunks(block_length)
            .map(|block| block.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect();

        Ok(Self {
            block_length,
            maxima,
        })
    }

    /// The configured block length.
    pub fn block_length(&self) -> usize {
        self.block_length
    }

    /// The per-block maxima, one per block in dataset order.
    pub fn maxima(&self) -> &[f64] {
        &self.maxima
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.maxima.len()
    }

    /// Always false: a non-empty dataset yields at least one block.
    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty()
    }
}

//! Run configuration.

use crate::error::SimError;

/// Dimensions, horizon, and the shared random seed of a run. Fixed for
/// the lifetime of the run on every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub rows: usize,
    pub cols: usize,
    pub steps: u32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> SimConfig {
        SimConfig {
            rows: 10,
            cols: 10,
            steps: 10,
            seed: 0x5eed,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SimError::BadDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GATE_THRESHOLD, DEFAULT_TOP_K};

use super::error::CheckError;

/// Per-call knobs for [`FactChecker::check`](super::FactChecker::check).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckOptions {
    /// Facts retrieved as evidence (at least 1).
    pub top_k: usize,
    /// Minimum confidence for the claim to be adjudicated, in `[0, 1]`.
    pub threshold: f32,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_GATE_THRESHOLD,
        }
    }
}

impl CheckOptions {
    /// Returns a copy with the given fields replaced.
    pub fn with_overrides(self, top_k: Option<usize>, threshold: Option<f32>) -> Self {
        Self {
            top_k: top_k.unwrap_or(self.top_k),
            threshold: threshold.unwrap_or(self.threshold),
        }
    }

    pub fn validate(&self) -> Result<(), CheckError> {
        if self.top_k == 0 {
            return Err(CheckError::InvalidOptions {
                reason: "top_k must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(CheckError::InvalidOptions {
                reason: format!("threshold must be in [0, 1], got {}", self.threshold),
            });
        }
        Ok(())
    }
}

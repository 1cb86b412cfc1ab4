//! Cross-cutting, shared constants.
//!
//! # Calibration Constants
//!
//! [`DEFAULT_DISTANCE_NORMALIZATION`] and [`DEFAULT_GATE_THRESHOLD`] were tuned for a
//! 384-dimensional, L2-normalized MiniLM embedding space. They are defaults, not laws of
//! the domain: a different embedding model shifts the distance distribution, so both are
//! exposed through [`crate::config::Config`] and per-call [`crate::pipeline::CheckOptions`].

/// Output dimension of the default sentence-transformer (MiniLM-L6).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the embedding model per text.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Number of facts retrieved per claim.
pub const DEFAULT_TOP_K: usize = 3;

/// Confidence below which a claim is reported unverifiable without adjudication.
pub const DEFAULT_GATE_THRESHOLD: f32 = 0.3;

/// Average squared distance at which confidence decays to zero.
pub const DEFAULT_DISTANCE_NORMALIZATION: f32 = 10.0;

/// Upper bound on a single completion request.
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;

/// Default completion model identifier.
pub const DEFAULT_COMPLETION_MODEL: &str = "mistral";

/// Default completion service endpoint.
pub const DEFAULT_COMPLETION_URL: &str = "http://localhost:11434";

/// Reasoning attached to a verdict when the completion text cannot be decoded.
pub const UNPARSEABLE_REASONING: &str = "Could not parse LLM response";

/// Error returned when an embedding does not have the dimension the index was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Use this at module boundaries to catch mismatches before they turn into
/// meaningless distances deep in the search loop.
pub fn validate_embedding_dim(expected: usize, actual: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if expected != actual {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

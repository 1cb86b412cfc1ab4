use thiserror::Error;

use crate::corpus::CorpusError;
use crate::index::IndexError;
use crate::verdict::SynthesisError;

#[derive(Debug, Error)]
/// Errors returned by [`FactChecker::check`](super::FactChecker::check).
///
/// An `Unverifiable` verdict is a successful check, never one of these.
pub enum CheckError {
    /// `top_k` or `threshold` is out of range.
    #[error("invalid check options: {reason}")]
    InvalidOptions { reason: String },

    /// Retrieval failed (index not built, embedding failure, dimension mismatch).
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The completion service was unreachable or timed out.
    #[error("synthesis unavailable: {0}")]
    SynthesisUnavailable(#[from] SynthesisError),
}

#[derive(Debug, Error)]
/// Errors returned by [`bootstrap_index`](super::bootstrap_index).
pub enum BootstrapError {
    #[error("index bootstrap failed: {0}")]
    Index(#[from] IndexError),

    #[error("index bootstrap failed: {0}")]
    Corpus(#[from] CorpusError),
}

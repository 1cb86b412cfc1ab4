use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::storage::StorageError;

/// Errors returned by [`FactIndex`](super::FactIndex) operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// `build` was called with zero facts.
    #[error("cannot build an index from an empty corpus")]
    EmptyCorpus,

    /// `search`/`save` was called before any successful `build` or `load`.
    #[error("index has not been built or loaded")]
    NotBuilt,

    /// Saving or loading the persisted artifacts failed.
    #[error("index persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// The embedding function failed while encoding facts or a query.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// A vector does not have the index dimension.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The embedding function returned a different number of vectors than texts.
    #[error("embedding count mismatch: {facts} facts, {embeddings} embeddings")]
    EmbeddingCountMismatch { facts: usize, embeddings: usize },
}

impl IndexError {
    /// Returns `true` for failures that are fixed by rebuilding from the corpus.
    pub fn is_persistence(&self) -> bool {
        matches!(self, IndexError::Persistence(_))
    }
}

/// Errors specific to the two on-disk artifacts.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// One of the two artifacts does not exist.
    #[error("missing index artifact: {path}")]
    MissingArtifact { path: PathBuf },

    /// An artifact exists but cannot be decoded.
    #[error("corrupt index artifact {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// An artifact was written by an incompatible format version.
    #[error("unsupported format version {found} in {path} (expected {expected})")]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    /// Both artifacts decode but do not describe the same fact sequence.
    #[error("index artifacts are inconsistent: {reason}")]
    Inconsistent { reason: String },

    /// The index could not be serialized.
    #[error("failed to serialize index: {0}")]
    Serialization(String),

    /// Writing the artifacts failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

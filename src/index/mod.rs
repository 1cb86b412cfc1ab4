//! Fact index: exact k-NN over fact embeddings.
//!
//! [`FactIndex`] owns the currently published [`IndexSnapshot`]. Snapshots are immutable;
//! `build` and `load` construct a complete new snapshot off to the side and then swap it
//! in under a short write lock. Readers clone the `Arc` and search without holding the
//! lock, so a search never observes a half-built index and a rebuild never waits for
//! in-flight searches to finish.
//!
//! Search is brute force, `O(N * D)` per query. That is the intended trade-off for
//! small-to-moderate corpora: recall is exact and there is no index tuning.

pub mod error;
pub mod persist;
pub mod snapshot;


pub use error::{IndexError, PersistenceError};
pub use persist::{FACTS_EXTENSION, FORMAT_VERSION, INDEX_EXTENSION, artifact_paths};
pub use snapshot::{IndexSnapshot, Neighbor, squared_l2};

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::constants::{DimValidationError, validate_embedding_dim};
use crate::embedding::Embedder;
use crate::hashing::short_fingerprint;

/// Shared handle to the current index snapshot.
#[derive(Debug, Default)]
pub struct FactIndex {
    current: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl FactIndex {
    /// Creates an index with nothing published (searches fail with [`IndexError::NotBuilt`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index with `snapshot` already published.
    pub fn with_snapshot(snapshot: IndexSnapshot) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(snapshot))),
        }
    }

    /// Encodes every fact and publishes a fresh snapshot, replacing any previous one.
    pub fn build<E>(&self, embedder: &E, facts: Vec<String>) -> Result<Arc<IndexSnapshot>, IndexError>
    where
        E: Embedder + ?Sized,
    {
        if facts.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }

        debug!(facts = facts.len(), "Encoding corpus");
        let texts: Vec<&str> = facts.iter().map(String::as_str).collect();
        let embeddings = embedder.encode_batch(&texts)?;

        if let Some(first) = embeddings.first() {
            validate_embedding_dim(embedder.dimension(), first.len()).map_err(|e| match e {
                DimValidationError::ZeroDimension => IndexError::DimensionMismatch {
                    expected: 1,
                    actual: 0,
                },
                DimValidationError::DimensionMismatch { expected, actual } => {
                    IndexError::DimensionMismatch { expected, actual }
                }
            })?;
        }

        let snapshot = IndexSnapshot::from_embeddings(facts, embeddings)?;
        info!(
            facts = snapshot.len(),
            dimension = snapshot.dimension(),
            fingerprint = %short_fingerprint(snapshot.fingerprint()),
            "Index built"
        );

        Ok(self.publish(snapshot))
    }

    /// Returns up to `k` nearest facts to `query`, closest first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, IndexError> {
        self.snapshot()?.search(query, k)
    }

    /// Persists the current snapshot under `base` (see [`persist`]).
    pub fn save(&self, base: &Path) -> Result<(), IndexError> {
        let snapshot = self.snapshot()?;
        persist::save(&snapshot, base)?;
        Ok(())
    }

    /// Restores a snapshot from `base` and publishes it.
    ///
    /// On failure the previously published snapshot (if any) stays in place.
    pub fn load(&self, base: &Path) -> Result<Arc<IndexSnapshot>, IndexError> {
        let snapshot = persist::load(base)?;
        Ok(self.publish(snapshot))
    }

    /// Publishes `snapshot` atomically and returns it.
    pub fn publish(&self, snapshot: IndexSnapshot) -> Arc<IndexSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write() = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Returns the published snapshot.
    pub fn snapshot(&self) -> Result<Arc<IndexSnapshot>, IndexError> {
        self.current.read().clone().ok_or(IndexError::NotBuilt)
    }

    /// Returns `true` once a `build` or `load` has succeeded.
    pub fn is_built(&self) -> bool {
        self.current.read().is_some()
    }

    /// Number of facts in the published snapshot (0 when nothing is published).
    pub fn len(&self) -> usize {
        self.current.read().as_ref().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension of the published snapshot.
    pub fn dimension(&self) -> Option<usize> {
        self.current.read().as_ref().map(|s| s.dimension())
    }
}

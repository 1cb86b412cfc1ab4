//! Claim-to-evidence retrieval and the confidence heuristic.
//!
//! A [`Retriever`] pairs the shared [`FactIndex`] with the embedder that built it. Each call
//! pins one index snapshot, so the positions returned by the search always resolve against
//! the same fact list even if a rebuild publishes a new snapshot mid-call.

pub mod types;

#[cfg(test)]
mod tests;

pub use types::{ConfidenceCalibration, RetrievalResult, RetrievedFact};

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::embedding::Embedder;
use crate::index::{FactIndex, IndexError, IndexSnapshot};

/// Retrieves the facts nearest to a claim.
pub struct Retriever<E> {
    index: Arc<FactIndex>,
    embedder: E,
    calibration: ConfidenceCalibration,
}

impl<E: Embedder> Retriever<E> {
    pub fn new(index: Arc<FactIndex>, embedder: E) -> Self {
        Self {
            index,
            embedder,
            calibration: ConfidenceCalibration::default(),
        }
    }

    pub fn with_calibration(mut self, calibration: ConfidenceCalibration) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn index(&self) -> &Arc<FactIndex> {
        &self.index
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn calibration(&self) -> &ConfidenceCalibration {
        &self.calibration
    }

    /// Rebuilds the shared index from `facts` with this retriever's embedder.
    pub fn rebuild(&self, facts: Vec<String>) -> Result<Arc<IndexSnapshot>, IndexError> {
        self.index.build(&self.embedder, facts)
    }

    /// Returns up to `k` facts nearest to `claim`, closest first.
    #[instrument(skip(self, claim), fields(claim_len = claim.len()))]
    pub fn retrieve(&self, claim: &str, k: usize) -> Result<RetrievalResult, IndexError> {
        let snapshot = self.index.snapshot()?;
        let query = self.embedder.encode(claim)?;
        let neighbors = snapshot.search(&query, k)?;

        let facts: Vec<RetrievedFact> = neighbors
            .into_iter()
            .filter_map(|n| {
                snapshot.fact(n.position).map(|fact| RetrievedFact {
                    fact: fact.to_string(),
                    distance: n.distance,
                })
            })
            .collect();

        debug!(
            retrieved = facts.len(),
            nearest = facts.first().map(|f| f.distance),
            "Retrieved evidence"
        );
        Ok(RetrievalResult::new(facts))
    }

    /// Confidence that the index holds evidence relevant to `claim`.
    pub fn confidence_score(&self, claim: &str, k: usize) -> Result<f32, IndexError> {
        Ok(self.retrieve(claim, k)?.confidence(&self.calibration))
    }
}

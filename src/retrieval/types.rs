use serde::Serialize;

use crate::constants::DEFAULT_DISTANCE_NORMALIZATION;

/// Maps an average squared distance to a confidence in `[0, 1]`.
///
/// This is a heuristic, not a probability: confidence decays linearly from 1 at distance 0
/// to 0 at `normalization`, and stays at 0 beyond it. The default normalization was tuned
/// for unit-length MiniLM embeddings and should be re-tuned for other embedding models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceCalibration {
    normalization: f32,
}

impl ConfidenceCalibration {
    /// `normalization` must be finite and positive; config validation enforces this.
    pub fn new(normalization: f32) -> Self {
        debug_assert!(normalization.is_finite() && normalization > 0.0);
        Self { normalization }
    }

    pub fn normalization(&self) -> f32 {
        self.normalization
    }

    /// `max(0, 1 - avg / normalization)`, capped at 1.
    pub fn score(&self, average_distance: f32) -> f32 {
        (1.0 - average_distance / self.normalization).clamp(0.0, 1.0)
    }
}

impl Default for ConfidenceCalibration {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE_NORMALIZATION)
    }
}

/// A retrieved fact with its squared L2 distance to the claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedFact {
    pub fact: String,
    pub distance: f32,
}

/// Facts nearest to a claim, closest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RetrievalResult {
    facts: Vec<RetrievedFact>,
}

impl RetrievalResult {
    pub fn new(facts: Vec<RetrievedFact>) -> Self {
        Self { facts }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn facts(&self) -> &[RetrievedFact] {
        &self.facts
    }

    /// Mean distance of the retrieved facts, `None` when nothing was retrieved.
    pub fn average_distance(&self) -> Option<f32> {
        if self.facts.is_empty() {
            return None;
        }
        let total: f32 = self.facts.iter().map(|f| f.distance).sum();
        Some(total / self.facts.len() as f32)
    }

    /// Confidence under `calibration`; an empty result scores 0.
    pub fn confidence(&self, calibration: &ConfidenceCalibration) -> f32 {
        self.average_distance()
            .map_or(0.0, |avg| calibration.score(avg))
    }

    /// Fact texts in retrieval order.
    pub fn evidence(&self) -> Vec<String> {
        self.facts.iter().map(|f| f.fact.clone()).collect()
    }

    pub fn into_evidence(self) -> Vec<String> {
        self.facts.into_iter().map(|f| f.fact).collect()
    }
}

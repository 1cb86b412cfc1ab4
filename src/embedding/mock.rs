use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Embedder, EmbeddingError};

/// Table-driven embedder for tests: every text maps to a vector chosen by the test.
///
/// Unknown texts fail with [`EmbeddingError::InferenceFailed`] so a test never silently
/// searches with a vector it did not pick.
#[derive(Debug, Default)]
pub struct MockEmbedder {
    dimension: usize,
    table: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    /// Registers the vector returned for `text`.
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        assert_eq!(
            vector.len(),
            self.dimension,
            "mock vector for {:?} has the wrong dimension",
            text
        );
        self.table.insert(text.to_string(), vector);
        self
    }

    /// Number of texts encoded so far.
    pub fn encode_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for MockEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: format!("no mock vector registered for {:?}", text),
            })
    }
}

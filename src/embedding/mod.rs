//! Embedding function used to index facts and encode claims.
//!
//! - [`Embedder`] is the seam the index and retriever depend on.
//! - [`sentence`] provides the sentence-transformer implementation (with a stub mode).

/// BERT encoder wrapper used by the sentence embedder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Sentence embedder (BERT + mean pooling).
pub mod sentence;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use sentence::{SentenceConfig, SentenceEmbedder};

use std::sync::Arc;

/// Maps text to a fixed-length vector.
///
/// Implementations must be deterministic and must return vectors of exactly
/// [`dimension`](Embedder::dimension) elements for every input.
pub trait Embedder: Send + Sync {
    /// Output dimensionality.
    fn dimension(&self) -> usize;

    /// Encodes a single text.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Encodes a batch of texts, preserving input order.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    /// Returns `true` for placeholder embedders whose vectors carry no meaning.
    fn is_stub(&self) -> bool {
        false
    }
}

impl<E: Embedder + ?Sized> Embedder for Arc<E> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).encode(text)
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).encode_batch(texts)
    }

    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}

/// Scales `embedding` to unit length in place (zero vectors are left untouched).
pub fn l2_normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in embedding.iter_mut() {
            *x /= norm;
        }
    }
}

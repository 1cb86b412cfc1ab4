use std::cmp::Ordering;

use crate::hashing::{FINGERPRINT_LEN, fingerprint_facts};

use super::error::IndexError;

/// One k-NN result: position of the fact in build order and its squared L2 distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

/// Squared Euclidean distance between two equal-length vectors.
#[inline]
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn by_distance(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then(a.position.cmp(&b.position))
}

/// Immutable facts + embedding matrix, searched exhaustively.
///
/// `facts[i]` is embedded in row `i` of `vectors`; both are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSnapshot {
    facts: Vec<String>,
    vectors: Vec<f32>,
    dimension: usize,
    fingerprint: [u8; FINGERPRINT_LEN],
}

impl IndexSnapshot {
    /// Builds a snapshot from facts and their embeddings (same length, same order).
    pub fn from_embeddings(
        facts: Vec<String>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Self, IndexError> {
        if facts.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }

        if facts.len() != embeddings.len() {
            return Err(IndexError::EmbeddingCountMismatch {
                facts: facts.len(),
                embeddings: embeddings.len(),
            });
        }

        let dimension = embeddings[0].len();
        if dimension == 0 {
            return Err(IndexError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }

        let mut vectors = Vec::with_capacity(facts.len() * dimension);
        for embedding in embeddings {
            if embedding.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    actual: embedding.len(),
                });
            }
            vectors.extend_from_slice(&embedding);
        }

        let fingerprint = fingerprint_facts(&facts);
        Ok(Self {
            facts,
            vectors,
            dimension,
            fingerprint,
        })
    }

    /// Reassembles a snapshot whose consistency was already verified by the loader.
    pub(crate) fn from_parts(
        facts: Vec<String>,
        vectors: Vec<f32>,
        dimension: usize,
        fingerprint: [u8; FINGERPRINT_LEN],
    ) -> Self {
        debug_assert_eq!(facts.len() * dimension, vectors.len());
        Self {
            facts,
            vectors,
            dimension,
            fingerprint,
        }
    }

    /// Returns up to `k` nearest facts by ascending squared L2 distance.
    ///
    /// Ties are broken by build order so results are reproducible.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let k = k.min(self.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(position, row)| Neighbor {
                position,
                distance: squared_l2(query, row),
            })
            .collect();

        if k < neighbors.len() {
            neighbors.select_nth_unstable_by(k - 1, by_distance);
            neighbors.truncate(k);
        }
        neighbors.sort_unstable_by(by_distance);

        Ok(neighbors)
    }

    /// Number of indexed facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Fact at `position` in build order.
    pub fn fact(&self, position: usize) -> Option<&str> {
        self.facts.get(position).map(String::as_str)
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    /// Embedding row at `position`.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dimension)?;
        self.vectors.get(start..start + self.dimension)
    }

    pub(crate) fn vectors(&self) -> &[f32] {
        &self.vectors
    }

    /// BLAKE3 fingerprint of the fact sequence.
    pub fn fingerprint(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.fingerprint
    }
}

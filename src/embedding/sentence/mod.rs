//! Sentence embedder (BERT checkpoint + tokenizer, mean pooled).
//!
//! Use [`SentenceConfig::stub`] for tests/examples without model files.

/// Sentence embedder configuration.
pub mod config;


pub use config::{SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceConfig};

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer;
use crate::embedding::{Embedder, l2_normalize};
use crate::hashing::hash_to_u64;

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Box<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Embedding generator for facts and claims (supports stub mode).
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: SentenceConfig,
    dimension: usize,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("dimension", &self.dimension)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: SentenceConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!(
                dimension = config.embedding_dim,
                "Sentence embedder running in STUB mode (testing only)"
            );
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                dimension: config.embedding_dim,
                config,
            });
        }

        let device = select_device();
        let tokenizer = load_tokenizer(&config.model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let encoder =
            BertEncoder::load(&config.model_dir, &device).map_err(|e| {
                EmbeddingError::ModelLoadFailed {
                    reason: format!("Failed to load BERT model: {}", e),
                }
            })?;
        let dimension = encoder.hidden_size();

        info!(
            model_dir = %config.model_dir.display(),
            dimension,
            max_seq_len = config.max_seq_len,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer: Box::new(tokenizer),
                device,
            },
            dimension,
            config,
        })
    }

    /// Shorthand for `load(SentenceConfig::stub())`.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(SentenceConfig::stub())
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &BertEncoder,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok(vec![0.0; self.dimension]);
        }

        debug!(
            text_len = text.len(),
            token_count = ids.len(),
            "Generating embedding"
        );

        let input_ids = Tensor::new(ids, device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;

        // [1, seq_len, hidden] -> mean over tokens -> [hidden]
        let hidden_states = encoder.forward(&input_ids, &token_type_ids, None)?;
        let mut embedding = hidden_states.mean(1)?.squeeze(0)?.to_vec1::<f32>()?;

        if self.config.normalize {
            l2_normalize(&mut embedding);
        }
        Ok(embedding)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let mut state = hash_to_u64(text.as_bytes());
        let mut embedding = Vec::with_capacity(self.dimension);

        for _ in 0..self.dimension {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        if self.config.normalize {
            l2_normalize(&mut embedding);
        }
        embedding
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &SentenceConfig {
        &self.config
    }
}

impl Embedder for SentenceEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }
}

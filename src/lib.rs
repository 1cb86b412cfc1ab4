//! Fact-check library crate (used by the server binary and integration tests).
//!
//! A claim is embedded, matched against a trusted fact corpus by exact k-NN, and, when the
//! retrieved evidence is close enough, adjudicated by a text-completion service.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`FactChecker`], [`CheckOptions`], [`CheckResult`], [`CheckError`] - end-to-end check
//! - [`bootstrap_index`] - load the persisted index or rebuild it from the corpus
//!
//! ## Retrieval
//! - [`FactIndex`], [`IndexSnapshot`], [`IndexError`] - exact squared-L2 k-NN over facts
//! - [`Retriever`], [`RetrievalResult`], [`ConfidenceCalibration`] - evidence and confidence
//! - [`Embedder`], [`SentenceEmbedder`] - embedding function
//!
//! ## Adjudication
//! - [`VerdictSynthesizer`], [`Verdict`], [`ParsedCompletion`] - prompt, call, parse
//! - [`CompletionService`], [`OllamaClient`] - completion backend
//!
//! ## Test/Mock Support
//! [`MockEmbedder`] and [`MockCompletionService`] are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod completion;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod gateway;
pub mod hashing;
pub mod index;
pub mod pipeline;
pub mod retrieval;
pub mod storage;
pub mod verdict;

pub use completion::{CompletionConfig, CompletionError, CompletionService, OllamaClient};
#[cfg(any(test, feature = "mock"))]
pub use completion::{MockBehavior, MockCompletionService};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use corpus::{CorpusError, load_facts};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{Embedder, EmbeddingError, SentenceConfig, SentenceEmbedder};
pub use index::{FactIndex, IndexError, IndexSnapshot, Neighbor, PersistenceError};
pub use pipeline::{
    BootstrapError, BootstrapOutcome, CheckError, CheckOptions, CheckResult, FactChecker,
    bootstrap_index,
};
pub use retrieval::{ConfidenceCalibration, RetrievalResult, RetrievedFact, Retriever};
pub use verdict::{Judgment, ParsedCompletion, SynthesisError, Verdict, VerdictSynthesizer};

//! Text-completion service used to adjudicate claims.
//!
//! [`CompletionService`] is the seam the verdict synthesizer depends on. [`OllamaClient`]
//! talks to an Ollama-compatible `/api/generate` endpoint; tests use
//! [`MockCompletionService`].

pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod ollama;

pub use config::{CompletionConfig, GENERATE_PATH};
pub use error::CompletionError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockBehavior, MockCompletionService};
pub use ollama::OllamaClient;

/// Turns a prompt into completion text.
pub trait CompletionService: Send + Sync {
    /// Returns the raw completion text for `prompt`.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

impl<C: CompletionService> CompletionService for std::sync::Arc<C> {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt).await
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}

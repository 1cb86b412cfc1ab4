use thiserror::Error;

use crate::completion::CompletionError;

#[derive(Debug, Error)]
/// Errors returned by the verdict synthesizer.
pub enum SynthesisError {
    /// The completion service could not be reached, failed, or timed out.
    #[error("completion service unavailable: {source}")]
    Unavailable {
        #[from]
        source: CompletionError,
    },
}

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a completion service.
///
/// Every variant is an infrastructure failure: the service could not be reached or did not
/// answer in the expected envelope. Model output that is merely malformed is not an error
/// at this layer; it is handled when the completion text is parsed.
pub enum CompletionError {
    /// The HTTP client could not be constructed.
    #[error("failed to build completion client: {message}")]
    ClientBuild {
        /// Error message.
        message: String,
    },

    /// Could not reach the completion endpoint.
    #[error("completion request to '{endpoint}' failed: {message}")]
    RequestFailed {
        /// Endpoint URL.
        endpoint: String,
        /// Error message.
        message: String,
    },

    /// No answer within the configured timeout.
    #[error("completion request timed out after {after:?}")]
    Timeout {
        /// Configured timeout.
        after: Duration,
    },

    /// The service answered with a non-success status.
    #[error("completion service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (truncated).
        body: String,
    },

    /// The response body was not the expected JSON envelope.
    #[error("invalid completion response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

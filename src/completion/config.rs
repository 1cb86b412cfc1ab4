use std::time::Duration;

use crate::constants::{
    DEFAULT_COMPLETION_MODEL, DEFAULT_COMPLETION_TIMEOUT_SECS, DEFAULT_COMPLETION_URL,
};

/// Path of the non-streaming generate endpoint, relative to the service base URL.
pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Completion client settings.
pub struct CompletionConfig {
    /// Base URL of the completion service.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMPLETION_URL.to_string(),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
        }
    }
}

impl CompletionConfig {
    /// Full URL of the generate endpoint (tolerates a trailing slash on `endpoint`).
    pub fn generate_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), GENERATE_PATH)
    }
}

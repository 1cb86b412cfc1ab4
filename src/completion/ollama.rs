use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::config::CompletionConfig;
use super::error::CompletionError;
use super::CompletionService;

/// Longest error body kept in [`CompletionError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for an Ollama-compatible `/api/generate` endpoint (non-streaming).
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: HttpClient,
    config: CompletionConfig,
    url: String,
}

impl OllamaClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::ClientBuild {
                message: e.to_string(),
            })?;
        let url = config.generate_url();

        Ok(Self { http, config, url })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }

    fn request_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout {
                after: self.timeout(),
            }
        } else {
            CompletionError::RequestFailed {
                endpoint: self.url.clone(),
                message: e.to_string(),
            }
        }
    }
}

impl CompletionService for OllamaClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        let resp = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await.map_err(|e| self.request_error(e))?;
        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| CompletionError::InvalidResponse {
                message: e.to_string(),
            })?;

        debug!(response_len = parsed.response.len(), "Completion received");
        Ok(parsed.response)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

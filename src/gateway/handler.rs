use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::completion::CompletionService;
use crate::embedding::Embedder;

use super::error::GatewayError;
use super::state::AppState;
use super::{FACTCHECK_STATUS_HEADER, STATUS_CHECKED, STATUS_GATED};

/// Body of `POST /v1/check`.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub claim: String,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f32>,
}

#[instrument(skip(state, request), fields(claim_len = tracing::field::Empty))]
pub async fn check_handler<E, C>(
    State(state): State<AppState<E, C>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    E: Embedder + 'static,
    C: CompletionService + 'static,
{
    let request: CheckRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let claim = request.claim.trim();
    if claim.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "claim must not be blank".to_string(),
        ));
    }
    tracing::Span::current().record("claim_len", claim.len());

    let options = state
        .checker
        .defaults()
        .with_overrides(request.top_k, request.threshold);
    debug!(top_k = options.top_k, threshold = options.threshold, "Checking claim");

    let result = state.checker.check(claim, options).await?;

    let status_label = if result.confidence < options.threshold {
        STATUS_GATED
    } else {
        STATUS_CHECKED
    };
    let mut headers = HeaderMap::new();
    headers.insert(
        FACTCHECK_STATUS_HEADER,
        HeaderValue::from_static(status_label),
    );

    Ok((StatusCode::OK, headers, Json(result)).into_response())
}

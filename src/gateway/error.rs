use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::index::IndexError;
use crate::pipeline::CheckError;

use super::{
    FACTCHECK_STATUS_HEADER, STATUS_INVALID_REQUEST, STATUS_NOT_READY, STATUS_RETRIEVAL_ERROR,
    STATUS_SYNTHESIS_UNAVAILABLE,
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("index not ready: {0}")]
    IndexNotReady(String),

    #[error("retrieval failed: {0}")]
    RetrievalFailed(String),

    #[error("synthesis unavailable: {0}")]
    SynthesisUnavailable(String),
}

impl From<CheckError> for GatewayError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::InvalidOptions { reason } => GatewayError::InvalidRequest(reason),
            CheckError::Index(IndexError::NotBuilt) => {
                GatewayError::IndexNotReady(IndexError::NotBuilt.to_string())
            }
            CheckError::Index(e) => GatewayError::RetrievalFailed(e.to_string()),
            CheckError::SynthesisUnavailable(e) => {
                GatewayError::SynthesisUnavailable(e.to_string())
            }
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, status_label) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, STATUS_INVALID_REQUEST),
            GatewayError::IndexNotReady(_) => (StatusCode::SERVICE_UNAVAILABLE, STATUS_NOT_READY),
            GatewayError::RetrievalFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, STATUS_RETRIEVAL_ERROR)
            }
            GatewayError::SynthesisUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                STATUS_SYNTHESIS_UNAVAILABLE,
            ),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            FACTCHECK_STATUS_HEADER,
            HeaderValue::from_static(status_label),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}

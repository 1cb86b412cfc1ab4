//! HTTP gateway (Axum) for fact checks.
//!
//! - `GET /healthz`: process liveness
//! - `GET /ready`: index published and embedder mode
//! - `POST /v1/check`: `{claim, top_k?, threshold?}` -> `{verdict, evidence, reasoning, confidence}`
//!
//! Every response carries [`FACTCHECK_STATUS_HEADER`].

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{CheckRequest, check_handler};
pub use state::AppState;

use crate::completion::CompletionService;
use crate::embedding::Embedder;

pub const FACTCHECK_STATUS_HEADER: &str = "X-Factcheck-Status";
pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_READY: &str = "ready";
pub const STATUS_NOT_READY: &str = "not_ready";
pub const STATUS_CHECKED: &str = "checked";
pub const STATUS_GATED: &str = "gated";
pub const STATUS_INVALID_REQUEST: &str = "invalid_request";
pub const STATUS_RETRIEVAL_ERROR: &str = "retrieval_error";
pub const STATUS_SYNTHESIS_UNAVAILABLE: &str = "synthesis_unavailable";

pub fn create_router<E, C>(state: AppState<E, C>) -> Router
where
    E: Embedder + 'static,
    C: CompletionService + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<E, C>))
        .route("/v1/check", post(check_handler::<E, C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub index: &'static str,
    pub index_facts: usize,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        FACTCHECK_STATUS_HEADER,
        HeaderValue::from_static(STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E, C>(State(state): State<AppState<E, C>>) -> Response
where
    E: Embedder + 'static,
    C: CompletionService + 'static,
{
    let index = state.index();
    let is_ready = index.is_built();

    let components = ComponentStatus {
        http: STATUS_READY,
        index: if is_ready { STATUS_READY } else { STATUS_NOT_READY },
        index_facts: index.len(),
        embedder_mode: if state.embedder_is_stub() { "stub" } else { "real" },
    };

    let (status_code, status_label) = if is_ready {
        (StatusCode::OK, STATUS_READY)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, STATUS_NOT_READY)
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        FACTCHECK_STATUS_HEADER,
        HeaderValue::from_static(status_label),
    );

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: if is_ready { "ok" } else { "pending" },
            components,
        }),
    )
        .into_response()
}

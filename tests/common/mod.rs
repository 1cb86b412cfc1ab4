//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use factcheck::completion::GENERATE_PATH;

pub const FACTS: &[&str] = &[
    "The sky appears blue due to Rayleigh scattering.",
    "Water boils at 100 degrees Celsius at sea level.",
    "The Earth orbits the Sun once every 365.25 days.",
    "Paris is the capital of France.",
    "Mount Everest is the highest mountain above sea level.",
];

pub const TRUE_RESPONSE: &str =
    r#"{"verdict":"Likely True","reasoning":"Evidence confirms claim."}"#;

/// Writes [`FACTS`] (with a blank line and a duplicate) to `facts.txt` in `dir`.
pub fn write_corpus(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("facts.txt");
    let mut text = FACTS.join("\n");
    text.push_str("\n\n");
    text.push_str(FACTS[0]);
    text.push('\n');
    std::fs::write(&path, text).expect("write corpus");
    path
}

/// Fake Ollama `/api/generate` endpoint.
pub struct FakeCompletionServer {
    pub url: String,
    calls: Arc<AtomicUsize>,
    _shutdown: oneshot::Sender<()>,
}

impl FakeCompletionServer {
    /// Answers every request with `status` and `{"response": text}`.
    pub async fn spawn(status: StatusCode, text: &'static str) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let router = Router::new().route(
            GENERATE_PATH,
            post(move |Json(_body): Json<serde_json::Value>| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, Json(serde_json::json!({ "response": text, "done": true })))
                }
            }),
        );

        let (addr, shutdown) = serve(router).await;
        Self {
            url: format!("http://{addr}"),
            calls,
            _shutdown: shutdown,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Serves `router` on an ephemeral port until the returned sender is dropped.
pub async fn serve(router: Router) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await
            .expect("server error");
    });

    (addr, tx)
}

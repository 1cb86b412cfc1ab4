//! Fact-check HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use factcheck::completion::OllamaClient;
use factcheck::config::Config;
use factcheck::embedding::{Embedder, SentenceEmbedder};
use factcheck::gateway::{AppState, create_router};
use factcheck::index::FactIndex;
use factcheck::pipeline::{BootstrapOutcome, FactChecker, bootstrap_index};
use factcheck::retrieval::Retriever;
use factcheck::verdict::VerdictSynthesizer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        llm_url = %config.llm_url,
        llm_model = %config.llm_model,
        "Fact checker starting"
    );

    if config.model_path.is_none() {
        tracing::warn!("No FACTCHECK_MODEL_PATH configured, running embedder in stub mode");
    }
    let embedder = SentenceEmbedder::load(config.embedder_config())?;

    let index = Arc::new(FactIndex::new());
    match bootstrap_index(&index, &embedder, &config.index_path, &config.corpus_path)? {
        BootstrapOutcome::Loaded { facts } => {
            tracing::info!(facts, dimension = embedder.dimension(), "Using persisted index");
        }
        BootstrapOutcome::Rebuilt { facts } => {
            tracing::info!(facts, dimension = embedder.dimension(), "Using rebuilt index");
        }
    }

    let completion_config = config.completion_config();
    let timeout = completion_config.timeout;
    let client = OllamaClient::new(completion_config)?;

    let retriever = Retriever::new(index, embedder).with_calibration(config.calibration());
    let synthesizer = VerdictSynthesizer::new(client).with_timeout(timeout);
    let checker =
        Arc::new(FactChecker::new(retriever, synthesizer).with_defaults(config.check_options()));

    let app = create_router(AppState::new(checker));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Fact checker shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("FACTCHECK_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

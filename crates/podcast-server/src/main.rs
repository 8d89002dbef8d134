//! Podcast server binary.
//!
//! Starts an axum HTTP server with structured logging and graceful shutdown
//! on SIGTERM/SIGINT.

use podcast_script::{OpenAiScriptWriter, ScriptWriter};
use podcast_server::{app, config, AppState};
use podcast_store::{build_store, Publisher, StorageBackend};
use podcast_voice::{Pipeline, PollySpeechProvider, TurnSynthesizer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("PODCAST_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration; the server cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    // Speech synthesis
    let provider = PollySpeechProvider::from_env(&config.synthesis).await;
    let synthesizer = TurnSynthesizer::new(Arc::new(provider), config.synthesis.tiers.clone())
        .expect("invalid synthesis tiers; check synthesis.tiers in config");
    tracing::info!(
        region = %config.synthesis.region,
        tiers = ?synthesizer.tiers(),
        "speech synthesis configured"
    );

    // Publishing
    let store = build_store(&config.storage, &config.server.local_files_url())
        .expect("failed to configure podcast storage; check the [storage] section");
    let publisher = Publisher::new(store, config.storage.prefix.clone());
    let local_files_dir = match config.storage.backend {
        StorageBackend::Local => {
            std::fs::create_dir_all(&config.storage.local_dir)
                .expect("failed to create storage.local_dir");
            Some(config.storage.local_dir.clone())
        }
        StorageBackend::S3 => None,
    };
    tracing::info!(backend = ?config.storage.backend, "podcast storage configured");

    // Script writer is optional
    let script_writer: Option<Arc<dyn ScriptWriter>> =
        match OpenAiScriptWriter::new(&config.script) {
            Ok(writer) => Some(Arc::new(writer)),
            Err(e) => {
                tracing::warn!(error = %e, "script writer disabled");
                None
            }
        };

    let state = AppState {
        pipeline: Arc::new(Pipeline::new(synthesizer)),
        publisher: Arc::new(publisher),
        script_writer,
        local_files_dir,
    };

    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(%addr, "starting podcast server");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address; is another process using this port?");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("podcast server shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}

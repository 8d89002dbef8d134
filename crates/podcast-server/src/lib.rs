//! Podcast studio HTTP server.

pub mod api;
pub mod api_podcast;
pub mod api_script;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use podcast_script::ScriptWriter;
use podcast_store::Publisher;
use podcast_voice::Pipeline;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Concurrent turn synthesis and concatenation.
    pub pipeline: Arc<Pipeline>,
    /// Writes finished podcasts and hands out their URLs.
    pub publisher: Arc<Publisher>,
    /// Next-utterance generation. `None` disables `/api/generate-turn`.
    pub script_writer: Option<Arc<dyn ScriptWriter>>,
    /// Directory served under `/files` when the local store is in use.
    pub local_files_dir: Option<String>,
}

/// Maximum request body size (2 MiB). Protects against OOM from oversized payloads.
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route(
            "/api/generate-podcast",
            post(api_podcast::generate_podcast_handler),
        )
        .route(
            "/api/generate-turn",
            post(api_script::generate_turn_handler),
        );

    // Published files from the local store under /files/*
    let router = match state.local_files_dir.as_deref() {
        Some(dir) => {
            tracing::info!(path = %dir, "serving published podcasts at /files");
            router.nest_service("/files", ServeDir::new(dir))
        }
        None => router,
    };

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}

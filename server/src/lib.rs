//! HTTP boundary for the Daily Run Rate record store.
//!
//! One route table serves both the long-running server ([`Application::serve`])
//! and single serverless invocations ([`serverless::invoke`]).

pub mod api;
pub mod config;
pub mod errors;
pub mod serverless;
pub mod telemetry;

#[cfg(test)]
mod test_utils;

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{delete, get},
    Router,
};
use drr_core::{FileRecordRepository, InMemoryRecordRepository, RecordRepository};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

pub use config::Config;

/// Shared by every handler. The repository is injected so each test (or
/// invocation) can own an isolated store.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn RecordRepository>,
    pub strict: bool,
}

impl AppState {
    pub fn new(repo: Arc<dyn RecordRepository>, strict: bool) -> Self {
        Self { repo, strict }
    }
}

/// Memory by default; a JSON file when a data directory is configured.
pub fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn RecordRepository>> {
    match &config.data_dir {
        Some(dir) => {
            let repo = FileRecordRepository::new(Some(dir.clone()))?;
            info!(path = %repo.path().display(), "Records persisted to file");
            Ok(Arc::new(repo))
        }
        None => {
            info!("Records kept in memory only");
            Ok(Arc::new(InMemoryRecordRepository::new()))
        }
    }
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}

/// Build the route table with CORS, body limit and tracing middleware.
pub fn build_router(config: &Config, state: AppState) -> Router {
    Router::new()
        .route("/api/data", get(api::handlers::list_data).post(api::handlers::create_data))
        .route("/api/data/{id}", delete(api::handlers::delete_data))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(create_cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub struct Application {
    config: Config,
    router: Router,
}

impl Application {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let repo = build_repository(&config)?;
        Ok(Self::with_repository(config, repo))
    }

    pub fn with_repository(config: Config, repo: Arc<dyn RecordRepository>) -> Self {
        let state = AppState::new(repo, config.strict);
        let router = build_router(&config, state);
        Self { config, router }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.addr).await?;
        info!("Server is running on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;
        info!("Server stopped");
        Ok(())
    }
}

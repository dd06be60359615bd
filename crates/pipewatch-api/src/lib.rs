//! PipeWatch API: read-only JSON endpoints over the synthetic dataset
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

pub use config::ApiConfig;
pub use error::ApiError;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use pipewatch_core::GenerationContext;
use pipewatch_gen::{Dataset, DatasetOptions};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::metrics::ApiMetrics;

/// Shared application state. Read-only once the server starts.
pub struct AppState {
    pub dataset: Dataset,
    pub metrics: ApiMetrics,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Result<Self, ApiError> {
        Ok(Self {
            dataset,
            metrics: ApiMetrics::new()?,
            start_time: Instant::now(),
        })
    }

    /// Generate a fresh dataset from a seed, or from entropy when `None`
    pub fn generate(seed: Option<u64>, options: DatasetOptions) -> Result<Self, ApiError> {
        let mut ctx = GenerationContext::from_seed(seed);
        Self::new(Dataset::generate(&mut ctx, options)?)
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/pipe-segments", get(handlers::pipe_segments))
        .route("/api/pipe-segments/{id}", get(handlers::pipe_segment))
        .route("/api/sensor-readings", get(handlers::sensor_readings))
        .route("/api/ai-analysis", get(handlers::ai_analysis))
        .route("/api/alerts", get(handlers::alerts))
        .route("/api/metrics", get(handlers::metrics))
        .route("/api/recent-activity", get(handlers::recent_activity))
        .route("/api/pacp-codes", get(handlers::pacp_codes))
        .route("/api/pacp-codes/{category}", get(handlers::pacp_category))
        .route("/api/health", get(handlers::health))
        .route("/metrics", get(handlers::prometheus_metrics))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn_with_state(state.clone(), middleware::track_requests)),
        )
        .with_state(state)
}

/// Router with the layers `config` asks for on top of [`create_app`]
pub fn build_app(state: Arc<AppState>, config: &ApiConfig) -> Router {
    let app = create_app(state);
    if config.cors_enabled {
        app.layer(middleware::cors())
    } else {
        app
    }
}

pub async fn run(config: ApiConfig) -> Result<(), ApiError> {
    let state = Arc::new(AppState::generate(config.seed, config.dataset_options())?);
    let app = build_app(state, &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|err| ApiError::Server(format!("failed to bind {}: {}", addr, err)))?;

    tracing::info!(%addr, "PipeWatch API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| ApiError::Server(err.to_string()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}

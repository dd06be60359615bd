//! Middleware: CORS and per-route request accounting.
use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

use crate::AppState;

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Count every request by matched route and status. Unrouted requests
/// share one label so arbitrary paths cannot grow the series set.
pub async fn track_requests(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    state.metrics.record_request(&path, status);
    tracing::debug!(
        path = %path,
        status,
        latency_us = start.elapsed().as_micros() as u64,
        "request served"
    );
    response
}

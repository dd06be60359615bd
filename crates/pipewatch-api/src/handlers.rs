//! API Handlers
use axum::{
    extract::{Path, State},
    http::{header, Uri},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use pipewatch_core::{
    ActivityEntry, AiAnalysis, Alert, PipeSegment, PipewatchError, SensorReading, PIPEWATCH_VERSION,
};
use pipewatch_gen::{InventoryMode, StageReport};
use pipewatch_metrics::SystemMetrics;
use pipewatch_pacp::{PacpCatalog, PacpCategory, PacpCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

pub async fn pipe_segments(State(state): State<Arc<AppState>>) -> Json<Vec<PipeSegment>> {
    Json(state.dataset.pipe_segments.clone())
}

pub async fn pipe_segment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PipeSegment>, ApiError> {
    state
        .dataset
        .segment(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| PipewatchError::UnknownSegment(id).into())
}

pub async fn sensor_readings(State(state): State<Arc<AppState>>) -> Json<Vec<SensorReading>> {
    Json(state.dataset.sensor_readings.clone())
}

pub async fn ai_analysis(State(state): State<Arc<AppState>>) -> Json<Vec<AiAnalysis>> {
    Json(state.dataset.ai_analyses.clone())
}

pub async fn alerts(State(state): State<Arc<AppState>>) -> Json<Vec<Alert>> {
    Json(state.dataset.alerts.clone())
}

/// Recomputed from the served inventory on every call
pub async fn metrics(State(state): State<Arc<AppState>>) -> Json<SystemMetrics> {
    Json(SystemMetrics::from_segments(&state.dataset.pipe_segments))
}

pub async fn recent_activity(State(state): State<Arc<AppState>>) -> Json<Vec<ActivityEntry>> {
    Json(state.dataset.recent_activity.clone())
}

pub async fn pacp_codes() -> Json<BTreeMap<PacpCategory, &'static [PacpCode]>> {
    Json(PacpCatalog::standard().to_map())
}

#[derive(Debug, Serialize)]
pub struct CategoryCodes {
    pub category: PacpCategory,
    pub codes: &'static [PacpCode],
}

pub async fn pacp_category(Path(category): Path<String>) -> Result<Json<CategoryCodes>, ApiError> {
    let category: PacpCategory = category.parse()?;
    Ok(Json(CategoryCodes {
        category,
        codes: PacpCatalog::standard().codes_for(category),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub dataset_id: Uuid,
    pub seed: Option<u64>,
    pub inventory: InventoryMode,
    pub generated_at: DateTime<Utc>,
    pub uptime_secs: u64,
    pub stages: Vec<StageReport>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = &state.dataset;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: PIPEWATCH_VERSION.to_string(),
        dataset_id: dataset.id,
        seed: dataset.seed,
        inventory: dataset.options.inventory,
        generated_at: dataset.generated_at,
        uptime_secs: state.start_time.elapsed().as_secs(),
        stages: dataset.stages.clone(),
    })
}

/// Prometheus text exposition
pub async fn prometheus_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = state.metrics.encode()?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

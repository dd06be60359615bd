//! Dataset: runs every generator once and holds the results
use chrono::{DateTime, Utc};
use pipewatch_core::{
    ActivityEntry, AiAnalysis, Alert, GenerationContext, PipeSegment, PipewatchError, SensorReading,
};
use pipewatch_pacp::PacpCatalog;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::activity::{generate_activity, DEFAULT_ACTIVITY_COUNT};
use crate::alerts::generate_alerts;
use crate::analysis::generate_analyses;
use crate::pipes::{generate_segments, InventoryMode};
use crate::sensors::{generate_readings, DEFAULT_READING_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetOptions {
    pub inventory: InventoryMode,
    pub readings: usize,
    pub activity: usize,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            inventory: InventoryMode::Curated,
            readings: DEFAULT_READING_COUNT,
            activity: DEFAULT_ACTIVITY_COUNT,
        }
    }
}

/// Record of one generator run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub id: String,
    pub items: usize,
    pub latency_us: u64,
}

/// The full synthetic dataset, built once and read-only afterwards
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub options: DatasetOptions,
    pub pipe_segments: Vec<PipeSegment>,
    pub sensor_readings: Vec<SensorReading>,
    pub ai_analyses: Vec<AiAnalysis>,
    pub alerts: Vec<Alert>,
    pub recent_activity: Vec<ActivityEntry>,
    pub stages: Vec<StageReport>,
}

impl Dataset {
    /// Build with the standard PACP catalog
    pub fn generate(
        ctx: &mut GenerationContext,
        options: DatasetOptions,
    ) -> Result<Self, PipewatchError> {
        Self::generate_with_catalog(ctx, PacpCatalog::standard(), options)
    }

    pub fn generate_with_catalog(
        ctx: &mut GenerationContext,
        catalog: &PacpCatalog,
        options: DatasetOptions,
    ) -> Result<Self, PipewatchError> {
        let id = ctx.next_id();
        let mut stages = Vec::new();

        let pipe_segments = timed(&mut stages, "pipe_segments", || {
            generate_segments(ctx, options.inventory)
        })?;
        let sensor_readings = timed(&mut stages, "sensor_readings", || {
            generate_readings(ctx, catalog, &pipe_segments, options.readings)
        })?;
        let ai_analyses = timed(&mut stages, "ai_analysis", || {
            generate_analyses(ctx, catalog, &pipe_segments)
        })?;
        let alerts = timed(&mut stages, "alerts", || {
            generate_alerts(ctx, &pipe_segments, &ai_analyses)
        })?;
        let recent_activity = timed(&mut stages, "recent_activity", || {
            generate_activity(ctx, &pipe_segments, options.activity)
        })?;

        tracing::info!(
            dataset = %id,
            inventory = %options.inventory,
            segments = pipe_segments.len(),
            readings = sensor_readings.len(),
            analyses = ai_analyses.len(),
            alerts = alerts.len(),
            "dataset generated"
        );

        Ok(Self {
            id,
            generated_at: ctx.now(),
            seed: ctx.seed(),
            options,
            pipe_segments,
            sensor_readings,
            ai_analyses,
            alerts,
            recent_activity,
            stages,
        })
    }

    pub fn segment(&self, id: &str) -> Option<&PipeSegment> {
        self.pipe_segments.iter().find(|s| s.id == id)
    }
}

fn timed<T>(
    stages: &mut Vec<StageReport>,
    id: &str,
    run: impl FnOnce() -> Result<Vec<T>, PipewatchError>,
) -> Result<Vec<T>, PipewatchError> {
    let start = Instant::now();
    let items = run()?;
    let latency_us = start.elapsed().as_micros() as u64;
    tracing::debug!(stage = id, items = items.len(), latency_us, "stage complete");
    stages.push(StageReport {
        id: id.to_string(),
        items: items.len(),
        latency_us,
    });
    Ok(items)
}

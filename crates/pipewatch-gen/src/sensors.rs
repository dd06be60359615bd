//! Sensor readings tagged with PACP codes
use chrono::Duration;
use pipewatch_core::{round_to, GenerationContext, PipeSegment, PipewatchError, SensorReading};
use pipewatch_pacp::{pick_code, PacpBucket, PacpCatalog};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_READING_COUNT: usize = 100;

/// Readings are spread over this window before the context clock
pub const READING_WINDOW_HOURS: i64 = 72;
pub const CAMERA_IMAGE_PROBABILITY: f64 = 0.7;
pub const CAMERA_IMAGE_COUNT: usize = 5;

/// Generate `count` readings, most recent first.
///
/// Segments are drawn with replacement, so a segment may receive any
/// number of readings including none.
pub fn generate_readings(
    ctx: &mut GenerationContext,
    catalog: &PacpCatalog,
    segments: &[PipeSegment],
    count: usize,
) -> Result<Vec<SensorReading>, PipewatchError> {
    if segments.is_empty() && count > 0 {
        return Err(PipewatchError::InvalidInventory(
            "cannot attach readings to an empty inventory".to_string(),
        ));
    }

    let mut readings = Vec::with_capacity(count);
    for i in 0..count {
        let offset = Duration::seconds(ctx.rng().gen_range(0..=READING_WINDOW_HOURS * 3600));
        let timestamp = ctx.ago(offset);
        let rng = ctx.rng();

        let pipe = segments
            .choose(rng)
            .ok_or_else(|| PipewatchError::InvalidInventory("no segments".to_string()))?;
        let temperature = round_to(20.0 + rng.gen_range(-5.0..10.0), 1);
        let sound_level = round_to(45.0 + rng.gen_range(-10.0..25.0), 1);
        let flow_rate = round_to(rng.gen_range(5.0..20.0), 2);
        let camera_image_url = rng
            .gen_bool(CAMERA_IMAGE_PROBABILITY)
            .then(|| format!("/static/images/camera-{}.jpg", i % CAMERA_IMAGE_COUNT + 1));
        let entry = pick_code(catalog, PacpBucket::Random, rng)?;

        readings.push(SensorReading {
            id: format!("reading-{}", i + 1),
            pipe_segment_id: pipe.id.clone(),
            timestamp,
            temperature,
            sound_level,
            flow_rate,
            camera_image_url,
            risk_score: entry.code.risk_score(),
            pacp: entry.into(),
        });
    }

    readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(readings)
}

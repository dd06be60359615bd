//! AI-style defect analysis for degraded segments
//!
//! Only Fair and Poor segments are analysed. A Poor segment is always
//! Critical; a Fair one is High or Medium with equal odds. The PACP code
//! is drawn from the severity bucket matching the priority.

use pipewatch_core::{
    round_to, AiAnalysis, CorrosionLevel, GenerationContext, MaintenancePriority, PipeSegment,
    PipewatchError, QualityClass,
};
use pipewatch_pacp::{pick_code, PacpCatalog};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;

pub const CONTAMINANTS: [&str; 4] = [
    "Heavy Metals",
    "Industrial Waste",
    "Organic Matter",
    "Chemical Residue",
];

pub const POOR_FAILURE_MONTHS: std::ops::RangeInclusive<u32> = 4..=48;
pub const FAIR_FAILURE_MONTHS: std::ops::RangeInclusive<u32> = 12..=60;

const CRITICAL_CONFIDENCE_BASE: f64 = 0.75;
const CONFIDENCE_BASE: f64 = 0.70;
const CONFIDENCE_JITTER: f64 = 0.20;
const MAX_CONTAMINANTS: usize = 2;

pub fn generate_analyses(
    ctx: &mut GenerationContext,
    catalog: &PacpCatalog,
    segments: &[PipeSegment],
) -> Result<Vec<AiAnalysis>, PipewatchError> {
    let mut analyses = segments
        .iter()
        .filter(|s| s.quality.is_degraded())
        .map(|s| analyse(ctx, catalog, s))
        .collect::<Result<Vec<_>, _>>()?;

    analyses.sort_by_key(|a| Reverse(a.maintenance_priority.rank()));
    Ok(analyses)
}

fn analyse(
    ctx: &mut GenerationContext,
    catalog: &PacpCatalog,
    segment: &PipeSegment,
) -> Result<AiAnalysis, PipewatchError> {
    let rng = ctx.rng();
    let poor = segment.quality == QualityClass::Poor;

    // Poor draws from the two most severe levels, Fair from Low/Medium
    let scale = CorrosionLevel::SCALE;
    let corrosion_choices = if poor { &scale[3..] } else { &scale[1..3] };
    let corrosion_level = *corrosion_choices.choose(rng).unwrap_or(&CorrosionLevel::Medium);

    let maintenance_priority = if poor {
        MaintenancePriority::Critical
    } else if rng.gen_bool(0.5) {
        MaintenancePriority::High
    } else {
        MaintenancePriority::Medium
    };

    let entry = pick_code(catalog, maintenance_priority.pacp_bucket(), rng)?;

    let base = if maintenance_priority == MaintenancePriority::Critical {
        CRITICAL_CONFIDENCE_BASE
    } else {
        CONFIDENCE_BASE
    };
    let confidence = round_to(base + rng.gen_range(0.0..=CONFIDENCE_JITTER), 2);

    let predicted_failure_months = if poor {
        rng.gen_range(POOR_FAILURE_MONTHS)
    } else {
        rng.gen_range(FAIR_FAILURE_MONTHS)
    };

    let estimated_financial_age =
        (i64::from(segment.estimated_age) + rng.gen_range(-5..=10)).max(0) as u32;

    let contaminant_count = rng.gen_range(0..=MAX_CONTAMINANTS);
    let soil_contamination_detected = CONTAMINANTS
        .choose_multiple(rng, contaminant_count)
        .map(|c| c.to_string())
        .collect();

    let defect_location_meters =
        round_to(rng.gen_range(0.0..=f64::from(segment.length_meters)), 1);

    Ok(AiAnalysis {
        id: format!("analysis-{}", segment.id),
        pipe_segment_id: segment.id.clone(),
        corrosion_level,
        confidence,
        maintenance_priority,
        predicted_failure_months,
        estimated_financial_age,
        soil_contamination_detected,
        pacp: entry.into(),
        defect_location_meters,
        recommendation: maintenance_priority.recommendation().to_string(),
    })
}

//! Alerts raised from High and Critical analyses
use chrono::Duration;
use pipewatch_core::{AiAnalysis, Alert, AlertSeverity, GenerationContext, PipeSegment, PipewatchError};
use rand::Rng;

/// Alerts are back-dated by up to this many hours
pub const ALERT_WINDOW_HOURS: i64 = 48;

/// One alert per High/Critical analysis, critical first then most recent.
pub fn generate_alerts(
    ctx: &mut GenerationContext,
    segments: &[PipeSegment],
    analyses: &[AiAnalysis],
) -> Result<Vec<Alert>, PipewatchError> {
    let mut alerts = Vec::new();

    for analysis in analyses {
        let Some(severity) = AlertSeverity::from_priority(analysis.maintenance_priority) else {
            continue;
        };
        let segment = segments
            .iter()
            .find(|s| s.id == analysis.pipe_segment_id)
            .ok_or_else(|| PipewatchError::UnknownSegment(analysis.pipe_segment_id.clone()))?;

        let minutes = ctx.rng().gen_range(60..=ALERT_WINDOW_HOURS * 60);
        alerts.push(Alert {
            id: String::new(),
            pipe_segment_id: segment.id.clone(),
            pipe_segment_name: segment.name.clone(),
            severity,
            message: alert_message(severity, analysis),
            timestamp: ctx.ago(Duration::minutes(minutes)),
            pacp_code: analysis.pacp.pacp_code.clone(),
            pacp_name: analysis.pacp.pacp_name.clone(),
            confidence: analysis.confidence,
        });
    }

    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
    for (i, alert) in alerts.iter_mut().enumerate() {
        alert.id = format!("alert-{}", i + 1);
    }

    Ok(alerts)
}

fn alert_message(severity: AlertSeverity, analysis: &AiAnalysis) -> String {
    let months = analysis.predicted_failure_months;
    match severity {
        AlertSeverity::Critical => format!(
            "Critical {} ({}) detected. Immediate action required. Predicted failure in {} months.",
            analysis.pacp.pacp_name, analysis.pacp.pacp_code, months
        ),
        AlertSeverity::High => format!(
            "{} ({}) detected. Schedule inspection within 30 days. Predicted failure in {} months.",
            analysis.pacp.pacp_name, analysis.pacp.pacp_code, months
        ),
    }
}

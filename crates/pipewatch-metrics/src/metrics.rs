//! Inventory metrics collection and aggregation
//!
//! Everything is recomputed from the segments passed in, so the figures
//! always describe the inventory actually being served.

use pipewatch_core::{round_to, PipeSegment, QualityClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Segment counts per quality class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub great: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl QualityBreakdown {
    pub fn record(&mut self, quality: QualityClass) {
        *self.slot(quality) += 1;
    }

    pub fn count(&self, quality: QualityClass) -> usize {
        match quality {
            QualityClass::Great => self.great,
            QualityClass::Good => self.good,
            QualityClass::Fair => self.fair,
            QualityClass::Poor => self.poor,
        }
    }

    pub fn total(&self) -> usize {
        self.great + self.good + self.fair + self.poor
    }

    /// Most common class. Ties go to the healthier class.
    pub fn dominant(&self) -> Option<QualityClass> {
        if self.total() == 0 {
            return None;
        }
        let mut best = QualityClass::Great;
        for quality in QualityClass::ALL {
            if self.count(quality) > self.count(best) {
                best = quality;
            }
        }
        Some(best)
    }

    fn slot(&mut self, quality: QualityClass) -> &mut usize {
        match quality {
            QualityClass::Great => &mut self.great,
            QualityClass::Good => &mut self.good,
            QualityClass::Fair => &mut self.fair,
            QualityClass::Poor => &mut self.poor,
        }
    }
}

/// Dashboard summary of the inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub total_segments: usize,
    /// Sum of segment lengths, metres
    pub total_pipe_length: u64,
    /// Mean estimated age, one decimal
    pub average_age: f64,
    /// Dominant quality class, "Unknown" for an empty inventory
    pub average_quality: String,
    /// Poor segments
    pub high_risk_segments: usize,
    pub quality_breakdown: QualityBreakdown,
    pub pipe_type_breakdown: BTreeMap<String, usize>,
}

impl SystemMetrics {
    pub fn from_segments(segments: &[PipeSegment]) -> Self {
        let mut quality_breakdown = QualityBreakdown::default();
        let mut pipe_type_breakdown = BTreeMap::new();
        let mut total_pipe_length = 0u64;
        let mut total_age = 0u64;

        for segment in segments {
            quality_breakdown.record(segment.quality);
            *pipe_type_breakdown
                .entry(segment.pipe_type.to_string())
                .or_insert(0) += 1;
            total_pipe_length += u64::from(segment.length_meters);
            total_age += u64::from(segment.estimated_age);
        }

        let average_age = if segments.is_empty() {
            0.0
        } else {
            round_to(total_age as f64 / segments.len() as f64, 1)
        };

        Self {
            total_segments: segments.len(),
            total_pipe_length,
            average_age,
            average_quality: quality_breakdown
                .dominant()
                .map(|q| q.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            high_risk_segments: quality_breakdown.poor,
            quality_breakdown,
            pipe_type_breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pipewatch_core::PipeType;

    fn segment(id: u32, quality: QualityClass, pipe_type: PipeType, length: u32, age: u32) -> PipeSegment {
        PipeSegment {
            id: format!("pipe-{}", id),
            name: format!("Segment {}", id),
            quality,
            pipe_type,
            length_meters: length,
            diameter: 200,
            estimated_age: age,
            durability_score: 70,
            latitude: 42.28,
            longitude: -83.74,
            last_inspection_date: Utc::now(),
        }
    }

    #[test]
    fn test_aggregate() {
        let segments = vec![
            segment(1, QualityClass::Poor, PipeType::Clay, 100, 40),
            segment(2, QualityClass::Good, PipeType::Pvc, 200, 10),
            segment(3, QualityClass::Good, PipeType::Pvc, 300, 15),
        ];
        let metrics = SystemMetrics::from_segments(&segments);
        assert_eq!(metrics.total_segments, 3);
        assert_eq!(metrics.total_pipe_length, 600);
        assert_eq!(metrics.average_age, 21.7);
        assert_eq!(metrics.average_quality, "Good");
        assert_eq!(metrics.high_risk_segments, 1);
        assert_eq!(metrics.quality_breakdown.good, 2);
        assert_eq!(metrics.pipe_type_breakdown["PVC"], 2);
        assert_eq!(metrics.pipe_type_breakdown["Clay"], 1);
        assert!(!metrics.pipe_type_breakdown.contains_key("Steel"));
    }

    #[test]
    fn test_empty_inventory() {
        let metrics = SystemMetrics::from_segments(&[]);
        assert_eq!(metrics.total_segments, 0);
        assert_eq!(metrics.average_age, 0.0);
        assert_eq!(metrics.average_quality, "Unknown");
        assert_eq!(metrics.high_risk_segments, 0);
    }

    #[test]
    fn test_dominant_tie_prefers_healthier() {
        let mut breakdown = QualityBreakdown::default();
        breakdown.record(QualityClass::Poor);
        breakdown.record(QualityClass::Fair);
        assert_eq!(breakdown.dominant(), Some(QualityClass::Fair));
        breakdown.record(QualityClass::Poor);
        assert_eq!(breakdown.dominant(), Some(QualityClass::Poor));
    }

    #[test]
    fn test_json_shape() {
        let segments = vec![segment(1, QualityClass::Fair, PipeType::Steel, 50, 5)];
        let value = serde_json::to_value(SystemMetrics::from_segments(&segments)).unwrap();
        assert_eq!(value["totalPipeLength"], 50);
        assert_eq!(value["highRiskSegments"], 0);
        assert_eq!(value["qualityBreakdown"]["fair"], 1);
        assert_eq!(value["pipeTypeBreakdown"]["Steel"], 1);
        assert_eq!(value["averageQuality"], "Fair");
    }

    #[test]
    fn test_high_risk_counts_poor_only() {
        let segments = vec![
            segment(1, QualityClass::Poor, PipeType::Clay, 100, 40),
            segment(2, QualityClass::Fair, PipeType::Clay, 100, 30),
            segment(3, QualityClass::Great, PipeType::Pvc, 100, 5),
        ];
        assert_eq!(SystemMetrics::from_segments(&segments).high_risk_segments, 1);
    }
}

//! Data Model: pipe segments, readings, analyses, alerts, activity
use chrono::{DateTime, Utc};
use pipewatch_pacp::{PacpBucket, PacpCategory, PacpEntry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse health rating of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityClass {
    Great,
    Good,
    Fair,
    Poor,
}

impl QualityClass {
    pub const ALL: [QualityClass; 4] = [
        QualityClass::Great,
        QualityClass::Good,
        QualityClass::Fair,
        QualityClass::Poor,
    ];

    /// Fair and Poor segments are eligible for analysis
    pub fn is_degraded(&self) -> bool {
        matches!(self, QualityClass::Fair | QualityClass::Poor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityClass::Great => "Great",
            QualityClass::Good => "Good",
            QualityClass::Fair => "Fair",
            QualityClass::Poor => "Poor",
        }
    }
}

impl fmt::Display for QualityClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipe material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipeType {
    #[serde(rename = "PVC")]
    Pvc,
    Concrete,
    Clay,
    Steel,
}

impl PipeType {
    pub const ALL: [PipeType; 4] = [PipeType::Pvc, PipeType::Concrete, PipeType::Clay, PipeType::Steel];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipeType::Pvc => "PVC",
            PipeType::Concrete => "Concrete",
            PipeType::Clay => "Clay",
            PipeType::Steel => "Steel",
        }
    }
}

impl fmt::Display for PipeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeSegment {
    /// Sequential id (ex: "pipe-3")
    pub id: String,
    pub name: String,
    pub quality: QualityClass,
    pub pipe_type: PipeType,
    pub length_meters: u32,
    /// Diameter in millimetres
    pub diameter: u32,
    pub estimated_age: u32,
    /// 0-100
    pub durability_score: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub last_inspection_date: DateTime<Utc>,
}

/// PACP code fields copied onto a reading or analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacpTag {
    pub pacp_code: String,
    pub pacp_name: String,
    pub pacp_category: PacpCategory,
    pub pacp_score: u8,
}

impl From<PacpEntry<'_>> for PacpTag {
    fn from(entry: PacpEntry<'_>) -> Self {
        Self {
            pacp_code: entry.code.code.to_string(),
            pacp_name: entry.code.name.to_string(),
            pacp_category: entry.category,
            pacp_score: entry.code.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: String,
    /// Weak reference into the inventory
    pub pipe_segment_id: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub sound_level: f64,
    pub flow_rate: f64,
    pub camera_image_url: Option<String>,
    #[serde(flatten)]
    pub pacp: PacpTag,
    /// score / 5 * 10, one decimal
    pub risk_score: f64,
}

/// Five-level corrosion scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CorrosionLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl CorrosionLevel {
    pub const SCALE: [CorrosionLevel; 5] = [
        CorrosionLevel::None,
        CorrosionLevel::Low,
        CorrosionLevel::Medium,
        CorrosionLevel::High,
        CorrosionLevel::Critical,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaintenancePriority {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl MaintenancePriority {
    /// Critical=4 ... Low=1
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Severity bucket the analysis draws its PACP code from
    pub fn pacp_bucket(&self) -> PacpBucket {
        match self {
            MaintenancePriority::Critical => PacpBucket::Critical,
            MaintenancePriority::High => PacpBucket::High,
            MaintenancePriority::Medium | MaintenancePriority::Low => PacpBucket::Low,
        }
    }

    /// Whether analyses at this priority raise an alert
    pub fn raises_alert(&self) -> bool {
        matches!(self, MaintenancePriority::High | MaintenancePriority::Critical)
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            MaintenancePriority::Critical => {
                "Immediate repair required. Schedule emergency excavation or lining within 30 days."
            }
            MaintenancePriority::High => {
                "Plan rehabilitation within 6 months and increase inspection frequency."
            }
            MaintenancePriority::Medium => {
                "Monitor condition and include in the next 12-month capital plan."
            }
            MaintenancePriority::Low => "Continue routine inspection schedule.",
        }
    }
}

impl fmt::Display for MaintenancePriority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MaintenancePriority::Low => write!(f, "Low"),
            MaintenancePriority::Medium => write!(f, "Medium"),
            MaintenancePriority::High => write!(f, "High"),
            MaintenancePriority::Critical => write!(f, "Critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// "analysis-<pipe id>"
    pub id: String,
    pub pipe_segment_id: String,
    pub corrosion_level: CorrosionLevel,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub maintenance_priority: MaintenancePriority,
    pub predicted_failure_months: u32,
    pub estimated_financial_age: u32,
    pub soil_contamination_detected: Vec<String>,
    #[serde(flatten)]
    pub pacp: PacpTag,
    /// Metres from the upstream manhole
    pub defect_location_meters: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Critical,
}

impl AlertSeverity {
    pub fn from_priority(priority: MaintenancePriority) -> Option<Self> {
        match priority {
            MaintenancePriority::Critical => Some(AlertSeverity::Critical),
            MaintenancePriority::High => Some(AlertSeverity::High),
            _ => None,
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertSeverity::High => write!(f, "high"),
            AlertSeverity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub pipe_segment_id: String,
    pub pipe_segment_name: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub pacp_code: String,
    pub pacp_name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Inspection,
    Analysis,
    Alert,
    Maintenance,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Inspection,
        ActivityType::Analysis,
        ActivityType::Alert,
        ActivityType::Maintenance,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            ActivityType::Inspection => "Visual inspection completed",
            ActivityType::Analysis => "AI analysis completed with high confidence",
            ActivityType::Alert => "Critical alert generated for high-risk segment",
            ActivityType::Maintenance => "Scheduled maintenance completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub pipe_segment_id: String,
    pub activity_type: ActivityType,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

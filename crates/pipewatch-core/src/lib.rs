//! PipeWatch Core: Data Model, Error Model, Generation Context
//!
//! Shared types for the synthetic pipe-infrastructure dataset.

pub mod context;
pub mod data_model;
pub mod error;

pub use context::{round_to, GenerationContext};
pub use data_model::{
    ActivityEntry, ActivityType, AiAnalysis, Alert, AlertSeverity, CorrosionLevel,
    MaintenancePriority, PacpTag, PipeSegment, PipeType, QualityClass, SensorReading,
};
pub use error::PipewatchError;

/// PipeWatch engine version
pub const PIPEWATCH_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Center of the monitored network (Ann Arbor, MI)
pub const NETWORK_CENTER: (f64, f64) = (42.2808, -83.7430);

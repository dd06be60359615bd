//! PipeWatch Metrics: inventory summary statistics
//!
//! # Example
//!
//! ```
//! use pipewatch_metrics::aggregate;
//!
//! let metrics = aggregate(&[]);
//! assert_eq!(metrics.total_segments, 0);
//! assert_eq!(metrics.average_quality, "Unknown");
//! ```

pub mod metrics;

pub use metrics::{QualityBreakdown, SystemMetrics};

use pipewatch_core::PipeSegment;

/// Quick aggregation over an inventory
pub fn aggregate(segments: &[PipeSegment]) -> SystemMetrics {
    SystemMetrics::from_segments(segments)
}

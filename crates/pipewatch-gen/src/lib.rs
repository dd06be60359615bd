//! PipeWatch Gen: synthetic dataset generators
//!
//! Every generator is a function of a [`GenerationContext`] and the
//! collections produced before it. [`Dataset::generate`] runs them in
//! dependency order.
//!
//! # Pipeline Flow
//!
//! ```text
//! Inventory → Sensor Readings
//!     ↓
//!     └─→ AI Analysis → Alerts
//!     └─→ Recent Activity
//! ```
//!
//! # Example
//!
//! ```
//! use pipewatch_core::GenerationContext;
//! use pipewatch_gen::{Dataset, DatasetOptions};
//!
//! let mut ctx = GenerationContext::with_seed(42);
//! let dataset = Dataset::generate(&mut ctx, DatasetOptions::default()).unwrap();
//! assert_eq!(dataset.pipe_segments.len(), 14);
//! ```
//!
//! [`GenerationContext`]: pipewatch_core::GenerationContext

pub mod activity;
pub mod alerts;
pub mod analysis;
pub mod dataset;
pub mod pipes;
pub mod sensors;

pub use activity::generate_activity;
pub use alerts::generate_alerts;
pub use analysis::generate_analyses;
pub use dataset::{Dataset, DatasetOptions, StageReport};
pub use pipes::{
    curated_segments, generate_segments, random_segments, InventoryMode, DEFAULT_RANDOM_SEGMENTS,
    MAX_RANDOM_SEGMENTS,
};
pub use sensors::generate_readings;

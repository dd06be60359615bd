//! PipeWatch PACP: defect-code catalog
//!
//! Static catalog of Pipeline Assessment and Certification Program codes,
//! grouped by defect category, with severity-filtered random selection.
//!
//! # Example
//!
//! ```
//! use pipewatch_pacp::{pick_code, PacpBucket, PacpCatalog};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let entry = pick_code(PacpCatalog::standard(), PacpBucket::Critical, &mut rng).unwrap();
//! assert!(entry.code.score >= 4);
//! ```

pub mod bucket;
pub mod catalog;

pub use bucket::{pick_code, PacpBucket};
pub use catalog::{PacpCatalog, PacpCategory, PacpCode, PacpEntry};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacpError {
    #[error("PACP/CATEGORY: unknown category '{0}'")]
    UnknownCategory(String),

    #[error("PACP/BUCKET: no codes match the {0} bucket")]
    EmptyBucket(PacpBucket),
}

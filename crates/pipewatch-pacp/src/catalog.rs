//! PACP defect-code catalog
//!
//! Codes are grouped under five fixed defect categories. The standard
//! catalog is built once and shared for the process lifetime.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::PacpError;

/// Defect category a PACP code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacpCategory {
    Corrosion,
    Crack,
    Deposit,
    Root,
    Deformation,
}

impl PacpCategory {
    /// All categories in catalog order
    pub const ALL: [PacpCategory; 5] = [
        PacpCategory::Corrosion,
        PacpCategory::Crack,
        PacpCategory::Deposit,
        PacpCategory::Root,
        PacpCategory::Deformation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PacpCategory::Corrosion => "corrosion",
            PacpCategory::Crack => "crack",
            PacpCategory::Deposit => "deposit",
            PacpCategory::Root => "root",
            PacpCategory::Deformation => "deformation",
        }
    }
}

impl fmt::Display for PacpCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PacpCategory {
    type Err = PacpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PacpCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PacpError::UnknownCategory(s.to_string()))
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacpCode {
    /// Short code as it appears in inspection logs (ex: "SRC")
    pub code: &'static str,
    pub name: &'static str,
    /// Severity score, 1 (minor) to 5 (most severe)
    pub score: u8,
    pub description: &'static str,
}

impl PacpCode {
    pub const fn new(
        code: &'static str,
        name: &'static str,
        score: u8,
        description: &'static str,
    ) -> Self {
        Self { code, name, score, description }
    }

    /// Normalized 0-10 risk indicator, rounded to one decimal
    pub fn risk_score(&self) -> f64 {
        (f64::from(self.score) / 5.0 * 10.0 * 10.0).round() / 10.0
    }
}

/// Category → ordered codes
#[derive(Debug, Clone)]
pub struct PacpCatalog {
    groups: Vec<(PacpCategory, Vec<PacpCode>)>,
}

static STANDARD: Lazy<PacpCatalog> = Lazy::new(|| PacpCatalog::new(standard_groups()));

impl PacpCatalog {
    pub fn new(groups: Vec<(PacpCategory, Vec<PacpCode>)>) -> Self {
        Self { groups }
    }

    /// The built-in catalog covering all five categories
    pub fn standard() -> &'static PacpCatalog {
        &STANDARD
    }

    /// All codes in a category, in catalog order. Empty for a category
    /// the catalog does not carry.
    pub fn codes_for(&self, category: PacpCategory) -> &[PacpCode] {
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, codes)| codes.as_slice())
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = PacpCategory> + '_ {
        self.groups.iter().map(|(c, _)| *c)
    }

    pub fn groups(&self) -> &[(PacpCategory, Vec<PacpCode>)] {
        &self.groups
    }

    /// Every code paired with its category
    pub fn entries(&self) -> impl Iterator<Item = PacpEntry<'_>> {
        self.groups.iter().flat_map(|(category, codes)| {
            codes.iter().map(move |code| PacpEntry { category: *category, code })
        })
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, codes)| codes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grouped view used for the catalog endpoint
    pub fn to_map(&self) -> BTreeMap<PacpCategory, &[PacpCode]> {
        self.groups
            .iter()
            .map(|(c, codes)| (*c, codes.as_slice()))
            .collect()
    }
}

/// A code together with the category it was filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacpEntry<'a> {
    pub category: PacpCategory,
    pub code: &'a PacpCode,
}

fn standard_groups() -> Vec<(PacpCategory, Vec<PacpCode>)> {
    vec![
        (
            PacpCategory::Corrosion,
            vec![
                PacpCode::new("SAV", "Surface Aggregate Visible", 2, "Aggregate visible in the pipe wall after loss of cement paste"),
                PacpCode::new("SAP", "Surface Aggregate Projecting", 3, "Aggregate projecting from the wall surface"),
                PacpCode::new("SRV", "Surface Reinforcement Visible", 4, "Reinforcing steel exposed through the wall"),
                PacpCode::new("SRC", "Surface Reinforcement Corroded", 5, "Exposed reinforcement showing active corrosion"),
                PacpCode::new("SMW", "Surface Missing Wall", 5, "Section of pipe wall lost to corrosion"),
            ],
        ),
        (
            PacpCategory::Crack,
            vec![
                PacpCode::new("CC", "Crack Circumferential", 1, "Crack running around the circumference"),
                PacpCode::new("CL", "Crack Longitudinal", 2, "Crack running along the pipe axis"),
                PacpCode::new("CM", "Crack Multiple", 3, "Multiple cracks at one location"),
                PacpCode::new("FL", "Fracture Longitudinal", 3, "Open fracture along the pipe axis"),
                PacpCode::new("FM", "Fracture Multiple", 4, "Multiple fractures with visible separation"),
                PacpCode::new("BSV", "Broken Soil Visible", 5, "Broken pipe wall with surrounding soil visible"),
            ],
        ),
        (
            PacpCategory::Deposit,
            vec![
                PacpCode::new("DAE", "Deposits Attached Encrustation", 2, "Mineral encrustation attached to the wall"),
                PacpCode::new("DAGS", "Deposits Attached Grease", 2, "Grease deposits attached to the wall"),
                PacpCode::new("DSF", "Deposits Settled Fine", 3, "Fine silt settled in the invert"),
                PacpCode::new("DSGV", "Deposits Settled Gravel", 3, "Gravel settled in the invert"),
                PacpCode::new("DNO", "Deposits Ingressed Other", 4, "Foreign material ingressed into the pipe"),
            ],
        ),
        (
            PacpCategory::Root,
            vec![
                PacpCode::new("RFJ", "Roots Fine Joint", 1, "Fine roots entering at a joint"),
                PacpCode::new("RFB", "Roots Fine Barrel", 2, "Fine roots entering through the barrel"),
                PacpCode::new("RMJ", "Roots Medium Joint", 3, "Medium roots entering at a joint"),
                PacpCode::new("RTB", "Roots Tap Barrel", 4, "Tap root intrusion through the barrel"),
                PacpCode::new("RBB", "Roots Ball Barrel", 5, "Root ball obstructing the barrel"),
            ],
        ),
        (
            PacpCategory::Deformation,
            vec![
                PacpCode::new("DFBR", "Deformed Flexible Bulging Round", 2, "Flexible pipe bulging with round profile"),
                PacpCode::new("DFE", "Deformed Flexible Elliptical", 3, "Flexible pipe deflected to an elliptical shape"),
                PacpCode::new("DFC", "Deformed Flexible Creasing", 4, "Flexible pipe wall creased under load"),
                PacpCode::new("DR", "Deformed Rigid", 4, "Rigid pipe deformed out of round"),
                PacpCode::new("X", "Collapse", 5, "Pipe structurally collapsed"),
            ],
        ),
    ]
}

//! Severity-bucket selection over the catalog

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{PacpCatalog, PacpCategory, PacpCode, PacpEntry};
use crate::PacpError;

/// Severity filter applied before drawing a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacpBucket {
    /// Score 4 and above
    Critical,
    /// Score 3 to 4
    High,
    /// Score 2 and below
    Low,
    /// Uniform category, then uniform code within it
    Random,
}

impl PacpBucket {
    /// Whether a score falls in this bucket. `Critical` and `High` both
    /// accept a score of 4.
    pub fn accepts(&self, score: u8) -> bool {
        match self {
            PacpBucket::Critical => score >= 4,
            PacpBucket::High => (3..=4).contains(&score),
            PacpBucket::Low => score <= 2,
            PacpBucket::Random => true,
        }
    }
}

impl fmt::Display for PacpBucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PacpBucket::Critical => write!(f, "critical"),
            PacpBucket::High => write!(f, "high"),
            PacpBucket::Low => write!(f, "low"),
            PacpBucket::Random => write!(f, "random"),
        }
    }
}

/// Draw a code from `catalog` matching `bucket`.
///
/// Severity buckets draw uniformly over every matching code in the
/// catalog. `Random` first picks a non-empty category, then a code in it.
pub fn pick_code<'a, R: Rng + ?Sized>(
    catalog: &'a PacpCatalog,
    bucket: PacpBucket,
    rng: &mut R,
) -> Result<PacpEntry<'a>, PacpError> {
    match bucket {
        PacpBucket::Random => {
            let groups: Vec<&'a (PacpCategory, Vec<PacpCode>)> = catalog
                .groups()
                .iter()
                .filter(|(_, codes)| !codes.is_empty())
                .collect();
            let group = *groups.choose(rng).ok_or(PacpError::EmptyBucket(bucket))?;
            let code = group.1.choose(rng).ok_or(PacpError::EmptyBucket(bucket))?;
            Ok(PacpEntry { category: group.0, code })
        }
        _ => {
            let matching: Vec<_> = catalog
                .entries()
                .filter(|e| bucket.accepts(e.code.score))
                .collect();
            matching
                .choose(rng)
                .copied()
                .ok_or(PacpError::EmptyBucket(bucket))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bucket_accepts() {
        assert!(PacpBucket::Critical.accepts(4));
        assert!(PacpBucket::Critical.accepts(5));
        assert!(!PacpBucket::Critical.accepts(3));
        assert!(PacpBucket::High.accepts(3));
        assert!(PacpBucket::High.accepts(4));
        assert!(!PacpBucket::High.accepts(5));
        assert!(PacpBucket::Low.accepts(1));
        assert!(PacpBucket::Low.accepts(2));
        assert!(!PacpBucket::Low.accepts(3));
    }

    #[test]
    fn test_pick_respects_bucket() {
        let catalog = PacpCatalog::standard();
        let mut rng = StdRng::seed_from_u64(42);
        for bucket in [PacpBucket::Critical, PacpBucket::High, PacpBucket::Low] {
            for _ in 0..200 {
                let entry = pick_code(catalog, bucket, &mut rng).unwrap();
                assert!(bucket.accepts(entry.code.score), "{} drew {}", bucket, entry.code.code);
            }
        }
    }

    #[test]
    fn test_pick_random_covers_every_category() {
        let catalog = PacpCatalog::standard();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(pick_code(catalog, PacpBucket::Random, &mut rng).unwrap().category);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_pick_random_weights_categories_equally() {
        let mut groups = vec![(
            PacpCategory::Crack,
            vec![PacpCode::new("CC", "Crack Circumferential", 1, "")],
        )];
        let roots = ["R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8", "R9"]
            .into_iter()
            .map(|code| PacpCode::new(code, "Roots", 3, ""))
            .collect();
        groups.push((PacpCategory::Root, roots));
        let catalog = PacpCatalog::new(groups);

        let mut rng = StdRng::seed_from_u64(12);
        let draws = 2000;
        let cracks = (0..draws)
            .filter(|_| pick_code(&catalog, PacpBucket::Random, &mut rng).unwrap().category == PacpCategory::Crack)
            .count();
        // A uniform draw over codes would land near 10%
        let share = cracks as f64 / draws as f64;
        assert!((0.4..=0.6).contains(&share), "crack share {}", share);
    }

    #[test]
    fn test_pick_is_deterministic_for_seed() {
        let catalog = PacpCatalog::standard();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| pick_code(catalog, PacpBucket::Random, &mut rng).unwrap().code.code)
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(99), draw(99));
    }

    #[test]
    fn test_entry_category_matches_catalog() {
        let catalog = PacpCatalog::standard();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let entry = pick_code(catalog, PacpBucket::Random, &mut rng).unwrap();
            assert!(catalog.codes_for(entry.category).contains(entry.code));
        }
    }

    #[test]
    fn test_empty_bucket() {
        let catalog = PacpCatalog::new(vec![(
            PacpCategory::Crack,
            vec![PacpCode::new("CC", "Crack Circumferential", 1, "")],
        )]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = pick_code(&catalog, PacpBucket::Critical, &mut rng).unwrap_err();
        assert!(matches!(err, PacpError::EmptyBucket(PacpBucket::Critical)));

        let empty = PacpCatalog::new(vec![]);
        assert!(pick_code(&empty, PacpBucket::Random, &mut rng).is_err());
    }
}

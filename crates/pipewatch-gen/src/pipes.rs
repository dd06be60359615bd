//! Pipe segment inventory
//!
//! Two inventories are available: the curated 14-segment network used by
//! the dashboard, and a randomized one of configurable size.

use chrono::Duration;
use pipewatch_core::{GenerationContext, PipeSegment, PipeType, PipewatchError, QualityClass, NETWORK_CENTER};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Segment count for the randomized inventory when none is configured
pub const DEFAULT_RANDOM_SEGMENTS: usize = 20;
/// Upper bound on the randomized inventory size
pub const MAX_RANDOM_SEGMENTS: usize = 100;

pub const LENGTH_RANGE: std::ops::RangeInclusive<u32> = 50..=500;
pub const DIAMETERS: [u32; 5] = [150, 200, 250, 300, 400];
pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 5..=45;
pub const DURABILITY_RANGE: std::ops::RangeInclusive<u32> = 40..=95;
/// Maximum coordinate offset from the network center, in degrees
pub const COORDINATE_JITTER: f64 = 0.01;

/// Which inventory to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum InventoryMode {
    #[default]
    Curated,
    Random { count: usize },
}

impl fmt::Display for InventoryMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InventoryMode::Curated => write!(f, "curated"),
            InventoryMode::Random { count } => write!(f, "random({})", count),
        }
    }
}

impl FromStr for InventoryMode {
    type Err = PipewatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "curated" | "fixed" => Ok(InventoryMode::Curated),
            "random" => Ok(InventoryMode::Random { count: DEFAULT_RANDOM_SEGMENTS }),
            other => Err(PipewatchError::InvalidInventory(format!("unknown mode '{}'", other))),
        }
    }
}

pub fn generate_segments(
    ctx: &mut GenerationContext,
    mode: InventoryMode,
) -> Result<Vec<PipeSegment>, PipewatchError> {
    match mode {
        InventoryMode::Curated => Ok(curated_segments(ctx)),
        InventoryMode::Random { count: 0 } => Err(PipewatchError::InvalidInventory(
            "random inventory needs at least one segment".to_string(),
        )),
        InventoryMode::Random { count } if count > MAX_RANDOM_SEGMENTS => {
            Err(PipewatchError::InvalidInventory(format!(
                "random inventory is capped at {} segments, got {}",
                MAX_RANDOM_SEGMENTS, count
            )))
        }
        InventoryMode::Random { count } => Ok(random_segments(ctx, count)),
    }
}

struct CuratedSegment {
    name: &'static str,
    quality: QualityClass,
    pipe_type: PipeType,
    length_meters: u32,
    diameter: u32,
    estimated_age: u32,
    durability_score: u32,
    latitude: f64,
    longitude: f64,
    days_since_inspection: i64,
}

const fn curated(
    name: &'static str,
    quality: QualityClass,
    pipe_type: PipeType,
    dims: (u32, u32, u32, u32),
    coords: (f64, f64),
    days_since_inspection: i64,
) -> CuratedSegment {
    CuratedSegment {
        name,
        quality,
        pipe_type,
        length_meters: dims.0,
        diameter: dims.1,
        estimated_age: dims.2,
        durability_score: dims.3,
        latitude: coords.0,
        longitude: coords.1,
        days_since_inspection,
    }
}

// (length, diameter, age, durability)
const CURATED: [CuratedSegment; 14] = {
    use PipeType::*;
    use QualityClass::*;
    [
        curated("Main St Trunk Line", Poor, Clay, (420, 400, 44, 41), (42.2808, -83.7482), 210),
        curated("Huron Ave Interceptor", Poor, Concrete, (380, 300, 41, 44), (42.2812, -83.7451), 185),
        curated("Liberty St Lateral", Good, Pvc, (150, 200, 12, 86), (42.2795, -83.7490), 40),
        curated("Washington St Collector", Fair, Steel, (260, 250, 28, 63), (42.2801, -83.7440), 95),
        curated("State St Main", Great, Pvc, (310, 300, 6, 94), (42.2777, -83.7405), 20),
        curated("Division St Sewer", Good, Concrete, (275, 250, 18, 80), (42.2830, -83.7440), 60),
        curated("Packard Rd Trunk", Poor, Clay, (495, 400, 45, 40), (42.2720, -83.7380), 240),
        curated("William St Branch", Good, Pvc, (120, 150, 10, 88), (42.2790, -83.7455), 35),
        curated("Fifth Ave Lateral", Fair, Concrete, (190, 200, 31, 58), (42.2798, -83.7478), 120),
        curated("Kingsley St Connector", Good, Steel, (230, 250, 15, 82), (42.2855, -83.7460), 75),
        curated("Catherine St Main", Poor, Steel, (340, 300, 39, 46), (42.2840, -83.7425), 300),
        curated("Ann St Collector", Good, Clay, (205, 200, 20, 77), (42.2848, -83.7472), 50),
        curated("Plymouth Rd Interceptor", Great, Pvc, (480, 400, 5, 95), (42.2905, -83.7340), 14),
        curated("Fuller Rd Outfall", Good, Concrete, (360, 300, 22, 74), (42.2880, -83.7350), 88),
    ]
};

/// The fixed 14-segment network: 4 Poor, 2 Fair, 6 Good, 2 Great.
/// Only the inspection dates depend on the context clock.
pub fn curated_segments(ctx: &GenerationContext) -> Vec<PipeSegment> {
    CURATED
        .iter()
        .enumerate()
        .map(|(i, c)| PipeSegment {
            id: segment_id(i + 1),
            name: c.name.to_string(),
            quality: c.quality,
            pipe_type: c.pipe_type,
            length_meters: c.length_meters,
            diameter: c.diameter,
            estimated_age: c.estimated_age,
            durability_score: c.durability_score,
            latitude: c.latitude,
            longitude: c.longitude,
            last_inspection_date: ctx.ago(Duration::days(c.days_since_inspection)),
        })
        .collect()
}

pub fn random_segments(ctx: &mut GenerationContext, count: usize) -> Vec<PipeSegment> {
    let (lat, lon) = NETWORK_CENTER;
    (1..=count)
        .map(|i| {
            let days = ctx.rng().gen_range(1..=365);
            let last_inspection_date = ctx.ago(Duration::days(days));
            let rng = ctx.rng();
            PipeSegment {
                id: segment_id(i),
                name: random_name(i),
                quality: *QualityClass::ALL.choose(rng).unwrap_or(&QualityClass::Good),
                pipe_type: *PipeType::ALL.choose(rng).unwrap_or(&PipeType::Pvc),
                length_meters: rng.gen_range(LENGTH_RANGE),
                diameter: *DIAMETERS.choose(rng).unwrap_or(&DIAMETERS[0]),
                estimated_age: rng.gen_range(AGE_RANGE),
                durability_score: rng.gen_range(DURABILITY_RANGE),
                latitude: lat + rng.gen_range(-COORDINATE_JITTER..=COORDINATE_JITTER),
                longitude: lon + rng.gen_range(-COORDINATE_JITTER..=COORDINATE_JITTER),
                last_inspection_date,
            }
        })
        .collect()
}

pub fn segment_id(n: usize) -> String {
    format!("pipe-{}", n)
}

/// "Segment A-001" ... "Segment A-026", "Segment B-027" ...
fn random_name(n: usize) -> String {
    let block = char::from(b'A' + ((n - 1) / 26 % 26) as u8);
    format!("Segment {}-{:03}", block, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ctx() -> GenerationContext {
        GenerationContext::with_seed(42).at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_curated_distribution() {
        let segments = curated_segments(&ctx());
        assert_eq!(segments.len(), 14);
        let count = |q| segments.iter().filter(|s| s.quality == q).count();
        assert_eq!(count(QualityClass::Poor), 4);
        assert_eq!(count(QualityClass::Fair), 2);
        assert_eq!(count(QualityClass::Good), 6);
        assert_eq!(count(QualityClass::Great), 2);
    }

    #[test]
    fn test_curated_ids_sequential() {
        let segments = curated_segments(&ctx());
        for (i, s) in segments.iter().enumerate() {
            assert_eq!(s.id, format!("pipe-{}", i + 1));
        }
    }

    #[test]
    fn test_curated_attributes_in_range() {
        let (lat, lon) = NETWORK_CENTER;
        for s in curated_segments(&ctx()) {
            assert!(LENGTH_RANGE.contains(&s.length_meters), "{}", s.name);
            assert!(DIAMETERS.contains(&s.diameter), "{}", s.name);
            assert!(AGE_RANGE.contains(&s.estimated_age), "{}", s.name);
            assert!(DURABILITY_RANGE.contains(&s.durability_score), "{}", s.name);
            assert!((s.latitude - lat).abs() <= COORDINATE_JITTER, "{}", s.name);
            assert!((s.longitude - lon).abs() <= COORDINATE_JITTER, "{}", s.name);
        }
    }

    #[test]
    fn test_curated_inspection_dates_follow_clock() {
        let ctx = ctx();
        let segments = curated_segments(&ctx);
        assert_eq!(segments[0].last_inspection_date, ctx.now() - Duration::days(210));
        assert!(segments.iter().all(|s| s.last_inspection_date < ctx.now()));
    }

    #[test]
    fn test_random_segments_in_range() {
        let mut ctx = ctx();
        let now = ctx.now();
        let segments = random_segments(&mut ctx, 50);
        assert_eq!(segments.len(), 50);
        for s in &segments {
            assert!(LENGTH_RANGE.contains(&s.length_meters));
            assert!(DIAMETERS.contains(&s.diameter));
            assert!(AGE_RANGE.contains(&s.estimated_age));
            assert!(DURABILITY_RANGE.contains(&s.durability_score));
            let age = now - s.last_inspection_date;
            assert!(age >= Duration::days(1) && age <= Duration::days(365));
        }
    }

    #[test]
    fn test_random_names() {
        assert_eq!(random_name(1), "Segment A-001");
        assert_eq!(random_name(20), "Segment A-020");
        assert_eq!(random_name(27), "Segment B-027");
    }

    #[test]
    fn test_empty_random_inventory_rejected() {
        let err = generate_segments(&mut ctx(), InventoryMode::Random { count: 0 }).unwrap_err();
        assert!(matches!(err, PipewatchError::InvalidInventory(_)));
    }

    #[test]
    fn test_random_inventory_size_capped() {
        let segments = generate_segments(&mut ctx(), InventoryMode::Random { count: MAX_RANDOM_SEGMENTS }).unwrap();
        assert_eq!(segments.len(), MAX_RANDOM_SEGMENTS);

        for count in [MAX_RANDOM_SEGMENTS + 1, usize::MAX] {
            let err = generate_segments(&mut ctx(), InventoryMode::Random { count }).unwrap_err();
            assert!(matches!(err, PipewatchError::InvalidInventory(_)));
        }
    }

    #[test]
    fn test_inventory_mode_from_str() {
        assert_eq!("curated".parse::<InventoryMode>().unwrap(), InventoryMode::Curated);
        assert_eq!(
            "Random".parse::<InventoryMode>().unwrap(),
            InventoryMode::Random { count: DEFAULT_RANDOM_SEGMENTS }
        );
        assert!("legacy".parse::<InventoryMode>().is_err());
    }
}

//! Generation Context: random source and clock shared by every generator
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Explicit replacement for process-wide generator state.
///
/// One context drives a whole dataset build. Seeding it and pinning the
/// clock makes the build reproducible.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    rng: StdRng,
    now: DateTime<Utc>,
    seed: Option<u64>,
}

impl GenerationContext {
    /// Entropy-seeded context using the current time
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            now: Utc::now(),
            seed: None,
        }
    }

    /// Context with a fixed seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now: Utc::now(),
            seed: Some(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// Pin the clock all timestamps are measured back from
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// A timestamp `offset` before the context clock
    pub fn ago(&self, offset: Duration) -> DateTime<Utc> {
        self.now - offset
    }

    /// Random v4 id drawn from the context's own random source
    pub fn next_id(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

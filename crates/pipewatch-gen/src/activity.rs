//! Recent activity log
use chrono::Duration;
use pipewatch_core::{ActivityEntry, ActivityType, GenerationContext, PipeSegment, PipewatchError};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_ACTIVITY_COUNT: usize = 10;
/// One week
pub const ACTIVITY_WINDOW_HOURS: i64 = 168;

pub fn generate_activity(
    ctx: &mut GenerationContext,
    segments: &[PipeSegment],
    count: usize,
) -> Result<Vec<ActivityEntry>, PipewatchError> {
    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let hours = ctx.rng().gen_range(1..=ACTIVITY_WINDOW_HOURS);
        let timestamp = ctx.ago(Duration::hours(hours));
        let rng = ctx.rng();
        let pipe = segments.choose(rng).ok_or_else(|| {
            PipewatchError::InvalidInventory("cannot log activity for an empty inventory".to_string())
        })?;
        let activity_type = *ActivityType::ALL.choose(rng).unwrap_or(&ActivityType::Inspection);

        entries.push(ActivityEntry {
            id: format!("activity-{}", i + 1),
            pipe_segment_id: pipe.id.clone(),
            activity_type,
            description: format!("{} - {}", activity_type.description(), pipe.name),
            timestamp,
        });
    }

    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipes::curated_segments;

    #[test]
    fn test_activity_log() {
        let mut ctx = GenerationContext::with_seed(31);
        let segments = curated_segments(&ctx);
        let now = ctx.now();
        let entries = generate_activity(&mut ctx, &segments, DEFAULT_ACTIVITY_COUNT).unwrap();

        assert_eq!(entries.len(), 10);
        assert!(entries.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        for e in &entries {
            let pipe = segments.iter().find(|s| s.id == e.pipe_segment_id).unwrap();
            assert!(e.description.ends_with(&pipe.name));
            assert!(e.description.starts_with(e.activity_type.description()));
            let age = now - e.timestamp;
            assert!(age >= Duration::hours(1) && age <= Duration::hours(ACTIVITY_WINDOW_HOURS));
        }
    }

    #[test]
    fn test_empty_inventory() {
        let mut ctx = GenerationContext::with_seed(1);
        assert!(generate_activity(&mut ctx, &[], 3).is_err());
    }
}

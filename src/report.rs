//! Aggregate figures for a ranked resource set.

use crate::generation::static_fallback_resources;
use crate::resource::{Difficulty, ResourceCandidate, ResourceSet, ResourceType};

const MAX_QUALITY: f64 = 10.0;

fn minutes_for(resource_type: ResourceType) -> u32 {
    match resource_type {
        ResourceType::Video => 45,
        ResourceType::Tutorial => 90,
        ResourceType::Documentation => 60,
        ResourceType::Course => 180,
        _ => 30,
    }
}

/// Format a minute count as "40 minutes", "3 hours" or "2h 15m".
pub fn format_duration(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours == 0 {
        format!("{} minutes", minutes)
    } else if minutes == 0 {
        format!("{} hours", hours)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}

/// Estimated study time for a set of resources.
pub fn estimated_time(resources: &[ResourceCandidate]) -> String {
    let total = resources.iter().map(|r| minutes_for(r.resource_type)).sum();
    format_duration(total)
}

/// Average quality plus a bonus of up to 2 for verified links, capped at 10.
pub fn quality_score(resources: &[ResourceCandidate]) -> f64 {
    if resources.is_empty() {
        return 0.0;
    }

    let count = resources.len() as f64;
    let total: u32 = resources.iter().map(|r| u32::from(r.quality())).sum();
    let verified = resources.iter().filter(|r| r.verified).count() as f64;

    let average = f64::from(total) / count;
    (average + verified / count * 2.0).min(MAX_QUALITY)
}

/// Truncate ranked candidates to `top_n` and attach the aggregate figures.
pub fn build_set(
    mut ranked: Vec<ResourceCandidate>,
    difficulty: Difficulty,
    top_n: usize,
) -> ResourceSet {
    ranked.truncate(top_n);
    ResourceSet {
        estimated_time: estimated_time(&ranked),
        quality_score: quality_score(&ranked),
        resources: ranked,
        difficulty,
        learning_path_suggested: true,
    }
}

impl ResourceSet {
    /// Generic placeholder set returned when discovery found nothing.
    pub fn static_fallback(topic: &str, difficulty: Difficulty) -> Self {
        let resources = static_fallback_resources(topic);
        build_set(resources, difficulty, usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceSource;

    fn of_type(resource_type: ResourceType) -> ResourceCandidate {
        ResourceCandidate::new(
            "t",
            "p",
            resource_type,
            "https://example.com",
            "d",
            ResourceSource::Fallback,
        )
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 minutes");
        assert_eq!(format_duration(45), "45 minutes");
        assert_eq!(format_duration(180), "3 hours");
        assert_eq!(format_duration(135), "2h 15m");
    }

    #[test]
    fn test_estimated_time_video_plus_tutorial() {
        let set = [of_type(ResourceType::Video), of_type(ResourceType::Tutorial)];
        assert_eq!(estimated_time(&set), "2h 15m");
    }

    #[test]
    fn test_other_types_count_thirty_minutes() {
        let set = [of_type(ResourceType::Article), of_type(ResourceType::Book)];
        assert_eq!(estimated_time(&set), "1 hours");
    }

    #[test]
    fn test_quality_score_empty_is_zero() {
        assert_eq!(quality_score(&[]), 0.0);
    }

    #[test]
    fn test_quality_score_bonus_and_cap() {
        let half = [
            of_type(ResourceType::Video).with_quality(8).verified(),
            of_type(ResourceType::Video).with_quality(6),
        ];
        assert!((quality_score(&half) - 8.0).abs() < 1e-9);

        let capped = [of_type(ResourceType::Video).with_quality(10).verified()];
        assert_eq!(quality_score(&capped), 10.0);
    }

    #[test]
    fn test_static_fallback_set() {
        let set = ResourceSet::static_fallback("Rust", Difficulty::Intermediate);
        assert_eq!(set.resources.len(), 2);
        assert_eq!(set.resources[0].title, "Rust - Basic Guide");
        assert_eq!(set.estimated_time, "1h 15m");
        assert_eq!(set.quality_score, 5.0);
        assert!(set
            .resources
            .iter()
            .all(|r| !r.verified && r.source == ResourceSource::StaticFallback));
    }

    #[test]
    fn test_build_set_truncates() {
        let ranked = (0..8).map(|_| of_type(ResourceType::Video)).collect();
        let set = build_set(ranked, Difficulty::Beginner, 6);
        assert_eq!(set.resources.len(), 6);
        assert_eq!(set.estimated_time, "4h 30m");
        assert!(set.learning_path_suggested);
    }
}

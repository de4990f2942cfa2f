//! Candidate scoring and ordering.

use crate::resource::{ResourceCandidate, ResourceType};
use tracing::debug;

const VERIFIED_BONUS: u32 = 5;

/// Platform reputation tiers, checked in order. Only the first matching tier applies.
const OFFICIAL_PLATFORMS: &[&str] = &["official", "mdn", "python.org", "docs"];
const TRUSTED_PLATFORMS: &[&str] = &["geeksforgeeks", "w3schools", "real python"];

fn platform_bonus(candidate: &ResourceCandidate) -> u32 {
    let platform = candidate.platform.to_lowercase();
    if OFFICIAL_PLATFORMS.iter().any(|p| platform.contains(p)) {
        8
    } else if TRUSTED_PLATFORMS.iter().any(|p| platform.contains(p)) {
        6
    } else if platform.contains("youtube") && candidate.quality_rating.unwrap_or(0) >= 7 {
        5
    } else {
        0
    }
}

fn type_bonus(resource_type: ResourceType) -> u32 {
    match resource_type {
        ResourceType::Tutorial | ResourceType::Documentation => 3,
        ResourceType::Course => 2,
        _ => 0,
    }
}

/// Composite score for one candidate.
pub fn score(candidate: &ResourceCandidate) -> u32 {
    let mut score = u32::from(candidate.quality()) * 2;
    if candidate.verified {
        score += VERIFIED_BONUS;
    }
    score += platform_bonus(candidate);
    score += u32::from(candidate.difficulty_fit());
    score += type_bonus(candidate.resource_type);
    score
}

/// Score every candidate and sort by score, highest first. Ties keep input order.
pub fn rank(mut candidates: Vec<ResourceCandidate>) -> Vec<ResourceCandidate> {
    for candidate in &mut candidates {
        candidate.final_score = Some(score(candidate));
    }
    candidates.sort_by(|a, b| b.final_score.cmp(&a.final_score));
    debug!("Ranked {} candidates", candidates.len());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceSource;

    fn candidate(title: &str, platform: &str, resource_type: ResourceType) -> ResourceCandidate {
        ResourceCandidate::new(
            title,
            platform,
            resource_type,
            "https://example.com",
            "d",
            ResourceSource::AiCurated,
        )
    }

    #[test]
    fn test_official_documentation_score() {
        let c = candidate("Docs", "Python.org docs", ResourceType::Documentation)
            .with_quality(10)
            .with_difficulty_match(9)
            .verified();
        assert_eq!(score(&c), 45);
    }

    #[test]
    fn test_defaults_and_no_bonus() {
        // 5*2 + 0 + 0 + 5 + 0
        let c = candidate("Article", "Medium", ResourceType::Article);
        assert_eq!(score(&c), 15);
    }

    #[test]
    fn test_youtube_bonus_needs_explicit_quality() {
        let unrated = candidate("V", "YouTube", ResourceType::Video);
        assert_eq!(platform_bonus(&unrated), 0);

        let good = candidate("V", "YouTube", ResourceType::Video).with_quality(7);
        assert_eq!(platform_bonus(&good), 5);

        let weak = candidate("V", "YouTube", ResourceType::Video).with_quality(6);
        assert_eq!(platform_bonus(&weak), 0);
    }

    #[test]
    fn test_first_platform_tier_wins() {
        let c = candidate("X", "GeeksforGeeks official", ResourceType::Tutorial);
        assert_eq!(platform_bonus(&c), 8);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let ranked = rank(vec![
            candidate("first", "Medium", ResourceType::Article),
            candidate("top", "MDN Web Docs", ResourceType::Documentation).with_quality(10),
            candidate("second", "Medium", ResourceType::Article),
        ]);

        let titles: Vec<_> = ranked.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["top", "first", "second"]);
        assert!(ranked.iter().all(|c| c.final_score.is_some()));
    }

    #[test]
    fn test_rank_is_idempotent() {
        let once = rank(vec![
            candidate("a", "W3Schools", ResourceType::Tutorial).with_quality(8),
            candidate("b", "Coursera", ResourceType::Course).with_quality(9),
            candidate("c", "YouTube", ResourceType::Video).with_quality(8),
        ]);
        let twice = rank(once.clone());
        assert_eq!(once, twice);
    }
}

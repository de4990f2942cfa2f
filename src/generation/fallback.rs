//! Hardcoded quality resources used when generation fails.

use super::CandidateSource;
use crate::error::Result;
use crate::resource::{Difficulty, ResourceCandidate, ResourceSource, ResourceType};
use async_trait::async_trait;

const WEB_KEYWORDS: &[&str] = &["javascript", "html", "css", "web"];

/// Keyword-driven fallback list. May legitimately be empty.
pub fn fallback_resources(topic: &str) -> Vec<ResourceCandidate> {
    let topic = topic.to_lowercase();
    let mut resources = Vec::new();

    if topic.contains("python") {
        resources.push(
            ResourceCandidate::new(
                "Python Tutorial - Real Python",
                "Real Python",
                ResourceType::Tutorial,
                "https://realpython.com/",
                "High-quality Python tutorials for all skill levels",
                ResourceSource::Fallback,
            )
            .with_quality(9)
            .verified(),
        );
        resources.push(
            ResourceCandidate::new(
                "Python Programming - GeeksforGeeks",
                "GeeksforGeeks",
                ResourceType::Tutorial,
                "https://www.geeksforgeeks.org/python-programming-language/",
                "Comprehensive Python programming guide with examples",
                ResourceSource::Fallback,
            )
            .with_quality(8)
            .verified(),
        );
    }

    if WEB_KEYWORDS.iter().any(|k| topic.contains(k)) {
        resources.push(
            ResourceCandidate::new(
                "MDN Web Docs",
                "MDN Web Docs",
                ResourceType::Documentation,
                "https://developer.mozilla.org/",
                "Mozilla's comprehensive web development documentation",
                ResourceSource::Fallback,
            )
            .with_quality(10)
            .verified(),
        );
        resources.push(
            ResourceCandidate::new(
                "W3Schools Tutorial",
                "W3Schools",
                ResourceType::Tutorial,
                "https://www.w3schools.com/",
                "Interactive web development tutorials and references",
                ResourceSource::Fallback,
            )
            .with_quality(8)
            .verified(),
        );
    }

    resources
}

/// Generic entries returned to the caller when the whole pipeline comes up empty.
pub fn static_fallback_resources(topic: &str) -> Vec<ResourceCandidate> {
    let topic = topic.trim();
    vec![
        ResourceCandidate::new(
            format!("{} - Basic Guide", topic),
            "GeeksforGeeks",
            ResourceType::Article,
            "https://www.geeksforgeeks.org/",
            format!("Comprehensive guide to {}", topic),
            ResourceSource::StaticFallback,
        ),
        ResourceCandidate::new(
            format!("{} Tutorial", topic),
            "YouTube",
            ResourceType::Video,
            "https://www.youtube.com/",
            format!("Video tutorial on {}", topic),
            ResourceSource::StaticFallback,
        ),
    ]
}

/// [`CandidateSource`] wrapper around [`fallback_resources`].
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordFallbackSource;

impl KeywordFallbackSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CandidateSource for KeywordFallbackSource {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn generate(
        &self,
        topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<ResourceCandidate>> {
        Ok(fallback_resources(topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_fallbacks() {
        let resources = fallback_resources("Python for data analysis");
        let platforms: Vec<_> = resources.iter().map(|r| r.platform.as_str()).collect();
        assert_eq!(platforms, vec!["Real Python", "GeeksforGeeks"]);
        assert!(resources.iter().all(|r| r.verified));
    }

    #[test]
    fn test_python_and_web_fallbacks_combine() {
        let resources = fallback_resources("Python web scraping");
        assert_eq!(resources.len(), 4);
        assert_eq!(resources[2].platform, "MDN Web Docs");
    }

    #[test]
    fn test_unknown_topic_has_no_fallbacks() {
        assert!(fallback_resources("organic chemistry").is_empty());
    }

    #[test]
    fn test_static_fallback_is_never_empty() {
        let resources = static_fallback_resources("Quantum Computing");
        assert_eq!(resources.len(), 2);
        assert!(resources.iter().all(|r| r.source == ResourceSource::StaticFallback));
        assert!(resources.iter().all(|r| !r.verified));
        assert_eq!(resources[0].title, "Quantum Computing - Basic Guide");
    }
}

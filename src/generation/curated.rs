//! Static keyword-to-URL mapping.
//!
//! The fastest and most reliable candidate source: one canonical page per known topic,
//! and a general programming index for everything else, so it never comes back empty.

use super::CandidateSource;
use crate::error::Result;
use crate::resource::{Difficulty, ResourceCandidate, ResourceSource, ResourceType};
use async_trait::async_trait;

/// Quality assigned to curated links.
const CURATED_QUALITY: u8 = 9;

/// One row of the curated table.
#[derive(Debug, Clone, Copy)]
pub struct CuratedLink {
    pub keyword: &'static str,
    pub title: &'static str,
    pub platform: &'static str,
    pub url: &'static str,
}

/// Keyword table, checked in order. Longer keywords sit before their substrings
/// ("javascript" before "java").
pub const CURATED_LINKS: &[CuratedLink] = &[
    CuratedLink {
        keyword: "machine learning",
        title: "Machine Learning Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/machine-learning/",
    },
    CuratedLink {
        keyword: "artificial intelligence",
        title: "Artificial Intelligence Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/artificial-intelligence/",
    },
    CuratedLink {
        keyword: "data structure",
        title: "Data Structures Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/data-structures/",
    },
    CuratedLink {
        keyword: "algorithm",
        title: "Algorithms Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/algorithms/",
    },
    CuratedLink {
        keyword: "javascript",
        title: "JavaScript Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/javascript/",
    },
    CuratedLink {
        keyword: "java",
        title: "Java Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/java/",
    },
    CuratedLink {
        keyword: "python",
        title: "Python Programming Language Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/python-programming-language/",
    },
    CuratedLink {
        keyword: "react",
        title: "React Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/reactjs/",
    },
    CuratedLink {
        keyword: "node",
        title: "Node.js Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/nodejs/",
    },
    CuratedLink {
        keyword: "sql",
        title: "SQL Tutorial",
        platform: "GeeksforGeeks",
        url: "https://www.geeksforgeeks.org/sql-tutorial/",
    },
    CuratedLink {
        keyword: "html",
        title: "HTML Tutorial",
        platform: "W3Schools",
        url: "https://www.w3schools.com/html/",
    },
    CuratedLink {
        keyword: "css",
        title: "CSS Tutorial",
        platform: "W3Schools",
        url: "https://www.w3schools.com/css/",
    },
];

/// Used when no keyword matches.
pub const DEFAULT_LINK: CuratedLink = CuratedLink {
    keyword: "",
    title: "Programming Tutorials",
    platform: "GeeksforGeeks",
    url: "https://www.geeksforgeeks.org/",
};

/// Find the curated link for a topic (case-insensitive substring match).
pub fn lookup(topic: &str) -> &'static CuratedLink {
    let topic = topic.to_lowercase();
    CURATED_LINKS
        .iter()
        .find(|link| topic.contains(link.keyword))
        .unwrap_or(&DEFAULT_LINK)
}

/// Candidate source backed by [`CURATED_LINKS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CuratedMappingSource;

impl CuratedMappingSource {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`CandidateSource::generate`]; always exactly one candidate.
    pub fn resolve(&self, topic: &str, difficulty: Difficulty) -> ResourceCandidate {
        let link = lookup(topic);
        ResourceCandidate::new(
            link.title,
            link.platform,
            ResourceType::Tutorial,
            link.url,
            format!(
                "Curated {} material on {} from {}",
                difficulty,
                topic.trim(),
                link.platform
            ),
            ResourceSource::CuratedLinks,
        )
        .with_quality(CURATED_QUALITY)
        .verified()
    }
}

#[async_trait]
impl CandidateSource for CuratedMappingSource {
    fn name(&self) -> &'static str {
        "curated"
    }

    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<ResourceCandidate>> {
        Ok(vec![self.resolve(topic, difficulty)])
    }
}

//! Learning resource data model.
//!
//! A [`ResourceCandidate`] lives for exactly one discovery request: it is created by a
//! candidate source or the augmenter, mutated by the enhancer and ranker, read by the
//! reporter, and dropped once the [`ResourceSet`] response is built.

use serde::{Deserialize, Serialize};

/// Rating used for scoring when a candidate carries none.
pub const DEFAULT_RATING: u8 = 5;

/// Kind of learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Tutorial,
    Documentation,
    Course,
    Article,
    Video,
    Book,
    AiGuide,
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tutorial" => Ok(ResourceType::Tutorial),
            "documentation" | "docs" => Ok(ResourceType::Documentation),
            "course" => Ok(ResourceType::Course),
            "article" => Ok(ResourceType::Article),
            "video" => Ok(ResourceType::Video),
            "book" => Ok(ResourceType::Book),
            "ai_guide" => Ok(ResourceType::AiGuide),
            _ => Err(format!("Unknown resource type: {}", s)),
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceType::Tutorial => "tutorial",
            ResourceType::Documentation => "documentation",
            ResourceType::Course => "course",
            ResourceType::Article => "article",
            ResourceType::Video => "video",
            ResourceType::Book => "book",
            ResourceType::AiGuide => "ai_guide",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of URL validation for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UrlStatus {
    /// Not validated yet.
    #[default]
    Unset,
    Accessible,
    FixedAndAccessible,
    Inaccessible,
}

impl UrlStatus {
    pub fn is_unset(&self) -> bool {
        matches!(self, UrlStatus::Unset)
    }
}

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSource {
    AiCurated,
    CuratedLinks,
    YoutubeApi,
    OfficialDocs,
    BooksApi,
    Fallback,
    StaticFallback,
}

/// Requested learning level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!(
                "Unknown level '{}'. Expected beginner, intermediate or advanced",
                s
            )),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// A single proposed learning resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCandidate {
    pub title: String,
    pub platform: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub url: String,
    pub description: String,
    /// Educational quality, 1-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_rating: Option<u8>,
    /// Fit with the requested difficulty, 1-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_match: Option<u8>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "UrlStatus::is_unset")]
    pub url_status: UrlStatus,
    pub source: ResourceSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    /// Channel name for video results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Authors for book results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
}

impl ResourceCandidate {
    /// Create an unverified candidate with default ratings.
    pub fn new(
        title: impl Into<String>,
        platform: impl Into<String>,
        resource_type: ResourceType,
        url: impl Into<String>,
        description: impl Into<String>,
        source: ResourceSource,
    ) -> Self {
        Self {
            title: title.into(),
            platform: platform.into(),
            resource_type,
            url: url.into(),
            description: description.into(),
            quality_rating: None,
            difficulty_match: None,
            verified: false,
            url_status: UrlStatus::Unset,
            source,
            final_score: None,
            channel: None,
            authors: None,
        }
    }

    pub fn with_quality(mut self, rating: u8) -> Self {
        self.quality_rating = Some(rating);
        self
    }

    pub fn with_difficulty_match(mut self, rating: u8) -> Self {
        self.difficulty_match = Some(rating);
        self
    }

    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }

    /// Quality rating used for scoring and aggregation.
    pub fn quality(&self) -> u8 {
        self.quality_rating.unwrap_or(DEFAULT_RATING)
    }

    /// Difficulty match used for scoring.
    pub fn difficulty_fit(&self) -> u8 {
        self.difficulty_match.unwrap_or(DEFAULT_RATING)
    }
}

/// The ranked, truncated response for one discovery request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSet {
    pub resources: Vec<ResourceCandidate>,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub quality_score: f64,
    pub learning_path_suggested: bool,
}

//! LLM-curated candidate source.
//!
//! Asks the generation provider for 5-6 resources from trusted platforms and decodes
//! the reply strictly: every entry must carry the required fields with valid values or
//! it is dropped.

use super::{CandidateSource, TextGenerator};
use crate::config::Prompts;
use crate::error::{KildeError, Result};
use crate::resource::{Difficulty, ResourceCandidate, ResourceSource, ResourceType};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Rating applied when the model omits one.
const DEFAULT_AI_RATING: u8 = 8;

/// Candidate source backed by a [`TextGenerator`].
pub struct AiCuratedSource {
    generator: Option<Arc<dyn TextGenerator>>,
    prompts: Prompts,
}

impl AiCuratedSource {
    /// `generator` is `None` when no provider credential is configured.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, prompts: Prompts) -> Self {
        Self { generator, prompts }
    }
}

#[async_trait]
impl CandidateSource for AiCuratedSource {
    fn name(&self) -> &'static str {
        "ai"
    }

    #[instrument(skip(self), fields(source = "ai"))]
    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<ResourceCandidate>> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            KildeError::ProviderUnavailable("No text generation provider configured".to_string())
        })?;

        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), topic.to_string());
        vars.insert("difficulty".to_string(), difficulty.to_string());

        let system = self.prompts.render_with_custom(&self.prompts.curation.system, &vars);
        let user = self.prompts.render_with_custom(&self.prompts.curation.user, &vars);

        let response = generator.generate(&system, &user).await?;
        let candidates = parse_curation_response(&response)?;

        info!("AI curation produced {} usable candidates", candidates.len());
        Ok(candidates)
    }
}

/// Raw entry as the model is asked to produce it.
#[derive(Debug, Deserialize)]
struct CuratedEntry {
    title: String,
    platform: String,
    #[serde(rename = "type")]
    resource_type: String,
    url: String,
    description: String,
    #[serde(default)]
    difficulty_match: Option<u8>,
    #[serde(default)]
    quality_rating: Option<u8>,
}

impl CuratedEntry {
    fn validate(self) -> std::result::Result<ResourceCandidate, String> {
        for (field, value) in [
            ("title", &self.title),
            ("platform", &self.platform),
            ("url", &self.url),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(format!("empty '{}'", field));
            }
        }

        let resource_type: ResourceType = self.resource_type.parse()?;
        let quality = check_rating("quality_rating", self.quality_rating)?;
        let difficulty = check_rating("difficulty_match", self.difficulty_match)?;

        Ok(ResourceCandidate::new(
            self.title.trim(),
            self.platform.trim(),
            resource_type,
            self.url.trim(),
            self.description.trim(),
            ResourceSource::AiCurated,
        )
        .with_quality(quality)
        .with_difficulty_match(difficulty))
    }
}

fn check_rating(field: &str, rating: Option<u8>) -> std::result::Result<u8, String> {
    match rating {
        None => Ok(DEFAULT_AI_RATING),
        Some(r) if (1..=10).contains(&r) => Ok(r),
        Some(r) => Err(format!("'{}' out of range: {}", field, r)),
    }
}

/// Decode a curation reply into candidates.
///
/// Fails only when the reply is not a JSON array at all; malformed entries are
/// logged and skipped.
pub fn parse_curation_response(response: &str) -> Result<Vec<ResourceCandidate>> {
    let json_start = response.find('[');
    let json_end = response.rfind(']');

    let json_str = match (json_start, json_end) {
        (Some(start), Some(end)) if end > start => &response[start..=end],
        _ => response,
    };

    let entries: Vec<serde_json::Value> = serde_json::from_str(json_str).map_err(|e| {
        KildeError::Parse(format!(
            "Curation response is not a JSON array: {}. Response was: {}",
            e,
            response.chars().take(300).collect::<String>()
        ))
    })?;

    let mut candidates = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let decoded = serde_json::from_value::<CuratedEntry>(entry)
            .map_err(|e| e.to_string())
            .and_then(CuratedEntry::validate);

        match decoded {
            Ok(candidate) => candidates.push(candidate),
            Err(reason) => warn!("Dropping curated entry #{}: {}", index, reason),
        }
    }

    Ok(candidates)
}

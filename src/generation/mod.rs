//! Candidate generation.
//!
//! Sources share one contract and are tried in order by a [`CandidateChain`] until one
//! yields a non-empty list:
//!
//! - `curated` strategy: static mapping only (always exactly one candidate).
//! - `ai` strategy: LLM curation, then keyword fallbacks, then the static mapping.

mod ai;
mod curated;
mod fallback;
mod llm;

pub use ai::{parse_curation_response, AiCuratedSource};
pub use curated::{lookup, CuratedLink, CuratedMappingSource, CURATED_LINKS, DEFAULT_LINK};
pub use fallback::{fallback_resources, static_fallback_resources, KeywordFallbackSource};
pub use llm::{OpenAiGenerator, TextGenerator};

use crate::config::{GenerationStrategy, Prompts};
use crate::error::{KildeError, Result};
use crate::resource::{Difficulty, ResourceCandidate};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Anything that can propose candidates for a topic.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<ResourceCandidate>>;
}

/// Ordered chain of candidate sources.
#[derive(Clone)]
pub struct CandidateChain {
    sources: Vec<Arc<dyn CandidateSource>>,
    source_timeout: Option<Duration>,
}

impl CandidateChain {
    pub fn new(sources: Vec<Arc<dyn CandidateSource>>) -> Self {
        Self {
            sources,
            source_timeout: None,
        }
    }

    /// Bound every source call. A source that runs over counts as failed and the
    /// next one is tried.
    pub fn with_source_timeout(mut self, limit: Duration) -> Self {
        self.source_timeout = Some(limit);
        self
    }

    /// Build the chain for a generation strategy.
    pub fn for_strategy(
        strategy: GenerationStrategy,
        generator: Option<Arc<dyn TextGenerator>>,
        prompts: Prompts,
    ) -> Self {
        let curated: Arc<dyn CandidateSource> = Arc::new(CuratedMappingSource::new());
        match strategy {
            GenerationStrategy::Curated => Self::new(vec![curated]),
            GenerationStrategy::Ai => {
                let ai: Arc<dyn CandidateSource> =
                    Arc::new(AiCuratedSource::new(generator, prompts));
                let fallback: Arc<dyn CandidateSource> = Arc::new(KeywordFallbackSource::new());
                Self::new(vec![ai, fallback, curated])
            }
        }
    }

    /// Names of the sources, in order.
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Try each source in turn; the first non-empty result wins.
    ///
    /// Source errors are logged and never propagated. Returns an empty list only
    /// when every source is exhausted.
    #[instrument(skip(self), fields(topic = %topic))]
    pub async fn generate(&self, topic: &str, difficulty: Difficulty) -> Vec<ResourceCandidate> {
        for source in &self.sources {
            let result = match self.source_timeout {
                Some(limit) => tokio::time::timeout(limit, source.generate(topic, difficulty))
                    .await
                    .unwrap_or_else(|_| {
                        Err(KildeError::ProviderCall(format!(
                            "timed out after {}s",
                            limit.as_secs_f32()
                        )))
                    }),
                None => source.generate(topic, difficulty).await,
            };

            match result {
                Ok(candidates) if !candidates.is_empty() => {
                    info!("{} source produced {} candidates", source.name(), candidates.len());
                    return candidates;
                }
                Ok(_) => debug!("{} source produced no candidates", source.name()),
                Err(e) if e.is_recoverable() => {
                    warn!("{} source failed, trying next: {}", source.name(), e)
                }
                Err(e) => error!("{} source misconfigured, skipping: {}", source.name(), e),
            }
        }

        warn!("All candidate sources exhausted for '{}'", topic);
        Vec::new()
    }
}

//! Discovery pipeline orchestrator.
//!
//! Coordinates one request from candidate generation to the summarized resource set.

use crate::augment::{BookSearch, GoogleBooks, PlatformAugmenter, VideoSearch, YoutubeSearch};
use crate::config::{Prompts, Settings};
use crate::enhance::Enhancer;
use crate::error::{KildeError, Result};
use crate::generation::{CandidateChain, OpenAiGenerator, TextGenerator};
use crate::openai::api_key_configured;
use crate::probe::{HttpProbe, UrlProbe};
use crate::rank::rank;
use crate::report::build_set;
use crate::resource::{Difficulty, ResourceSet, ResourceSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// External collaborators shared read-only by all requests.
#[derive(Clone)]
pub struct Providers {
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub videos: Option<Arc<dyn VideoSearch>>,
    pub books: Option<Arc<dyn BookSearch>>,
    pub probe: Arc<dyn UrlProbe>,
}

impl Providers {
    /// Build providers from settings. Providers without credentials are left out.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let generator: Option<Arc<dyn TextGenerator>> = if api_key_configured() {
            Some(Arc::new(OpenAiGenerator::new(&settings.generation)?))
        } else {
            debug!("OPENAI_API_KEY not set, text generation disabled");
            None
        };

        let videos: Option<Arc<dyn VideoSearch>> = match settings.youtube_api_key() {
            Some(key) => Some(Arc::new(YoutubeSearch::new(key, &settings.youtube)?)),
            None => {
                debug!("No YouTube API key, video search disabled");
                None
            }
        };

        let books: Option<Arc<dyn BookSearch>> = if settings.books.enabled {
            Some(Arc::new(GoogleBooks::new(
                settings.books_api_key(),
                &settings.books,
            )?))
        } else {
            None
        };

        let probe: Arc<dyn UrlProbe> = Arc::new(HttpProbe::new(&settings.probe)?);

        Ok(Self {
            generator,
            videos,
            books,
            probe,
        })
    }
}

/// Result of one discovery request.
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    pub set: ResourceSet,
    /// Whether any returned resource came from AI curation.
    pub ai_curated: bool,
}

impl DiscoveryOutcome {
    pub fn is_empty(&self) -> bool {
        self.set.resources.is_empty()
    }
}

/// The discovery pipeline: generate, validate, augment, rank, summarize.
pub struct Discovery {
    settings: Settings,
    chain: CandidateChain,
    enhancer: Enhancer,
    augmenter: PlatformAugmenter,
}

impl Discovery {
    /// Create a pipeline with providers built from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let providers = Providers::from_settings(&settings)?;

        info!(
            "Discovery ready (strategy: {}, videos: {}, books: {})",
            settings.generation.strategy,
            providers.videos.is_some(),
            providers.books.is_some()
        );

        Ok(Self::with_providers(settings, prompts, providers))
    }

    /// Create a pipeline with custom providers.
    pub fn with_providers(settings: Settings, prompts: Prompts, providers: Providers) -> Self {
        // A single source may use at most half of the request budget.
        let source_timeout = settings
            .generation
            .timeout_secs
            .min(settings.discovery.request_timeout_secs / 2)
            .max(1);
        let chain = CandidateChain::for_strategy(
            settings.generation.strategy,
            providers.generator,
            prompts,
        )
        .with_source_timeout(Duration::from_secs(source_timeout));
        let enhancer = Enhancer::new(providers.probe, settings.probe.max_concurrent);
        let augmenter =
            PlatformAugmenter::new(providers.videos, providers.books, settings.youtube.keep);

        Self {
            settings,
            chain,
            enhancer,
            augmenter,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run discovery for a topic.
    ///
    /// Fails only on invalid input. Provider problems degrade the result; an empty
    /// set means nothing usable was found before the deadline.
    #[instrument(skip(self), fields(topic = %topic, difficulty = %difficulty))]
    pub async fn discover(&self, topic: &str, difficulty: Difficulty) -> Result<DiscoveryOutcome> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(KildeError::InvalidInput("Topic must not be empty".to_string()));
        }

        let deadline =
            Instant::now() + Duration::from_secs(self.settings.discovery.request_timeout_secs);

        let candidates = self.chain.generate(topic, difficulty).await;

        let (validated, extras) = tokio::join!(
            self.enhancer.enhance(candidates, topic, Some(deadline)),
            self.augmenter.augment(topic, difficulty, Some(deadline)),
        );

        let mut all = validated;
        all.extend(extras);

        let set = build_set(rank(all), difficulty, self.settings.discovery.top_n);
        let ai_curated = set
            .resources
            .iter()
            .any(|r| r.source == ResourceSource::AiCurated);

        info!(
            "Returning {} resources (quality {:.1}, {})",
            set.resources.len(),
            set.quality_score,
            set.estimated_time
        );

        Ok(DiscoveryOutcome { set, ai_curated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationStrategy;
    use crate::resource::{ResourceType, UrlStatus};
    use crate::testing::{video, FakeGenerator, FakeVideos, ScriptedProbe};

    fn providers(probe: ScriptedProbe) -> Providers {
        Providers {
            generator: None,
            videos: None,
            books: None,
            probe: Arc::new(probe),
        }
    }

    #[tokio::test]
    async fn test_curated_python_pipeline() {
        let probe = ScriptedProbe::new(&[
            "https://www.geeksforgeeks.org/python-programming-language/",
        ]);
        let discovery = Discovery::with_providers(Settings::default(), Prompts::default(), providers(probe));

        let outcome = discovery.discover("python", Difficulty::Beginner).await.unwrap();

        // Curated mapping plus official Python docs.
        assert_eq!(outcome.set.resources.len(), 2);
        assert_eq!(outcome.set.resources[0].source, ResourceSource::OfficialDocs);
        assert_eq!(outcome.set.resources[1].url_status, UrlStatus::Accessible);
        assert_eq!(outcome.set.difficulty, Difficulty::Beginner);
        assert!(!outcome.ai_curated);
        assert!(outcome.set.resources.windows(2).all(|w| w[0].final_score >= w[1].final_score));
    }

    #[tokio::test]
    async fn test_unreachable_candidates_leave_empty_outcome() {
        let discovery = Discovery::with_providers(
            Settings::default(),
            Prompts::default(),
            providers(ScriptedProbe::new(&[])),
        );

        let outcome = discovery.discover("pottery", Difficulty::Intermediate).await.unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.set.quality_score, 0.0);
        assert_eq!(outcome.set.estimated_time, "0 minutes");
    }

    #[tokio::test]
    async fn test_ai_strategy_with_videos_truncates_to_top_n() {
        let mut settings = Settings::default();
        settings.generation.strategy = GenerationStrategy::Ai;

        let reply = r#"[
            {"title": "GfG ML", "platform": "GeeksforGeeks", "type": "tutorial", "url": "https://www.geeksforgeeks.org/machine-learning/", "description": "d", "quality_rating": 9},
            {"title": "Coursera ML", "platform": "Coursera", "type": "course", "url": "https://www.coursera.org/learn/machine-learning", "description": "d", "quality_rating": 10},
            {"title": "Dead", "platform": "Medium", "type": "article", "url": "https://medium.com/dead", "description": "d"}
        ]"#;

        let generator: Arc<dyn TextGenerator> = Arc::new(FakeGenerator::replying(reply));
        let videos: Arc<dyn VideoSearch> = Arc::new(FakeVideos::returning(vec![
            video("v1", "freeCodeCamp.org"),
            video("v2", "Corey Schafer"),
            video("v3", "Someone"),
            video("v4", "Someone Else"),
        ]));
        let probe: Arc<dyn UrlProbe> = Arc::new(ScriptedProbe::new(&[
            "https://www.geeksforgeeks.org/machine-learning/",
            "https://www.coursera.org/learn/machine-learning",
        ]));

        let providers = Providers {
            generator: Some(generator),
            videos: Some(videos),
            books: None,
            probe,
        };
        settings.discovery.top_n = 4;
        let discovery = Discovery::with_providers(settings, Prompts::default(), providers);

        let outcome = discovery.discover("machine learning", Difficulty::Advanced).await.unwrap();

        assert!(outcome.ai_curated);
        assert_eq!(outcome.set.resources.len(), 4);
        assert!(outcome.set.resources.iter().all(|r| r.url != "https://medium.com/dead"));
        assert_eq!(outcome.set.resources[0].title, "GfG ML");
        assert_eq!(outcome.set.resources[1].title, "Coursera ML");
        assert!(outcome
            .set
            .resources
            .iter()
            .any(|r| r.resource_type == ResourceType::Video));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_ai_call_still_yields_fallback_links() {
        let mut settings = Settings::default();
        settings.generation.strategy = GenerationStrategy::Ai;

        let generator: Arc<dyn TextGenerator> =
            Arc::new(FakeGenerator::replying("[]").with_delay(Duration::from_secs(30)));
        let probe: Arc<dyn UrlProbe> = Arc::new(ScriptedProbe::new(&[
            "https://realpython.com/",
            "https://www.geeksforgeeks.org/python-programming-language/",
        ]));
        let providers = Providers {
            generator: Some(generator),
            videos: None,
            books: None,
            probe,
        };
        let discovery = Discovery::with_providers(settings, Prompts::default(), providers);

        let outcome = discovery.discover("python", Difficulty::Beginner).await.unwrap();

        let fallback: Vec<_> = outcome
            .set
            .resources
            .iter()
            .filter(|r| r.source == ResourceSource::Fallback)
            .map(|r| r.url.as_str())
            .collect();
        assert_eq!(fallback.len(), 2);
        assert!(fallback.contains(&"https://realpython.com/"));
        assert!(outcome
            .set
            .resources
            .iter()
            .any(|r| r.source == ResourceSource::OfficialDocs));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_video_search_keeps_official_docs() {
        let videos: Arc<dyn VideoSearch> = Arc::new(
            FakeVideos::returning(vec![video("v1", "Corey Schafer")])
                .with_delay(Duration::from_secs(30)),
        );
        let providers = Providers {
            generator: None,
            videos: Some(videos),
            books: None,
            probe: Arc::new(ScriptedProbe::new(&[])),
        };
        let discovery =
            Discovery::with_providers(Settings::default(), Prompts::default(), providers);

        let outcome = discovery.discover("python", Difficulty::Beginner).await.unwrap();

        assert_eq!(outcome.set.resources.len(), 1);
        assert_eq!(outcome.set.resources[0].url, "https://docs.python.org/3/");
        assert!(!outcome.is_empty());
    }

    #[tokio::test]
    async fn test_blank_topic_is_rejected() {
        let discovery = Discovery::with_providers(
            Settings::default(),
            Prompts::default(),
            providers(ScriptedProbe::new(&[])),
        );
        let err = discovery.discover("   ", Difficulty::Beginner).await.unwrap_err();
        assert!(matches!(err, KildeError::InvalidInput(_)));
    }
}

//! Configuration settings for Kilde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub generation: GenerationSettings,
    pub probe: ProbeSettings,
    pub youtube: YoutubeSettings,
    pub books: BooksSettings,
    pub discovery: DiscoverySettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// How the initial candidate list is produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStrategy {
    /// Static keyword mapping (one candidate, never empty).
    #[default]
    Curated,
    /// LLM curation, degrading to keyword fallbacks and then the static mapping.
    Ai,
}

impl std::str::FromStr for GenerationStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "curated" | "static" => Ok(GenerationStrategy::Curated),
            "ai" | "llm" => Ok(GenerationStrategy::Ai),
            _ => Err(format!("Unknown generation strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for GenerationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationStrategy::Curated => write!(f, "curated"),
            GenerationStrategy::Ai => write!(f, "ai"),
        }
    }
}

/// Candidate generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Generation strategy (curated, ai).
    pub strategy: GenerationStrategy,
    /// LLM model used for AI curation.
    pub model: String,
    /// Sampling temperature. Kept low for more reliable URLs.
    pub temperature: f32,
    /// Maximum tokens for the curation response.
    pub max_tokens: u32,
    /// Timeout for a single curation call, in seconds.
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            strategy: GenerationStrategy::Curated,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 1200,
            timeout_secs: 12,
        }
    }
}

/// URL reachability probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Timeout for the HEAD probe, in seconds.
    pub head_timeout_secs: u64,
    /// Timeout for the GET retry, in seconds.
    pub get_timeout_secs: u64,
    /// User-Agent header sent with probes.
    pub user_agent: String,
    /// Maximum candidates validated concurrently.
    pub max_concurrent: usize,
    /// Maximum redirects followed per probe.
    pub max_redirects: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            head_timeout_secs: 5,
            get_timeout_secs: 3,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            max_concurrent: 8,
            max_redirects: 5,
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// YouTube Data API key (falls back to GOOGLE_API_KEY).
    pub api_key: Option<String>,
    /// Results requested from the search endpoint.
    pub max_results: u32,
    /// Videos kept after channel scoring.
    pub keep: usize,
    /// Video category filter (27 = Education).
    pub category_id: String,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            max_results: 10,
            keep: 3,
            category_id: "27".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Google Books settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BooksSettings {
    /// Append book results to the candidate pool.
    pub enabled: bool,
    /// Google Books API key (falls back to GOOGLE_API_KEY).
    pub api_key: Option<String>,
    /// Maximum books requested.
    pub max_results: u32,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for BooksSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            max_results: 2,
            timeout_secs: 5,
        }
    }
}

/// Discovery pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Number of ranked resources returned.
    pub top_n: usize,
    /// Overall deadline for one discovery request, in seconds.
    pub request_timeout_secs: u64,
    /// Answer with the static fallback set instead of 503 when nothing survives.
    pub static_fallback: bool,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            top_n: 6,
            request_timeout_secs: 25,
            static_fallback: true,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::KildeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kilde")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// YouTube API key from config, or the GOOGLE_API_KEY environment variable.
    pub fn youtube_api_key(&self) -> Option<String> {
        non_empty(self.youtube.api_key.clone()).or_else(google_api_key_from_env)
    }

    /// Google Books API key from config, or the GOOGLE_API_KEY environment variable.
    pub fn books_api_key(&self) -> Option<String> {
        non_empty(self.books.api_key.clone()).or_else(google_api_key_from_env)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn google_api_key_from_env() -> Option<String> {
    non_empty(std::env::var("GOOGLE_API_KEY").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let settings = Settings::default();
        assert_eq!(settings.discovery.top_n, 6);
        assert_eq!(settings.probe.head_timeout_secs, 5);
        assert_eq!(settings.probe.get_timeout_secs, 3);
        assert_eq!(settings.youtube.max_results, 10);
        assert_eq!(settings.youtube.keep, 3);
        assert_eq!(settings.generation.strategy, GenerationStrategy::Curated);
    }

    #[test]
    fn test_provider_timeouts_fit_inside_request_deadline() {
        let settings = Settings::default();
        let deadline = settings.discovery.request_timeout_secs;
        assert!(settings.generation.timeout_secs < deadline);
        assert!(settings.youtube.timeout_secs < deadline);
        assert!(settings.books.timeout_secs < deadline);
        assert!(settings.probe.head_timeout_secs + settings.probe.get_timeout_secs < deadline);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [generation]
            strategy = "ai"

            [discovery]
            top_n = 4
            "#,
        )
        .unwrap();

        assert_eq!(settings.generation.strategy, GenerationStrategy::Ai);
        assert_eq!(settings.generation.model, "gpt-4o-mini");
        assert_eq!(settings.discovery.top_n, 4);
        assert!(settings.discovery.static_fallback);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.youtube.api_key = Some("yt-key".to_string());
        settings.discovery.request_timeout_secs = 10;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.youtube.api_key.as_deref(), Some("yt-key"));
        assert_eq!(loaded.discovery.request_timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded.discovery.top_n, 6);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("AI".parse::<GenerationStrategy>().unwrap(), GenerationStrategy::Ai);
        assert_eq!("curated".parse::<GenerationStrategy>().unwrap(), GenerationStrategy::Curated);
        assert!("random".parse::<GenerationStrategy>().is_err());
    }
}

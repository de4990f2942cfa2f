//! YouTube Data API video search.

use crate::config::YoutubeSettings;
use crate::error::{KildeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

/// A single video search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoHit {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel: String,
}

impl VideoHit {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Video search provider. Results come back in provider relevance order.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<VideoHit>>;
}

/// YouTube Data API v3 search, restricted to one category and ordered by relevance.
pub struct YoutubeSearch {
    client: Client,
    api_key: String,
    max_results: u32,
    category_id: String,
}

impl YoutubeSearch {
    pub fn new(api_key: String, settings: &YoutubeSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| KildeError::Config(format!("Failed to create YouTube client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            max_results: settings.max_results,
            category_id: settings.category_id.clone(),
        })
    }

    fn search_url(&self, query: &str) -> Result<url::Url> {
        let max_results = self.max_results.to_string();
        url::Url::parse_with_params(
            SEARCH_ENDPOINT,
            [
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("order", "relevance"),
                ("maxResults", max_results.as_str()),
                ("videoCategoryId", self.category_id.as_str()),
                ("key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| KildeError::InvalidInput(format!("Invalid search URL: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
}

fn hits_from_response(response: SearchResponse) -> Vec<VideoHit> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            Some(VideoHit {
                video_id,
                title: item.snippet.title,
                description: item.snippet.description,
                channel: item.snippet.channel_title,
            })
        })
        .collect()
}

#[async_trait]
impl VideoSearch for YoutubeSearch {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<VideoHit>> {
        let url = self.search_url(query)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| KildeError::ProviderCall(format!("YouTube search failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KildeError::ProviderCall(format!(
                "YouTube search returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| KildeError::Parse(format!("Invalid YouTube response: {}", e)))?;

        let hits = hits_from_response(body);
        debug!("YouTube returned {} videos", hits.len());
        Ok(hits)
    }
}

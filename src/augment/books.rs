//! Google Books metadata search.

use crate::config::BooksSettings;
use crate::error::{KildeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const VOLUMES_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// A single book search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct BookHit {
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    /// Canonical page for the volume, when one can be determined.
    pub link: Option<String>,
}

/// Book metadata provider.
#[async_trait]
pub trait BookSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<BookHit>>;
}

/// Google Books `volumes` search ordered by relevance.
pub struct GoogleBooks {
    client: Client,
    api_key: Option<String>,
    max_results: u32,
}

impl GoogleBooks {
    pub fn new(api_key: Option<String>, settings: &BooksSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| KildeError::Config(format!("Failed to create Books client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            max_results: settings.max_results,
        })
    }

    fn search_url(&self, query: &str) -> Result<url::Url> {
        let max_results = self.max_results.to_string();
        let mut params = vec![
            ("q", query),
            ("orderBy", "relevance"),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.as_str()));
        }

        url::Url::parse_with_params(VOLUMES_ENDPOINT, params)
            .map_err(|e| KildeError::InvalidInput(format!("Invalid books URL: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "canonicalVolumeLink", default)]
    canonical_volume_link: Option<String>,
    #[serde(rename = "industryIdentifiers", default)]
    industry_identifiers: Vec<serde_json::Value>,
}

fn hits_from_response(response: VolumesResponse) -> Vec<BookHit> {
    response
        .items
        .into_iter()
        .map(|volume| {
            let info = volume.volume_info;
            let link = info
                .canonical_volume_link
                .filter(|l| !l.is_empty())
                .or_else(|| {
                    (!info.industry_identifiers.is_empty()).then(|| {
                        let slug = info.title.split_whitespace().collect::<Vec<_>>().join("_");
                        format!("https://books.google.com/books/about/{}.html", slug)
                    })
                });

            BookHit {
                title: info.title,
                authors: info.authors,
                description: info.description,
                link,
            }
        })
        .collect()
}

#[async_trait]
impl BookSearch for GoogleBooks {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<BookHit>> {
        let url = self.search_url(query)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| KildeError::ProviderCall(format!("Books search failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KildeError::ProviderCall(format!(
                "Books search returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: VolumesResponse = response
            .json()
            .await
            .map_err(|e| KildeError::Parse(format!("Invalid Books response: {}", e)))?;

        let hits = hits_from_response(body);
        debug!("Google Books returned {} volumes", hits.len());
        Ok(hits)
    }
}

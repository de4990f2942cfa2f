//! URL reachability probing.
//!
//! A probe only classifies a link as reachable or not; it never reads content.

mod http;

pub use http::HttpProbe;

use async_trait::async_trait;
use serde::Serialize;

/// Which request produced a probe verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    /// URL rejected before any request was sent.
    None,
    Head,
    Get,
}

/// Result of probing a single URL.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub url: String,
    pub reachable: bool,
    /// Last HTTP status seen, if any response arrived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub method: ProbeMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProbeResult {
    pub fn rejected(url: &str, message: &str) -> Self {
        Self {
            url: url.to_string(),
            reachable: false,
            status: None,
            method: ProbeMethod::None,
            message: Some(message.to_string()),
        }
    }
}

/// Reachability check primitive.
#[async_trait]
pub trait UrlProbe: Send + Sync {
    /// Probe a URL. Implementations must bound every request with a timeout.
    async fn check(&self, url: &str) -> ProbeResult;

    /// Convenience wrapper returning only the verdict.
    async fn is_reachable(&self, url: &str) -> bool {
        self.check(url).await.reachable
    }
}

/// Whether a string is an absolute http(s) URL.
pub fn is_web_url(candidate: &str) -> bool {
    match url::Url::parse(candidate.trim()) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

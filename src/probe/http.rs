//! HTTP reachability probe: HEAD first, then a streamed GET.
//!
//! Some hosts reject HEAD but serve GET, so a failed HEAD is retried once with GET
//! under a shorter timeout. The GET response body is never read.

use super::{is_web_url, ProbeMethod, ProbeResult, UrlProbe};
use crate::config::ProbeSettings;
use crate::error::{KildeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// reqwest-backed [`UrlProbe`].
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
    head_timeout: Duration,
    get_timeout: Duration,
}

impl HttpProbe {
    /// Create a probe from settings.
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .build()
            .map_err(|e| KildeError::Config(format!("Failed to create probe client: {}", e)))?;

        Ok(Self {
            client,
            head_timeout: Duration::from_secs(settings.head_timeout_secs),
            get_timeout: Duration::from_secs(settings.get_timeout_secs),
        })
    }

    async fn head(&self, url: &str) -> std::result::Result<u16, String> {
        self.client
            .head(url)
            .timeout(self.head_timeout)
            .send()
            .await
            .map(|response| response.status().as_u16())
            .map_err(describe_error)
    }

    async fn get(&self, url: &str) -> std::result::Result<u16, String> {
        // Only the status line and headers are awaited; the body stays unread.
        self.client
            .get(url)
            .timeout(self.get_timeout)
            .send()
            .await
            .map(|response| response.status().as_u16())
            .map_err(describe_error)
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn check(&self, url: &str) -> ProbeResult {
        if !is_web_url(url) {
            return ProbeResult::rejected(url, "Not an http(s) URL");
        }

        let head_status = match self.head(url).await {
            Ok(status) if is_success(status) => {
                return ProbeResult {
                    url: url.to_string(),
                    reachable: true,
                    status: Some(status),
                    method: ProbeMethod::Head,
                    message: Some(format!("HTTP {}", status)),
                };
            }
            Ok(status) => {
                debug!("HEAD {} returned {}, retrying with GET", url, status);
                Some(status)
            }
            Err(e) => {
                debug!("HEAD {} failed ({}), retrying with GET", url, e);
                None
            }
        };

        match self.get(url).await {
            Ok(status) => ProbeResult {
                url: url.to_string(),
                reachable: is_success(status),
                status: Some(status),
                method: ProbeMethod::Get,
                message: Some(format!("HTTP {}", status)),
            },
            Err(e) => ProbeResult {
                url: url.to_string(),
                reachable: false,
                status: head_status,
                method: ProbeMethod::Get,
                message: Some(e),
            },
        }
    }
}

/// Statuses below 400 (including redirects that were not followed) count as reachable.
fn is_success(status: u16) -> bool {
    status < 400
}

fn describe_error(error: reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        "Connection failed".to_string()
    } else {
        error.to_string()
    }
}

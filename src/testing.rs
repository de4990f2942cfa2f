//! In-memory fakes for provider traits, shared by unit tests.

use crate::augment::{BookHit, BookSearch, VideoHit, VideoSearch};
use crate::error::{KildeError, Result};
use crate::generation::TextGenerator;
use crate::probe::{ProbeMethod, ProbeResult, UrlProbe};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Text generator returning a canned reply and recording user prompts.
pub struct FakeGenerator {
    reply: Option<String>,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _system: &str, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply
            .clone()
            .ok_or_else(|| KildeError::ProviderCall("scripted failure".to_string()))
    }
}

/// Probe answering from a fixed allow-list. Records every URL it sees.
pub struct ScriptedProbe {
    reachable: Vec<String>,
    delay: Option<Duration>,
    pub seen: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn new(reachable: &[&str]) -> Self {
        Self {
            reachable: reachable.iter().map(|s| s.to_string()).collect(),
            delay: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering for URLs containing "slow".
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlProbe for ScriptedProbe {
    async fn check(&self, url: &str) -> ProbeResult {
        self.seen.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            if url.contains("slow") {
                tokio::time::sleep(delay).await;
            }
        }

        let reachable = self.reachable.iter().any(|u| u == url);
        ProbeResult {
            url: url.to_string(),
            reachable,
            status: Some(if reachable { 200 } else { 404 }),
            method: ProbeMethod::Head,
            message: None,
        }
    }
}

/// Video search returning fixed hits, or failing.
pub struct FakeVideos {
    hits: Option<Vec<VideoHit>>,
    delay: Option<Duration>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeVideos {
    pub fn returning(hits: Vec<VideoHit>) -> Self {
        Self {
            hits: Some(hits),
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            hits: None,
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl VideoSearch for FakeVideos {
    async fn search(&self, query: &str) -> Result<Vec<VideoHit>> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.hits
            .clone()
            .ok_or_else(|| KildeError::ProviderCall("quota exceeded".to_string()))
    }
}

/// Build a video hit with a predictable id.
pub fn video(id: &str, channel: &str) -> VideoHit {
    VideoHit {
        video_id: id.to_string(),
        title: format!("Video {}", id),
        description: format!("About {}", id),
        channel: channel.to_string(),
    }
}

/// Book search returning fixed hits, or failing.
pub struct FakeBooks {
    hits: Option<Vec<BookHit>>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeBooks {
    pub fn returning(hits: Vec<BookHit>) -> Self {
        Self {
            hits: Some(hits),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            hits: None,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BookSearch for FakeBooks {
    async fn search(&self, query: &str) -> Result<Vec<BookHit>> {
        self.queries.lock().unwrap().push(query.to_string());
        self.hits
            .clone()
            .ok_or_else(|| KildeError::ProviderCall("books unavailable".to_string()))
    }
}

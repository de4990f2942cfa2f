//! Platform-specific supplementary resources.
//!
//! Added after validation: trusted videos from educational channels, official
//! documentation for recognized languages, and optionally textbooks. Provider failures
//! are logged and contribute nothing.

mod books;
mod docs;
mod youtube;

pub use books::{BookHit, BookSearch, GoogleBooks};
pub use docs::official_documentation;
pub use youtube::{VideoHit, VideoSearch, YoutubeSearch};

use crate::resource::{Difficulty, ResourceCandidate, ResourceSource, ResourceType};
use std::future::Future;
use std::sync::Arc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

/// Channels whose videos get the higher quality rating.
pub const EDUCATIONAL_CHANNELS: &[&str] = &[
    "freeCodeCamp.org",
    "Traversy Media",
    "The Net Ninja",
    "Programming with Mosh",
    "Corey Schafer",
    "Tech With Tim",
];

const TRUSTED_CHANNEL_QUALITY: u8 = 8;
const OTHER_CHANNEL_QUALITY: u8 = 6;
const BOOK_QUALITY: u8 = 7;
const DESCRIPTION_LIMIT: usize = 200;

/// Whether a channel name matches an educational channel (case-insensitive substring).
pub fn is_educational_channel(channel: &str) -> bool {
    let channel = channel.to_lowercase();
    EDUCATIONAL_CHANNELS
        .iter()
        .any(|known| channel.contains(&known.to_lowercase()))
}

/// Cut to the limit and always mark the cut.
fn truncate_description(text: &str) -> String {
    let mut out: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    out.push_str("...");
    out
}

/// Like [`truncate_description`], but short text is returned unchanged.
fn shorten_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        truncate_description(text)
    } else {
        text.to_string()
    }
}

/// Await a search, giving up with nothing once the deadline passes.
async fn until_deadline<F>(deadline: Option<Instant>, what: &str, search: F) -> Vec<ResourceCandidate>
where
    F: Future<Output = Vec<ResourceCandidate>>,
{
    let Some(deadline) = deadline else {
        return search.await;
    };

    match timeout_at(deadline, search).await {
        Ok(found) => found,
        Err(_) => {
            warn!("{} search did not finish before the deadline", what);
            Vec::new()
        }
    }
}

fn video_candidate(hit: VideoHit) -> ResourceCandidate {
    let quality = if is_educational_channel(&hit.channel) {
        TRUSTED_CHANNEL_QUALITY
    } else {
        OTHER_CHANNEL_QUALITY
    };

    let mut candidate = ResourceCandidate::new(
        hit.title.clone(),
        "YouTube",
        ResourceType::Video,
        hit.watch_url(),
        truncate_description(&hit.description),
        ResourceSource::YoutubeApi,
    )
    .with_quality(quality)
    .verified();
    candidate.channel = Some(hit.channel);
    candidate
}

fn book_candidate(hit: BookHit) -> Option<ResourceCandidate> {
    let link = hit.link?;
    let description = hit
        .description
        .as_deref()
        .map(shorten_description)
        .unwrap_or_else(|| "Textbook".to_string());

    let mut candidate = ResourceCandidate::new(
        hit.title,
        "Google Books",
        ResourceType::Book,
        link,
        description,
        ResourceSource::BooksApi,
    )
    .with_quality(BOOK_QUALITY)
    .verified();
    if !hit.authors.is_empty() {
        candidate.authors = Some(hit.authors);
    }
    Some(candidate)
}

/// Adds videos, official docs and books for a topic.
pub struct PlatformAugmenter {
    videos: Option<Arc<dyn VideoSearch>>,
    books: Option<Arc<dyn BookSearch>>,
    video_keep: usize,
}

impl PlatformAugmenter {
    pub fn new(
        videos: Option<Arc<dyn VideoSearch>>,
        books: Option<Arc<dyn BookSearch>>,
        video_keep: usize,
    ) -> Self {
        Self {
            videos,
            books,
            video_keep,
        }
    }

    /// Supplementary candidates: videos, then documentation, then books.
    ///
    /// Only the searches are bound by `deadline`; documentation entries are always
    /// included.
    #[instrument(skip(self))]
    pub async fn augment(
        &self,
        topic: &str,
        _difficulty: Difficulty,
        deadline: Option<Instant>,
    ) -> Vec<ResourceCandidate> {
        let (videos, books) = tokio::join!(
            until_deadline(deadline, "Video", self.videos(topic)),
            until_deadline(deadline, "Book", self.books(topic)),
        );

        let docs = official_documentation(topic);
        debug!("{} official documentation entries", docs.len());

        let mut out = Vec::with_capacity(videos.len() + docs.len() + books.len());
        out.extend(videos);
        out.extend(docs);
        out.extend(books);

        info!("Augmenter added {} candidates", out.len());
        out
    }

    async fn videos(&self, topic: &str) -> Vec<ResourceCandidate> {
        let Some(search) = &self.videos else {
            debug!("No video search configured");
            return Vec::new();
        };

        match search.search(&format!("{} tutorial", topic)).await {
            Ok(hits) => hits
                .into_iter()
                .take(self.video_keep)
                .map(video_candidate)
                .collect(),
            Err(e) => {
                warn!("Video search failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn books(&self, topic: &str) -> Vec<ResourceCandidate> {
        let Some(search) = &self.books else {
            return Vec::new();
        };

        let query = format!("{} programming computer science textbook", topic);
        match search.search(&query).await {
            Ok(hits) => hits.into_iter().filter_map(book_candidate).collect(),
            Err(e) => {
                warn!("Book search failed: {}", e);
                Vec::new()
            }
        }
    }
}

//! Broken-link repair using platform URL templates.
//!
//! Deep links invented by a generator often 404 while the platform's canonical page for
//! the same topic exists. Repair builds a topic slug, expands it through a short list of
//! per-platform templates and adopts the first one that answers a reachability probe.

use crate::probe::UrlProbe;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

const GEEKSFORGEEKS_ORIGIN: &str = "https://www.geeksforgeeks.org";
const W3SCHOOLS_ORIGIN: &str = "https://www.w3schools.com";

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid slug regex"));
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));

/// Canonical slugs for common multi-word topics.
const SLUG_REPLACEMENTS: &[(&str, &str)] = &[
    ("machine-learning", "machine-learning"),
    ("artificial-intelligence", "artificial-intelligence"),
    ("data-science", "data-science"),
    ("web-development", "web-development"),
    ("programming", "programming-language"),
];

/// Turn a free-form topic into a URL path segment.
pub fn slugify(topic: &str) -> String {
    let lowered = topic.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let joined = SEPARATOR_RUNS.replace_all(&stripped, "-");
    let slug = joined.trim_matches('-');

    SLUG_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == slug)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| slug.to_string())
}

/// Replacement URLs to try for a platform, in order. Empty for unsupported platforms.
pub fn candidate_urls(platform: &str, topic: &str) -> Vec<String> {
    let platform = platform.to_lowercase();
    let slug = slugify(topic);
    if slug.is_empty() {
        return Vec::new();
    }

    if platform.contains("geeksforgeeks") {
        vec![
            format!("{}/{}/", GEEKSFORGEEKS_ORIGIN, slug),
            format!("{}/{}-tutorial/", GEEKSFORGEEKS_ORIGIN, slug),
            format!("{}/{}-in-python/", GEEKSFORGEEKS_ORIGIN, slug),
            format!("{}/introduction-to-{}/", GEEKSFORGEEKS_ORIGIN, slug),
        ]
    } else if platform.contains("w3schools") {
        vec![
            format!("{}/{}/", W3SCHOOLS_ORIGIN, slug),
            format!("{}/{}/default.asp", W3SCHOOLS_ORIGIN, slug),
        ]
    } else {
        Vec::new()
    }
}

/// Platform-aware URL repair.
#[derive(Clone)]
pub struct RepairStrategy {
    probe: Arc<dyn UrlProbe>,
}

impl RepairStrategy {
    pub fn new(probe: Arc<dyn UrlProbe>) -> Self {
        Self { probe }
    }

    /// Find a reachable replacement for `url`. Returns an empty string when the
    /// platform is unsupported or no template answers.
    pub async fn repair(&self, url: &str, platform: &str, topic: &str) -> String {
        if url.trim().is_empty() {
            return String::new();
        }

        let candidates = candidate_urls(platform, topic);
        if candidates.is_empty() {
            debug!("No repair templates for platform '{}'", platform);
            return String::new();
        }

        for candidate in candidates {
            if self.probe.is_reachable(&candidate).await {
                info!("Repaired {} -> {}", url, candidate);
                return candidate;
            }
            debug!("Repair candidate unreachable: {}", candidate);
        }

        String::new()
    }
}

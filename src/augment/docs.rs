//! Official documentation entries.

use crate::resource::{ResourceCandidate, ResourceSource, ResourceType};

const JS_KEYWORDS: &[&str] = &["javascript", "js", "web development"];

/// Official documentation for the topic. Both entries may apply.
pub fn official_documentation(topic: &str) -> Vec<ResourceCandidate> {
    let topic = topic.to_lowercase();
    let mut docs = Vec::new();

    if topic.contains("python") {
        docs.push(
            ResourceCandidate::new(
                "Official Python Documentation",
                "Python.org",
                ResourceType::Documentation,
                "https://docs.python.org/3/",
                "Comprehensive official Python documentation with tutorials, library \
                 reference, and language reference.",
                ResourceSource::OfficialDocs,
            )
            .with_quality(10)
            .verified(),
        );
    }

    if JS_KEYWORDS.iter().any(|k| topic.contains(k)) {
        docs.push(
            ResourceCandidate::new(
                "MDN Web Docs - JavaScript",
                "MDN Web Docs",
                ResourceType::Documentation,
                "https://developer.mozilla.org/en-US/docs/Web/JavaScript",
                "Mozilla's comprehensive JavaScript documentation with tutorials, \
                 references, and best practices.",
                ResourceSource::OfficialDocs,
            )
            .with_quality(10)
            .verified(),
        );
    }

    docs
}

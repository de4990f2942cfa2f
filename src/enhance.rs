//! Candidate validation and repair.
//!
//! Every candidate is probed; unreachable links go through [`RepairStrategy`] and the
//! replacement is probed again before it is adopted. Candidates that end up
//! inaccessible are dropped, so the output never carries a link known to be broken.

use crate::probe::{is_web_url, UrlProbe};
use crate::repair::RepairStrategy;
use crate::resource::{ResourceCandidate, UrlStatus};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

pub struct Enhancer {
    probe: Arc<dyn UrlProbe>,
    repair: RepairStrategy,
    max_concurrent: usize,
}

impl Enhancer {
    pub fn new(probe: Arc<dyn UrlProbe>, max_concurrent: usize) -> Self {
        Self {
            repair: RepairStrategy::new(probe.clone()),
            probe,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Validate candidates concurrently, preserving input order.
    ///
    /// When `deadline` passes, validation stops and only candidates that already
    /// completed are returned.
    #[instrument(skip(self, candidates), fields(count = candidates.len()))]
    pub async fn enhance(
        &self,
        candidates: Vec<ResourceCandidate>,
        topic: &str,
        deadline: Option<Instant>,
    ) -> Vec<ResourceCandidate> {
        let total = candidates.len();

        let mut stream = stream::iter(candidates.into_iter().enumerate())
            .map(|(idx, candidate)| async move { (idx, self.validate(candidate, topic).await) })
            .buffer_unordered(self.max_concurrent);

        let mut kept: Vec<(usize, ResourceCandidate)> = Vec::with_capacity(total);
        let mut finished = 0usize;

        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, stream.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!(
                            "Validation deadline reached after {}/{} candidates",
                            finished, total
                        );
                        break;
                    }
                },
                None => stream.next().await,
            };

            match next {
                Some((idx, Some(candidate))) => {
                    finished += 1;
                    kept.push((idx, candidate));
                }
                Some((_, None)) => finished += 1,
                None => break,
            }
        }

        kept.sort_by_key(|(idx, _)| *idx);
        info!("{} of {} candidates passed validation", kept.len(), total);
        kept.into_iter().map(|(_, c)| c).collect()
    }

    /// Validate one candidate. Returns `None` when it must be dropped.
    async fn validate(
        &self,
        mut candidate: ResourceCandidate,
        topic: &str,
    ) -> Option<ResourceCandidate> {
        if !is_web_url(&candidate.url) {
            debug!("Dropping candidate without a web URL: '{}'", candidate.title);
            return None;
        }

        if self.probe.is_reachable(&candidate.url).await {
            candidate.url_status = UrlStatus::Accessible;
            candidate.verified = true;
            return Some(candidate);
        }

        let fixed = self
            .repair
            .repair(&candidate.url, &candidate.platform, topic)
            .await;

        if !fixed.is_empty() && self.probe.is_reachable(&fixed).await {
            debug!("Adopting repaired URL for '{}'", candidate.title);
            candidate.url = fixed;
            candidate.url_status = UrlStatus::FixedAndAccessible;
            candidate.verified = true;
            return Some(candidate);
        }

        candidate.url_status = UrlStatus::Inaccessible;
        candidate.verified = false;
        debug!("Dropping inaccessible candidate: {}", candidate.url);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ResourceSource, ResourceType};
    use crate::testing::ScriptedProbe;
    use std::time::Duration;

    fn candidate(title: &str, platform: &str, url: &str) -> ResourceCandidate {
        ResourceCandidate::new(
            title,
            platform,
            ResourceType::Tutorial,
            url,
            "desc",
            ResourceSource::AiCurated,
        )
    }

    #[tokio::test]
    async fn test_accessible_and_dropped() {
        let probe = Arc::new(ScriptedProbe::new(&["https://realpython.com/"]));
        let enhancer = Enhancer::new(probe, 4);

        let out = enhancer
            .enhance(
                vec![
                    candidate("RP", "Real Python", "https://realpython.com/"),
                    candidate("Gone", "Coursera", "https://www.coursera.org/missing"),
                    candidate("Bogus", "Real Python", "YOUR_URL_HERE"),
                ],
                "python",
                None,
            )
            .await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].url_status, UrlStatus::Accessible);
        assert!(out[0].verified);
        assert!(out.iter().all(|c| c.url_status != UrlStatus::Inaccessible));
    }

    #[tokio::test]
    async fn test_non_web_urls_are_dropped_without_probing() {
        let probe = Arc::new(ScriptedProbe::new(&[]));
        let enhancer = Enhancer::new(probe.clone(), 4);

        let out = enhancer
            .enhance(
                vec![
                    candidate("Empty", "GeeksforGeeks", ""),
                    candidate("Relative", "W3Schools", "/css/"),
                ],
                "css",
                None,
            )
            .await;

        assert!(out.is_empty());
        assert!(probe.seen().is_empty());
    }

    #[tokio::test]
    async fn test_repaired_url_is_adopted() {
        let probe = Arc::new(ScriptedProbe::new(&[
            "https://www.geeksforgeeks.org/python-tutorial/",
        ]));
        let enhancer = Enhancer::new(probe.clone(), 4);

        let out = enhancer
            .enhance(
                vec![candidate(
                    "Python",
                    "GeeksforGeeks",
                    "https://www.geeksforgeeks.org/python-made-up/",
                )],
                "python",
                None,
            )
            .await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].url, "https://www.geeksforgeeks.org/python-tutorial/");
        assert_eq!(out[0].url_status, UrlStatus::FixedAndAccessible);
        assert!(out[0].verified);

        // The adopted replacement is probed a second time before use.
        let seen = probe.seen();
        let probes_of_fix = seen
            .iter()
            .filter(|u| *u == "https://www.geeksforgeeks.org/python-tutorial/")
            .count();
        assert_eq!(probes_of_fix, 2);
    }

    #[tokio::test]
    async fn test_order_preserved() {
        let urls = ["https://a.org/", "https://b.org/", "https://c.org/", "https://d.org/"];
        let probe = Arc::new(ScriptedProbe::new(&urls));
        let enhancer = Enhancer::new(probe, 2);

        let input = urls.iter().map(|u| candidate(u, "X", u)).collect();
        let out = enhancer.enhance(input, "topic", None).await;

        let got: Vec<_> = out.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(got, urls);
    }

    #[tokio::test]
    async fn test_deadline_keeps_completed_candidates() {
        let probe = Arc::new(
            ScriptedProbe::new(&["https://fast.org/", "https://slow.org/"])
                .with_delay(Duration::from_secs(5)),
        );
        let enhancer = Enhancer::new(probe, 4);
        let deadline = Instant::now() + Duration::from_millis(200);

        let out = enhancer
            .enhance(
                vec![
                    candidate("Slow", "X", "https://slow.org/"),
                    candidate("Fast", "X", "https://fast.org/"),
                ],
                "topic",
                Some(deadline),
            )
            .await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Fast");
    }

    #[tokio::test]
    async fn test_empty_input() {
        let enhancer = Enhancer::new(Arc::new(ScriptedProbe::new(&[])), 4);
        assert!(enhancer.enhance(Vec::new(), "x", None).await.is_empty());
    }
}

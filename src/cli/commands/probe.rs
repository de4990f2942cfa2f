//! Probe command - check a single link, optionally trying platform repair.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::KildeError;
use crate::probe::{HttpProbe, UrlProbe};
use crate::repair::RepairStrategy;
use anyhow::Result;
use std::sync::Arc;

/// Probe a URL and report the verdict.
pub async fn run_probe(
    url: &str,
    platform: Option<&str>,
    topic: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let probe = Arc::new(HttpProbe::new(&settings.probe)?);

    let result = probe.check(url).await;
    let status = result
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());

    if result.reachable {
        Output::success(&format!("{} is reachable", url));
    } else {
        Output::warning(&format!("{} is not reachable", url));
    }
    Output::kv("Method", &format!("{:?}", result.method));
    Output::kv("Status", &status);
    if let Some(message) = &result.message {
        Output::kv("Detail", message);
    }

    if result.reachable {
        return Ok(());
    }

    if let (Some(platform), Some(topic)) = (platform, topic) {
        let strategy = RepairStrategy::new(probe);
        let fixed = strategy.repair(url, platform, topic).await;
        if !fixed.is_empty() {
            Output::success(&format!("Repaired: {}", fixed));
            return Ok(());
        }
        Output::warning(&format!("No working {} page found for '{}'", platform, topic));
    }

    Err(KildeError::UrlUnreachable(url.to_string()).into())
}

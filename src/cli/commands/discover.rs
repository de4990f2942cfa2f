//! Discover command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Discovery;
use crate::resource::{Difficulty, ResourceSet};
use anyhow::Result;

/// Run discovery for a topic and print the ranked resources.
pub async fn run_discover(
    topic: &str,
    level: Option<&str>,
    json: bool,
    settings: Settings,
) -> Result<()> {
    let difficulty = match level {
        Some(level) => level.parse::<Difficulty>().map_err(|e| anyhow::anyhow!(e))?,
        None => Difficulty::default(),
    };
    let static_fallback = settings.discovery.static_fallback;

    let discovery = Discovery::new(settings)?;

    let spinner = (!json).then(|| Output::spinner(&format!("Finding resources for '{}'...", topic)));
    let outcome = discovery.discover(topic, difficulty).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = outcome?;

    let (set, fallback) = if outcome.is_empty() {
        if !static_fallback {
            anyhow::bail!("No reachable resources found for '{}'", topic);
        }
        (ResourceSet::static_fallback(topic, difficulty), true)
    } else {
        (outcome.set, false)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    if fallback {
        Output::warning("No reachable resources found, showing generic starting points.");
    }

    Output::header(&format!("Learning resources: {}", topic.trim()));
    Output::kv("Level", &set.difficulty.to_string());
    Output::kv("Estimated time", &set.estimated_time);
    Output::kv("Quality", &format!("{:.1}/10", set.quality_score));

    for (i, resource) in set.resources.iter().enumerate() {
        Output::resource(
            i + 1,
            &resource.title,
            &resource.platform,
            &resource.resource_type.to_string(),
            resource.final_score,
            &resource.url,
        );
        Output::description(&resource.description);
    }
    println!();

    Ok(())
}

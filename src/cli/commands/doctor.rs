//! Doctor command - verify provider credentials, configuration and connectivity.

use crate::cli::Output;
use crate::config::{GenerationStrategy, Prompts, Settings};
use crate::generation::DEFAULT_LINK;
use crate::probe::{HttpProbe, UrlProbe};
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

fn print_section(title: &str, section: Vec<CheckResult>, all: &mut Vec<CheckResult>) {
    println!("{}", style(title).bold());
    for check in &section {
        check.print();
    }
    println!();
    all.extend(section);
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Kilde Doctor");
    println!();
    println!("Checking providers and configuration...\n");

    let mut checks = Vec::new();

    let openai_key = std::env::var("OPENAI_API_KEY").ok();
    print_section(
        "Providers",
        vec![
            check_openai_key(settings.generation.strategy, openai_key.as_deref()),
            check_youtube_key(settings.youtube_api_key().as_deref()),
            check_books(settings),
        ],
        &mut checks,
    );

    print_section(
        "Configuration",
        vec![check_config_file(config_path), check_prompts(settings)],
        &mut checks,
    );

    print_section("Network", vec![check_network(settings).await], &mut checks);

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Kilde.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Kilde is ready to use.");
    }

    Ok(())
}

/// Show only the first and last few characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn check_openai_key(strategy: GenerationStrategy, key: Option<&str>) -> CheckResult {
    match (key.filter(|k| !k.is_empty()), strategy) {
        (Some(key), _) => {
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", mask_key(key)))
        }
        (None, GenerationStrategy::Curated) => {
            CheckResult::ok("OPENAI_API_KEY", "not set (not needed for curated strategy)")
        }
        (None, GenerationStrategy::Ai) => CheckResult::warning(
            "OPENAI_API_KEY",
            "not set, AI curation will fall back to static lists",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

fn check_youtube_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(key) => CheckResult::ok("YouTube API key", &format!("configured ({})", mask_key(key))),
        None => CheckResult::warning(
            "YouTube API key",
            "not set, video search disabled",
            "Set youtube.api_key in config or export GOOGLE_API_KEY",
        ),
    }
}

fn check_books(settings: &Settings) -> CheckResult {
    match (settings.books.enabled, settings.books_api_key()) {
        (false, _) => CheckResult::ok("Google Books", "disabled"),
        (true, Some(_)) => CheckResult::ok("Google Books", "enabled"),
        (true, None) => CheckResult::warning(
            "Google Books",
            "enabled without API key (anonymous quota)",
            "Set books.api_key in config or export GOOGLE_API_KEY",
        ),
    }
}

fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: kilde config edit",
        )
    }
}

fn check_prompts(settings: &Settings) -> CheckResult {
    match Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    ) {
        Ok(_) => match &settings.prompts.custom_dir {
            Some(dir) => CheckResult::ok("Prompts", &format!("custom ({})", dir)),
            None => CheckResult::ok("Prompts", "built-in"),
        },
        Err(e) => CheckResult::error(
            "Prompts",
            &e.to_string(),
            "Fix curation.toml in the custom prompts directory",
        ),
    }
}

async fn check_network(settings: &Settings) -> CheckResult {
    let probe = match HttpProbe::new(&settings.probe) {
        Ok(probe) => probe,
        Err(e) => {
            return CheckResult::error("HTTP client", &e.to_string(), "Check probe settings")
        }
    };

    let result = probe.check(DEFAULT_LINK.url).await;
    if result.reachable {
        CheckResult::ok("Connectivity", &format!("{} reachable", DEFAULT_LINK.url))
    } else {
        CheckResult::warning(
            "Connectivity",
            &format!(
                "{} unreachable ({})",
                DEFAULT_LINK.url,
                result.message.unwrap_or_else(|| "no response".to_string())
            ),
            "Link validation will drop most candidates while offline",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdefghijklmnop1234"), "sk-abcd...1234");
        assert_eq!(mask_key("short"), "****");
    }

    #[test]
    fn test_openai_key_only_matters_for_ai_strategy() {
        assert_eq!(
            check_openai_key(GenerationStrategy::Curated, None).status,
            CheckStatus::Ok
        );
        assert_eq!(
            check_openai_key(GenerationStrategy::Ai, Some("")).status,
            CheckStatus::Warning
        );
        assert_eq!(
            check_openai_key(GenerationStrategy::Ai, Some("sk-abcdefghijklmnop1234")).status,
            CheckStatus::Ok
        );
    }

    #[test]
    fn test_config_file_check_uses_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");

        let missing = check_config_file(&path);
        assert_eq!(missing.status, CheckStatus::Warning);

        std::fs::write(&path, "[discovery]\ntop_n = 3\n").unwrap();
        let found = check_config_file(&path);
        assert_eq!(found.status, CheckStatus::Ok);
        assert!(found.message.contains("custom.toml"));
    }

    #[test]
    fn test_books_disabled_by_default() {
        let result = check_books(&Settings::default());
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.message, "disabled");
    }
}

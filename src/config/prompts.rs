//! Prompt templates for Kilde.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use super::Settings;
use serde::{Deserialize, Serialize};

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub curation: CurationPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for AI resource curation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationPrompts {
    pub system: String,
    pub user: String,
}

impl Default for CurationPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert educator and learning resource curator. You recommend only high-quality, currently accessible learning resources from reputable educational sources, and you answer with raw JSON only."#.to_string(),

            user: r#"Recommend the BEST 5-6 high-quality learning resources for: "{{topic}}" at {{difficulty}} level.

IMPORTANT GUIDELINES:
1. Only suggest resources from these TRUSTED platforms:
   - Official documentation sites
   - GeeksforGeeks (use working URL patterns)
   - MDN Web Docs (for web technologies)
   - Real Python (for Python topics)
   - W3Schools (for web development)
   - Coursera/edX (for courses)
   - YouTube (educational channels only)
   - Stack Overflow (for Q&A)
   - GitHub (for code examples)

2. For GeeksforGeeks, use these PROVEN URL patterns:
   - https://www.geeksforgeeks.org/python-tutorial/
   - https://www.geeksforgeeks.org/data-structures/
   - https://www.geeksforgeeks.org/algorithms/
   - https://www.geeksforgeeks.org/machine-learning/
   - https://www.geeksforgeeks.org/artificial-intelligence/

3. Ensure URLs are:
   - Actually accessible and working
   - From reputable educational sources
   - Appropriate for the difficulty level
   - Cover the topic comprehensively

Return a JSON array where each object has:
- "title": Descriptive, accurate title
- "platform": Source platform name
- "type": one of "tutorial", "documentation", "course", "article", "video"
- "url": WORKING, accessible URL
- "description": What the learner will gain (2-3 sentences)
- "difficulty_match": How well it matches the requested difficulty (1-10)
- "quality_rating": Educational quality rating (1-10)

Topic: {{topic}}
Difficulty: {{difficulty}}

Return ONLY the JSON array."#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let curation_path = Settings::expand_path(dir).join("curation.toml");
            if curation_path.exists() {
                let content = std::fs::read_to_string(&curation_path)?;
                prompts.curation = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

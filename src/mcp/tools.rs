//! MCP tool definitions for Kilde.

use super::protocol::Tool;
use serde_json::json;

pub const FIND_LEARNING_RESOURCES: &str = "find_learning_resources";

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![Tool {
        name: FIND_LEARNING_RESOURCES.to_string(),
        description: "Find high-quality learning resources for a topic. Links are checked \
            for reachability, broken tutorial links are repaired where possible, and results \
            are ranked by quality, platform reputation and fit with the requested level."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "Subject to study, e.g. \"machine learning\" or \"CSS grid\""
                },
                "level": {
                    "type": "string",
                    "enum": ["beginner", "intermediate", "advanced"],
                    "description": "Learner level",
                    "default": "intermediate"
                }
            },
            "required": ["topic"]
        }),
    }]
}

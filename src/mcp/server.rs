//! MCP server implementation.

use super::protocol::*;
use super::tools::{get_tools, FIND_LEARNING_RESOURCES};
use crate::config::Settings;
use crate::orchestrator::Discovery;
use crate::resource::{Difficulty, ResourceSet};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "kilde";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for Kilde.
pub struct McpServer {
    settings: Settings,
    discovery: Option<Discovery>,
}

impl McpServer {
    /// Create a new MCP server. The pipeline is built on `initialize`.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            discovery: None,
        }
    }

    /// Create a server around an existing pipeline.
    pub fn with_discovery(discovery: Discovery) -> Self {
        Self {
            settings: discovery.settings().clone(),
            discovery: Some(discovery),
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        // stdout carries JSON-RPC only
        eprintln!("Kilde MCP server starting...");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    warn!("Failed to parse request: {}", e);
                    Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
                }
            };

            if let Some(response) = response {
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC message. Notifications get no response.
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.id.is_none() && request.method.starts_with("notifications/") {
            debug!("Notification: {}", request.method);
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "initialized" => JsonRpcResponse::success(request.id, json!({})),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&mut self, id: Option<Value>) -> JsonRpcResponse {
        if self.discovery.is_none() {
            match Discovery::new(self.settings.clone()) {
                Ok(discovery) => {
                    self.discovery = Some(discovery);
                    eprintln!("Discovery pipeline initialized");
                }
                Err(e) => {
                    eprintln!("Failed to initialize discovery: {}", e);
                    return JsonRpcResponse::error(id, SERVER_ERROR, &format!("Init failed: {}", e));
                }
            }
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::from_result(id, &result)
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::from_result(id, &ToolsListResult { tools: get_tools() })
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let result = match params.name.as_str() {
            FIND_LEARNING_RESOURCES => self.tool_find_resources(params.arguments).await,
            _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
        };

        JsonRpcResponse::from_result(id, &result)
    }

    async fn tool_find_resources(&self, args: Option<Value>) -> ToolCallResult {
        let args = match args {
            Some(a) => a,
            None => return ToolCallResult::error("Missing arguments".to_string()),
        };

        let topic = match args.get("topic").and_then(|v| v.as_str()) {
            Some(t) if !t.trim().is_empty() => t,
            _ => return ToolCallResult::error("Missing 'topic' argument".to_string()),
        };

        let difficulty = match args.get("level").and_then(|v| v.as_str()) {
            Some(level) => match level.parse::<Difficulty>() {
                Ok(d) => d,
                Err(e) => return ToolCallResult::error(e),
            },
            None => Difficulty::default(),
        };

        let discovery = match &self.discovery {
            Some(d) => d,
            None => return ToolCallResult::error("Server not initialized".to_string()),
        };

        match discovery.discover(topic, difficulty).await {
            Ok(outcome) if !outcome.is_empty() => ToolCallResult::text(format_set(topic, &outcome.set)),
            Ok(_) if self.settings.discovery.static_fallback => {
                let set = ResourceSet::static_fallback(topic, difficulty);
                ToolCallResult::text(format!(
                    "No verified resources found. Generic starting points:\n\n{}",
                    format_set(topic, &set)
                ))
            }
            Ok(_) => ToolCallResult::error(format!("No reachable resources found for '{}'", topic)),
            Err(e) => ToolCallResult::error(format!("Discovery failed: {}", e)),
        }
    }
}

/// Render a resource set as Markdown.
fn format_set(topic: &str, set: &ResourceSet) -> String {
    let mut output = format!(
        "**Learning resources for {}** ({} level)\nEstimated time: {} | Quality: {:.1}/10\n\n",
        topic.trim(),
        set.difficulty,
        set.estimated_time,
        set.quality_score
    );

    for (i, resource) in set.resources.iter().enumerate() {
        output.push_str(&format!(
            "{}. **{}** ({}, {})\n   {}\n   {}\n\n",
            i + 1,
            resource.title,
            resource.platform,
            resource.resource_type,
            resource.url,
            resource.description
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::orchestrator::Providers;
    use crate::testing::ScriptedProbe;
    use std::sync::Arc;

    fn server(reachable: &[&str]) -> McpServer {
        let providers = Providers {
            generator: None,
            videos: None,
            books: None,
            probe: Arc::new(ScriptedProbe::new(reachable)),
        };
        McpServer::with_discovery(Discovery::with_providers(
            Settings::default(),
            Prompts::default(),
            providers,
        ))
    }

    fn request(id: Option<i64>, method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            id: id.map(Value::from),
            method: method.to_string(),
            params: Some(params),
        }
    }

    fn to_json(response: JsonRpcResponse) -> Value {
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_and_list_tools() {
        let mut server = server(&[]);

        let init = to_json(server.handle_request(request(Some(1), "initialize", json!({}))).await.unwrap());
        assert_eq!(init["result"]["serverInfo"]["name"], "kilde");
        assert_eq!(init["result"]["protocolVersion"], PROTOCOL_VERSION);

        let list = to_json(server.handle_request(request(Some(2), "tools/list", json!({}))).await.unwrap());
        assert_eq!(list["result"]["tools"][0]["name"], FIND_LEARNING_RESOURCES);
        assert_eq!(list["result"]["tools"][0]["inputSchema"]["required"][0], "topic");
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let mut server = server(&[]);
        let response = server
            .handle_request(request(None, "notifications/initialized", json!({})))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_find_resources_tool() {
        let mut server = server(&["https://www.geeksforgeeks.org/sql-tutorial/"]);
        let response = to_json(
            server
                .handle_request(request(
                    Some(3),
                    "tools/call",
                    json!({"name": FIND_LEARNING_RESOURCES, "arguments": {"topic": "SQL", "level": "beginner"}}),
                ))
                .await
                .unwrap(),
        );

        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("https://www.geeksforgeeks.org/sql-tutorial/"));
        assert!(text.contains("beginner level"));
        assert!(response["result"].get("isError").is_none());
    }

    #[tokio::test]
    async fn test_tool_errors() {
        let mut server = server(&[]);

        let bad_level = to_json(
            server
                .handle_request(request(
                    Some(4),
                    "tools/call",
                    json!({"name": FIND_LEARNING_RESOURCES, "arguments": {"topic": "rust", "level": "guru"}}),
                ))
                .await
                .unwrap(),
        );
        assert_eq!(bad_level["result"]["isError"], true);

        let unknown = to_json(
            server
                .handle_request(request(Some(5), "tools/call", json!({"name": "transcribe"})))
                .await
                .unwrap(),
        );
        assert_eq!(unknown["result"]["isError"], true);

        let missing = to_json(server.handle_request(request(Some(6), "resources/list", json!({}))).await.unwrap());
        assert_eq!(missing["error"]["code"], METHOD_NOT_FOUND);
    }
}

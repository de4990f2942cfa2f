//! HTTP API server for integration with other systems.
//!
//! Exposes resource discovery as `POST /learning-resources`.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::KildeError;
use crate::orchestrator::Discovery;
use crate::resource::{Difficulty, ResourceSet};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Shared application state.
pub struct AppState {
    discovery: Discovery,
}

impl AppState {
    pub fn new(discovery: Discovery) -> Self {
        Self { discovery }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/learning-resources", post(learning_resources))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let discovery = Discovery::new(settings)?;
    let app = router(Arc::new(AppState::new(discovery)));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Kilde API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Resources", "POST /learning-resources");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ResourcesRequest {
    topic: String,
    #[serde(default)]
    level: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ResponseData {
    Set(ResourceSet),
    Message { message: String },
}

#[derive(Serialize)]
struct ResourcesResponse {
    success: bool,
    data: ResponseData,
    enhanced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_curated: Option<bool>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    timestamp: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    timestamp: String,
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            success: false,
            error: message,
            timestamp: timestamp(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn learning_resources(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ResourcesRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    if req.topic.trim().is_empty() {
        return bad_request("Topic is required".to_string());
    }

    let difficulty = match req.level.as_deref() {
        None => Difficulty::default(),
        Some(level) => match level.parse::<Difficulty>() {
            Ok(d) => d,
            Err(e) => return bad_request(e),
        },
    };

    let outcome = match state.discovery.discover(&req.topic, difficulty).await {
        Ok(outcome) => outcome,
        Err(KildeError::InvalidInput(message)) => return bad_request(message),
        Err(e) => {
            warn!("Discovery failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    success: false,
                    error: e.to_string(),
                    timestamp: timestamp(),
                }),
            )
                .into_response();
        }
    };

    if !outcome.is_empty() {
        return Json(ResourcesResponse {
            success: true,
            ai_curated: Some(outcome.ai_curated),
            data: ResponseData::Set(outcome.set),
            enhanced: true,
            fallback: false,
            error: None,
            timestamp: timestamp(),
        })
        .into_response();
    }

    if state.discovery.settings().discovery.static_fallback {
        info!("No resources found for '{}', serving static fallback", req.topic);
        return Json(ResourcesResponse {
            success: true,
            data: ResponseData::Set(ResourceSet::static_fallback(&req.topic, difficulty)),
            enhanced: false,
            ai_curated: None,
            fallback: true,
            error: None,
            timestamp: timestamp(),
        })
        .into_response();
    }

    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ResourcesResponse {
            success: false,
            data: ResponseData::Message {
                message: "Learning resources agent is not available".to_string(),
            },
            enhanced: false,
            ai_curated: None,
            fallback: true,
            error: Some("Agent not available".to_string()),
            timestamp: timestamp(),
        }),
    )
        .into_response()
}

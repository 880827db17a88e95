//! Liveness and AI probe handlers.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::http::state::AppState;
use crate::ports::{CompletionRequest, MessageRole};

const PROBE_PROMPT: &str = "You are a helpful assistant. Respond with a simple JSON object containing only: {\"status\": \"working\", \"message\": \"API connection successful\"}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/debug/ai
///
/// Sends a tiny JSON-mode completion to the configured provider. Reports the
/// provider and model, never key material.
pub async fn ai_probe(State(state): State<AppState>) -> impl IntoResponse {
    let Some(provider) = state.ai_provider.clone() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": "AI provider is not configured",
                "details": { "configured": false }
            })),
        );
    };

    let info = provider.provider_info();
    let request = CompletionRequest::new()
        .with_system_prompt(PROBE_PROMPT)
        .with_message(MessageRole::User, "ping")
        .with_max_tokens(50)
        .with_temperature(0.1)
        .with_json_response();

    match provider.complete(request).await {
        Ok(response) => {
            let parsed = serde_json::from_str::<Value>(&response.content)
                .unwrap_or(Value::String(response.content.clone()));
            tracing::info!(provider = %info.name, model = %info.model, "AI probe succeeded");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "AI provider is working correctly",
                    "details": {
                        "configured": true,
                        "provider": info.name,
                        "model": response.model,
                        "response": parsed,
                        "usage": response.usage,
                    }
                })),
            )
        }
        Err(err) => {
            tracing::error!(provider = %info.name, error = %err, "AI probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "AI provider test failed",
                    "details": {
                        "configured": true,
                        "provider": info.name,
                        "model": info.model,
                        "errorMessage": err.to_string(),
                        "retryable": err.is_retryable(),
                    }
                })),
            )
        }
    }
}

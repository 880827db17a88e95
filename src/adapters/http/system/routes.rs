//! Route configuration for service endpoints.

use axum::http::Method;
use axum::routing::get;
use axum::Router;

use crate::adapters::http::cors::{preflight, CorsPolicy};
use crate::adapters::http::state::AppState;

use super::handlers::{ai_probe, health};

pub fn system_router(cors: &CorsPolicy) -> Router<AppState> {
    Router::new().route("/health", get(health)).route(
        "/api/debug/ai",
        get(ai_probe)
            .options(preflight)
            .layer(cors.layer(&[Method::GET, Method::OPTIONS])),
    )
}

//! Route configuration for analytics.

use axum::http::Method;
use axum::routing::post;
use axum::Router;

use crate::adapters::http::cors::{preflight, CorsPolicy};
use crate::adapters::http::state::AppState;

use super::handlers::track_event;

pub fn analytics_router(cors: &CorsPolicy) -> Router<AppState> {
    Router::new().route(
        "/api/analytics/track",
        post(track_event)
            .options(preflight)
            .layer(cors.layer(&[Method::POST, Method::OPTIONS])),
    )
}

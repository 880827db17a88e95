//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own router with its own CORS layer; `api_router`
//! merges them into the service.

pub mod analytics;
pub mod assessment;
pub mod client_info;
pub mod cors;
pub mod email;
pub mod error;
pub mod state;
pub mod system;

use axum::Router;

pub use client_info::ClientInfo;
pub use cors::CorsPolicy;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// The full API surface with state applied.
pub fn api_router(state: AppState, cors: &CorsPolicy) -> Router {
    Router::new()
        .merge(assessment::assessment_router(cors))
        .merge(email::email_router(cors))
        .merge(analytics::analytics_router(cors))
        .merge(system::system_router(cors))
        .with_state(state)
}

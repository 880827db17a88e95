//! Service endpoints: liveness and the AI connectivity probe.
//!
//! - `GET /health`
//! - `GET /api/debug/ai`

mod handlers;
mod routes;

pub use handlers::{ai_probe, health, HealthResponse};
pub use routes::system_router;

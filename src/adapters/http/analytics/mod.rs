//! HTTP adapter for `POST /api/analytics/track`.

mod handlers;
mod routes;

pub use handlers::{track_event, TrackRequest, TrackResponse};
pub use routes::analytics_router;

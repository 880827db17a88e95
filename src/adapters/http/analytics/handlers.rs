//! HTTP handler for client-side analytics.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::adapters::http::client_info::ClientInfo;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::engagement::TrackEventCommand;
use crate::domain::engagement::EventPayload;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackRequest {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_data: Option<EventPayload>,
    #[serde(default)]
    pub assessment_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/analytics/track
///
/// Fails for a missing `event_type` or non-scalar `event_data` values;
/// storage errors are logged.
pub async fn track_event(
    State(state): State<AppState>,
    ClientInfo(client): ClientInfo,
    payload: Result<Json<TrackRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    state
        .track_event_handler()
        .handle(TrackEventCommand {
            event_type: request.event_type,
            event_data: request.event_data.unwrap_or_default(),
            assessment_id: request.assessment_id,
            timestamp: request.timestamp,
            client,
        })
        .await?;

    Ok(Json(TrackResponse {
        success: true,
        message: "Event tracked successfully".to_string(),
    }))
}

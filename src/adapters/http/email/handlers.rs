//! HTTP handlers for email endpoints.
//!
//! Storage outcomes never change the response; only an invalid address does.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::client_info::ClientInfo;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::engagement::{SaveEmailCommand, SubscribeEmailCommand};

use super::dto::{EmailResponse, SimpleSaveRequest, SubscribeRequest};

/// POST /api/email/subscribe
pub async fn subscribe_email(
    State(state): State<AppState>,
    ClientInfo(client): ClientInfo,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let result = state
        .subscribe_email_handler()
        .handle(SubscribeEmailCommand {
            email: request.email,
            source: request.source,
            mbti_type: request.mbti_type,
            superpower: request.superpower,
            assessment_id: request.assessment_id,
            client,
        })
        .await?;

    Ok(Json(EmailResponse::success(
        "Successfully subscribed to updates",
        result.subscriber_id.map(|id| id.to_string()),
    )))
}

/// POST /api/email/simple-save
pub async fn save_email(
    State(state): State<AppState>,
    payload: Result<Json<SimpleSaveRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let result = state
        .save_email_handler()
        .handle(SaveEmailCommand {
            email: request.email,
            mbti_type: request.mbti_type,
            superpower: request.superpower,
        })
        .await?;

    Ok(Json(EmailResponse::success(
        "Email saved successfully",
        result.subscriber_id.map(|id| id.to_string()),
    )))
}

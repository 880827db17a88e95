//! HTTP handlers for assessment endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::client_info::ClientInfo;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::assessment::SubmitAssessmentCommand;

use super::dto::{AnalyzeRequest, AnalyzeResponse, QuestionDto, QuestionsResponse};

/// POST /api/assessment/analyze
pub async fn analyze_assessment(
    State(state): State<AppState>,
    ClientInfo(client): ClientInfo,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let handler = state.submit_assessment_handler();
    let receipt = handler
        .handle(SubmitAssessmentCommand {
            submission: request.into_submission(),
            client,
        })
        .await?;

    Ok(Json(AnalyzeResponse::from(&receipt)))
}

/// GET /api/assessment/questions
pub async fn list_questions(State(state): State<AppState>) -> impl IntoResponse {
    let questions = state
        .catalog()
        .all_questions()
        .iter()
        .map(QuestionDto::from)
        .collect();
    Json(QuestionsResponse { questions })
}

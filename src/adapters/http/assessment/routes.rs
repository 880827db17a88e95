//! Route configuration for assessment endpoints.

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::cors::{preflight, CorsPolicy};
use crate::adapters::http::state::AppState;

use super::handlers::{analyze_assessment, list_questions};

/// Creates the assessment router, mounted at `/api/assessment`.
///
/// Routes:
/// - `POST /analyze` - Analyze a completed questionnaire
/// - `GET /questions` - The question catalog
pub fn assessment_router(cors: &CorsPolicy) -> Router<AppState> {
    let analyze = Router::new()
        .route("/analyze", post(analyze_assessment).options(preflight))
        .layer(cors.layer(&[Method::POST, Method::OPTIONS]));

    let questions = Router::new()
        .route("/questions", get(list_questions).options(preflight))
        .layer(cors.layer(&[Method::GET, Method::OPTIONS]));

    Router::new().nest("/api/assessment", analyze.merge(questions))
}

//! HTTP adapter for assessment endpoints.
//!
//! - `POST /api/assessment/analyze` - Analyze a completed questionnaire
//! - `GET /api/assessment/questions` - The question catalog

pub mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::{analyze_assessment, list_questions};
pub use routes::assessment_router;

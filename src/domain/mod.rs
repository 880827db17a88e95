//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machine trait)
//! - `catalog` - The fixed questionnaire
//! - `personality` - Personality type codes and analysis results
//! - `assessment` - Session lifecycle for one respondent
//! - `engagement` - Records handed to the store (assessments, events, subscribers)

pub mod assessment;
pub mod catalog;
pub mod engagement;
pub mod foundation;
pub mod personality;

//! Question catalog - the fixed questionnaire.
//!
//! The catalog is static data: six questions, each with four options that
//! lean towards one of the two poles of a personality dimension. It is used
//! to render prompts and to rehydrate submitted identifiers into text before
//! anything reaches the analyzer. Client-supplied text is never trusted.

mod catalog;
mod question;
mod standard;

pub use catalog::{CatalogError, QuestionCatalog, ResolvedResponse};
pub use question::{AnswerOption, Category, Dimension, Indicator, Question};

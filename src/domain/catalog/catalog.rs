//! Catalog lookups and answer rehydration.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use super::question::{AnswerOption, Indicator, Question};
use super::standard::STANDARD_QUESTIONS;

/// Errors raised when a submitted identifier does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Unknown option '{option_id}' for question '{question_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },
}

/// A submitted answer resolved to catalog text.
///
/// Everything here comes from the catalog; nothing is taken from the client
/// except the two identifiers used for the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedResponse {
    pub question_id: &'static str,
    pub question_text: &'static str,
    pub option_id: &'static str,
    pub option_text: &'static str,
    pub indicator: Indicator,
    pub weight: u8,
}

/// Ordered, immutable set of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: &'static [Question],
}

static STANDARD: QuestionCatalog = QuestionCatalog {
    questions: &STANDARD_QUESTIONS,
};

impl QuestionCatalog {
    /// The product's fixed six-question catalog.
    pub fn standard() -> &'static QuestionCatalog {
        &STANDARD
    }

    /// All questions in display order.
    pub fn all_questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question_by_id(&self, id: &str) -> Option<&'static Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Question at a zero-based position.
    pub fn question_at(&self, position: usize) -> Option<&'static Question> {
        self.questions.get(position)
    }

    pub fn position_of(&self, question_id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == question_id)
    }

    pub fn option_by_id<'q>(&self, question: &'q Question, option_id: &str) -> Option<&'q AnswerOption> {
        question.option(option_id)
    }

    /// Returns true if every catalog question id appears in `ids`, and nothing else does.
    pub fn covers_exactly<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let seen: HashSet<&str> = ids.into_iter().collect();
        seen.len() == self.questions.len() && self.questions.iter().all(|q| seen.contains(q.id))
    }

    /// Resolves a (question, option) identifier pair into catalog text.
    pub fn resolve(&self, question_id: &str, option_id: &str) -> Result<ResolvedResponse, CatalogError> {
        let question = self
            .question_by_id(question_id)
            .ok_or_else(|| CatalogError::UnknownQuestion(question_id.to_string()))?;

        let option = question
            .option(option_id)
            .ok_or_else(|| CatalogError::UnknownOption {
                question_id: question_id.to_string(),
                option_id: option_id.to_string(),
            })?;

        Ok(ResolvedResponse {
            question_id: question.id,
            question_text: question.prompt,
            option_id: option.id,
            option_text: option.text,
            indicator: option.indicator,
            weight: option.weight,
        })
    }
}

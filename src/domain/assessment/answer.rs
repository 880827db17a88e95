use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// A recorded choice for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub option_id: String,
    pub answered_at: Timestamp,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            option_id: option_id.into(),
            answered_at: Timestamp::now(),
        }
    }
}

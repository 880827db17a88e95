//! Wire types for the email endpoints.
//!
//! Field names are snake_case on this surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub mbti_type: Option<String>,
    #[serde(default)]
    pub superpower: Option<String>,
    #[serde(default)]
    pub assessment_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleSaveRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mbti_type: Option<String>,
    #[serde(default)]
    pub superpower: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,
}

impl EmailResponse {
    pub fn success(message: impl Into<String>, subscriber_id: Option<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            subscriber_id,
        }
    }
}

//! HTTP gateway - submits to `POST /api/assessment/analyze` with reqwest.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::adapters::http::assessment::{AnalyzeRequest, AnalyzeResponse};
use crate::adapters::http::ErrorResponse;
use crate::domain::assessment::{Submission, SubmissionReceipt};
use crate::domain::foundation::AssessmentId;
use crate::ports::{AssessmentGateway, GatewayError};

const ANALYZE_PATH: &str = "/api/assessment/analyze";

pub struct HttpAssessmentGateway {
    base_url: String,
    client: Client,
}

impl HttpAssessmentGateway {
    /// `timeout` bounds the whole request, analysis included.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ANALYZE_PATH)
    }
}

#[async_trait]
impl AssessmentGateway for HttpAssessmentGateway {
    async fn submit(&self, submission: Submission) -> Result<SubmissionReceipt, GatewayError> {
        let body = AnalyzeRequest::from(&submission);

        let response = self
            .client
            .post(self.analyze_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(err) => err.message,
                Err(_) => format!("rejected with status {}", status),
            };
            return Err(GatewayError::rejected(message));
        }
        if status != StatusCode::OK {
            return Err(GatewayError::Transport(format!("unexpected status {}", status)));
        }

        let payload: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if !payload.success {
            return Err(GatewayError::InvalidResponse("success flag not set".into()));
        }

        // An unreadable id is treated like a missing one.
        let assessment_id = payload
            .assessment_id
            .as_deref()
            .and_then(|raw| raw.parse::<AssessmentId>().ok());

        Ok(SubmissionReceipt {
            assessment_id,
            analysis: payload.analysis.into_analysis(),
        })
    }
}

//! Scripted AIProvider for tests and offline runs.
//!
//! Responses are queued and consumed in order. Once the queue is empty every
//! call answers with [`CANNED_ANALYSIS`], a well-formed analysis document, so
//! an unscripted mock still drives the AI path end to end.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_analysis(&expected)
//!     .with_error(MockError::Timeout { timeout_secs: 20 })
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::personality::PersonalityAnalysis;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Returned when no scripted response is left.
pub const CANNED_ANALYSIS: &str = r#"{"mbtiType":"INFJ","confidence":82,"superpowerTitle":"The Vision Keeper","explanation":"You see where a team is heading before anyone writes it down. People trust your read on what matters.","strengths":["Long-range insight","Quiet influence","Principled judgment"],"kryptonite":"Small talk that never gets to the point","careerInsight":"Roles that shape direction, such as strategy, coaching or product vision, reward your foresight.","funFact":"You have already drafted the reply to an email that has not arrived yet."}"#;

/// Clones share the queue and the call log.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        usage: TokenUsage,
        finish_reason: FinishReason,
    },
    Error(MockError),
}

/// Provider failures a test can inject.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(self, response: MockResponse) -> Self {
        lock(&self.script).push_back(response);
        self
    }

    /// Queues raw completion text.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            usage: TokenUsage::new(10, 20),
            finish_reason: FinishReason::Stop,
        })
    }

    /// Queues `analysis` rendered in the camelCase contract the analyzer parses.
    pub fn with_analysis(self, analysis: &PersonalityAnalysis) -> Self {
        let content = serde_json::json!({
            "mbtiType": analysis.mbti_type,
            "confidence": analysis.confidence,
            "superpowerTitle": analysis.superpower_title,
            "explanation": analysis.explanation,
            "strengths": analysis.strengths,
            "kryptonite": analysis.kryptonite,
            "careerInsight": analysis.career_insight,
            "funFact": analysis.fun_fact,
        });
        self.with_response(content.to_string())
    }

    /// Queues text cut off by the token limit.
    pub fn with_truncated_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            usage: TokenUsage::new(10, 500),
            finish_reason: FinishReason::Length,
        })
    }

    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the provider info.
    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: CANNED_ANALYSIS.to_string(),
                usage: TokenUsage::new(180, 120),
                finish_reason: FinishReason::Stop,
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success {
                content,
                usage,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessageRole;

    fn test_request() -> CompletionRequest {
        CompletionRequest::new().with_message(MessageRole::User, "Hello")
    }

    #[tokio::test]
    async fn mock_provider_returns_configured_response() {
        let provider = MockAIProvider::new().with_response("Hello from mock!");

        let response = provider.complete(test_request()).await.unwrap();

        assert_eq!(response.content, "Hello from mock!");
        assert_eq!(response.model, "mock-model-1");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn mock_provider_returns_responses_in_order() {
        let provider = MockAIProvider::new().with_response("First").with_response("Second");

        assert_eq!(provider.complete(test_request()).await.unwrap().content, "First");
        assert_eq!(provider.complete(test_request()).await.unwrap().content, "Second");
        assert_eq!(provider.complete(test_request()).await.unwrap().content, CANNED_ANALYSIS);
    }

    #[tokio::test]
    async fn mock_provider_returns_configured_error() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited { retry_after_secs: 30 });

        let err = provider.complete(test_request()).await.unwrap_err();

        assert!(err.is_retryable());
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn with_analysis_renders_camel_case_contract() {
        let provider = MockAIProvider::new().with_analysis(&PersonalityAnalysis::fallback());

        let content = provider.complete(test_request()).await.unwrap().content;
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(json["mbtiType"], "ENFP");
        assert_eq!(json["confidence"], 75);
        assert_eq!(json["strengths"].as_array().map(Vec::len), Some(3));
        assert!(json.get("source").is_none());
    }

    #[tokio::test]
    async fn canned_analysis_passes_quality_checks() {
        let content = MockAIProvider::new()
            .complete(test_request())
            .await
            .unwrap()
            .content;
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(json["mbtiType"], "INFJ");
        assert!(json["explanation"].as_str().unwrap().len() > 50);
        assert!(json["careerInsight"].as_str().unwrap().len() > 50);
    }

    #[tokio::test]
    async fn truncated_response_reports_length() {
        let provider = MockAIProvider::new().with_truncated_response("{\"mbtiType\": \"IN");

        let response = provider.complete(test_request()).await.unwrap();

        assert_eq!(response.finish_reason, FinishReason::Length);
    }

    #[tokio::test]
    async fn mock_provider_tracks_calls() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.call_count(), 0);

        provider.complete(test_request()).await.unwrap();
        provider.complete(test_request()).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.get_calls()[0].messages[0].content, "Hello");
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let provider = MockAIProvider::new().with_response("shared");
        let clone = provider.clone();

        assert_eq!(clone.complete(test_request()).await.unwrap().content, "shared");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn mock_provider_respects_delay() {
        let provider = MockAIProvider::new()
            .with_response("Delayed response")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.complete(test_request()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn mock_error_converts_to_ai_error() {
        let err: AIError = MockError::Unavailable { message: "down".into() }.into();
        assert!(matches!(err, AIError::Unavailable { .. }));

        let err: AIError = MockError::AuthenticationFailed.into();
        assert!(matches!(err, AIError::AuthenticationFailed));

        let err: AIError = MockError::Timeout { timeout_secs: 30 }.into();
        assert!(matches!(err, AIError::Timeout { timeout_secs: 30 }));
    }
}

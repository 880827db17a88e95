//! Failover Analyzer - tries the primary analyzer, falls back on any failure.
//!
//! The primary call is bounded by a timeout. A provider error, a malformed
//! response or an elapsed timeout all produce the fallback result instead of
//! an error, so callers always get an analysis.
//!
//! # Example
//!
//! ```ignore
//! let analyzer = FailoverAnalyzer::new(Arc::new(LlmPersonalityAnalyzer::new(provider)))
//!     .with_timeout(Duration::from_secs(20));
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::catalog::ResolvedResponse;
use crate::domain::personality::PersonalityAnalysis;
use crate::ports::{AnalyzerError, PersonalityAnalyzer};

use super::FallbackAnalyzer;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Primary analyzer with a deterministic fallback.
pub struct FailoverAnalyzer {
    primary: Option<Arc<dyn PersonalityAnalyzer>>,
    fallback: FallbackAnalyzer,
    timeout: Duration,
}

impl FailoverAnalyzer {
    /// Creates a failover analyzer around a primary.
    pub fn new(primary: Arc<dyn PersonalityAnalyzer>) -> Self {
        Self {
            primary: Some(primary),
            fallback: FallbackAnalyzer::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// An analyzer that always produces the fallback result.
    pub fn fallback_only() -> Self {
        Self {
            primary: None,
            fallback: FallbackAnalyzer::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the bound on the primary call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Runs the primary under the timeout. Never fails.
    pub async fn analyze_or_fallback(&self, responses: &[ResolvedResponse]) -> PersonalityAnalysis {
        let Some(primary) = &self.primary else {
            tracing::warn!("No AI analyzer configured, using fallback analysis");
            return self.fallback.produce();
        };

        let error = match tokio::time::timeout(self.timeout, primary.analyze(responses)).await {
            Ok(Ok(analysis)) => return analysis,
            Ok(Err(err)) => err,
            Err(_) => AnalyzerError::TimedOut(self.timeout),
        };

        tracing::warn!(
            primary = primary.name(),
            error = %error,
            "Primary analyzer failed, using fallback analysis"
        );
        self.fallback.produce()
    }
}

#[async_trait]
impl PersonalityAnalyzer for FailoverAnalyzer {
    async fn analyze(
        &self,
        responses: &[ResolvedResponse],
    ) -> Result<PersonalityAnalysis, AnalyzerError> {
        Ok(self.analyze_or_fallback(responses).await)
    }

    fn name(&self) -> &'static str {
        "failover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::analysis::LlmPersonalityAnalyzer;
    use crate::domain::personality::AnalysisSource;

    const VALID: &str = r#"{"mbtiType":"ESTJ","confidence":80,"superpowerTitle":"The Efficiency Expert","explanation":"x","strengths":["a","b","c"],"kryptonite":"k","careerInsight":"c","funFact":"f"}"#;

    fn llm(provider: MockAIProvider) -> Arc<dyn PersonalityAnalyzer> {
        Arc::new(LlmPersonalityAnalyzer::new(Arc::new(provider)))
    }

    #[tokio::test]
    async fn returns_primary_result_on_success() {
        let analyzer = FailoverAnalyzer::new(llm(MockAIProvider::new().with_response(VALID)));

        let analysis = analyzer.analyze_or_fallback(&[]).await;

        assert_eq!(analysis.mbti_type, "ESTJ");
        assert_eq!(analysis.source, AnalysisSource::Ai);
    }

    #[tokio::test]
    async fn falls_back_on_provider_error() {
        let analyzer = FailoverAnalyzer::new(llm(
            MockAIProvider::new().with_error(MockError::AuthenticationFailed),
        ));

        let analysis = analyzer.analyze_or_fallback(&[]).await;

        assert!(analysis.is_degraded());
        assert_eq!(analysis, PersonalityAnalysis::fallback());
    }

    #[tokio::test]
    async fn falls_back_on_garbage() {
        let analyzer = FailoverAnalyzer::new(llm(MockAIProvider::new().with_response("{{{{")));
        assert!(analyzer.analyze_or_fallback(&[]).await.is_degraded());
    }

    #[tokio::test]
    async fn falls_back_when_primary_is_slow() {
        let slow = MockAIProvider::new()
            .with_response(VALID)
            .with_delay(Duration::from_millis(500));
        let analyzer = FailoverAnalyzer::new(llm(slow)).with_timeout(Duration::from_millis(20));

        let started = std::time::Instant::now();
        let analysis = analyzer.analyze_or_fallback(&[]).await;

        assert!(analysis.is_degraded());
        assert!(started.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn fallback_only_never_calls_a_provider() {
        let analyzer = FailoverAnalyzer::fallback_only();
        assert!(!analyzer.has_primary());
        assert!(analyzer.analyze(&[]).await.unwrap().is_degraded());
    }
}

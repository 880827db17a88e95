use async_trait::async_trait;

use crate::domain::catalog::ResolvedResponse;
use crate::domain::personality::PersonalityAnalysis;
use crate::ports::{AnalyzerError, PersonalityAnalyzer};

/// Deterministic analyzer. Ignores the answers and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackAnalyzer;

impl FallbackAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// The fallback result, without the `Result` wrapper.
    pub fn produce(&self) -> PersonalityAnalysis {
        PersonalityAnalysis::fallback()
    }
}

#[async_trait]
impl PersonalityAnalyzer for FallbackAnalyzer {
    async fn analyze(
        &self,
        _responses: &[ResolvedResponse],
    ) -> Result<PersonalityAnalysis, AnalyzerError> {
        Ok(self.produce())
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_returns_degraded_result() {
        let analysis = FallbackAnalyzer::new().analyze(&[]).await.unwrap();
        assert!(analysis.is_degraded());
        assert_eq!(analysis.mbti_type, "ENFP");
        assert_eq!(analysis.strengths.len(), 3);
    }
}

//! Personality analyzer port.
//!
//! One capability: turn catalog-resolved answers into a personality
//! analysis. Variants (live model, deterministic fallback) and combinators
//! over them all implement this trait.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::catalog::ResolvedResponse;
use crate::domain::personality::PersonalityAnalysis;

use super::AIError;

/// Errors an analyzer can report. The orchestrator absorbs all of them.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("provider error: {0}")]
    Provider(#[from] AIError),

    #[error("malformed analysis: {0}")]
    Malformed(String),

    #[error("analysis timed out after {0:?}")]
    TimedOut(Duration),
}

impl AnalyzerError {
    pub fn malformed(message: impl Into<String>) -> Self {
        AnalyzerError::Malformed(message.into())
    }
}

#[async_trait]
pub trait PersonalityAnalyzer: Send + Sync {
    /// Analyzes a full set of resolved responses, in catalog order.
    async fn analyze(
        &self,
        responses: &[ResolvedResponse],
    ) -> Result<PersonalityAnalysis, AnalyzerError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

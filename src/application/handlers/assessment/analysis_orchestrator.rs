//! AnalysisOrchestrator - turns submitted answer ids into a personality analysis.
//!
//! Resolution against the catalog is the only step that can reject a
//! submission. Once the answers resolve, an analysis is always produced:
//! analyzer failures are replaced by the fallback result here as a last
//! line, and quality checks only log.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::assessment::SubmittedAnswer;
use crate::domain::catalog::{QuestionCatalog, ResolvedResponse};
use crate::domain::personality::PersonalityAnalysis;
use crate::ports::PersonalityAnalyzer;

use super::SubmissionError;

pub struct AnalysisOrchestrator {
    catalog: &'static QuestionCatalog,
    analyzer: Arc<dyn PersonalityAnalyzer>,
}

impl AnalysisOrchestrator {
    pub fn new(analyzer: Arc<dyn PersonalityAnalyzer>) -> Self {
        Self {
            catalog: QuestionCatalog::standard(),
            analyzer,
        }
    }

    pub fn catalog(&self) -> &'static QuestionCatalog {
        self.catalog
    }

    /// Validates the answer set and rehydrates it into catalog text.
    ///
    /// Output keeps the submitted order.
    ///
    /// # Errors
    ///
    /// - `WrongAnswerCount` unless there is one answer per catalog question
    /// - `DuplicateQuestion` if a question id repeats
    /// - `UnknownQuestion` / `UnknownOption` for ids the catalog lacks
    pub fn resolve(
        &self,
        answers: &[SubmittedAnswer],
    ) -> Result<Vec<ResolvedResponse>, SubmissionError> {
        if answers.len() != self.catalog.len() {
            return Err(SubmissionError::WrongAnswerCount {
                expected: self.catalog.len(),
                actual: answers.len(),
            });
        }

        let mut seen = HashSet::with_capacity(answers.len());
        for answer in answers {
            if !seen.insert(answer.question_id.as_str()) {
                return Err(SubmissionError::DuplicateQuestion(answer.question_id.clone()));
            }
        }

        answers
            .iter()
            .map(|a| {
                self.catalog
                    .resolve(&a.question_id, &a.option_id)
                    .map_err(SubmissionError::from)
            })
            .collect()
    }

    /// Resolves the answers and analyzes them.
    ///
    /// # Errors
    ///
    /// Only the resolution errors of [`Self::resolve`].
    pub async fn analyze(
        &self,
        answers: &[SubmittedAnswer],
    ) -> Result<PersonalityAnalysis, SubmissionError> {
        let responses = self.resolve(answers)?;

        let analysis = match self.analyzer.analyze(&responses).await {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(
                    analyzer = self.analyzer.name(),
                    error = %err,
                    "Analyzer failed, using fallback analysis"
                );
                PersonalityAnalysis::fallback()
            }
        };

        let report = analysis.quality_report();
        if !report.passed() {
            // Advisory only: the analysis is returned unchanged.
            tracing::warn!(
                mbti_type = %analysis.mbti_type,
                source = analysis.source.as_str(),
                failed_checks = %report.summary(),
                "Analysis quality validation failed"
            );
        }

        tracing::info!(
            mbti_type = %analysis.mbti_type,
            confidence = analysis.confidence,
            source = analysis.source.as_str(),
            "Assessment analyzed"
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::analysis::{FailoverAnalyzer, LlmPersonalityAnalyzer};
    use crate::domain::personality::AnalysisSource;
    use crate::ports::AnalyzerError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingAnalyzer {
        calls: AtomicUsize,
        outcome: fn() -> Result<PersonalityAnalysis, AnalyzerError>,
    }

    impl CountingAnalyzer {
        fn new(outcome: fn() -> Result<PersonalityAnalysis, AnalyzerError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome,
            })
        }
    }

    #[async_trait]
    impl PersonalityAnalyzer for CountingAnalyzer {
        async fn analyze(
            &self,
            _responses: &[ResolvedResponse],
        ) -> Result<PersonalityAnalysis, AnalyzerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn first_options() -> Vec<SubmittedAnswer> {
        QuestionCatalog::standard()
            .all_questions()
            .iter()
            .map(|q| SubmittedAnswer::new(q.id, q.options[0].id))
            .collect()
    }

    fn low_quality() -> Result<PersonalityAnalysis, AnalyzerError> {
        let mut analysis = PersonalityAnalysis::fallback();
        analysis.mbti_type = "XXXX".to_string();
        analysis.confidence = 12;
        analysis.strengths.truncate(1);
        analysis.source = AnalysisSource::Ai;
        Ok(analysis)
    }

    const VALID_JSON: &str = r#"{
        "mbtiType": "INTJ",
        "confidence": 88,
        "superpowerTitle": "The System Architect",
        "explanation": "You build long-range plans and quietly make them happen, one system at a time.",
        "strengths": ["Strategic planning", "Independent problem solving", "High standards"],
        "kryptonite": "Meetings that could have been a two-line email",
        "careerInsight": "You thrive where you own a hard problem end to end and can design the solution yourself.",
        "funFact": "Your to-do list has a roadmap and a version number."
    }"#;

    #[test]
    fn resolve_keeps_submitted_order() {
        let orchestrator = AnalysisOrchestrator::new(CountingAnalyzer::new(low_quality));
        let mut answers = first_options();
        answers.reverse();

        let resolved = orchestrator.resolve(&answers).unwrap();

        assert_eq!(resolved[0].question_id, "q6_stress");
        assert_eq!(resolved[5].question_id, "q1_energy");
    }

    #[test]
    fn resolve_rejects_five_answers() {
        let orchestrator = AnalysisOrchestrator::new(CountingAnalyzer::new(low_quality));
        let mut answers = first_options();
        answers.pop();

        assert_eq!(
            orchestrator.resolve(&answers),
            Err(SubmissionError::WrongAnswerCount {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn resolve_rejects_duplicate_question() {
        let orchestrator = AnalysisOrchestrator::new(CountingAnalyzer::new(low_quality));
        let mut answers = first_options();
        answers[5] = SubmittedAnswer::new("q1_energy", "q1_b");

        assert_eq!(
            orchestrator.resolve(&answers),
            Err(SubmissionError::DuplicateQuestion("q1_energy".into()))
        );
    }

    #[test]
    fn resolve_rejects_unknown_option() {
        let orchestrator = AnalysisOrchestrator::new(CountingAnalyzer::new(low_quality));
        let mut answers = first_options();
        answers[2] = SubmittedAnswer::new("q3_decisions", "q1_a");

        assert!(matches!(
            orchestrator.resolve(&answers),
            Err(SubmissionError::UnknownOption { .. })
        ));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_analyzer() {
        let analyzer = CountingAnalyzer::new(low_quality);
        let orchestrator = AnalysisOrchestrator::new(analyzer.clone());
        let mut answers = first_options();
        answers[0] = SubmittedAnswer::new("q9_unknown", "q9_a");

        let result = orchestrator.analyze(&answers).await;

        assert_eq!(result, Err(SubmissionError::UnknownQuestion("q9_unknown".into())));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn low_quality_result_is_kept() {
        let orchestrator = AnalysisOrchestrator::new(CountingAnalyzer::new(low_quality));

        let analysis = orchestrator.analyze(&first_options()).await.unwrap();

        assert_eq!(analysis.mbti_type, "XXXX");
        assert_eq!(analysis.source, AnalysisSource::Ai);
        assert!(!analysis.quality_report().passed());
    }

    #[tokio::test]
    async fn analyzer_error_becomes_fallback() {
        let orchestrator = AnalysisOrchestrator::new(CountingAnalyzer::new(|| {
            Err(AnalyzerError::malformed("no json"))
        }));

        let analysis = orchestrator.analyze(&first_options()).await.unwrap();

        assert_eq!(analysis, PersonalityAnalysis::fallback());
    }

    #[tokio::test]
    async fn ai_result_passes_through() {
        let provider = MockAIProvider::new().with_response(VALID_JSON);
        let analyzer = FailoverAnalyzer::new(Arc::new(LlmPersonalityAnalyzer::new(Arc::new(
            provider,
        ))));
        let orchestrator = AnalysisOrchestrator::new(Arc::new(analyzer));

        let analysis = orchestrator.analyze(&first_options()).await.unwrap();

        assert_eq!(analysis.mbti_type, "INTJ");
        assert!(analysis.quality_report().passed());
    }

    #[tokio::test]
    async fn upstream_outage_yields_marked_fallback() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "upstream down".into(),
        });
        let analyzer = FailoverAnalyzer::new(Arc::new(LlmPersonalityAnalyzer::new(Arc::new(
            provider,
        ))));
        let orchestrator = AnalysisOrchestrator::new(Arc::new(analyzer));

        let analysis = orchestrator.analyze(&first_options()).await.unwrap();

        assert_eq!(analysis.mbti_type, "ENFP");
        assert!(analysis.explanation.starts_with("[FALLBACK] "));
        assert!(analysis.quality_report().passed());
    }

    #[tokio::test]
    async fn slow_upstream_yields_fallback() {
        let provider = MockAIProvider::new()
            .with_response(VALID_JSON)
            .with_delay(Duration::from_millis(200));
        let analyzer = FailoverAnalyzer::new(Arc::new(LlmPersonalityAnalyzer::new(Arc::new(
            provider,
        ))))
        .with_timeout(Duration::from_millis(20));
        let orchestrator = AnalysisOrchestrator::new(Arc::new(analyzer));

        let analysis = orchestrator.analyze(&first_options()).await.unwrap();

        assert!(analysis.is_degraded());
    }
}

//! AI-powered PersonalityAnalyzer implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::catalog::ResolvedResponse;
use crate::domain::personality::{AnalysisSource, PersonalityAnalysis};
use crate::ports::{AIProvider, AnalyzerError, CompletionRequest, PersonalityAnalyzer};

use super::prompt::build_analysis_prompt;

/// Analyzer backed by a chat-completion model in JSON mode.
pub struct LlmPersonalityAnalyzer {
    ai_provider: Arc<dyn AIProvider>,
    max_tokens: u32,
    temperature: f32,
}

impl LlmPersonalityAnalyzer {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            max_tokens: 500,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_request(&self, responses: &[ResolvedResponse]) -> CompletionRequest {
        CompletionRequest::new()
            .with_system_prompt(build_analysis_prompt(responses))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_json_response()
            .with_trace_id(format!("analysis-{}", uuid::Uuid::new_v4()))
    }

    /// Parses model output into an analysis.
    ///
    /// A missing or empty type code, title or explanation makes the output
    /// unusable. Everything else is taken as-is and judged later by the
    /// quality checks.
    fn parse_analysis(content: &str) -> Result<PersonalityAnalysis, AnalyzerError> {
        let json = extract_json_object(content)
            .ok_or_else(|| AnalyzerError::malformed("response contains no JSON object"))?;

        let raw: RawAnalysis = serde_json::from_str(json)
            .map_err(|e| AnalyzerError::malformed(format!("invalid analysis JSON: {}", e)))?;

        let mbti_type = raw.mbti_type.trim().to_uppercase();
        if mbti_type.is_empty() {
            return Err(AnalyzerError::malformed("missing mbtiType"));
        }
        if raw.superpower_title.trim().is_empty() {
            return Err(AnalyzerError::malformed("missing superpowerTitle"));
        }
        if raw.explanation.trim().is_empty() {
            return Err(AnalyzerError::malformed("missing explanation"));
        }

        Ok(PersonalityAnalysis {
            mbti_type,
            confidence: confidence_from(&raw.confidence),
            superpower_title: raw.superpower_title,
            explanation: raw.explanation,
            strengths: raw.strengths,
            kryptonite: raw.kryptonite,
            career_insight: raw.career_insight,
            fun_fact: raw.fun_fact,
            source: AnalysisSource::Ai,
        })
    }
}

#[async_trait]
impl PersonalityAnalyzer for LlmPersonalityAnalyzer {
    async fn analyze(
        &self,
        responses: &[ResolvedResponse],
    ) -> Result<PersonalityAnalysis, AnalyzerError> {
        let request = self.build_request(responses);
        let info = self.ai_provider.provider_info();

        tracing::info!(
            provider = %info.name,
            model = %info.model,
            responses = responses.len(),
            "Starting AI personality analysis"
        );

        let completion = self.ai_provider.complete(request).await.map_err(|e| {
            tracing::warn!(provider = %info.name, error = %e, "AI analysis call failed");
            AnalyzerError::from(e)
        })?;

        tracing::debug!(content_len = completion.content.len(), "AI analysis response received");

        let analysis = Self::parse_analysis(&completion.content)?;

        tracing::info!(
            mbti_type = %analysis.mbti_type,
            title = %analysis.superpower_title,
            total_tokens = completion.usage.total_tokens,
            "AI personality analysis succeeded"
        );
        Ok(analysis)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

// ----- Response parsing -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    mbti_type: String,
    #[serde(default)]
    confidence: Value,
    #[serde(default)]
    superpower_title: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    kryptonite: String,
    #[serde(default)]
    career_insight: String,
    #[serde(default)]
    fun_fact: String,
}

/// Strips markdown fences and any prose around the outermost JSON object.
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Numeric or numeric-string confidence, rounded. Anything else is 0.
fn confidence_from(value: &Value) -> u32 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.round().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::catalog::QuestionCatalog;
    use crate::ports::ResponseFormat;

    const VALID: &str = r#"{
        "mbtiType": "INTJ",
        "confidence": 87,
        "superpowerTitle": "The System Architect",
        "explanation": "You see the blueprint others miss. Your strategic mind turns chaos into plans.",
        "strengths": ["Long-range strategy", "Systems thinking", "Pattern spotting"],
        "kryptonite": "Meetings that could have been a well-structured document",
        "careerInsight": "Look for roles in strategic planning or architecture where depth is rewarded.",
        "funFact": "INTJs are one of the rarest types, at about two percent of people."
    }"#;

    fn responses() -> Vec<ResolvedResponse> {
        QuestionCatalog::standard()
            .all_questions()
            .iter()
            .map(|q| QuestionCatalog::standard().resolve(q.id, q.options[1].id).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn analyze_parses_valid_response() {
        let provider = Arc::new(MockAIProvider::new().with_response(VALID));
        let analyzer = LlmPersonalityAnalyzer::new(provider.clone());

        let analysis = analyzer.analyze(&responses()).await.unwrap();

        assert_eq!(analysis.mbti_type, "INTJ");
        assert_eq!(analysis.confidence, 87);
        assert_eq!(analysis.strengths.len(), 3);
        assert_eq!(analysis.source, AnalysisSource::Ai);
        assert!(analysis.quality_report().passed());
    }

    #[tokio::test]
    async fn analyze_sends_json_mode_request_with_limits() {
        let provider = Arc::new(MockAIProvider::new().with_response(VALID));
        let analyzer = LlmPersonalityAnalyzer::new(provider.clone());

        analyzer.analyze(&responses()).await.unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].response_format, ResponseFormat::JsonObject);
        assert_eq!(calls[0].max_tokens, Some(500));
        assert_eq!(calls[0].temperature, Some(0.7));
        assert!(calls[0]
            .system_prompt
            .as_deref()
            .unwrap()
            .contains("Answer: Prepare detailed analysis before presenting to the group"));
    }

    #[tokio::test]
    async fn analyze_propagates_provider_error() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        }));
        let analyzer = LlmPersonalityAnalyzer::new(provider);

        let err = analyzer.analyze(&responses()).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Provider(_)));
    }

    #[tokio::test]
    async fn analyze_rejects_garbage() {
        let provider = Arc::new(MockAIProvider::new().with_response("I am not JSON"));
        let analyzer = LlmPersonalityAnalyzer::new(provider);

        let err = analyzer.analyze(&responses()).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Malformed(_)));
    }

    #[test]
    fn parse_tolerates_code_fences() {
        let fenced = format!("```json\n{}\n```", VALID);
        let analysis = LlmPersonalityAnalyzer::parse_analysis(&fenced).unwrap();
        assert_eq!(analysis.superpower_title, "The System Architect");
    }

    #[test]
    fn parse_requires_type_title_and_explanation() {
        for missing in ["mbtiType", "superpowerTitle", "explanation"] {
            let mut value: Value = serde_json::from_str(VALID).unwrap();
            value[missing] = Value::String("  ".to_string());
            let err = LlmPersonalityAnalyzer::parse_analysis(&value.to_string()).unwrap_err();
            assert!(matches!(err, AnalyzerError::Malformed(_)), "{missing}");
        }
    }

    #[test]
    fn parse_accepts_low_quality_output() {
        let raw = r#"{"mbtiType":"abcd","confidence":40,"superpowerTitle":"T","explanation":"short","strengths":["one"]}"#;
        let analysis = LlmPersonalityAnalyzer::parse_analysis(raw).unwrap();
        assert_eq!(analysis.mbti_type, "ABCD");
        assert_eq!(analysis.confidence, 40);
        assert!(!analysis.quality_report().passed());
    }

    #[test]
    fn parse_rejects_wrong_field_types() {
        let raw = r#"{"mbtiType":"INTJ","superpowerTitle":"T","explanation":"E","strengths":"not a list"}"#;
        assert!(LlmPersonalityAnalyzer::parse_analysis(raw).is_err());
    }

    #[test]
    fn confidence_is_read_leniently() {
        assert_eq!(confidence_from(&serde_json::json!(85)), 85);
        assert_eq!(confidence_from(&serde_json::json!(84.6)), 85);
        assert_eq!(confidence_from(&serde_json::json!("90%")), 90);
        assert_eq!(confidence_from(&serde_json::json!(-3)), 0);
        assert_eq!(confidence_from(&Value::Null), 0);
    }

    #[test]
    fn extract_json_object_finds_outer_braces() {
        assert_eq!(extract_json_object("noise {\"a\":{}} tail"), Some("{\"a\":{}}"));
        assert_eq!(extract_json_object("no braces"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }
}

//! Personality analyzer adapters.
//!
//! - `LlmPersonalityAnalyzer` - asks an AI provider for a JSON analysis
//! - `FallbackAnalyzer` - the fixed, degraded-marked result
//! - `FailoverAnalyzer` - tries a primary analyzer under a timeout, falls back on any failure

mod failover_analyzer;
mod fallback_analyzer;
mod llm_analyzer;
mod prompt;

pub use failover_analyzer::FailoverAnalyzer;
pub use fallback_analyzer::FallbackAnalyzer;
pub use llm_analyzer::LlmPersonalityAnalyzer;
pub use prompt::build_analysis_prompt;

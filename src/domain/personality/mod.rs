//! Personality types and analysis results.

mod analysis;
mod personality_type;

pub use analysis::{
    AnalysisSource, PersonalityAnalysis, QualityCheck, QualityReport, FALLBACK_EXPLANATION_PREFIX,
    FALLBACK_FUN_FACT_SUFFIX,
};
pub use personality_type::PersonalityType;

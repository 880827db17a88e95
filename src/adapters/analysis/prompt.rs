//! Prompt text for the personality analysis request.

use crate::domain::catalog::ResolvedResponse;
use crate::domain::personality::PersonalityType;

const INSTRUCTIONS: &str = r#"You are an expert MBTI analyst and career coach with a humorous, engaging style. Your job is to analyze personality assessment responses and provide insightful, entertaining career guidance.

TASK: Analyze the following 6 assessment responses and determine the user's MBTI type with personalized career insights.

RESPONSE FORMAT: Return ONLY a JSON object with this exact structure:
{
  "mbtiType": "XXXX",
  "confidence": 85,
  "superpowerTitle": "The Innovation Catalyst",
  "explanation": "Brief 2-3 sentence explanation of their type",
  "strengths": ["Strength 1", "Strength 2", "Strength 3"],
  "kryptonite": "Humorous weakness description",
  "careerInsight": "Career-focused insight and recommendations",
  "funFact": "Interesting fact about their MBTI type"
}

GUIDELINES:
- Confidence should be 70-95% (realistic range)
- Explanation should be warm, encouraging, 2-3 sentences max
- Strengths should be workplace-relevant and empowering
- Kryptonite should be lighthearted but honest about challenges
- Career insight should be specific and actionable
- Fun fact should be engaging and shareable
- Keep total response under 500 tokens for cost efficiency
- Write in a confident, friendly tone that makes users feel special
"#;

/// Builds the full system prompt: instructions, the title table, then the
/// numbered question/answer blocks.
pub fn build_analysis_prompt(responses: &[ResolvedResponse]) -> String {
    let titles = PersonalityType::ALL
        .iter()
        .map(|t| format!("{}: \"{}\"", t.code(), t.superpower_title()))
        .collect::<Vec<_>>()
        .join("\n");

    let answers = responses
        .iter()
        .enumerate()
        .map(|(i, r)| format!("Q{}: {}\nAnswer: {}", i + 1, r.question_text, r.option_text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}\nSUPERPOWER TITLES BY TYPE:\n{}\n\nAssessment Responses:\n{}",
        INSTRUCTIONS, titles, answers
    )
}

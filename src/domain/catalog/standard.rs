//! The six standard assessment questions.

use super::question::{AnswerOption, Category, Dimension, Indicator, Question};

const fn option(id: &'static str, text: &'static str, indicator: Indicator, weight: u8) -> AnswerOption {
    AnswerOption {
        id,
        text,
        indicator,
        weight,
    }
}

pub(super) static STANDARD_QUESTIONS: [Question; 6] = [
    Question {
        id: "q1_energy",
        category: Category::Energy,
        dimension: Dimension::EnergySource,
        scenario: "Your team is planning the next quarter's strategy...",
        prompt: "How do you prefer to contribute to strategic planning?",
        options: [
            option("q1_a", "Lead group discussions and brainstorming sessions", Indicator::E, 3),
            option("q1_b", "Prepare detailed analysis before presenting to the group", Indicator::I, 3),
            option("q1_c", "Facilitate small group conversations and build consensus", Indicator::E, 2),
            option("q1_d", "Provide one-on-one input to key decision makers", Indicator::I, 2),
        ],
    },
    Question {
        id: "q2_information",
        category: Category::Information,
        dimension: Dimension::Perception,
        scenario: "When approaching a new project, you typically...",
        prompt: "What's your natural approach to understanding new challenges?",
        options: [
            option("q2_a", "Research similar past projects and proven methodologies", Indicator::S, 3),
            option("q2_b", "Envision the big picture and future possibilities", Indicator::N, 3),
            option("q2_c", "Gather concrete data and current market facts", Indicator::S, 2),
            option("q2_d", "Explore innovative angles and potential disruptions", Indicator::N, 2),
        ],
    },
    Question {
        id: "q3_decisions",
        category: Category::Decisions,
        dimension: Dimension::Judgment,
        scenario: "A teammate is struggling with their workload...",
        prompt: "How do you typically respond to help them?",
        options: [
            option("q3_a", "Analyze their tasks and suggest efficiency improvements", Indicator::T, 3),
            option("q3_b", "Offer emotional support and listen to their concerns", Indicator::F, 3),
            option("q3_c", "Help them prioritize and reallocate resources logically", Indicator::T, 2),
            option("q3_d", "Check in on their wellbeing and team harmony", Indicator::F, 2),
        ],
    },
    Question {
        id: "q4_structure",
        category: Category::Structure,
        dimension: Dimension::Lifestyle,
        scenario: "Your ideal work environment includes...",
        prompt: "Which work style environment energizes you most?",
        options: [
            option("q4_a", "Clear deadlines, structured plans, and organized systems", Indicator::J, 3),
            option("q4_b", "Flexible timelines, adaptive approaches, and open options", Indicator::P, 3),
            option("q4_c", "Predictable routines with room for some spontaneity", Indicator::J, 2),
            option("q4_d", "Dynamic changes with loose structure as needed", Indicator::P, 2),
        ],
    },
    Question {
        id: "q5_communication",
        category: Category::Communication,
        dimension: Dimension::Judgment,
        scenario: "When presenting ideas to leadership...",
        prompt: "What approach do you find most effective?",
        options: [
            option("q5_a", "Lead with data, metrics, and logical arguments", Indicator::T, 3),
            option("q5_b", "Share stories that connect emotionally with values", Indicator::F, 3),
            option("q5_c", "Build collaborative consensus before presenting", Indicator::F, 2),
            option("q5_d", "Present clear, direct recommendations with evidence", Indicator::T, 2),
        ],
    },
    Question {
        id: "q6_stress",
        category: Category::Stress,
        dimension: Dimension::EnergySource,
        scenario: "Under a tight deadline with unexpected obstacles...",
        prompt: "How do you naturally respond to high-pressure situations?",
        options: [
            option("q6_a", "Rally the team and brainstorm solutions together", Indicator::E, 3),
            option("q6_b", "Step back, analyze the situation, and plan systematically", Indicator::I, 3),
            option("q6_c", "Seek input from others while maintaining focus", Indicator::E, 2),
            option("q6_d", "Work independently to solve problems efficiently", Indicator::I, 2),
        ],
    },
];

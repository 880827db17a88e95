//! Question and option value types.

use serde::Serialize;
use std::fmt;

/// One pole of a personality dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Indicator {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl Indicator {
    /// The single-letter code used in type codes.
    pub fn letter(&self) -> char {
        match self {
            Indicator::E => 'E',
            Indicator::I => 'I',
            Indicator::S => 'S',
            Indicator::N => 'N',
            Indicator::T => 'T',
            Indicator::F => 'F',
            Indicator::J => 'J',
            Indicator::P => 'P',
        }
    }

    /// The dimension this indicator belongs to.
    pub fn dimension(&self) -> Dimension {
        match self {
            Indicator::E | Indicator::I => Dimension::EnergySource,
            Indicator::S | Indicator::N => Dimension::Perception,
            Indicator::T | Indicator::F => Dimension::Judgment,
            Indicator::J | Indicator::P => Dimension::Lifestyle,
        }
    }

    /// The opposing pole on the same dimension.
    pub fn opposite(&self) -> Indicator {
        match self {
            Indicator::E => Indicator::I,
            Indicator::I => Indicator::E,
            Indicator::S => Indicator::N,
            Indicator::N => Indicator::S,
            Indicator::T => Indicator::F,
            Indicator::F => Indicator::T,
            Indicator::J => Indicator::P,
            Indicator::P => Indicator::J,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The four binary preference axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    #[serde(rename = "E/I")]
    EnergySource,
    #[serde(rename = "S/N")]
    Perception,
    #[serde(rename = "T/F")]
    Judgment,
    #[serde(rename = "J/P")]
    Lifestyle,
}

impl Dimension {
    /// Both poles, in `first/second` order.
    pub fn poles(&self) -> (Indicator, Indicator) {
        match self {
            Dimension::EnergySource => (Indicator::E, Indicator::I),
            Dimension::Perception => (Indicator::S, Indicator::N),
            Dimension::Judgment => (Indicator::T, Indicator::F),
            Dimension::Lifestyle => (Indicator::J, Indicator::P),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::EnergySource => "E/I",
            Dimension::Perception => "S/N",
            Dimension::Judgment => "T/F",
            Dimension::Lifestyle => "J/P",
        }
    }
}

/// Thematic grouping of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Energy,
    Information,
    Decisions,
    Structure,
    Communication,
    Stress,
}

/// A selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    /// Unique within its question.
    pub id: &'static str,
    pub text: &'static str,
    /// Which pole this option signals.
    pub indicator: Indicator,
    /// Signal strength, 2 or 3.
    pub weight: u8,
}

/// A questionnaire item.
///
/// # Invariants
///
/// - exactly four options with distinct ids
/// - options span both poles of `dimension`, each at least once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub category: Category,
    pub dimension: Dimension,
    /// Short framing line shown above the prompt.
    pub scenario: &'static str,
    pub prompt: &'static str,
    pub options: [AnswerOption; 4],
}

impl Question {
    /// Looks up an option by id.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Zero-based display position of an option.
    pub fn option_index(&self, option_id: &str) -> Option<usize> {
        self.options.iter().position(|o| o.id == option_id)
    }
}

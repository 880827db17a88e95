//! The sixteen four-letter personality type codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the sixteen categorical personality types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PersonalityType {
    Enfp,
    Intj,
    Infj,
    Entj,
    Istj,
    Esfj,
    Istp,
    Esfp,
    Intp,
    Enfj,
    Isfj,
    Estp,
    Infp,
    Estj,
    Isfp,
    Entp,
}

impl PersonalityType {
    /// All types, in the order the superpower table lists them.
    pub const ALL: [PersonalityType; 16] = [
        PersonalityType::Enfp,
        PersonalityType::Intj,
        PersonalityType::Infj,
        PersonalityType::Entj,
        PersonalityType::Istj,
        PersonalityType::Esfj,
        PersonalityType::Istp,
        PersonalityType::Esfp,
        PersonalityType::Intp,
        PersonalityType::Enfj,
        PersonalityType::Isfj,
        PersonalityType::Estp,
        PersonalityType::Infp,
        PersonalityType::Estj,
        PersonalityType::Isfp,
        PersonalityType::Entp,
    ];

    /// Four-letter uppercase code.
    pub fn code(&self) -> &'static str {
        match self {
            PersonalityType::Enfp => "ENFP",
            PersonalityType::Intj => "INTJ",
            PersonalityType::Infj => "INFJ",
            PersonalityType::Entj => "ENTJ",
            PersonalityType::Istj => "ISTJ",
            PersonalityType::Esfj => "ESFJ",
            PersonalityType::Istp => "ISTP",
            PersonalityType::Esfp => "ESFP",
            PersonalityType::Intp => "INTP",
            PersonalityType::Enfj => "ENFJ",
            PersonalityType::Isfj => "ISFJ",
            PersonalityType::Estp => "ESTP",
            PersonalityType::Infp => "INFP",
            PersonalityType::Estj => "ESTJ",
            PersonalityType::Isfp => "ISFP",
            PersonalityType::Entp => "ENTP",
        }
    }

    /// Canonical career superpower title.
    pub fn superpower_title(&self) -> &'static str {
        match self {
            PersonalityType::Enfp => "The Innovation Catalyst",
            PersonalityType::Intj => "The System Architect",
            PersonalityType::Infj => "The Harmony Architect",
            PersonalityType::Entj => "The Results Engine",
            PersonalityType::Istj => "The Detail Detective",
            PersonalityType::Esfj => "The People Connector",
            PersonalityType::Istp => "The Problem Solver",
            PersonalityType::Esfp => "The Energy Amplifier",
            PersonalityType::Intp => "The Strategic Advisor",
            PersonalityType::Enfj => "The Culture Champion",
            PersonalityType::Isfj => "The Quality Guardian",
            PersonalityType::Estp => "The Action Hero",
            PersonalityType::Infp => "The Creative Visionary",
            PersonalityType::Estj => "The Efficiency Expert",
            PersonalityType::Isfp => "The Authentic Voice",
            PersonalityType::Entp => "The Growth Hacker",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for PersonalityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("mbti_type"));
        }
        PersonalityType::ALL
            .iter()
            .copied()
            .find(|t| t.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                ValidationError::invalid_format("mbti_type", format!("'{}' is not a known type", trimmed))
            })
    }
}

impl TryFrom<String> for PersonalityType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PersonalityType> for String {
    fn from(value: PersonalityType) -> Self {
        value.code().to_string()
    }
}

//! Session lifecycle phases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle phase of an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not started, or reset.
    #[default]
    Idle,
    /// Collecting answers.
    Active,
    /// A submission is in flight.
    Analyzing,
    /// A result has been received.
    Complete,
}

impl StateMachine for Phase {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Phase::*;
        match self {
            Idle => vec![Active],
            Active => vec![Active, Analyzing, Idle],
            Analyzing => vec![Active, Complete, Idle],
            Complete => vec![Active, Idle],
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Analyzing => "analyzing",
            Phase::Complete => "complete",
        };
        f.write_str(s)
    }
}

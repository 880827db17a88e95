//! Superpower Assessment - career personality assessment service
//!
//! Respondents answer six workplace scenarios; the answers are analyzed into
//! a four-letter personality type with a "career superpower" profile. AI
//! analysis is used when available and a fixed fallback result otherwise, so
//! a valid submission always gets an answer. Completed assessments, analytics
//! events and email subscribers are recorded on a best-effort basis.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Analysis Ports
//!
//! - `AIProvider` - Chat-completion service
//! - `PersonalityAnalyzer` - Resolved answers to personality analysis
//!
//! ## Engagement Ports
//!
//! - `AssessmentRepository` - Analyzed assessment records
//! - `AnalyticsEventRepository` - Engagement events
//! - `SubscriberRepository` - Email subscribers, unique by email
//!
//! ## Session Ports
//!
//! - `AssessmentGateway` - Carries a submission to the analysis service
//! - `SessionStore` - Snapshots of in-progress sessions

mod ai_provider;
mod analytics_event_repository;
mod assessment_gateway;
mod assessment_repository;
mod personality_analyzer;
mod session_store;
mod subscriber_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole,
    ProviderInfo, ResponseFormat, TokenUsage,
};
pub use analytics_event_repository::AnalyticsEventRepository;
pub use assessment_gateway::{AssessmentGateway, GatewayError};
pub use assessment_repository::AssessmentRepository;
pub use personality_analyzer::{AnalyzerError, PersonalityAnalyzer};
pub use session_store::{SessionStore, SessionStoreError};
pub use subscriber_repository::SubscriberRepository;

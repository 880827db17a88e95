//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat-completion providers (OpenAI, mock)
//! - `analysis` - Personality analyzers (LLM, fallback, failover)
//! - `gateway` - Submission transport for the session driver (in-process, HTTP)
//! - `http` - axum routes for the public API
//! - `memory` - In-memory engagement store for tests and development
//! - `postgres` - PostgreSQL repositories
//! - `storage` - Session snapshot stores (in-memory, YAML files)

pub mod ai;
pub mod analysis;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use analysis::{FailoverAnalyzer, FallbackAnalyzer, LlmPersonalityAnalyzer};
pub use gateway::{HttpAssessmentGateway, LocalAssessmentGateway};
pub use memory::InMemoryEngagementStore;
pub use postgres::{
    PostgresAnalyticsEventRepository, PostgresAssessmentRepository, PostgresSubscriberRepository,
};
pub use storage::{FileSessionStore, InMemorySessionStore};

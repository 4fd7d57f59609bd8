//! Shared data models for all services.

pub mod agent;
pub mod chat;
pub mod query;

// Re-export commonly used types
pub use agent::{AgentConfig, Sample};
pub use chat::{ChatMessageRequest, ChatReply};
pub use query::QueryResult;

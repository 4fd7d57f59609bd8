//! Agent configuration models.
//!
//! Mirrors the JSON artifact edited by the admin service and read by the
//! chat service on every message.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Instructions plus the ordered list of question/SQL samples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AgentConfig {
    /// Free-text system instructions, also used as the greeting.
    #[serde(default)]
    pub instructions: String,

    /// Samples in match priority order (first match wins).
    #[serde(default)]
    pub samples: Vec<Sample>,
}

/// A natural-language question mapped to a SQL statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Sample {
    /// Text matched case-insensitively as a substring of the user message.
    pub question: String,

    /// SQL executed verbatim on a match.
    pub sql: String,
}

impl Sample {
    pub fn new(question: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            sql: sql.into(),
        }
    }
}

impl AgentConfig {
    pub fn new(instructions: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            instructions: instructions.into(),
            samples,
        }
    }
}

//! SQL query models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of a SQL query execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QueryResult {
    /// Column names in result order.
    pub columns: Vec<String>,

    /// Row data, positionally aligned with `columns`.
    pub rows: Vec<Vec<serde_json::Value>>,

    /// Number of rows returned.
    #[serde(default)]
    pub row_count: usize,

    /// Query execution time in milliseconds.
    #[serde(default)]
    pub execution_time_ms: u64,
}

impl QueryResult {
    /// Creates a result from columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        Self {
            row_count: rows.len(),
            columns,
            rows,
            execution_time_ms: 0,
        }
    }

    /// Sets the execution time.
    pub fn with_execution_time(mut self, execution_time_ms: u64) -> Self {
        self.execution_time_ms = execution_time_ms;
        self
    }
}

//! 样例 SQL 分发
//!
//! Decides per message whether a configured sample applies. Samples are
//! checked in stored order and the first one whose question appears in the
//! message (ignoring case) wins. An empty question matches every message.

use common::models::AgentConfig;

/// Returns the SQL of the first sample whose question is contained in `user_text`.
pub fn find_sql<'a>(user_text: &str, config: &'a AgentConfig) -> Option<&'a str> {
    let text = user_text.to_lowercase();
    config
        .samples
        .iter()
        .find(|sample| text.contains(&sample.question.to_lowercase()))
        .map(|sample| sample.sql.as_str())
}

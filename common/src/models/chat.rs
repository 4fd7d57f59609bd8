//! Chat transport models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::query::QueryResult;

/// Caption attached to tabular replies.
pub const TABLE_CAPTION: &str = "Query result";

/// Request body carrying one user message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageRequest {
    /// Raw user text.
    pub content: String,
}

/// A single reply rendered back to the chat user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatReply {
    /// Plain text message.
    Text { content: String },

    /// Tabular query result.
    Table {
        content: String,
        columns: Vec<String>,
        rows: Vec<Vec<serde_json::Value>>,
    },
}

impl ChatReply {
    pub fn text(content: impl Into<String>) -> Self {
        ChatReply::Text {
            content: content.into(),
        }
    }

    /// Renders a query result as a table reply.
    pub fn table(result: QueryResult) -> Self {
        ChatReply::Table {
            content: TABLE_CAPTION.to_string(),
            columns: result.columns,
            rows: result.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_reply_shape() {
        let reply = ChatReply::table(QueryResult::new(
            vec!["id".into(), "name".into()],
            vec![vec![json!(1), json!("Acme")]],
        ));

        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "type": "table",
                "content": "Query result",
                "columns": ["id", "name"],
                "rows": [[1, "Acme"]],
            })
        );
    }

    #[test]
    fn test_text_reply_shape() {
        let value = serde_json::to_value(ChatReply::text("hi")).unwrap();
        assert_eq!(value, json!({"type": "text", "content": "hi"}));
    }
}

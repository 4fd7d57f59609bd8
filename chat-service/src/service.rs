//! 对话服务模块
//!
//! Session entry points. Each message is handled on its own: the
//! configuration is reloaded, a matching sample is run against the database,
//! otherwise the completion fallback answers.

use std::sync::Arc;

use common::errors::AppResult;
use common::models::ChatReply;
use common::store::ConfigStore;

use crate::completion::CompletionClient;
use crate::connector::Connector;
use crate::dispatcher;

/// Greeting used when no instructions are configured.
pub const DEFAULT_GREETING: &str = "Hello! Ask me a question about your data.";

/// 对话服务
#[derive(Clone)]
pub struct ChatService {
    store: ConfigStore,
    connector: Arc<Connector>,
    completion: Arc<dyn CompletionClient>,
}

impl ChatService {
    pub fn new(
        store: ConfigStore,
        connector: Arc<Connector>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            store,
            connector,
            completion,
        }
    }

    /// Handles the start of a chat session.
    pub async fn on_start(&self) -> AppResult<ChatReply> {
        let config = self.store.load().await?;
        let greeting = if config.instructions.trim().is_empty() {
            DEFAULT_GREETING.to_string()
        } else {
            config.instructions
        };
        Ok(ChatReply::text(greeting))
    }

    /// Handles one incoming user message.
    pub async fn on_message(&self, text: &str) -> AppResult<ChatReply> {
        let config = self.store.load().await?;

        if let Some(sql) = dispatcher::find_sql(text, &config) {
            tracing::info!(sql = %sql, "命中样例问题，执行 SQL");
            let result = self.connector.run_query(sql).await?;
            return Ok(ChatReply::table(result));
        }

        tracing::info!(samples = config.samples.len(), "未命中样例，调用补全接口");
        let content = self.completion.complete(&config.instructions, text).await?;
        Ok(ChatReply::text(content))
    }
}

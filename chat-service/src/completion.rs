//! 大模型补全兜底
//!
//! Sends the configured instructions as a system message followed by the
//! user's message to an Azure OpenAI chat-completions deployment.

use async_trait::async_trait;
use common::config::CompletionSettings;
use common::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Produces a model reply for a single message.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, instructions: &str, user_text: &str) -> AppResult<String>;
}

/// Azure OpenAI chat-completions client.
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    settings: CompletionSettings,
}

impl AzureOpenAiClient {
    pub fn new(http: reqwest::Client, settings: CompletionSettings) -> Self {
        Self { http, settings }
    }

    fn endpoint(&self) -> AppResult<String> {
        if self.settings.endpoint.is_empty() {
            return Err(AppError::Completion("AZURE_OPENAI_ENDPOINT is not set".into()));
        }
        if self.settings.deployment.is_empty() {
            return Err(AppError::Completion("AZURE_OPENAI_DEPLOYMENT is not set".into()));
        }
        Ok(format!(
            "{}/openai/deployments/{}/chat/completions",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.deployment
        ))
    }

    fn build_request(instructions: &str, user_text: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                CompletionMessage {
                    role: "system".to_string(),
                    content: instructions.to_string(),
                },
                CompletionMessage {
                    role: "user".to_string(),
                    content: user_text.to_string(),
                },
            ],
        }
    }
}

#[async_trait]
impl CompletionClient for AzureOpenAiClient {
    async fn complete(&self, instructions: &str, user_text: &str) -> AppResult<String> {
        let url = self.endpoint()?;
        if self.settings.api_key.is_empty() {
            return Err(AppError::Completion("AZURE_OPENAI_API_KEY is not set".into()));
        }

        tracing::debug!(deployment = %self.settings.deployment, "调用补全接口");

        let response = self
            .http
            .post(&url)
            .query(&[("api-version", self.settings.api_version.as_str())])
            .header("api-key", &self.settings.api_key)
            .json(&Self::build_request(instructions, user_text))
            .send()
            .await
            .map_err(|e| AppError::Completion(format!("无法连接到补全服务: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<无法读取响应体: {e}>"));
            return Err(AppError::Completion(format!("HTTP {}: {}", status, body)));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("补全服务返回无效响应: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Completion("response contained no choices".into()))
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    messages: Vec<CompletionMessage>,
}

#[derive(Debug, Serialize)]
struct CompletionMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

//! Application state for chat service.

use std::sync::Arc;

use common::config::{AppConfig, CompletionSettings, DatabaseSettings};
use common::store::ConfigStore;

use crate::completion::AzureOpenAiClient;
use crate::connector::Connector;
use crate::service::ChatService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub chat: ChatService,
}

impl AppState {
    /// Creates a new application state from environment settings.
    pub fn new(config: AppConfig) -> Self {
        let store = ConfigStore::new(config.config_file.clone());
        let connector = Arc::new(Connector::new(DatabaseSettings::load()));
        let completion = Arc::new(AzureOpenAiClient::new(
            reqwest::Client::new(),
            CompletionSettings::load(),
        ));

        Self::with_service(config, ChatService::new(store, connector, completion))
    }

    pub fn with_service(config: AppConfig, chat: ChatService) -> Self {
        Self { config, chat }
    }
}

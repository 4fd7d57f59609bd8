//! Application state for admin service.

use common::config::AppConfig;
use common::store::ConfigStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: ConfigStore,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: ConfigStore::new(config.config_file.clone()),
            config,
        }
    }
}

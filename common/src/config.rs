//! Process settings loaded from environment variables.

use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_DRIVERS: [&str; 3] = ["mssql", "postgres", "mysql"];
const DEFAULT_API_VERSION: &str = "2023-07-01-preview";

/// Server settings shared by every service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service_name: String,
    pub host: String,
    pub port: u16,
    /// Path of the JSON configuration artifact.
    pub config_file: PathBuf,
}

impl AppConfig {
    /// Loads settings for the named service.
    ///
    /// `SERVER_PORT` overrides `default_port`.
    pub fn load_with_service(service_name: &str, default_port: u16) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: env_or("SERVER_HOST", DEFAULT_HOST),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_port),
            config_file: PathBuf::from(env_or("CONFIG_FILE", DEFAULT_CONFIG_FILE)),
        }
    }

    /// `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database connection parameters.
#[derive(Debug, Clone, Default)]
pub struct DatabaseSettings {
    pub server: String,
    pub port: Option<u16>,
    pub database: String,
    pub username: String,
    pub password: String,
    /// Driver identifiers, most preferred first.
    pub drivers: Vec<String>,
}

impl DatabaseSettings {
    pub fn load() -> Self {
        Self {
            server: env_or("DB_SERVER", ""),
            port: std::env::var("DB_PORT").ok().and_then(|v| v.parse().ok()),
            database: env_or("DB_DATABASE", ""),
            username: env_or("DB_USER", ""),
            password: env_or("DB_PASSWORD", ""),
            drivers: parse_driver_list(std::env::var("DB_DRIVERS").ok().as_deref()),
        }
    }
}

/// Parses a comma separated driver list, falling back to the defaults when empty.
pub fn parse_driver_list(raw: Option<&str>) -> Vec<String> {
    let drivers: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect();

    if drivers.is_empty() {
        DEFAULT_DRIVERS.iter().map(|d| d.to_string()).collect()
    } else {
        drivers
    }
}

/// Hosted completion API parameters.
#[derive(Debug, Clone, Default)]
pub struct CompletionSettings {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

impl CompletionSettings {
    pub fn load() -> Self {
        Self {
            api_key: env_or("AZURE_OPENAI_API_KEY", ""),
            endpoint: env_or("AZURE_OPENAI_ENDPOINT", ""),
            deployment: env_or("AZURE_OPENAI_DEPLOYMENT", ""),
            api_version: env_or("AZURE_OPENAI_API_VERSION", DEFAULT_API_VERSION),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

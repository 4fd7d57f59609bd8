//! Error taxonomy shared by all services.
//!
//! Every error bubbles up to the HTTP handler, which renders it through
//! [`AppError`]'s `IntoResponse` implementation as a failure envelope.

use std::path::PathBuf;

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used across services.
pub type AppResult<T> = Result<T, AppError>;

/// Failure to read the configuration artifact.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to access configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a single connection attempt through one driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The driver is not installed or cannot handle the connection.
    #[error("driver `{driver}` is not available: {message}")]
    Unavailable { driver: String, message: String },

    /// The driver was found but the connection itself failed.
    #[error("driver `{driver}` failed to connect: {message}")]
    Failed { driver: String, message: String },
}

impl DriverError {
    /// Whether the next driver in the list may be tried.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DriverError::Unavailable { .. })
    }
}

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no database driver available, install the `{recommended}` driver")]
    NoDriverAvailable {
        recommended: String,
        #[source]
        last: Option<DriverError>,
    },

    #[error("database connection failed: {0}")]
    DatabaseConnection(String),

    #[error("query execution failed: {0}")]
    QueryExecution(String),

    #[error("completion request failed: {0}")]
    Completion(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::NoDriverAvailable { .. } => "NO_DRIVER_AVAILABLE",
            AppError::DatabaseConnection(_) => "DATABASE_CONNECTION_ERROR",
            AppError::QueryExecution(_) => "QUERY_EXECUTION_ERROR",
            AppError::Completion(_) => "COMPLETION_API_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status used when the error reaches a handler.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NoDriverAvailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseConnection(_) | AppError::Completion(_) => StatusCode::BAD_GATEWAY,
            AppError::QueryExecution(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Full message including the chain of underlying causes.
    pub fn chained_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.chained_message();
        tracing::error!(code = self.code(), status = %status, error = %message, "请求处理失败");
        (status, Json(ApiResponse::err(self.code(), message))).into_response()
    }
}

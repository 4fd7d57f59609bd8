//! Configuration store backed by a JSON file.
//!
//! The artifact is read fresh on every `load` so admin edits apply to the
//! next message without a restart. Writes go to a uniquely named temporary
//! file in the same directory that is persisted over the artifact, so readers
//! never observe a partial file.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tokio::sync::RwLock;

use crate::errors::ConfigError;
use crate::models::AgentConfig;

/// Shared handle to the configuration artifact.
#[derive(Clone)]
pub struct ConfigStore {
    path: Arc<PathBuf>,
    /// Single writer, many readers within this process.
    lock: Arc<RwLock<()>>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(RwLock::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the artifact.
    pub async fn load(&self) -> Result<AgentConfig, ConfigError> {
        let _guard = self.lock.read().await;

        let content = tokio::fs::read_to_string(self.path.as_path())
            .await
            .map_err(|source| self.io_error(source))?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Malformed {
            path: self.path.to_path_buf(),
            source,
        })
    }

    /// Overwrites the artifact with pretty-printed JSON.
    pub async fn save(&self, config: &AgentConfig) -> Result<(), ConfigError> {
        let _guard = self.lock.write().await;

        let body = serde_json::to_string_pretty(config).map_err(|source| {
            ConfigError::Malformed {
                path: self.path.to_path_buf(),
                source,
            }
        })?;

        let path = self.path.to_path_buf();
        let written = tokio::task::spawn_blocking(move || write_atomically(&path, body.as_bytes()))
            .await
            .map_err(|e| self.io_error(std::io::Error::other(e)))?;
        written.map_err(|source| self.io_error(source))?;

        tracing::info!(
            path = %self.path.display(),
            samples = config.samples.len(),
            "configuration saved"
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        if source.kind() == ErrorKind::NotFound {
            ConfigError::Missing(self.path.to_path_buf())
        } else {
            ConfigError::Io {
                path: self.path.to_path_buf(),
                source,
            }
        }
    }
}

/// Writes `body` to a temporary file beside `path`, then renames it into place.
///
/// The temporary file is removed if any step fails.
fn write_atomically(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

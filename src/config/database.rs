//! Database connection settings.
//!
//! The settings are an explicit value handed to whoever opens the
//! connection. Nothing here connects or caches a process-wide handle.

use serde::{Deserialize, Serialize};

use super::loader::ConfigError;
use crate::constants::DEFAULT_DATABASE_NAME;

/// Document database settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string. Required before connecting.
    pub url: Option<String>,
    /// Database name within the cluster.
    pub name: String,
    /// Queue commands while disconnected instead of failing them.
    pub buffer_commands: bool,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("name", &self.name)
            .field("buffer_commands", &self.buffer_commands)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: DEFAULT_DATABASE_NAME.to_string(),
            buffer_commands: false,
        }
    }
}

impl DatabaseConfig {
    /// The connection string, or an error if none was configured.
    pub fn connection_url(&self) -> Result<&str, ConfigError> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// Copy with the connection string masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            url: self.url.as_ref().map(|_| "[REDACTED]".to_string()),
            ..self.clone()
        }
    }
}

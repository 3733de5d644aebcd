//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/activityboard/config.toml` by default. Command-line flags
//! override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use activityboard_core::{FormatOptions, OutputFormat};

use crate::error::{ClientError, ClientResult};

/// Configuration for the activityboard client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Display settings.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Server/connection settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// How long a feedback message stays visible, in milliseconds.
    pub message_timeout_ms: u64,

    /// Maximum description length (truncated with ellipsis).
    pub max_description_length: Option<usize>,

    /// Output format used when no format flag is given.
    pub format: OutputFormat,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            message_timeout_ms: 5000,
            max_description_length: None,
            format: OutputFormat::Tty,
        }
    }
}

impl DisplaySettings {
    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.message_timeout_ms)
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_description_length: self.max_description_length,
            ..FormatOptions::default()
        }
    }
}

/// Server/connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL of the activities API.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout: 5,
        }
    }
}

impl ServerSettings {
    /// Parses the base URL.
    pub fn url(&self) -> ClientResult<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it is missing.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("failed to read config: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse config: {}", e)))
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.server.url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.server.timeout == 0 {
            return Err(ClientError::Config("timeout must be positive".to_string()));
        }
        if self.display.max_description_length == Some(0) {
            return Err(ClientError::Config(
                "max_description_length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("activityboard")
    }
}

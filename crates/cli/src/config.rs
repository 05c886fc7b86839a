//! Configuration loading from webshell.toml.

use std::path::Path;
use std::time::Duration;

use capture::{BrokerConfig, CaptureSource};
use policy::PermissionPolicy;
use runtime::ShellConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Window and engine settings.
    #[serde(default)]
    pub shell: ShellConfig,

    /// Allow-lists for the check and request call sites.
    #[serde(default)]
    pub permissions: PermissionPolicy,

    /// Screen-share settings.
    #[serde(default)]
    pub capture: CaptureConfig,
}

/// Screen-share configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Deny a share request after this many seconds without a selection.
    /// Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_timeout_secs: Option<u64>,

    /// Sources offered by the terminal picker.
    #[serde(default)]
    pub sources: Vec<CaptureSource>,
}

impl CaptureConfig {
    pub fn broker_config(&self) -> BrokerConfig {
        BrokerConfig {
            selection_timeout: self.selection_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.shell
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.capture.selection_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "capture.selection_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to render config: {0}")]
    Serialize(String),
}

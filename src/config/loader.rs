use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Settings;

/// Failures reading the `[merge]` settings that shape header reconciliation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`Settings`].
    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An interaction or variant flag name is unusable.
    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Settings {
    /// Where `vwconfig` looks for its settings when `--config` is not given:
    /// `vwconfig/config.toml` under the platform config directory, or under
    /// the working directory when there is none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("vwconfig").join("config.toml")
    }

    /// Loads settings from the default settings file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads settings from `path`.
    ///
    /// - If the file doesn't exist, returns `Settings::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// Checks:
    /// - At least one interaction flag is named
    /// - Flag names are non-empty and carry no leading dash
    pub fn validate(&self) -> Result<(), ConfigError> {
        let merge = &self.merge;
        if merge.interaction_flags.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "merge.interaction_flags must name at least one option".to_string(),
            });
        }

        let names = merge
            .interaction_flags
            .iter()
            .chain(std::iter::once(&merge.variant_flag));
        for name in names {
            if name.is_empty() || name.starts_with('-') {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "Invalid option name '{}': expected a bare name such as 'interactions'",
                        name
                    ),
                });
            }
        }

        Ok(())
    }
}

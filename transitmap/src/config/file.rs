//! Configuration file handling for ~/.transitmap/config.ini.
//!
//! Settings structs live in [`super::settings`], constants in
//! [`super::defaults`], parsing in [`super::parser`] and serialization in
//! [`super::writer`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::feed::FeedConfig;
use crate::map::{GeoPoint, MapView};
use crate::refresh::RefreshConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.transitmap/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Feed client configuration from the `[feed]` section.
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig::new(&self.feed.url)
            .with_format(self.feed.format)
            .with_timeout(Duration::from_secs(self.feed.timeout))
    }

    /// Scheduler configuration from the `[refresh]` section.
    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig::from_millis(self.refresh.interval_ms).with_overlap(self.refresh.overlap)
    }

    /// Initial map view from the `[map]` section.
    pub fn map_view(&self) -> MapView {
        MapView::new(
            GeoPoint::new(self.map.center_lat, self.map.center_lon),
            self.map.zoom,
        )
    }
}

/// Get the path to the config directory (~/.transitmap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".transitmap")
}

/// Get the path to the config file (~/.transitmap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

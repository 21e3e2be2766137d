use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the settings file inside the user directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,

    /// Shopping list display settings
    #[serde(default)]
    pub list: ListConfig,
}

/// UI settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    /// Show status bar
    #[serde(default = "default_true")]
    pub show_status_bar: bool,

    /// Show toast notifications
    #[serde(default = "default_true")]
    pub show_toasts: bool,

    /// How long a toast stays on screen, in milliseconds
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,

    /// Minimum time between redraws, in milliseconds
    #[serde(default = "default_frame_duration_ms")]
    pub frame_duration_ms: u64,
}

/// List settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    /// Prefix every row with its item id
    #[serde(default)]
    pub show_ids: bool,

    /// Rows kept visible above and below the selection when scrolling
    #[serde(default = "default_scroll_margin")]
    pub scroll_margin: usize,
}

fn default_true() -> bool {
    true
}
fn default_toast_duration_ms() -> u64 {
    3000
}
fn default_frame_duration_ms() -> u64 {
    16
}
fn default_scroll_margin() -> usize {
    2
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_status_bar: default_true(),
            show_toasts: default_true(),
            toast_duration_ms: default_toast_duration_ms(),
            frame_duration_ms: default_frame_duration_ms(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            show_ids: false,
            scroll_margin: default_scroll_margin(),
        }
    }
}

/// Loads and saves [`Config`] as JSON in the user directory
pub struct ConfigManager {
    config: Config,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            config: Config::default(),
            config_path: config_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config; a missing file keeps the defaults
    pub fn load(&mut self) -> Result<(), ConfigError> {
        if !self.config_path.exists() {
            return Ok(());
        }

        let config_str = fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Io {
            path: self.config_path.clone(),
            source,
        })?;
        self.config = serde_json::from_str(&config_str).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })?;

        Ok(())
    }

    /// Write the config, creating the directory if needed
    pub fn save(&self) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: self.config_path.clone(),
            source,
        };

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let config_str = serde_json::to_string_pretty(&self.config).map_err(ConfigError::Serialize)?;
        fs::write(&self.config_path, config_str).map_err(io_error)?;
        Ok(())
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "ui": { "show_toasts": false } }"#).unwrap();

        assert!(!config.ui.show_toasts);
        assert!(config.ui.show_status_bar);
        assert_eq!(config.ui.toast_duration_ms, 3000);
        assert_eq!(config.list, ListConfig::default());
    }
}

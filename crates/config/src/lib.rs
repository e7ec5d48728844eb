//! Configuration management for rowedit.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, LoggingSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default values as constants
pub mod defaults {
    pub const TAB_STOP: usize = 8;
    pub const QUIT_TIMES: u32 = 2;
    pub const MESSAGE_TIMEOUT_SECS: u64 = 5;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const LOG_FILE_NAME: &str = "rowedit.log";
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates config file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, creating or normalizing the file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let original_content = std::fs::read_to_string(path)?;
            let config = Self::validate_content(&original_content)?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            // If content changed, save the updated config
            if original_content != normalized_content {
                config.save_to(path)?;
            }

            Ok(config)
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }

    /// Log file location: configured path, cache dir, or the temp dir.
    pub fn log_file_path(&self) -> PathBuf {
        if let Some(ref path) = self.logging.file_path {
            return PathBuf::from(path);
        }
        get_cache_dir()
            .map(|dir| dir.join(defaults::LOG_FILE_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(defaults::LOG_FILE_NAME))
    }

    /// How long status messages stay on screen.
    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.editor.message_timeout_secs)
    }
}

//! Configuration structures for rowedit settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Width of a tab stop in columns
    #[serde(default = "default_tab_stop")]
    pub tab_stop: usize,

    /// Extra Ctrl-Q presses needed to quit with unsaved changes
    #[serde(default = "default_quit_times")]
    pub quit_times: u32,

    /// Seconds a status message stays visible
    #[serde(default = "default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

impl EditorSettings {
    /// Tab stop, never below one column
    pub fn effective_tab_stop(&self) -> usize {
        self.tab_stop.max(1)
    }
}

// Default value functions for serde
fn default_tab_stop() -> usize {
    defaults::TAB_STOP
}

fn default_quit_times() -> u32 {
    defaults::QUIT_TIMES
}

fn default_message_timeout_secs() -> u64 {
    defaults::MESSAGE_TIMEOUT_SECS
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_stop: default_tab_stop(),
            quit_times: default_quit_times(),
            message_timeout_secs: default_message_timeout_secs(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}

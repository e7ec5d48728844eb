//! XDG Base Directory support for rowedit.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "rowedit";

/// Get the configuration directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME/rowedit` or `~/.config/rowedit`.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Get the cache directory following XDG conventions.
///
/// Returns `$XDG_CACHE_HOME/rowedit` or `~/.cache/rowedit`.
pub fn get_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine cache directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_end_with_app_name() {
        if let Ok(dir) = get_config_dir() {
            assert!(dir.ends_with("rowedit"));
        }
        if let Ok(dir) = get_cache_dir() {
            assert!(dir.ends_with("rowedit"));
        }
    }
}

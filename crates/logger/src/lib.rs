//! File logging for rowedit.
//!
//! The terminal belongs to the editor, so log output only ever goes to a
//! file. Logging before [`init`] is a silent no-op.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

#[derive(Debug)]
struct Logger {
    min_level: LogLevel,
    file_path: PathBuf,
    file: Option<File>,
}

impl Logger {
    /// Create the logger, truncating any previous log at `file_path`
    fn new(file_path: PathBuf, min_level: LogLevel) -> Self {
        if let Some(parent) = file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .ok();
        if let Some(file) = file.as_mut() {
            let _ = writeln!(file, "=== rowedit log start ===");
        }

        Self {
            min_level,
            file_path,
            file,
        }
    }

    fn add_entry(&mut self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }

        let line = format_entry(&Local::now().format("%H:%M:%S").to_string(), level, message);

        // Reopen if the file could not be created earlier or was removed
        if self.file.is_none() || !self.file_path.exists() {
            self.file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(&self.file_path)
                .ok();
        }
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

fn format_entry(timestamp: &str, level: LogLevel, message: &str) -> String {
    format!("[{}] {}: {}", timestamp, level.to_str(), message)
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Initialize the global logger
///
/// Must be called once at startup; subsequent calls are ignored.
pub fn init(file_path: PathBuf, min_level: LogLevel) {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, min_level)));
}

/// Path of the active log file, if the logger is initialized
pub fn file_path() -> Option<PathBuf> {
    LOGGER
        .get()
        .and_then(|logger| logger.lock().ok().map(|l| l.file_path.clone()))
}

fn log(level: LogLevel, message: &str) {
    if let Some(Ok(mut logger)) = LOGGER.get().map(Mutex::lock) {
        logger.add_entry(level, message);
    }
}

/// Log a debug message
pub fn debug(message: impl AsRef<str>) {
    log(LogLevel::Debug, message.as_ref());
}

/// Log an informational message
pub fn info(message: impl AsRef<str>) {
    log(LogLevel::Info, message.as_ref());
}

/// Log a warning message
pub fn warn(message: impl AsRef<str>) {
    log(LogLevel::Warn, message.as_ref());
}

/// Log an error message
pub fn error(message: impl AsRef<str>) {
    log(LogLevel::Error, message.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry("12:00:01", LogLevel::Warn, "disk full"),
            "[12:00:01] WARN: disk full"
        );
    }

    #[test]
    fn test_logger_filters_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("test.log");

        let mut logger = Logger::new(path.clone(), LogLevel::Info);
        logger.add_entry(LogLevel::Debug, "hidden");
        logger.add_entry(LogLevel::Info, "opened file");
        logger.add_entry(LogLevel::Error, "save failed");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("=== rowedit log start ==="));
        assert!(!content.contains("hidden"));
        assert!(content.contains("INFO: opened file"));
        assert!(content.contains("ERROR: save failed"));
    }

    #[test]
    fn test_logger_recreates_deleted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");

        let mut logger = Logger::new(path.clone(), LogLevel::Debug);
        fs::remove_file(&path).unwrap();
        logger.add_entry(LogLevel::Debug, "after removal");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("DEBUG: after removal"));
    }

    #[test]
    fn test_logging_before_init_is_noop() {
        // The global logger is never initialized in this test binary.
        info("nothing happens");
        assert!(file_path().is_none());
    }
}

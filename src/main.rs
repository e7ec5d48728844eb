mod app;
mod terminal;

use anyhow::Result;
use std::io;
use std::path::PathBuf;

use rowedit_config::Config;
use rowedit_logger::{self as logger, LogLevel};

use app::{App, HELP_MESSAGE};
use terminal::{CrosstermKeys, TerminalGuard};

fn main() -> Result<()> {
    // Fall back to defaults on a broken config, but say so in the log
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let min_level = config
        .logging
        .min_level
        .parse()
        .unwrap_or(LogLevel::Info);
    logger::init(config.log_file_path(), min_level);
    if let Some(e) = config_error {
        logger::warn(format!("Using default config: {:#}", e));
    }

    let file = std::env::args_os().nth(1).map(PathBuf::from);
    let result = run(&config, file);

    // Terminal is restored by now
    if let Err(err) = &result {
        logger::error(format!("{:#}", err));
        eprintln!("Error: {:?}", err);
        if let Some(path) = logger::file_path() {
            eprintln!("Log: {}", path.display());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(config: &Config, file: Option<PathBuf>) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let (rows, cols) = terminal::screen_size()?;
    logger::info(format!("Started ({}x{})", cols, rows));

    let mut app = App::new(config, rows, cols, CrosstermKeys, io::stdout());
    if let Some(path) = file {
        app.open(&path)?;
    }
    app.set_status_message(HELP_MESSAGE);
    app.run()
}

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

use rowedit_keyboard::{from_key_event, Key, KeySource};

/// Raw mode plus alternate screen for as long as the guard lives
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Blocking key reader over crossterm events
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> Result<Key> {
        loop {
            // Resize, mouse and unmapped keys are skipped
            if let Event::Key(key_event) = event::read()? {
                if let Some(key) = from_key_event(key_event) {
                    return Ok(key);
                }
            }
        }
    }
}

/// Terminal size as (rows, cols)
pub fn screen_size() -> Result<(usize, usize)> {
    let (cols, rows) = crossterm::terminal::size()?;
    Ok((rows as usize, cols as usize))
}

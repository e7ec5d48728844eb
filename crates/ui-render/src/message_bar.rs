use crossterm::{
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::truncate_to_cols;

/// Transient message with the moment it was set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            set_at: Instant::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check whether the message is still shown at `now`
    pub fn is_visible(&self, now: Instant, timeout: Duration) -> bool {
        !self.text.is_empty() && now.saturating_duration_since(self.set_at) < timeout
    }
}

/// Bottom line for messages and prompts
pub struct MessageBar;

impl MessageBar {
    pub fn render<W: Write>(
        out: &mut W,
        message: Option<&StatusMessage>,
        screen_cols: usize,
        timeout: Duration,
        now: Instant,
    ) -> io::Result<()> {
        queue!(out, Clear(ClearType::UntilNewLine))?;
        if let Some(message) = message.filter(|m| m.is_visible(now, timeout)) {
            out.write_all(truncate_to_cols(message.text(), screen_cols).as_bytes())?;
        }
        Ok(())
    }
}

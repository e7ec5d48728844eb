//! Editing session and command dispatch loop.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rowedit_buffer::{Editor, Movement, Viewport};
use rowedit_config::Config;
use rowedit_keyboard::{Key, KeySource};
use rowedit_logger as logger;
use rowedit_text_search::{SearchNavigator, SearchOrigin, SearchStep};
use rowedit_ui_render::{compose_frame, FrameParams, StatusMessage};

/// Rows at the bottom of the screen taken by the status and message bars
pub const RESERVED_ROWS: usize = 2;

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// One editing session bound to a key source and an output sink
pub struct App<K: KeySource, W: Write> {
    editor: Editor,
    viewport: Viewport,
    file_name: Option<PathBuf>,
    message: Option<StatusMessage>,
    tab_stop: usize,
    quit_times: u32,
    remaining_quit_times: u32,
    message_timeout: Duration,
    welcome: String,
    should_quit: bool,
    keys: K,
    out: W,
}

impl<K: KeySource, W: Write> App<K, W> {
    /// Create a session for a terminal of `screen_rows` x `screen_cols` cells
    pub fn new(config: &Config, screen_rows: usize, screen_cols: usize, keys: K, out: W) -> Self {
        let tab_stop = config.editor.effective_tab_stop();
        Self {
            editor: Editor::new(tab_stop),
            viewport: Viewport::new(screen_rows.saturating_sub(RESERVED_ROWS), screen_cols),
            file_name: None,
            message: None,
            tab_stop,
            quit_times: config.editor.quit_times,
            remaining_quit_times: config.editor.quit_times,
            message_timeout: config.message_timeout(),
            welcome: format!("rowedit editor -- version {}", env!("CARGO_PKG_VERSION")),
            should_quit: false,
            keys,
            out,
        }
    }

    /// Open `path`. A file that does not exist yet gives an empty buffer
    /// that will be saved under that name.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        if path.exists() {
            self.editor = Editor::open(path, self.tab_stop)?;
            logger::info(format!(
                "Opened {} ({} lines)",
                path.display(),
                self.editor.row_count()
            ));
        } else {
            self.editor = Editor::new(self.tab_stop);
            logger::info(format!("New file: {}", path.display()));
        }
        self.file_name = Some(path.to_path_buf());
        Ok(())
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::new(text));
    }

    /// Run until the user quits
    pub fn run(&mut self) -> Result<()> {
        while !self.should_quit {
            self.refresh_screen()?;
            let key = self.keys.next_key()?;
            self.process_key(key)?;
        }

        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()?;
        logger::info("Quit");
        Ok(())
    }

    /// Scroll, compose and write one frame in a single write
    fn refresh_screen(&mut self) -> Result<()> {
        let (doc, cursor) = self.editor.parts_mut();
        self.viewport.scroll(doc, cursor);

        let file_name = self.file_name.as_deref().map(display_name);
        let params = FrameParams {
            file_name: file_name.as_deref(),
            dirty: self.editor.is_dirty(),
            message: self.message.as_ref(),
            message_timeout: self.message_timeout,
            welcome: &self.welcome,
            now: Instant::now(),
        };
        let frame = compose_frame(
            self.editor.document(),
            self.editor.cursor(),
            &self.viewport,
            &params,
        )?;

        self.out.write_all(&frame)?;
        self.out.flush()?;
        Ok(())
    }

    fn process_key(&mut self, key: Key) -> Result<()> {
        logger::debug(format!("Key {:?} (code {})", key, key.code()));

        match key {
            Key::Ctrl(b'q') => {
                if self.editor.is_dirty() && self.remaining_quit_times > 0 {
                    self.set_status_message(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.remaining_quit_times
                    ));
                    self.remaining_quit_times -= 1;
                    return Ok(());
                }
                self.should_quit = true;
                return Ok(());
            }
            Key::Ctrl(b's') => self.save()?,
            Key::Ctrl(b'f') => self.find()?,
            Key::Enter => self.editor.insert_newline(),
            Key::Backspace | Key::Ctrl(b'h') => self.editor.delete_char(),
            Key::Delete => self.editor.delete_forward(),
            Key::Left => self.editor.move_cursor(Movement::Left),
            Key::Right => self.editor.move_cursor(Movement::Right),
            Key::Up => self.editor.move_cursor(Movement::Up),
            Key::Down => self.editor.move_cursor(Movement::Down),
            Key::Home => self.editor.move_cursor(Movement::Home),
            Key::End => self.editor.move_cursor(Movement::End),
            Key::PageUp => self.editor.page_up(&self.viewport),
            Key::PageDown => self.editor.page_down(&self.viewport),
            Key::Char(c) => self.editor.insert_char(c),
            // Ctrl-L and Escape only repaint
            Key::Ctrl(_) | Key::Escape => {}
        }

        self.remaining_quit_times = self.quit_times;
        Ok(())
    }

    /// Read a line in the message bar.
    ///
    /// `template` has `%s` replaced by the current input. `callback` sees
    /// the input and the key after every keystroke, including the final
    /// Enter or Escape. Returns `None` when cancelled.
    fn prompt<F>(&mut self, template: &str, mut callback: F) -> Result<Option<String>>
    where
        F: FnMut(&mut Self, &[u8], Key),
    {
        let mut input: Vec<u8> = Vec::new();

        loop {
            let shown = template.replace("%s", &String::from_utf8_lossy(&input));
            self.set_status_message(shown);
            self.refresh_screen()?;

            let key = self.keys.next_key()?;
            match key {
                Key::Backspace | Key::Delete | Key::Ctrl(b'h') => {
                    input.pop();
                }
                Key::Escape => {
                    self.set_status_message("");
                    callback(self, &input, key);
                    return Ok(None);
                }
                Key::Enter if !input.is_empty() => {
                    self.set_status_message("");
                    callback(self, &input, key);
                    return Ok(Some(String::from_utf8_lossy(&input).into_owned()));
                }
                Key::Char(c) if key.is_printable() => input.push(c),
                _ => {}
            }

            callback(self, &input, key);
        }
    }

    fn find(&mut self) -> Result<()> {
        let origin = SearchOrigin::capture(&self.editor, &self.viewport);
        let mut navigator = SearchNavigator::new();
        let mut last_hit = None;

        let query = self.prompt("Search: %s (Use ESC/Arrows/Enter)", |app, query, key| {
            match navigator.on_key(query, key, &mut app.editor, &mut app.viewport) {
                SearchStep::Found(row) => last_hit = Some(row),
                SearchStep::NotFound => last_hit = None,
                SearchStep::Finished => {}
            }
        })?;

        match query {
            Some(query) => {
                if last_hit.is_some() {
                    self.set_status_message("Found");
                } else {
                    self.set_status_message("Not found");
                }
                logger::debug(format!("Search accepted: {:?} -> {:?}", query, last_hit));
            }
            None => {
                origin.restore(&mut self.editor, &mut self.viewport);
                logger::debug("Search cancelled");
            }
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if self.file_name.is_none() {
            match self.prompt("Save as: %s (ESC to cancel)", |_, _, _| {})? {
                Some(name) => self.file_name = Some(PathBuf::from(name)),
                None => {
                    self.set_status_message("Save aborted");
                    logger::info("Save aborted");
                    return Ok(());
                }
            }
        }
        let Some(path) = self.file_name.clone() else {
            return Ok(());
        };

        match self.editor.save_to(&path) {
            Ok(written) => {
                self.set_status_message(format!("{} bytes written to disk", written));
                logger::info(format!("Saved {} ({} bytes)", path.display(), written));
            }
            Err(e) => {
                self.set_status_message(format!("Can't save! I/O error: {}", e));
                logger::error(format!("Save failed for {}: {:#}", path.display(), e));
            }
        }
        Ok(())
    }
}

/// Name shown in the status bar
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

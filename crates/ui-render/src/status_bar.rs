use crossterm::{
    queue,
    style::{Attribute, SetAttribute},
};
use std::io::{self, Write};

use crate::truncate_to_cols;

/// Longest file name prefix shown in the status bar
pub const MAX_FILE_NAME_CHARS: usize = 20;

/// Status bar rendering parameters
pub struct StatusBarParams<'a> {
    /// File name, `None` for an unnamed buffer
    pub file_name: Option<&'a str>,
    /// Unsaved changes
    pub dirty: bool,
    /// Cursor row (0-based)
    pub cursor_row: usize,
    pub row_count: usize,
    pub screen_cols: usize,
}

/// Reverse-video status line
pub struct StatusBar;

impl StatusBar {
    /// Left part: name, line count and modification marker
    pub fn left_text(params: &StatusBarParams<'_>) -> String {
        let name = params.file_name.unwrap_or("[No Name]");
        let name = truncate_to_cols(name, MAX_FILE_NAME_CHARS);
        let dirty = if params.dirty { "(modified)" } else { "" };
        format!("{} - {} lines {}", name, params.row_count, dirty)
    }

    /// Right part: current row over total rows
    pub fn right_text(params: &StatusBarParams<'_>) -> String {
        format!("{}/{}", params.cursor_row + 1, params.row_count)
    }

    /// Render status bar, followed by a line break
    pub fn render<W: Write>(out: &mut W, params: &StatusBarParams<'_>) -> io::Result<()> {
        let cols = params.screen_cols;
        let left = Self::left_text(params);
        let left = truncate_to_cols(&left, cols);
        let right = Self::right_text(params);
        let right_len = right.chars().count();

        queue!(out, SetAttribute(Attribute::Reverse))?;
        out.write_all(left.as_bytes())?;

        // Pad until the right part ends exactly at the last column; if it
        // never fits, the bar is padded to full width without it.
        let mut len = left.chars().count();
        while len < cols {
            if cols - len == right_len {
                out.write_all(right.as_bytes())?;
                break;
            }
            out.write_all(b" ")?;
            len += 1;
        }

        queue!(out, SetAttribute(Attribute::Reset))?;
        out.write_all(b"\r\n")
    }
}

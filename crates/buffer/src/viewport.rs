use super::{Cursor, Document};

/// Window of the document that is visible on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row (0-based)
    pub row_offset: usize,
    /// First visible render column
    pub col_offset: usize,
    /// Number of text rows on screen (bars excluded)
    pub screen_rows: usize,
    /// Number of columns on screen
    pub screen_cols: usize,
}

impl Viewport {
    /// Create a new viewport
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            screen_rows,
            screen_cols,
        }
    }

    /// Refresh `cursor.rx` and shift offsets just enough to keep the cursor
    /// on screen. Never recentres.
    pub fn scroll(&mut self, doc: &Document, cursor: &mut Cursor) {
        cursor.rx = if cursor.cy < doc.row_count() {
            doc.cx_to_rx(cursor.cy, cursor.cx)
        } else {
            0
        };

        if cursor.cy < self.row_offset {
            self.row_offset = cursor.cy;
        }
        if cursor.cy >= self.row_offset + self.screen_rows {
            self.row_offset = (cursor.cy + 1).saturating_sub(self.screen_rows);
        }
        if cursor.rx < self.col_offset {
            self.col_offset = cursor.rx;
        }
        if cursor.rx >= self.col_offset + self.screen_cols {
            self.col_offset = (cursor.rx + 1).saturating_sub(self.screen_cols);
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(22, 80)
    }
}

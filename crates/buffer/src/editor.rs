//! Cursor-driven edit operations over a [`Document`].

use anyhow::Result;
use std::path::Path;

use super::{Cursor, Document, Movement, Viewport};

/// Editing state: document, cursor and the unsaved-changes flag.
///
/// Every operation expects `cursor.cy <= row_count` and
/// `cursor.cx <= row_len(cy)` on entry and restores both on exit.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    doc: Document,
    cursor: Cursor,
    dirty: bool,
}

impl Editor {
    /// Create an editor over an empty document
    pub fn new(tab_stop: usize) -> Self {
        Self::from_document(Document::new(tab_stop))
    }

    /// Wrap an existing document; the result starts clean
    pub fn from_document(doc: Document) -> Self {
        Self {
            doc,
            cursor: Cursor::new(),
            dirty: false,
        }
    }

    /// Load file into a fresh editor
    pub fn open<P: AsRef<Path>>(path: P, tab_stop: usize) -> Result<Self> {
        Ok(Self::from_document(Document::open(path, tab_stop)?))
    }

    /// Save document to `path` and clear the dirty flag on success
    pub fn save_to<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let written = self.doc.save_to(path)?;
        self.dirty = false;
        Ok(written)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Document and cursor together, for callers that need both
    pub fn parts_mut(&mut self) -> (&Document, &mut Cursor) {
        (&self.doc, &mut self.cursor)
    }

    /// Move the cursor to `(cy, cx)`, clamped into the document
    pub fn set_cursor(&mut self, cy: usize, cx: usize) {
        self.cursor.cy = cy.min(self.doc.row_count());
        self.cursor.cx = cx.min(self.doc.row_len(self.cursor.cy));
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn row_count(&self) -> usize {
        self.doc.row_count()
    }

    /// Insert byte `c` at the cursor, creating a row on the virtual line
    pub fn insert_char(&mut self, c: u8) {
        if self.cursor.cy == self.doc.row_count() {
            self.doc.append_row(Vec::new());
        }
        let cx = self.cursor.cx.min(self.doc.row_len(self.cursor.cy));
        self.doc.insert_char(self.cursor.cy, cx, c);
        self.cursor.cx = cx + 1;
        self.dirty = true;
    }

    /// Split the current row at the cursor
    pub fn insert_newline(&mut self) {
        if self.cursor.cx == 0 {
            self.doc.insert_row(self.cursor.cy, Vec::new());
        } else {
            self.doc.split_row(self.cursor.cy, self.cursor.cx);
        }
        self.cursor.cy += 1;
        self.cursor.cx = 0;
        self.dirty = true;
    }

    /// Delete the character before the cursor, joining rows at column 0
    pub fn delete_char(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        if cy >= self.doc.row_count() || (cx == 0 && cy == 0) {
            return;
        }

        if cx > 0 {
            if self.doc.delete_char(cy, cx - 1) {
                self.cursor.cx -= 1;
                self.dirty = true;
            }
        } else {
            let prev_len = self.doc.row_len(cy - 1);
            if self.doc.join_with_previous(cy) {
                self.cursor.cx = prev_len;
                self.cursor.cy -= 1;
                self.dirty = true;
            }
        }
    }

    /// Delete the character under the cursor (forward delete)
    pub fn delete_forward(&mut self) {
        let before = self.cursor;
        self.move_cursor(Movement::Right);
        if self.cursor != before {
            self.delete_char();
        }
    }

    /// Move the cursor one step
    pub fn move_cursor(&mut self, movement: Movement) {
        self.step(movement);
    }

    /// Jump to the top of the viewport, then step up `screen_rows - 1` lines
    pub fn page_up(&mut self, viewport: &Viewport) {
        self.cursor.cy = viewport.row_offset.min(self.doc.row_count());
        for _ in 1..viewport.screen_rows {
            self.step(Movement::Up);
        }
        self.clamp_cx();
    }

    /// Jump to the bottom of the viewport, then step down `screen_rows - 1` lines
    pub fn page_down(&mut self, viewport: &Viewport) {
        self.cursor.cy = (viewport.row_offset + viewport.screen_rows)
            .saturating_sub(1)
            .min(self.doc.row_count());
        for _ in 1..viewport.screen_rows {
            self.step(Movement::Down);
        }
        self.clamp_cx();
    }

    fn step(&mut self, movement: Movement) {
        let rows = self.doc.row_count();
        let on_row = self.cursor.cy < rows;

        match movement {
            Movement::Left => {
                if self.cursor.cx > 0 {
                    self.cursor.cx -= 1;
                } else if self.cursor.cy > 0 {
                    self.cursor.cy -= 1;
                    self.cursor.cx = self.doc.row_len(self.cursor.cy);
                }
            }
            Movement::Right => {
                if on_row {
                    if self.cursor.cx < self.doc.row_len(self.cursor.cy) {
                        self.cursor.cx += 1;
                    } else {
                        self.cursor.cy += 1;
                        self.cursor.cx = 0;
                    }
                }
            }
            Movement::Up => {
                self.cursor.cy = self.cursor.cy.saturating_sub(1);
            }
            Movement::Down => {
                if self.cursor.cy < rows {
                    self.cursor.cy += 1;
                }
            }
            Movement::Home => self.cursor.cx = 0,
            Movement::End => {
                if on_row {
                    self.cursor.cx = self.doc.row_len(self.cursor.cy);
                }
            }
        }

        self.clamp_cx();
    }

    fn clamp_cx(&mut self) {
        let len = self.doc.row_len(self.cursor.cy);
        if self.cursor.cx > len {
            self.cursor.cx = len;
        }
    }
}

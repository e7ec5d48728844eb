//! Incremental search for rowedit.
//!
//! [`SearchNavigator`] is fed the current query and the last key after every
//! keystroke of the search prompt. It scans rendered rows with wraparound and
//! moves the cursor onto the first hit. Restoring the cursor when the search
//! is cancelled is up to the caller, see [`SearchOrigin`].

use regex::bytes::Regex;
use rowedit_buffer::{Document, Editor, Viewport};
use rowedit_keyboard::Key;

/// Search direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

impl SearchDirection {
    fn step(self, current: usize, len: usize) -> usize {
        match self {
            SearchDirection::Forward => (current + 1) % len,
            SearchDirection::Backward => (current + len - 1) % len,
        }
    }
}

/// Match state of the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchState {
    #[default]
    Idle,
    /// Row index of the last hit
    Matched(usize),
}

/// What a keystroke did to the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// Query accepted or cancelled; the navigator is idle again
    Finished,
    /// Cursor moved to a hit on this row
    Found(usize),
    /// No row contains the query
    NotFound,
}

/// Search state machine.
#[derive(Debug, Clone, Default)]
pub struct SearchNavigator {
    state: MatchState,
    direction: SearchDirection,
}

impl SearchNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one keystroke of the search prompt.
    ///
    /// Enter and Escape end the search. Right/Down search forward and
    /// Left/Up backward from the last hit. Any other key means the query
    /// changed, so the scan restarts forward from the top.
    pub fn on_key(
        &mut self,
        query: &[u8],
        key: Key,
        editor: &mut Editor,
        viewport: &mut Viewport,
    ) -> SearchStep {
        match key {
            Key::Enter | Key::Escape => {
                self.state = MatchState::Idle;
                self.direction = SearchDirection::Forward;
                return SearchStep::Finished;
            }
            Key::Right | Key::Down => self.direction = SearchDirection::Forward,
            Key::Left | Key::Up => self.direction = SearchDirection::Backward,
            _ => {
                self.state = MatchState::Idle;
                self.direction = SearchDirection::Forward;
            }
        }

        if self.state == MatchState::Idle {
            self.direction = SearchDirection::Forward;
        }

        let Some(matcher) = literal_matcher(query) else {
            return SearchStep::NotFound;
        };
        let Some((row, rx)) = self.scan(editor.document(), &matcher) else {
            return SearchStep::NotFound;
        };

        let cx = editor.document().rx_to_cx(row, rx);
        editor.set_cursor(row, cx);
        // Push the offset past the end so the next scroll puts the hit at the top.
        viewport.row_offset = editor.row_count();
        self.state = MatchState::Matched(row);
        SearchStep::Found(row)
    }

    /// Probe every row once, starting after the last hit.
    ///
    /// Returns the row and the render offset of the match.
    fn scan(&self, doc: &Document, matcher: &Regex) -> Option<(usize, usize)> {
        let len = doc.row_count();
        if len == 0 {
            return None;
        }

        let mut current = match self.state {
            MatchState::Matched(row) => row.min(len - 1),
            // The first forward probe lands on row 0.
            MatchState::Idle => len - 1,
        };
        for _ in 0..len {
            current = self.direction.step(current, len);
            let hit = doc
                .row(current)
                .and_then(|row| matcher.find(row.render()));
            if let Some(m) = hit {
                return Some((current, m.start()));
            }
        }
        None
    }
}

/// Literal (escaped) pattern for `query`; `None` for an empty query.
fn literal_matcher(query: &[u8]) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    let query = std::str::from_utf8(query).ok()?;
    Regex::new(&regex::escape(query)).ok()
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    literal_matcher(needle)?.find(haystack).map(|m| m.start())
}

/// Cursor and scroll state captured when a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOrigin {
    cx: usize,
    cy: usize,
    col_offset: usize,
    row_offset: usize,
}

impl SearchOrigin {
    pub fn capture(editor: &Editor, viewport: &Viewport) -> Self {
        let cursor = editor.cursor();
        Self {
            cx: cursor.cx,
            cy: cursor.cy,
            col_offset: viewport.col_offset,
            row_offset: viewport.row_offset,
        }
    }

    /// Put cursor and offsets back exactly as captured
    pub fn restore(&self, editor: &mut Editor, viewport: &mut Viewport) {
        let cursor = editor.cursor_mut();
        cursor.cx = self.cx;
        cursor.cy = self.cy;
        viewport.col_offset = self.col_offset;
        viewport.row_offset = self.row_offset;
    }
}

//! A single document line and its tab-expanded render form.

/// Default width of a tab stop in render cells.
pub const DEFAULT_TAB_STOP: usize = 8;

/// One line of text.
///
/// `render` is derived from `chars` and is rebuilt inside every method that
/// mutates `chars`, so it can never be observed stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    /// Create a row from raw bytes (no line terminator).
    pub fn new(chars: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let mut row = Self {
            chars: chars.into(),
            render: Vec::new(),
        };
        row.update(tab_stop);
        row
    }

    /// Raw characters as typed or loaded.
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Characters with tabs expanded to spaces.
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Length of `chars` in bytes.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Map a character index to its render column.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        cx_to_rx(&self.chars, cx, tab_stop)
    }

    /// Map a render column back to a character index.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        rx_to_cx(&self.chars, rx, tab_stop)
    }

    /// Insert byte `c` at `at`, appending when `at` is past the end.
    pub(crate) fn insert_char(&mut self, at: usize, c: u8, tab_stop: usize) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, c);
        self.update(tab_stop);
    }

    /// Remove the byte at `at`. Returns false if `at` is out of range.
    pub(crate) fn delete_char(&mut self, at: usize, tab_stop: usize) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        self.update(tab_stop);
        true
    }

    pub(crate) fn append_bytes(&mut self, bytes: &[u8], tab_stop: usize) {
        self.chars.extend_from_slice(bytes);
        self.update(tab_stop);
    }

    /// Cut the row at `at` and return the suffix.
    pub(crate) fn split_off(&mut self, at: usize, tab_stop: usize) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let tail = self.chars.split_off(at);
        self.update(tab_stop);
        tail
    }

    fn update(&mut self, tab_stop: usize) {
        let tab_stop = tab_stop.max(1);
        self.render.clear();
        for &c in &self.chars {
            if c == b'\t' {
                self.render.push(b' ');
                while self.render.len() % tab_stop != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(c);
            }
        }
    }
}

/// Render column reached after the first `cx` bytes of `chars`.
///
/// Tabs advance to the next multiple of `tab_stop`. `cx` past the end is
/// clamped to the line length.
pub fn cx_to_rx(chars: &[u8], cx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    chars[..cx.min(chars.len())]
        .iter()
        .fold(0, |rx, &c| advance(rx, c, tab_stop))
}

/// Index of the first byte whose resulting render column exceeds `rx`.
///
/// Returns the line length when `rx` lies beyond the rendered line.
pub fn rx_to_cx(chars: &[u8], rx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut cur_rx = 0;
    for (cx, &c) in chars.iter().enumerate() {
        cur_rx = advance(cur_rx, c, tab_stop);
        if cur_rx > rx {
            return cx;
        }
    }
    chars.len()
}

#[inline]
fn advance(rx: usize, c: u8, tab_stop: usize) -> usize {
    if c == b'\t' {
        rx + (tab_stop - 1) - (rx % tab_stop) + 1
    } else {
        rx + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_expands_tabs_to_stops() {
        let row = Row::new("a\tb", 8);
        assert_eq!(row.render(), b"a       b");

        let row = Row::new("\t\tx", 4);
        assert_eq!(row.render(), b"        x");

        let row = Row::new("abcdefgh\t|", 8);
        assert_eq!(row.render().len(), 17);
    }

    #[test]
    fn test_cx_to_rx_after_tab() {
        let row = Row::new("a\tb", 8);
        assert_eq!(row.cx_to_rx(0, 8), 0);
        assert_eq!(row.cx_to_rx(1, 8), 1);
        assert_eq!(row.cx_to_rx(2, 8), 8);
        assert_eq!(row.cx_to_rx(3, 8), 9);
    }

    #[test]
    fn test_cx_to_rx_clamps_past_end() {
        let row = Row::new("ab", 8);
        assert_eq!(row.cx_to_rx(10, 8), 2);
    }

    #[test]
    fn test_rx_to_cx_inside_tab_maps_to_tab() {
        let row = Row::new("a\tb", 8);
        // Columns 1..=7 are covered by the tab.
        for rx in 1..8 {
            assert_eq!(row.rx_to_cx(rx, 8), 1, "rx = {}", rx);
        }
        assert_eq!(row.rx_to_cx(8, 8), 2);
        assert_eq!(row.rx_to_cx(0, 8), 0);
    }

    #[test]
    fn test_rx_to_cx_beyond_line() {
        let row = Row::new("a\tb", 8);
        assert_eq!(row.rx_to_cx(9, 8), 3);
        assert_eq!(row.rx_to_cx(100, 8), 3);
        assert_eq!(Row::new("", 8).rx_to_cx(5, 8), 0);
    }

    #[test]
    fn test_tab_mapping_round_trip() {
        let samples: [&[u8]; 4] = [b"\tfoo\tbar", b"a\tb\t\tc", b"plain", b"\t\t\t"];
        for tab_stop in [1, 2, 4, 8] {
            for chars in samples {
                for cx in 0..=chars.len() {
                    let rx = cx_to_rx(chars, cx, tab_stop);
                    let back = rx_to_cx(chars, rx, tab_stop);
                    assert!(cx_to_rx(chars, back, tab_stop) <= rx);
                    if back < chars.len() {
                        assert!(cx_to_rx(chars, back + 1, tab_stop) > rx);
                    }
                    assert_eq!(back, cx);
                }
            }
        }
    }

    #[test]
    fn test_mutations_refresh_render() {
        let mut row = Row::new("ab", 4);
        row.insert_char(1, b'\t', 4);
        assert_eq!(row.chars(), b"a\tb");
        assert_eq!(row.render(), b"a   b");

        assert!(row.delete_char(1, 4));
        assert_eq!(row.render(), b"ab");
        assert!(!row.delete_char(2, 4));

        row.append_bytes(b"\tc", 4);
        assert_eq!(row.render(), b"ab  c");

        let tail = row.split_off(2, 4);
        assert_eq!(tail, b"\tc");
        assert_eq!(row.render(), b"ab");
    }

    #[test]
    fn test_insert_char_clamps_position() {
        let mut row = Row::new("ab", 8);
        row.insert_char(99, b'c', 8);
        assert_eq!(row.chars(), b"abc");
    }
}

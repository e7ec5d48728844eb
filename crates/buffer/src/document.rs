use anyhow::{Context, Result};
use std::path::Path;

use super::row::{Row, DEFAULT_TAB_STOP};

/// Ordered sequence of rows.
///
/// Rows carry no identity beyond their position. Index-based mutation is
/// permissive: out-of-range requests are ignored rather than reported.
#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    tab_stop: usize,
}

impl Document {
    /// Create an empty document
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a document from raw lines, in order
    pub fn from_lines<I, L>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut doc = Self::new(tab_stop);
        for line in lines {
            doc.append_row(line);
        }
        doc
    }

    /// Parse file contents into a document.
    ///
    /// Lines are split on `\n`, a trailing `\r` is dropped from each line and a
    /// final newline does not produce an extra empty row.
    pub fn from_bytes(contents: &[u8], tab_stop: usize) -> Self {
        let mut doc = Self::new(tab_stop);
        if contents.is_empty() {
            return doc;
        }
        let body = contents.strip_suffix(b"\n").unwrap_or(contents);
        for line in body.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            doc.append_row(line);
        }
        doc
    }

    /// Load file
    pub fn open<P: AsRef<Path>>(path: P, tab_stop: usize) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self::from_bytes(&contents, tab_stop))
    }

    /// Serialize rows joined by `\n` with a single trailing newline.
    ///
    /// An empty document serializes to no bytes at all.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.chars());
            out.push(b'\n');
        }
        out
    }

    /// Write the document to `path`, returning the number of bytes written
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let contents = self.to_bytes();
        std::fs::write(path, &contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(contents.len())
    }

    /// Get row count
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get row by index
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Length of row `at`, or 0 past the last row
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    /// Render column of `cx` within row `at`, or 0 past the last row
    pub fn cx_to_rx(&self, at: usize, cx: usize) -> usize {
        self.rows
            .get(at)
            .map_or(0, |row| row.cx_to_rx(cx, self.tab_stop))
    }

    /// Character index of render column `rx` within row `at`
    pub fn rx_to_cx(&self, at: usize, rx: usize) -> usize {
        self.rows
            .get(at)
            .map_or(0, |row| row.rx_to_cx(rx, self.tab_stop))
    }

    pub fn append_row(&mut self, chars: impl Into<Vec<u8>>) {
        self.rows.push(Row::new(chars, self.tab_stop));
    }

    /// Insert a row at `at` (append when `at == row_count`).
    ///
    /// Returns false without changes when `at > row_count`.
    pub fn insert_row(&mut self, at: usize, chars: impl Into<Vec<u8>>) -> bool {
        if at > self.rows.len() {
            return false;
        }
        self.rows.insert(at, Row::new(chars, self.tab_stop));
        true
    }

    /// Remove and return row `at`; out-of-range indices are a no-op.
    pub fn remove_row(&mut self, at: usize) -> Option<Row> {
        if at >= self.rows.len() {
            return None;
        }
        Some(self.rows.remove(at))
    }

    pub fn insert_char(&mut self, at: usize, cx: usize, c: u8) -> bool {
        let tab_stop = self.tab_stop;
        match self.rows.get_mut(at) {
            Some(row) => {
                row.insert_char(cx, c, tab_stop);
                true
            }
            None => false,
        }
    }

    pub fn delete_char(&mut self, at: usize, cx: usize) -> bool {
        let tab_stop = self.tab_stop;
        self.rows
            .get_mut(at)
            .is_some_and(|row| row.delete_char(cx, tab_stop))
    }

    pub fn append_to_row(&mut self, at: usize, bytes: &[u8]) -> bool {
        let tab_stop = self.tab_stop;
        match self.rows.get_mut(at) {
            Some(row) => {
                row.append_bytes(bytes, tab_stop);
                true
            }
            None => false,
        }
    }

    /// Split row `at` at `cx`; the suffix becomes a new row right after it.
    pub fn split_row(&mut self, at: usize, cx: usize) -> bool {
        let tab_stop = self.tab_stop;
        let Some(row) = self.rows.get_mut(at) else {
            return false;
        };
        let tail = row.split_off(cx, tab_stop);
        self.rows.insert(at + 1, Row::new(tail, tab_stop));
        true
    }

    /// Join row `at` onto the end of row `at - 1`.
    pub fn join_with_previous(&mut self, at: usize) -> bool {
        if at == 0 || at >= self.rows.len() {
            return false;
        }
        let Some(row) = self.remove_row(at) else {
            return false;
        };
        self.append_to_row(at - 1, row.chars())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn lines(doc: &Document) -> Vec<String> {
        doc.rows()
            .map(|r| String::from_utf8_lossy(r.chars()).into_owned())
            .collect()
    }

    #[test]
    fn test_insert_and_remove_rows() {
        let mut doc = Document::default();
        assert!(doc.insert_row(0, "b"));
        assert!(doc.insert_row(0, "a"));
        assert!(doc.insert_row(2, "c"));
        assert!(!doc.insert_row(5, "x"));
        assert_eq!(lines(&doc), vec!["a", "b", "c"]);

        assert!(doc.remove_row(1).is_some());
        assert!(doc.remove_row(2).is_none());
        assert_eq!(lines(&doc), vec!["a", "c"]);
    }

    #[test]
    fn test_split_and_join() {
        let mut doc = Document::from_lines(["hello world"], 8);
        assert!(doc.split_row(0, 5));
        assert_eq!(lines(&doc), vec!["hello", " world"]);

        assert!(doc.join_with_previous(1));
        assert_eq!(lines(&doc), vec!["hello world"]);
        assert!(!doc.join_with_previous(0));
        assert!(!doc.join_with_previous(1));
    }

    #[test]
    fn test_join_refreshes_render() {
        let mut doc = Document::from_lines(["ab", "\tc", "d"], 8);
        assert!(doc.join_with_previous(1));
        assert_eq!(lines(&doc), vec!["ab\tc", "d"]);
        assert_eq!(doc.row(0).map(Row::render), Some(&b"ab      c"[..]));
    }

    #[test]
    fn test_row_mutation_out_of_range() {
        let mut doc = Document::default();
        assert!(!doc.insert_char(0, 0, b'x'));
        assert!(!doc.delete_char(0, 0));
        assert!(!doc.append_to_row(3, b"x"));
        assert!(!doc.split_row(1, 0));
        assert_eq!(doc.row_len(4), 0);
        assert_eq!(doc.cx_to_rx(4, 2), 0);
    }

    #[test]
    fn test_from_bytes_splits_lines() {
        let doc = Document::from_bytes(b"one\r\n\ntwo\tx\n", 8);
        assert_eq!(lines(&doc), vec!["one", "", "two\tx"]);
        assert_eq!(doc.row(2).map(Row::render), Some(&b"two     x"[..]));

        let doc = Document::from_bytes(b"no newline", 8);
        assert_eq!(lines(&doc), vec!["no newline"]);

        assert!(Document::from_bytes(b"", 8).is_empty());
        assert_eq!(Document::from_bytes(b"\n", 8).row_count(), 1);
    }

    #[test]
    fn test_to_bytes_trailing_newline() {
        let doc = Document::from_lines(["a", "", "b"], 8);
        assert_eq!(doc.to_bytes(), b"a\n\nb\n");
        assert_eq!(Document::default().to_bytes(), b"");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let doc = Document::from_lines(["first", "", "\tindented", "", "last"], 8);
        let file = NamedTempFile::new().unwrap();

        let written = doc.save_to(file.path()).unwrap();
        assert_eq!(written, doc.to_bytes().len());

        let reloaded = Document::open(file.path(), 8).unwrap();
        assert_eq!(lines(&reloaded), lines(&doc));
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::open(dir.path().join("missing.txt"), 8).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}

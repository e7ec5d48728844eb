//! Whole-screen frame assembly.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use rowedit_buffer::{Cursor, Document, Viewport};

use crate::message_bar::{MessageBar, StatusMessage};
use crate::status_bar::{StatusBar, StatusBarParams};
use crate::truncate_to_cols;

/// Everything besides buffer state that a frame shows
pub struct FrameParams<'a> {
    pub file_name: Option<&'a str>,
    pub dirty: bool,
    pub message: Option<&'a StatusMessage>,
    pub message_timeout: Duration,
    /// Banner shown on an empty document
    pub welcome: &'a str,
    /// Clock used for message expiry
    pub now: Instant,
}

/// Compose one full frame.
///
/// Expects `viewport.scroll` to have run for `cursor` already, so that
/// `cursor.rx` is current and the cursor lies inside the viewport.
pub fn compose_frame(
    doc: &Document,
    cursor: &Cursor,
    viewport: &Viewport,
    params: &FrameParams<'_>,
) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity((viewport.screen_rows + 2) * (viewport.screen_cols + 8));

    queue!(out, Hide, MoveTo(0, 0))?;
    draw_rows(&mut out, doc, viewport, params.welcome)?;
    StatusBar::render(
        &mut out,
        &StatusBarParams {
            file_name: params.file_name,
            dirty: params.dirty,
            cursor_row: cursor.cy,
            row_count: doc.row_count(),
            screen_cols: viewport.screen_cols,
        },
    )?;
    MessageBar::render(
        &mut out,
        params.message,
        viewport.screen_cols,
        params.message_timeout,
        params.now,
    )?;

    let row = cursor.cy.saturating_sub(viewport.row_offset);
    let col = cursor.rx.saturating_sub(viewport.col_offset);
    queue!(out, MoveTo(to_u16(col), to_u16(row)), Show)?;

    Ok(out)
}

fn draw_rows<W: Write>(
    out: &mut W,
    doc: &Document,
    viewport: &Viewport,
    welcome: &str,
) -> io::Result<()> {
    let cols = viewport.screen_cols;

    for y in 0..viewport.screen_rows {
        let file_row = y + viewport.row_offset;
        match doc.row(file_row) {
            Some(row) => {
                let render = row.render();
                let start = viewport.col_offset.min(render.len());
                let end = (viewport.col_offset + cols).min(render.len());
                out.write_all(&render[start..end])?;
            }
            None if doc.is_empty() && y == viewport.screen_rows / 3 => {
                let banner = truncate_to_cols(welcome, cols);
                let mut padding = (cols - banner.chars().count()) / 2;
                if padding > 0 {
                    out.write_all(b"~")?;
                    padding -= 1;
                }
                out.write_all(" ".repeat(padding).as_bytes())?;
                out.write_all(banner.as_bytes())?;
            }
            None => out.write_all(b"~")?,
        }

        queue!(out, Clear(ClearType::UntilNewLine))?;
        out.write_all(b"\r\n")?;
    }
    Ok(())
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELCOME: &str = "rowedit editor -- version 0.1.0";

    fn params(message: Option<&StatusMessage>) -> FrameParams<'_> {
        FrameParams {
            file_name: Some("demo.txt"),
            dirty: false,
            message,
            message_timeout: Duration::from_secs(5),
            welcome: WELCOME,
            now: Instant::now(),
        }
    }

    fn compose(doc: &Document, cursor: &mut Cursor, vp: &mut Viewport) -> String {
        vp.scroll(doc, cursor);
        let frame = compose_frame(doc, cursor, vp, &params(None)).unwrap();
        String::from_utf8(frame).unwrap()
    }

    #[test]
    fn test_frame_envelope() {
        let doc = Document::from_lines(["hello"], 8);
        let mut cursor = Cursor::at(0, 3);
        let mut vp = Viewport::new(3, 20);

        let frame = compose(&doc, &mut cursor, &mut vp);
        assert!(frame.starts_with("\x1b[?25l\x1b[1;1Hhello\x1b[K\r\n~\x1b[K\r\n~\x1b[K\r\n"));
        assert!(frame.ends_with("\x1b[1;4H\x1b[?25h"));
    }

    #[test]
    fn test_horizontal_slice_of_render() {
        let doc = Document::from_lines(["\tabcdefgh"], 8);
        let mut cursor = Cursor::at(0, 9);
        let mut vp = Viewport::new(1, 10);

        let frame = compose(&doc, &mut cursor, &mut vp);
        // rx = 16, so col_offset = 7 and the visible cells are " abcdefgh".
        assert_eq!(vp.col_offset, 7);
        assert!(frame.contains("\x1b[1;1H abcdefgh\x1b[K\r\n"));
        assert!(frame.ends_with("\x1b[1;10H\x1b[?25h"));
    }

    #[test]
    fn test_welcome_only_on_empty_document() {
        let mut vp = Viewport::new(6, 40);
        let mut cursor = Cursor::new();
        let frame = compose(&Document::default(), &mut cursor, &mut vp);
        // padding (40 - 31) / 2 = 4: "~" plus three spaces
        assert!(frame.contains(&format!("~   {}\x1b[K", WELCOME)));

        let doc = Document::from_lines(["x"], 8);
        let frame = compose(&doc, &mut cursor, &mut vp);
        assert!(!frame.contains(WELCOME));
    }

    #[test]
    fn test_welcome_truncated_on_narrow_screen() {
        let mut vp = Viewport::new(3, 7);
        let mut cursor = Cursor::new();
        let frame = compose(&Document::default(), &mut cursor, &mut vp);
        assert!(frame.contains("\x1b[K\r\nrowedit\x1b[K\r\n"));
    }

    #[test]
    fn test_rows_follow_row_offset() {
        let doc = Document::from_lines((0..10).map(|i| format!("row{}", i)), 8);
        let mut cursor = Cursor::at(9, 0);
        let mut vp = Viewport::new(2, 80);

        let frame = compose(&doc, &mut cursor, &mut vp);
        assert!(frame.contains("row8\x1b[K\r\nrow9\x1b[K\r\n"));
        assert!(!frame.contains("row7"));
        assert!(frame.contains("10/10"));
        assert!(frame.ends_with("\x1b[2;1H\x1b[?25h"));
    }

    #[test]
    fn test_narrow_status_bar_drops_position() {
        let doc = Document::from_lines((0..10).map(|i| format!("row{}", i)), 8);
        let mut cursor = Cursor::at(9, 0);
        let mut vp = Viewport::new(2, 20);

        // "demo.txt - 10 lines " fills all 20 cells.
        let frame = compose(&doc, &mut cursor, &mut vp);
        assert!(frame.contains("demo.txt - 10 lines \x1b[0m"));
        assert!(!frame.contains("10/10"));
    }

    #[test]
    fn test_message_in_frame() {
        let doc = Document::from_lines(["x"], 8);
        let cursor = Cursor::new();
        let vp = Viewport::new(1, 40);
        let msg = StatusMessage::new("Found");

        let frame = compose_frame(&doc, &cursor, &vp, &params(Some(&msg))).unwrap();
        let frame = String::from_utf8(frame).unwrap();
        assert!(frame.contains("\x1b[0m\r\n\x1b[KFound\x1b[1;1H"));
    }
}

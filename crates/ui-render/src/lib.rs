//! Frame composition for rowedit.
//!
//! A repaint is assembled into a single in-memory buffer (text rows, status
//! bar, message bar and cursor placement) that the caller writes out in one
//! operation.

pub mod frame;
pub mod message_bar;
pub mod status_bar;

pub use frame::{compose_frame, FrameParams};
pub use message_bar::{MessageBar, StatusMessage};
pub use status_bar::{StatusBar, StatusBarParams};

/// Longest prefix of `text` that fits into `cols` cells (one cell per char).
pub(crate) fn truncate_to_cols(text: &str, cols: usize) -> &str {
    match text.char_indices().nth(cols) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

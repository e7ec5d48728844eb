//! Line-oriented text buffer for rowedit.
//!
//! Rows are stored in a plain growable vector, each keeping its raw bytes
//! together with a tab-expanded render form. On top of the row store sit the
//! render-column mapping, cursor-driven edit operations and the viewport
//! scroll policy.

mod cursor;
mod document;
mod editor;
mod row;
mod viewport;

pub use cursor::{Cursor, Movement};
pub use document::Document;
pub use editor::Editor;
pub use row::{cx_to_rx, rx_to_cx, Row, DEFAULT_TAB_STOP};
pub use viewport::Viewport;

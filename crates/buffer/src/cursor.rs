/// Cursor position in document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Character column within the row (0-based)
    pub cx: usize,
    /// Row index (0-based); `row_count` denotes the virtual row past the end
    pub cy: usize,
    /// Render column of `cx`, refreshed by `Viewport::scroll`
    pub rx: usize,
}

impl Cursor {
    /// Create a new cursor at position (0, 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create cursor at specified row and column
    pub fn at(cy: usize, cx: usize) -> Self {
        Self { cx, cy, rx: 0 }
    }
}

/// Single-step cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

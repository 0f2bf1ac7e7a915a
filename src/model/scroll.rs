//! Cell scroll position.

/// Current scroll position as a (virtual row, virtual col) pair of
/// *unfixed* slot counts scrolled past.
#[derive(Debug, Clone, Default)]
pub struct ScrollModel {
    row: usize,
    col: usize,
    dirty: bool,
}

impl ScrollModel {
    /// Create a model scrolled to the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll to an absolute cell position and mark the model dirty.
    pub fn scroll_to(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
        self.dirty = true;
    }

    /// Rows scrolled past.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Columns scrolled past.
    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Whether the position changed since the flag was last taken.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

//! Dirty flags for the incremental draw cycle.

/// One flag per independently invalidatable aspect of the grid.
///
/// Owned by the view layer and populated from collaborator flags at tick
/// time; cleared atomically at the end of each completed draw pass. Scoped
/// to a grid instance, never process-wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    /// Container dimensions or viewport-derived structure changed.
    pub viewport: bool,
    /// A column builder was registered or replaced.
    pub col_builders: bool,
    /// The column size model changed.
    pub col_model: bool,
    /// The row size model changed.
    pub row_model: bool,
    /// The data source changed (sort, mutation).
    pub data_model: bool,
    /// The cell scroll position changed.
    pub cell_scroll_model: bool,
    /// A decorator was added, removed, or repositioned.
    pub decorators: bool,
    /// A cell class descriptor was added, removed, or changed.
    pub cell_classes: bool,
}

impl DirtyFlags {
    /// Whether any aspect is dirty.
    #[must_use]
    pub fn any(&self) -> bool {
        self.viewport
            || self.col_builders
            || self.col_model
            || self.row_model
            || self.data_model
            || self.cell_scroll_model
            || self.decorators
            || self.cell_classes
    }

    /// Mark every aspect dirty (initial build).
    pub fn set_all(&mut self) {
        *self = Self {
            viewport: true,
            col_builders: true,
            col_model: true,
            row_model: true,
            data_model: true,
            cell_scroll_model: true,
            decorators: true,
            cell_classes: true,
        };
    }

    /// Clear every aspect (end of a completed draw pass).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Condition for the cell content pass.
    #[must_use]
    pub fn needs_cells(&self) -> bool {
        self.viewport
            || self.col_builders
            || self.col_model
            || self.row_model
            || self.data_model
            || self.cell_scroll_model
    }

    /// Condition for the cell class pass.
    #[must_use]
    pub fn needs_cell_classes(&self) -> bool {
        self.viewport || self.col_model || self.row_model || self.cell_classes
    }

    /// Condition for the decorator pass. Scroll is included so
    /// virtual-space boxes track the scroll position.
    #[must_use]
    pub fn needs_decorators(&self) -> bool {
        self.viewport
            || self.col_model
            || self.row_model
            || self.cell_scroll_model
            || self.decorators
    }

    /// Condition for a full decorator recompute rather than only the
    /// individually dirty ones.
    #[must_use]
    pub fn forces_decorator_recompute(&self) -> bool {
        self.viewport || self.col_model || self.row_model || self.cell_scroll_model
    }
}

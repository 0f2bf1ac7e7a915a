//! Viewport state and coordinate mapping.
//!
//! The viewport is a pure function of the size models, the scroll model,
//! and the container pixel box; everything it owns is a cached derived
//! value, recomputed by [`Viewport::refresh`] when any input changed.
//!
//! Three index spaces meet here:
//! - **virtual**: position among the currently visible slots (fixed slots
//!   first, then unfixed slots starting at the scroll offset);
//! - **real**: position among all non-hidden descriptors, ignoring scroll;
//! - **data**: real offset past the leading header slots.

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, NodeId};
use crate::model::{ScrollModel, SizeModel};
use crate::types::Space;

/// Derived viewport state.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    width: f32,
    height: f32,
    origin_x: f32,
    origin_y: f32,
    rows: usize,
    cols: usize,
    fixed_rows: usize,
    fixed_cols: usize,
    header_rows: usize,
    header_cols: usize,
    scroll_row: usize,
    scroll_col: usize,
    /// Cumulative pixel tops of visible row slots, plus the final edge.
    row_offsets: Vec<f32>,
    /// Cumulative pixel lefts of visible col slots, plus the final edge.
    col_offsets: Vec<f32>,
    dirty: bool,
}

/// Serializable snapshot of the derived viewport state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub scroll_row: usize,
    pub scroll_col: usize,
    pub rows: usize,
    pub cols: usize,
    pub width: f32,
    pub height: f32,
    pub fixed_rows: usize,
    pub fixed_cols: usize,
    pub row_offsets: Vec<f32>,
    pub col_offsets: Vec<f32>,
}

impl Viewport {
    /// Create an empty viewport. Call [`Viewport::refresh`] before use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure the container node's pixel box and position, and mark the
    /// viewport dirty.
    pub fn size_to_container(&mut self, dom: &Dom, container: NodeId) {
        if let Some(node) = dom.node(container) {
            self.width = node.style.width.unwrap_or(0.0).max(0.0);
            self.height = node.style.height.unwrap_or(0.0).max(0.0);
            self.origin_x = node.style.left.unwrap_or(0.0);
            self.origin_y = node.style.top.unwrap_or(0.0);
        }
        self.dirty = true;
    }

    /// Set the container width directly (host-driven resize).
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
        self.dirty = true;
    }

    /// Set the container height directly (host-driven resize).
    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(0.0);
        self.dirty = true;
    }

    /// Container width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Container height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of visible row slots (fixed slots included).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of visible col slots (fixed slots included).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of fixed (never-scrolling) row slots.
    #[must_use]
    pub fn fixed_rows(&self) -> usize {
        self.fixed_rows
    }

    /// Number of fixed (never-scrolling) col slots.
    #[must_use]
    pub fn fixed_cols(&self) -> usize {
        self.fixed_cols
    }

    /// Whether the container box changed since the flag was last taken.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Recompute every derived value from the current model state.
    pub fn refresh(&mut self, rows: &SizeModel, cols: &SizeModel, scroll: &ScrollModel) {
        self.fixed_rows = rows.fixed_count();
        self.fixed_cols = cols.fixed_count();
        self.header_rows = rows.header_count();
        self.header_cols = cols.header_count();
        self.scroll_row = scroll.row();
        self.scroll_col = scroll.col();
        let (row_count, row_offsets) =
            Self::window_axis(rows, self.fixed_rows, self.scroll_row, self.height);
        let (col_count, col_offsets) =
            Self::window_axis(cols, self.fixed_cols, self.scroll_col, self.width);
        self.rows = row_count;
        self.cols = col_count;
        self.row_offsets = row_offsets;
        self.col_offsets = col_offsets;
    }

    /// Count the slots that fit in `extent` pixels (fixed slots first,
    /// then unfixed slots from the scroll offset, plus one partial) and
    /// produce their cumulative offsets with a final edge entry.
    fn window_axis(
        model: &SizeModel,
        fixed: usize,
        scroll: usize,
        extent: f32,
    ) -> (usize, Vec<f32>) {
        let visible_len = model.visible_len();
        let mut offsets = Vec::new();
        let mut px = 0.0_f32;
        let mut slot = 0_usize;
        loop {
            let seq = if slot < fixed { slot } else { slot + scroll };
            if seq >= visible_len || px >= extent {
                break;
            }
            offsets.push(px);
            px += model.visible_size(seq);
            slot += 1;
        }
        offsets.push(px);
        (slot, offsets)
    }

    /// Map a virtual slot to its non-hidden descriptor sequence index.
    #[must_use]
    pub fn seq_of_virtual_row(&self, slot: usize) -> usize {
        if slot < self.fixed_rows {
            slot
        } else {
            slot + self.scroll_row
        }
    }

    /// Map a virtual slot to its non-hidden descriptor sequence index.
    #[must_use]
    pub fn seq_of_virtual_col(&self, slot: usize) -> usize {
        if slot < self.fixed_cols {
            slot
        } else {
            slot + self.scroll_col
        }
    }

    /// Pixel top of a visible row slot.
    #[must_use]
    pub fn row_top(&self, slot: usize) -> f32 {
        self.row_offsets.get(slot).copied().unwrap_or(self.height)
    }

    /// Pixel left of a visible col slot.
    #[must_use]
    pub fn col_left(&self, slot: usize) -> f32 {
        self.col_offsets.get(slot).copied().unwrap_or(self.width)
    }

    /// Serializable snapshot of the derived state. The offset arrays
    /// carry one entry per visible slot (the final edge entry is
    /// dropped).
    #[must_use]
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            scroll_row: self.scroll_row,
            scroll_col: self.scroll_col,
            rows: self.rows,
            cols: self.cols,
            width: self.width,
            height: self.height,
            fixed_rows: self.fixed_rows,
            fixed_cols: self.fixed_cols,
            row_offsets: self.row_offsets.iter().take(self.rows).copied().collect(),
            col_offsets: self.col_offsets.iter().take(self.cols).copied().collect(),
        }
    }

    // ------------------------------------------------------------------
    // Coordinate mapper (consumed by pointer handling)
    // ------------------------------------------------------------------

    /// Translate a pointer x relative to the host surface into the
    /// grid's own coordinate system.
    #[must_use]
    pub fn to_grid_x(&self, x: f32) -> f32 {
        x - self.origin_x
    }

    /// Translate a pointer y relative to the host surface into the
    /// grid's own coordinate system.
    #[must_use]
    pub fn to_grid_y(&self, y: f32) -> f32 {
        y - self.origin_y
    }

    /// Virtual row slot containing the grid-relative `y`. Out-of-range
    /// values clamp to the nearest valid slot.
    #[must_use]
    pub fn virtual_row_by_top(&self, y: f32) -> usize {
        Self::slot_by_offset(&self.row_offsets, self.rows, y)
    }

    /// Virtual col slot containing the grid-relative `x`. Out-of-range
    /// values clamp to the nearest valid slot.
    #[must_use]
    pub fn virtual_col_by_left(&self, x: f32) -> usize {
        Self::slot_by_offset(&self.col_offsets, self.cols, x)
    }

    fn slot_by_offset(offsets: &[f32], count: usize, pos: f32) -> usize {
        if count == 0 || pos <= 0.0 {
            return 0;
        }
        let mut slot = 0;
        for (i, offset) in offsets.iter().enumerate().take(count) {
            if *offset <= pos {
                slot = i;
            } else {
                break;
            }
        }
        slot
    }

    // ------------------------------------------------------------------
    // Space-aware primitives (shared by decorators and cell classes)
    // ------------------------------------------------------------------

    /// Resolve a stored range row index to a visible slot index under the
    /// given coordinate space. May be negative (scrolled past) or beyond
    /// the visible window; callers collapse those to zero-size results.
    #[must_use]
    pub fn slot_of_row(&self, space: Space, index: i64) -> i64 {
        self.slot_of(space, index, self.fixed_rows, self.scroll_row, self.header_rows)
    }

    /// Resolve a stored range col index to a visible slot index under the
    /// given coordinate space.
    #[must_use]
    pub fn slot_of_col(&self, space: Space, index: i64) -> i64 {
        self.slot_of(space, index, self.fixed_cols, self.scroll_col, self.header_cols)
    }

    fn slot_of(&self, space: Space, index: i64, fixed: usize, scroll: usize, headers: usize) -> i64 {
        let fixed = i64::try_from(fixed).unwrap_or(i64::MAX);
        let scroll = i64::try_from(scroll).unwrap_or(i64::MAX);
        let headers = i64::try_from(headers).unwrap_or(i64::MAX);
        match space {
            Space::Virtual => {
                if index < fixed {
                    index
                } else {
                    index - scroll
                }
            }
            Space::Real => index,
            Space::Data => index + headers,
        }
    }

    /// Pixel top of a resolved row slot under the given space: the
    /// scrolled mapping for `Virtual`, the as-if-unscrolled mapping for
    /// `Real`/`Data`.
    #[must_use]
    pub fn slot_row_top_px(&self, model: &SizeModel, space: Space, slot: usize) -> f32 {
        match space {
            Space::Virtual => self.row_top(slot),
            Space::Real | Space::Data => model.cum_px(slot),
        }
    }

    /// Pixel left of a resolved col slot under the given space.
    #[must_use]
    pub fn slot_col_left_px(&self, model: &SizeModel, space: Space, slot: usize) -> f32 {
        match space {
            Space::Virtual => self.col_left(slot),
            Space::Real | Space::Data => model.cum_px(slot),
        }
    }

    /// Summed pixel span of `count` row slots from `slot` under the given
    /// space.
    #[must_use]
    pub fn row_span_px(&self, model: &SizeModel, space: Space, slot: usize, count: usize) -> f32 {
        match space {
            Space::Virtual => (slot..slot + count)
                .map(|v| model.visible_size(self.seq_of_virtual_row(v)))
                .sum(),
            Space::Real | Space::Data => model.span_px(slot, count),
        }
    }

    /// Summed pixel span of `count` col slots from `slot` under the given
    /// space.
    #[must_use]
    pub fn col_span_px(&self, model: &SizeModel, space: Space, slot: usize, count: usize) -> f32 {
        match space {
            Space::Virtual => (slot..slot + count)
                .map(|v| model.visible_size(self.seq_of_virtual_col(v)))
                .sum(),
            Space::Real | Space::Data => model.span_px(slot, count),
        }
    }
}

//! Ordered row/column descriptor sequences.
//!
//! One `SizeModel` per axis. All slot arithmetic in the engine runs over
//! the *non-hidden subsequence* of descriptors: a hidden descriptor keeps
//! its logical index but contributes nothing to counts, offsets, or spans.

use crate::types::RowColDescriptor;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 30.0;

/// Default column width in pixels.
pub const DEFAULT_COL_WIDTH: f32 = 100.0;

/// Ordered descriptor sequence for one axis.
#[derive(Debug, Clone)]
pub struct SizeModel {
    descriptors: Vec<RowColDescriptor>,
    default_size: f32,
    header_count: usize,
    dirty: bool,
}

impl SizeModel {
    /// Create an empty model with the given default slot size.
    #[must_use]
    pub fn new(default_size: f32) -> Self {
        Self {
            descriptors: Vec::new(),
            default_size,
            header_count: 0,
            dirty: false,
        }
    }

    /// Create a model pre-populated with `count` default descriptors.
    #[must_use]
    pub fn with_count(count: usize, default_size: f32) -> Self {
        let mut model = Self::new(default_size);
        for _ in 0..count {
            model.add(RowColDescriptor::new());
        }
        model.dirty = false;
        model
    }

    /// Number of descriptors, hidden included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the axis has no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The axis default slot size.
    #[must_use]
    pub fn default_size(&self) -> f32 {
        self.default_size
    }

    /// Number of leading header slots on this axis.
    #[must_use]
    pub fn header_count(&self) -> usize {
        self.header_count
    }

    /// Set the number of leading header slots. Headers are part of the
    /// descriptor sequence; this only affects data-index translation.
    pub fn set_header_count(&mut self, count: usize) {
        self.header_count = count;
        self.dirty = true;
    }

    /// Append a descriptor. Its index is assigned by the model.
    pub fn add(&mut self, mut descriptor: RowColDescriptor) {
        descriptor.index = self.descriptors.len();
        self.descriptors.push(descriptor);
        self.dirty = true;
    }

    /// Remove the descriptor at `index`. Out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) {
        if index >= self.descriptors.len() {
            return;
        }
        self.descriptors.remove(index);
        for (i, d) in self.descriptors.iter_mut().enumerate() {
            d.index = i;
        }
        self.dirty = true;
    }

    /// Borrow the descriptor at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RowColDescriptor> {
        self.descriptors.get(index)
    }

    /// Set an explicit size (or `None` for the default) at `index`.
    pub fn set_size(&mut self, index: usize, size: Option<f32>) {
        if let Some(d) = self.descriptors.get_mut(index) {
            d.size = size;
            self.dirty = true;
        }
    }

    /// Toggle the hidden flag at `index`.
    pub fn set_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(d) = self.descriptors.get_mut(index) {
            if d.hidden != hidden {
                d.hidden = hidden;
                self.dirty = true;
            }
        }
    }

    /// Toggle the fixed flag at `index`.
    pub fn set_fixed(&mut self, index: usize, fixed: bool) {
        if let Some(d) = self.descriptors.get_mut(index) {
            if d.fixed != fixed {
                d.fixed = fixed;
                self.dirty = true;
            }
        }
    }

    /// Pixel size of a descriptor under this axis's default.
    #[must_use]
    pub fn size_of(&self, descriptor: &RowColDescriptor) -> f32 {
        descriptor.size.unwrap_or(self.default_size).max(0.0)
    }

    /// Number of non-hidden descriptors.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.descriptors.iter().filter(|d| !d.hidden).count()
    }

    /// Number of non-hidden fixed descriptors (the fixed pane size).
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.descriptors
            .iter()
            .filter(|d| d.fixed && !d.hidden)
            .count()
    }

    /// The `seq`-th non-hidden descriptor.
    #[must_use]
    pub fn visible_descriptor(&self, seq: usize) -> Option<&RowColDescriptor> {
        self.descriptors.iter().filter(|d| !d.hidden).nth(seq)
    }

    /// Number of non-hidden descriptors before `index` (the visible
    /// sequence position a descriptor at `index` would occupy).
    #[must_use]
    pub fn visible_before(&self, index: usize) -> usize {
        self.descriptors
            .iter()
            .take(index)
            .filter(|d| !d.hidden)
            .count()
    }

    /// Pixel size of the `seq`-th non-hidden descriptor (0 past the end).
    #[must_use]
    pub fn visible_size(&self, seq: usize) -> f32 {
        self.visible_descriptor(seq)
            .map_or(0.0, |d| self.size_of(d))
    }

    /// Cumulative pixel offset of the `seq`-th non-hidden descriptor.
    #[must_use]
    pub fn cum_px(&self, seq: usize) -> f32 {
        self.descriptors
            .iter()
            .filter(|d| !d.hidden)
            .take(seq)
            .map(|d| self.size_of(d))
            .sum()
    }

    /// Summed pixel span of `count` non-hidden descriptors from `start`.
    #[must_use]
    pub fn span_px(&self, start: usize, count: usize) -> f32 {
        self.descriptors
            .iter()
            .filter(|d| !d.hidden)
            .skip(start)
            .take(count)
            .map(|d| self.size_of(d))
            .sum()
    }

    /// Whether the model changed since the flag was last taken.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the model dirty without a mutation (external invalidation).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

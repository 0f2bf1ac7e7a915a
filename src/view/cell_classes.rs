//! Range-based cell class assignment.
//!
//! A descriptor names a cell range (position, extents, coordinate space)
//! and a class to apply to every visible cell inside it. Ranges resolve
//! to discrete visible slots — classes attach to individual cell nodes —
//! and are re-resolved against the current slot mapping on every class
//! pass, so `Unbounded` extents and `Virtual`-space positions track
//! scrolling.

use std::collections::BTreeMap;

use crate::layout::Viewport;
use crate::types::{Extent, Space};

/// A cell range plus the class it applies.
#[derive(Debug, Clone, PartialEq)]
pub struct CellClassDescriptor {
    pub row: i64,
    pub col: i64,
    pub class: String,
    pub height: Extent,
    pub width: Extent,
    pub space: Space,
}

impl CellClassDescriptor {
    /// A 1×1 virtual-space descriptor.
    #[must_use]
    pub fn new(row: i64, col: i64, class: &str) -> Self {
        Self::ranged(row, col, class, Extent::Len(1.0), Extent::Len(1.0), Space::Virtual)
    }

    /// A descriptor covering `height` × `width` cells from (row, col).
    #[must_use]
    pub fn ranged(
        row: i64,
        col: i64,
        class: &str,
        height: Extent,
        width: Extent,
        space: Space,
    ) -> Self {
        Self {
            row,
            col,
            class: class.to_owned(),
            height,
            width,
            space,
        }
    }
}

/// Handle to a registered class descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellClassId(usize);

/// Registry of class descriptors, applied to the visible region on each
/// class pass.
#[derive(Default)]
pub struct CellClassRegistry {
    items: BTreeMap<CellClassId, CellClassDescriptor>,
    next: usize,
    dirty: bool,
}

impl CellClassRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor and mark the registry dirty.
    pub fn add(&mut self, descriptor: CellClassDescriptor) -> CellClassId {
        let id = CellClassId(self.next);
        self.next += 1;
        self.items.insert(id, descriptor);
        self.dirty = true;
        id
    }

    /// Remove a descriptor. Unknown handles are a no-op.
    pub fn remove(&mut self, id: CellClassId) {
        if self.items.remove(&id).is_some() {
            self.dirty = true;
        }
    }

    /// Borrow a descriptor.
    #[must_use]
    pub fn get(&self, id: CellClassId) -> Option<&CellClassDescriptor> {
        self.items.get(&id)
    }

    /// Mutate a descriptor in place, marking the registry dirty.
    pub fn update(&mut self, id: CellClassId, f: impl FnOnce(&mut CellClassDescriptor)) {
        if let Some(descriptor) = self.items.get_mut(&id) {
            f(descriptor);
            self.dirty = true;
        }
    }

    /// Registered descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CellClassDescriptor> {
        self.items.values()
    }

    /// Number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Whether a descriptor changed since the flag was last taken.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// A half-open rectangle of visible slot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotRect {
    pub row0: usize,
    pub row1: usize,
    pub col0: usize,
    pub col1: usize,
}

impl SlotRect {
    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row0 && row < self.row1 && col >= self.col0 && col < self.col1
    }

    fn empty() -> Self {
        Self {
            row0: 0,
            row1: 0,
            col0: 0,
            col1: 0,
        }
    }
}

/// Resolve a descriptor to the visible slot rectangle it covers right
/// now. Invalid positions and non-positive extents resolve to the empty
/// rectangle rather than erroring.
pub(crate) fn resolve_slots(descriptor: &CellClassDescriptor, viewport: &Viewport) -> SlotRect {
    // Stored negative positions are invalid by contract.
    if descriptor.row < 0 || descriptor.col < 0 {
        return SlotRect::empty();
    }
    let slot_row = viewport.slot_of_row(descriptor.space, descriptor.row);
    let slot_col = viewport.slot_of_col(descriptor.space, descriptor.col);
    let Some((row0, row1)) = axis_range(slot_row, descriptor.height, viewport.rows()) else {
        return SlotRect::empty();
    };
    let Some((col0, col1)) = axis_range(slot_col, descriptor.width, viewport.cols()) else {
        return SlotRect::empty();
    };
    SlotRect {
        row0,
        row1,
        col0,
        col1,
    }
}

/// Clamp `[slot, slot + extent)` into `[0, visible)`.
fn axis_range(slot: i64, extent: Extent, visible: usize) -> Option<(usize, usize)> {
    let visible = i64::try_from(visible).unwrap_or(i64::MAX);
    let end = match extent {
        Extent::Unbounded => visible,
        Extent::Len(len) => {
            #[allow(clippy::cast_possible_truncation)]
            let count = len.floor() as i64;
            if count <= 0 {
                return None;
            }
            slot.saturating_add(count).min(visible)
        }
    };
    let start = slot.max(0);
    if start >= end {
        return None;
    }
    let start = usize::try_from(start).ok()?;
    let end = usize::try_from(end).ok()?;
    Some((start, end))
}

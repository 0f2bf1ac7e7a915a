//! Row/column descriptors.

use serde::{Deserialize, Serialize};

/// Describes a single row or column of the logical grid.
///
/// Descriptors are ordered and contiguously indexed within their axis. A
/// hidden descriptor contributes zero visible size but keeps its logical
/// index; a fixed descriptor is rendered at the leading edge and never
/// scrolls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowColDescriptor {
    /// Position within the axis. Maintained by the owning size model.
    pub index: usize,
    /// Size in pixels, or `None` for the axis default.
    pub size: Option<f32>,
    /// Hidden descriptors are skipped by all slot arithmetic.
    pub hidden: bool,
    /// Fixed descriptors are always visible and excluded from scroll
    /// arithmetic.
    pub fixed: bool,
}

impl RowColDescriptor {
    /// Create a descriptor with the axis-default size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a descriptor with an explicit size.
    #[must_use]
    pub fn sized(size: f32) -> Self {
        Self {
            index: 0,
            size: Some(size),
            hidden: false,
            fixed: false,
        }
    }

    /// Builder-style fixed flag.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Builder-style hidden flag.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}


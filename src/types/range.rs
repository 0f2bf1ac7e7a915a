//! Range coordinate spaces, unit systems, and resolved pixel boxes.
//!
//! Decorators and cell classes share one range shape: a position, an
//! extent per axis, a coordinate space, and a unit system. The space and
//! unit tags are closed enums so the positioning algorithm is exhaustive.

use serde::{Deserialize, Serialize};

/// Coordinate space a range position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// Scroll-sensitive: a position shifts with the cell scroll model and
    /// slides out of view when scrolled past (fixed slots exempt).
    #[default]
    Virtual,
    /// Scroll-invariant: anchored to the slot grid as if scrolled to
    /// (0, 0). Used for ranges pinned to absolute grid position, e.g.
    /// headers.
    Real,
    /// Like [`Space::Real`] but offset by the leading header row/column
    /// count, indexing the underlying data source.
    Data,
}

/// Unit system for range position and extent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Values are descriptor-index counts.
    #[default]
    Cell,
    /// Values are raw pixels; slot lookup is bypassed entirely.
    Px,
}

/// An extent along one axis: a finite length, or "to the end of the
/// viewport".
///
/// An explicit variant rather than a floating-point infinity sentinel, so
/// unbounded extents cannot silently propagate into pixel arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extent {
    /// A finite extent (cells or pixels, per [`Units`]). Non-positive
    /// lengths resolve to a zero-size box.
    Len(f32),
    /// Extend to the remaining viewport extent from the resolved origin.
    Unbounded,
}

impl Extent {
    /// The finite length, if any.
    #[must_use]
    pub fn finite(self) -> Option<f32> {
        match self {
            Self::Len(v) => Some(v),
            Self::Unbounded => None,
        }
    }
}

impl From<f32> for Extent {
    fn from(v: f32) -> Self {
        Self::Len(v)
    }
}

/// A resolved bounding box in container-relative pixels.
///
/// A box with zero width and height is the "invisible" resolution used for
/// ranges that are invalid or have no on-screen intersection; the element
/// it positions stays in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PxBox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl PxBox {
    /// A zero-size box at the given origin.
    #[must_use]
    pub fn collapsed(top: f32, left: f32) -> Self {
        Self {
            top,
            left,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Whether the box has positive area.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

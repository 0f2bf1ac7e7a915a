//! Layout engine: visible slot windowing and coordinate mapping.
//!
//! This module handles:
//! - Deriving visible row/column slot counts from container size,
//!   descriptor sizes, and the scroll position
//! - Cumulative pixel offset arrays for the visible slots
//! - Fixed-pane boundaries (leading slots that never scroll)
//! - Pixel → virtual index translation for pointer handling
//! - The space-aware slot/pixel primitives shared by decorator and
//!   cell-class positioning

mod viewport;

pub use viewport::{Viewport, ViewportSnapshot};

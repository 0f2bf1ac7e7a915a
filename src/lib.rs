//! gridview — virtualized grid rendering engine.
//!
//! Maps an unbounded logical row/column grid onto a bounded window of
//! retained nodes, redrawing only the subset of cells currently visible
//! and only the aspects that actually changed since the last draw:
//! - Viewport windowing over variable-size, hideable, freezable rows and
//!   columns
//! - A dirty-flag-partitioned incremental draw cycle with coalesced
//!   scheduling
//! - Overlay decorators positioned in cell or pixel units across three
//!   coordinate spaces (virtual, real, data)
//! - Range-based cell class assignment
//! - Per-column pluggable cell builders
//!
//! The engine is headless: it renders into its own retained element tree
//! ([`dom::Dom`]) that a host embedding mirrors to any output surface.
//!
//! # Usage
//!
//! ```
//! use gridview::Grid;
//!
//! let mut grid = Grid::simple(100, 10);
//! grid.build(800.0, 500.0)?;
//! grid.scroll_to(5, 6);
//! grid.tick()?; // run the coalesced draw pass
//! # Ok::<(), gridview::GridError>(())
//! ```

pub mod dom;
pub mod error;
pub mod grid;
pub mod layout;
pub mod model;
pub mod types;
pub mod view;

pub use error::{GridError, Result};
pub use grid::{Grid, GridConfig};
pub use types::{Extent, PxBox, Space, Units};

//! Collaborator models: axis sizes, cell scroll position, and the data
//! source boundary.
//!
//! Models own their data and a dirty flag; the grid facade collects the
//! flags into the view layer's [`DirtyFlags`](crate::types::DirtyFlags)
//! at each tick. Models never touch the retained tree.

mod data;
mod scroll;
mod size;

pub use data::{DataModel, SimpleDataModel};
pub use scroll::ScrollModel;
pub use size::{SizeModel, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};

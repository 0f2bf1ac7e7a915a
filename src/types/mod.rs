//! Core data types shared across the engine.

mod descriptor;
mod dirty;
mod range;

pub use descriptor::RowColDescriptor;
pub use dirty::DirtyFlags;
pub use range::{Extent, PxBox, Space, Units};

//! Per-column pluggable cell builders.
//!
//! A column can be bound to a builder with two closures: `render`, called
//! once per visible row slot when the structure is built, and `update`,
//! called on every content draw with the rendered element and a fresh
//! context. Returning `None` from `update` drops the element for that row
//! and substitutes plain text.

use std::collections::HashMap;

use crate::dom::{Dom, NodeId};

/// Context passed to a builder's `update` closure.
///
/// The indices are scroll-adjusted model indices; `data` is fetched fresh
/// from the data model on every update, so builders must not cache it
/// across draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderContext {
    pub virtual_row: i64,
    pub virtual_col: i64,
    pub data: String,
}

type RenderFn = Box<dyn FnMut(&mut Dom) -> NodeId>;
type UpdateFn = Box<dyn FnMut(&mut Dom, Option<NodeId>, &BuilderContext) -> Option<NodeId>>;

/// Render/update closure pair bound to a column.
#[derive(Default)]
pub struct ColBuilder {
    render: Option<RenderFn>,
    update: Option<UpdateFn>,
}

impl ColBuilder {
    /// A builder with neither closure; every cell falls back to text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render closure.
    #[must_use]
    pub fn with_render(mut self, render: impl FnMut(&mut Dom) -> NodeId + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Set the update closure.
    #[must_use]
    pub fn with_update(
        mut self,
        update: impl FnMut(&mut Dom, Option<NodeId>, &BuilderContext) -> Option<NodeId> + 'static,
    ) -> Self {
        self.update = Some(Box::new(update));
        self
    }

    /// Invoke the render closure, if any.
    pub(crate) fn render(&mut self, dom: &mut Dom) -> Option<NodeId> {
        self.render.as_mut().map(|f| f(dom))
    }

    /// Invoke the update closure. `None` (from a missing closure or the
    /// closure itself) means "fall back to text for this row".
    pub(crate) fn update(
        &mut self,
        dom: &mut Dom,
        element: Option<NodeId>,
        context: &BuilderContext,
    ) -> Option<NodeId> {
        self.update.as_mut().and_then(|f| f(dom, element, context))
    }
}

/// Registry binding column descriptor indices to builders.
#[derive(Default)]
pub struct ColBuilderRegistry {
    builders: HashMap<usize, ColBuilder>,
    dirty: bool,
}

impl ColBuilderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or replace) the builder for a column and mark the registry
    /// dirty.
    pub fn set(&mut self, col: usize, builder: ColBuilder) {
        self.builders.insert(col, builder);
        self.dirty = true;
    }

    /// Unbind a column's builder. Unknown columns are a no-op.
    pub fn remove(&mut self, col: usize) {
        if self.builders.remove(&col).is_some() {
            self.dirty = true;
        }
    }

    /// Whether a column has a builder.
    #[must_use]
    pub fn has(&self, col: usize) -> bool {
        self.builders.contains_key(&col)
    }

    /// Mutable access for dispatch.
    pub(crate) fn get_mut(&mut self, col: usize) -> Option<&mut ColBuilder> {
        self.builders.get_mut(&col)
    }

    /// Bound column indices in ascending order.
    #[must_use]
    pub fn cols(&self) -> Vec<usize> {
        let mut cols: Vec<usize> = self.builders.keys().copied().collect();
        cols.sort_unstable();
        cols
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Whether a builder changed since the flag was last taken.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

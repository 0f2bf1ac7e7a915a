//! Overlay decorators and their positioning algorithm.
//!
//! A decorator anchors an overlay element to a cell or pixel range in one
//! of the three coordinate spaces. The view layer owns a bounding-box
//! node per live decorator and rewrites its pixel box whenever the
//! decorator (or anything its resolution depends on) changes. A decorator
//! whose resolved rectangle has no on-screen intersection collapses to a
//! zero-size box but stays in the tree.

use std::collections::BTreeMap;

use crate::dom::{Dom, NodeId};
use crate::layout::Viewport;
use crate::model::SizeModel;
use crate::types::{Extent, PxBox, Space, Units};

type RenderFn = Box<dyn FnMut(&mut Dom) -> NodeId>;

/// Handle to a registered decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecoratorId(usize);

/// A positioned overlay element anchored to a cell or pixel range.
///
/// Position fields are numbers reinterpreted under [`Units`]: cell index
/// counts for [`Units::Cell`], raw pixels for [`Units::Px`]. Setters mark
/// the decorator dirty so only it is repositioned on the next pass.
pub struct Decorator {
    row: f32,
    col: f32,
    height: Extent,
    width: Extent,
    units: Units,
    space: Space,
    render: Option<RenderFn>,
    bounding_box: Option<NodeId>,
    rendered: Option<NodeId>,
    dirty: bool,
    dead: bool,
}

impl Decorator {
    /// Create a decorator over the given range.
    #[must_use]
    pub fn new(
        row: f32,
        col: f32,
        height: Extent,
        width: Extent,
        units: Units,
        space: Space,
    ) -> Self {
        Self {
            row,
            col,
            height,
            width,
            units,
            space,
            render: None,
            bounding_box: None,
            rendered: None,
            dirty: true,
            dead: false,
        }
    }

    /// A 1×1 cell-units virtual-space decorator at the origin.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(
            0.0,
            0.0,
            Extent::Len(1.0),
            Extent::Len(1.0),
            Units::Cell,
            Space::Virtual,
        )
    }

    pub fn row(&self) -> f32 {
        self.row
    }

    pub fn col(&self) -> f32 {
        self.col
    }

    pub fn height(&self) -> Extent {
        self.height
    }

    pub fn width(&self) -> Extent {
        self.width
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn space(&self) -> Space {
        self.space
    }

    /// Move/resize the range.
    pub fn set_range(&mut self, row: f32, col: f32, height: Extent, width: Extent) {
        self.row = row;
        self.col = col;
        self.height = height;
        self.width = width;
        self.dirty = true;
    }

    /// Switch the unit system; position values are reinterpreted.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
        self.dirty = true;
    }

    /// Switch the coordinate space.
    pub fn set_space(&mut self, space: Space) {
        self.space = space;
        self.dirty = true;
    }

    /// Closure producing the overlay content node, invoked once when the
    /// bounding box is first created.
    pub fn set_render(&mut self, render: impl FnMut(&mut Dom) -> NodeId + 'static) {
        self.render = Some(Box::new(render));
        self.dirty = true;
    }

    /// The bounding-box node, once the decorator has been drawn.
    #[must_use]
    pub fn bounding_box(&self) -> Option<NodeId> {
        self.bounding_box
    }

    /// The rendered content node, if the render closure produced one.
    #[must_use]
    pub fn rendered(&self) -> Option<NodeId> {
        self.rendered
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn is_dead(&self) -> bool {
        self.dead
    }

    pub(crate) fn mark_dead(&mut self) {
        self.dead = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn take_render(&mut self) -> Option<RenderFn> {
        self.render.take()
    }

    pub(crate) fn attach(&mut self, bounding_box: NodeId, rendered: Option<NodeId>) {
        self.bounding_box = Some(bounding_box);
        self.rendered = rendered;
    }

    pub(crate) fn detach_nodes(&mut self) -> Option<NodeId> {
        self.rendered = None;
        self.bounding_box.take()
    }
}

/// Registry of decorators keyed by stable handles.
#[derive(Default)]
pub struct DecoratorRegistry {
    items: BTreeMap<DecoratorId, Decorator>,
    next: usize,
    dirty: bool,
}

impl DecoratorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decorator and mark the registry dirty.
    pub fn add(&mut self, decorator: Decorator) -> DecoratorId {
        let id = DecoratorId(self.next);
        self.next += 1;
        self.items.insert(id, decorator);
        self.dirty = true;
        id
    }

    /// Mark a decorator dead; it is destroyed and detached on the next
    /// pass. Unknown handles are a no-op.
    pub fn remove(&mut self, id: DecoratorId) {
        if let Some(decorator) = self.items.get_mut(&id) {
            decorator.mark_dead();
            self.dirty = true;
        }
    }

    /// Borrow a decorator.
    #[must_use]
    pub fn get(&self, id: DecoratorId) -> Option<&Decorator> {
        self.items.get(&id)
    }

    /// Mutate a decorator in place (its setters mark it dirty).
    pub fn update(&mut self, id: DecoratorId, f: impl FnOnce(&mut Decorator)) {
        if let Some(decorator) = self.items.get_mut(&id) {
            f(decorator);
        }
    }

    /// Live decorators.
    pub fn alive(&self) -> impl Iterator<Item = (DecoratorId, &Decorator)> {
        self.items
            .iter()
            .filter(|(_, d)| !d.is_dead())
            .map(|(id, d)| (*id, d))
    }

    /// Number of live decorators.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (DecoratorId, &mut Decorator)> {
        self.items.iter_mut().map(|(id, d)| (*id, d))
    }

    /// Drop dead decorators, returning their handles and bounding boxes
    /// for teardown.
    pub(crate) fn reap(&mut self) -> Vec<(DecoratorId, Option<NodeId>)> {
        let dead: Vec<DecoratorId> = self
            .items
            .iter()
            .filter(|(_, d)| d.is_dead())
            .map(|(id, _)| *id)
            .collect();
        dead.iter()
            .filter_map(|id| {
                self.items
                    .remove(id)
                    .map(|mut d| (*id, d.detach_nodes()))
            })
            .collect()
    }

    /// Read and clear the registry-level dirty flag. Per-decorator flags
    /// are cleared by the decorator pass itself.
    pub fn take_dirty(&mut self) -> bool {
        let item_dirty = self.items.values().any(Decorator::is_dirty);
        std::mem::take(&mut self.dirty) || item_dirty
    }
}

/// Resolve a decorator's bounding box against the current viewport and
/// models. Returns a zero-size box for invalid ranges or ranges with no
/// on-screen intersection.
pub(crate) fn resolve_box(
    decorator: &Decorator,
    viewport: &Viewport,
    rows: &SizeModel,
    cols: &SizeModel,
) -> PxBox {
    let vertical = resolve_axis(
        decorator.units,
        decorator.row,
        decorator.height,
        viewport.height(),
        |space, index| viewport.slot_of_row(space, index),
        |space, slot| viewport.slot_row_top_px(rows, space, slot),
        |space, slot, count| viewport.row_span_px(rows, space, slot, count),
        decorator.space,
    );
    let horizontal = resolve_axis(
        decorator.units,
        decorator.col,
        decorator.width,
        viewport.width(),
        |space, index| viewport.slot_of_col(space, index),
        |space, slot| viewport.slot_col_left_px(cols, space, slot),
        |space, slot, count| viewport.col_span_px(cols, space, slot, count),
        decorator.space,
    );
    let (Some((top, height)), Some((left, width))) = (vertical, horizontal) else {
        return PxBox::default();
    };
    let bounds = PxBox {
        top,
        left,
        width,
        height,
    };
    // No on-screen intersection collapses to the would-be origin.
    if bounds.top >= viewport.height()
        || bounds.left >= viewport.width()
        || bounds.top + bounds.height <= 0.0
        || bounds.left + bounds.width <= 0.0
        || bounds.width <= 0.0
        || bounds.height <= 0.0
    {
        return PxBox::collapsed(bounds.top, bounds.left);
    }
    bounds
}

/// Resolve one axis to (origin, extent) in pixels, or `None` when the
/// range is invalid on this axis.
#[allow(clippy::too_many_arguments)]
fn resolve_axis(
    units: Units,
    position: f32,
    extent: Extent,
    viewport_extent: f32,
    slot_of: impl Fn(Space, i64) -> i64,
    slot_px: impl Fn(Space, usize) -> f32,
    span_px: impl Fn(Space, usize, usize) -> f32,
    space: Space,
) -> Option<(f32, f32)> {
    match units {
        Units::Px => {
            let origin = position;
            let length = match extent {
                Extent::Len(v) => v,
                Extent::Unbounded => (viewport_extent - origin).max(0.0),
            };
            Some((origin, length))
        }
        Units::Cell => {
            let index = cell_index(position)?;
            let slot = slot_of(space, index);
            let slot = usize::try_from(slot).ok()?;
            let origin = slot_px(space, slot);
            let length = match extent {
                Extent::Len(v) => {
                    let count = cell_count(v)?;
                    // One pixel larger on the trailing edge so adjacent
                    // borders collapse.
                    span_px(space, slot, count) + 1.0
                }
                Extent::Unbounded => (viewport_extent - origin).max(0.0),
            };
            Some((origin, length))
        }
    }
}

/// Floor a stored position to a cell index; negative positions are
/// invalid.
fn cell_index(value: f32) -> Option<i64> {
    if value < 0.0 || !value.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let index = value.floor() as i64;
    Some(index)
}

/// Floor a stored extent to a cell count; non-positive counts are
/// invalid.
fn cell_count(value: f32) -> Option<usize> {
    if value < 1.0 || !value.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = value.floor() as usize;
    Some(count)
}

//! View layer: the draw-cycle orchestrator.
//!
//! Owns the retained subtree under the container and decides, from the
//! dirty-flag partition, which sub-steps of the draw pass must re-run:
//!
//! 1. viewport dirty → rebuild the cell grid structure and the column
//!    builder bindings, then fall through to 3–5;
//! 2. else builders dirty → rebuild builder bindings, then 3;
//! 3. content-relevant flags → revalue every visible cell;
//! 4. class-relevant flags → re-resolve and re-apply cell classes;
//! 5. decorator-relevant flags → reposition overlay bounding boxes and
//!    tear down dead decorators.
//!
//! Rebuilding the subtree is the expensive operation and happens only on
//! structural changes; the later passes revalue existing nodes.

pub mod cell_classes;
pub mod col_builders;
pub mod decorators;
pub mod events;
pub mod hidden_cols;
pub mod mouse;

use std::collections::HashMap;

use crate::dom::{Dom, Node, NodeId};
use crate::error::{GridError, Result};
use crate::layout::Viewport;
use crate::model::{DataModel, ScrollModel, SizeModel};
use crate::types::DirtyFlags;

use cell_classes::{resolve_slots, CellClassRegistry, SlotRect};
use col_builders::{BuilderContext, ColBuilderRegistry};
use decorators::{resolve_box, DecoratorRegistry};
use events::{EventLoop, GridEvent};

/// Class stamped on the cell container node.
pub const CELLS_CLASS: &str = "grid-cells";
/// Class stamped on the decorator container node.
pub const DECORATORS_CLASS: &str = "grid-decorators";
/// Class stamped on every row wrapper node.
pub const ROW_CLASS: &str = "grid-row";
/// Class stamped on every cell node.
pub const CELL_CLASS: &str = "grid-cell";
/// Class added to the cell container when the scroll row is odd, so
/// host-side stripe styling keeps its parity under scroll.
pub const ODDS_CLASS: &str = "odds";

/// Counters for each draw sub-step, used to verify dirty-flag
/// suppression (idempotence) without instrumenting the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub draws: u32,
    pub build_cells: u32,
    pub build_cols: u32,
    pub draw_cells: u32,
    pub draw_cell_classes: u32,
    pub draw_decorators: u32,
}

/// Everything a draw pass reads and writes, split-borrowed from the grid
/// facade.
pub(crate) struct DrawContext<'a> {
    pub dom: &'a mut Dom,
    pub rows: &'a SizeModel,
    pub cols: &'a SizeModel,
    pub scroll: &'a ScrollModel,
    pub data: &'a dyn DataModel,
    pub viewport: &'a mut Viewport,
    pub decorators: &'a mut DecoratorRegistry,
    pub cell_classes: &'a CellClassRegistry,
    pub col_builders: &'a mut ColBuilderRegistry,
    pub events: &'a mut EventLoop,
}

/// Draw-cycle orchestrator. One per grid instance.
#[derive(Default)]
pub struct ViewLayer {
    container: Option<NodeId>,
    cell_container: Option<NodeId>,
    decorator_container: Option<NodeId>,
    /// Cell nodes in row-major visible-slot order.
    cells: Vec<NodeId>,
    row_nodes: Vec<NodeId>,
    built_rows: usize,
    built_cols: usize,
    /// Rendered builder elements per bound column, one slot per view row.
    col_bindings: HashMap<usize, Vec<Option<NodeId>>>,
    pub(crate) flags: DirtyFlags,
    draw_requested: bool,
    destroyed: bool,
    stats: DrawStats,
}

impl ViewLayer {
    /// Create an unbuilt view layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The container node the grid was built into.
    #[must_use]
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// The cell container node.
    #[must_use]
    pub fn cell_container(&self) -> Option<NodeId> {
        self.cell_container
    }

    /// The decorator container node.
    #[must_use]
    pub fn decorator_container(&self) -> Option<NodeId> {
        self.decorator_container
    }

    /// The cell node at a visible slot, if built.
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<NodeId> {
        if col >= self.built_cols {
            return None;
        }
        self.cells.get(row * self.built_cols + col).copied()
    }

    /// Row wrapper node for a visible row slot.
    #[must_use]
    pub fn row_node(&self, row: usize) -> Option<NodeId> {
        self.row_nodes.get(row).copied()
    }

    /// Draw sub-step counters.
    #[must_use]
    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    /// Whether the view layer has been destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether a draw pass is scheduled.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.draw_requested
    }

    /// Build the grid structure into `container`, clearing anything
    /// already there. Schedules a full draw.
    pub fn build(&mut self, dom: &mut Dom, container: NodeId) -> Result<()> {
        if self.destroyed {
            return Err(GridError::Destroyed);
        }
        dom.remove_children(container);
        self.container = Some(container);

        let cell_container = dom.create_element("div");
        dom.add_class(cell_container, CELLS_CLASS);
        dom.update_style(cell_container, |style| {
            style.position = crate::dom::Position::Absolute;
            style.pinned = true;
            style.z_index = Some(0);
        });
        dom.append_child(container, cell_container);
        self.cell_container = Some(cell_container);

        let decorator_container = dom.create_element("div");
        dom.add_class(decorator_container, DECORATORS_CLASS);
        dom.update_style(decorator_container, |style| {
            style.position = crate::dom::Position::Absolute;
            style.pinned = true;
            style.z_index = Some(0);
            style.pointer_events = false;
        });
        dom.append_child(container, decorator_container);
        self.decorator_container = Some(decorator_container);

        self.cells.clear();
        self.row_nodes.clear();
        self.col_bindings.clear();
        self.built_rows = 0;
        self.built_cols = 0;
        self.flags.set_all();
        self.draw_requested = true;
        Ok(())
    }

    /// Schedule a draw pass. Multiple requests before the next tick
    /// coalesce into a single pass.
    pub fn request_draw(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(GridError::Destroyed);
        }
        self.draw_requested = true;
        Ok(())
    }

    /// Run the scheduled pass.
    pub(crate) fn draw_now(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        if self.destroyed {
            return Err(GridError::Destroyed);
        }
        self.draw_requested = false;

        if self.flags.viewport
            || self.flags.row_model
            || self.flags.col_model
            || self.flags.cell_scroll_model
        {
            ctx.viewport.refresh(ctx.rows, ctx.cols, ctx.scroll);
        }
        let counts_changed =
            ctx.viewport.rows() != self.built_rows || ctx.viewport.cols() != self.built_cols;

        if self.flags.viewport || counts_changed {
            self.build_cells(ctx);
            self.build_cols(ctx);
        } else if self.flags.col_builders {
            self.build_cols(ctx);
        }
        if self.flags.needs_cells() {
            self.draw_cells(ctx);
        }
        if self.flags.needs_cell_classes() {
            self.draw_cell_classes(ctx);
        }
        if self.flags.needs_decorators() {
            self.draw_decorators(ctx);
        }

        self.flags.clear();
        self.stats.draws += 1;
        ctx.events.fire(&GridEvent::Draw);
        Ok(())
    }

    /// Tear down the grid subtree. Fires a teardown notification per
    /// live decorator. Terminal: no further draws are permitted.
    pub fn destroy(
        &mut self,
        dom: &mut Dom,
        decorators: &mut DecoratorRegistry,
        events: &mut EventLoop,
    ) {
        if self.destroyed {
            return;
        }
        for (id, decorator) in decorators.iter_mut() {
            decorator.detach_nodes();
            events.fire(&GridEvent::DecoratorDestroy { decorator: id });
        }
        if let Some(container) = self.container {
            dom.remove_children(container);
        }
        self.cell_container = None;
        self.decorator_container = None;
        self.cells.clear();
        self.row_nodes.clear();
        self.col_bindings.clear();
        self.draw_requested = false;
        self.destroyed = true;
    }

    /// Rebuild the cell grid structure from scratch.
    fn build_cells(&mut self, ctx: &mut DrawContext<'_>) {
        self.stats.build_cells += 1;
        let Some(cell_container) = self.cell_container else {
            return;
        };
        ctx.dom.remove_children(cell_container);
        self.cells.clear();
        self.row_nodes.clear();

        let rows = ctx.viewport.rows();
        let cols = ctx.viewport.cols();
        for vr in 0..rows {
            let row_node = ctx.dom.create_element("div");
            ctx.dom.add_class(row_node, ROW_CLASS);
            let top = ctx.viewport.row_top(vr);
            let height = ctx.rows.visible_size(ctx.viewport.seq_of_virtual_row(vr)) + 1.0;
            ctx.dom.update_style(row_node, |style| {
                style.position = crate::dom::Position::Absolute;
                style.top = Some(top);
                style.left = Some(0.0);
                style.height = Some(height);
            });
            ctx.dom.append_child(cell_container, row_node);
            self.row_nodes.push(row_node);

            for vc in 0..cols {
                let cell = ctx.dom.create_element("div");
                ctx.dom.add_class(cell, CELL_CLASS);
                let left = ctx.viewport.col_left(vc);
                let width = ctx.cols.visible_size(ctx.viewport.seq_of_virtual_col(vc)) + 1.0;
                ctx.dom.update_style(cell, |style| {
                    style.position = crate::dom::Position::Absolute;
                    style.top = Some(0.0);
                    style.left = Some(left);
                    style.width = Some(width);
                    style.height = Some(height);
                });
                ctx.dom.append_child(row_node, cell);
                self.cells.push(cell);
            }
        }
        self.built_rows = rows;
        self.built_cols = cols;
    }

    /// Re-render column builder bindings: one element per view row for
    /// every bound column, visible or not, so scrolling a bound column
    /// into view finds its elements.
    fn build_cols(&mut self, ctx: &mut DrawContext<'_>) {
        self.stats.build_cols += 1;
        for (_, nodes) in self.col_bindings.drain() {
            for node in nodes.into_iter().flatten() {
                ctx.dom.remove(node);
            }
        }
        let rows = self.built_rows;
        for col in ctx.col_builders.cols() {
            let Some(builder) = ctx.col_builders.get_mut(col) else {
                continue;
            };
            let mut nodes = Vec::with_capacity(rows);
            for _ in 0..rows {
                nodes.push(builder.render(ctx.dom));
            }
            self.col_bindings.insert(col, nodes);
        }
    }

    /// Revalue every visible cell: geometry, content (builder or default
    /// text), and classes (the class computation shares the current slot
    /// mapping, which is how scroll moves virtual-space classes).
    fn draw_cells(&mut self, ctx: &mut DrawContext<'_>) {
        self.stats.draw_cells += 1;
        let Some(cell_container) = self.cell_container else {
            return;
        };
        if ctx.scroll.row() % 2 == 1 {
            ctx.dom.add_class(cell_container, ODDS_CLASS);
        } else {
            ctx.dom.remove_class(cell_container, ODDS_CLASS);
        }

        let class_rects = resolve_class_rects(ctx);
        let header_rows = ctx.rows.header_count();
        let header_cols = ctx.cols.header_count();

        for vr in 0..self.built_rows {
            let seq_r = ctx.viewport.seq_of_virtual_row(vr);
            let row_index = ctx.rows.visible_descriptor(seq_r).map_or(seq_r, |d| d.index);
            let row_height = ctx.rows.visible_size(seq_r) + 1.0;
            if let Some(row_node) = self.row_nodes.get(vr).copied() {
                let top = ctx.viewport.row_top(vr);
                ctx.dom.update_style(row_node, |style| {
                    style.top = Some(top);
                    style.height = Some(row_height);
                });
            }
            for vc in 0..self.built_cols {
                let Some(cell) = self.cell_at(vr, vc) else {
                    continue;
                };
                let seq_c = ctx.viewport.seq_of_virtual_col(vc);
                let col_index = ctx.cols.visible_descriptor(seq_c).map_or(seq_c, |d| d.index);
                let left = ctx.viewport.col_left(vc);
                let width = ctx.cols.visible_size(seq_c) + 1.0;
                ctx.dom.update_style(cell, |style| {
                    style.left = Some(left);
                    style.width = Some(width);
                    style.height = Some(row_height);
                });

                // Data lookups run in descriptor-index space: a hidden
                // column's data is skipped along with its slot.
                let model_row = to_i64(row_index);
                let model_col = to_i64(col_index);
                let value = ctx
                    .data
                    .get(model_row - to_i64(header_rows), model_col - to_i64(header_cols));

                let mut content = None;
                if let Some(builder) = ctx.col_builders.get_mut(col_index) {
                    let bound = self
                        .col_bindings
                        .get(&col_index)
                        .and_then(|nodes| nodes.get(vr))
                        .copied()
                        .flatten();
                    let builder_ctx = BuilderContext {
                        virtual_row: model_row,
                        virtual_col: model_col,
                        data: value.clone(),
                    };
                    content = builder.update(ctx.dom, bound, &builder_ctx);
                }
                set_cell_content(ctx.dom, cell, content, &value);
                let classes = cell_class_list(ctx, vr, vc, row_index, col_index, &class_rects);
                ctx.dom.set_classes(cell, classes);
            }
        }
    }

    /// Clear previously applied classes and re-apply every registered
    /// range against the current slot mapping.
    fn draw_cell_classes(&mut self, ctx: &mut DrawContext<'_>) {
        self.stats.draw_cell_classes += 1;
        let class_rects = resolve_class_rects(ctx);
        for vr in 0..self.built_rows {
            let seq_r = ctx.viewport.seq_of_virtual_row(vr);
            let row_index = ctx.rows.visible_descriptor(seq_r).map_or(seq_r, |d| d.index);
            for vc in 0..self.built_cols {
                let Some(cell) = self.cell_at(vr, vc) else {
                    continue;
                };
                let seq_c = ctx.viewport.seq_of_virtual_col(vc);
                let col_index = ctx.cols.visible_descriptor(seq_c).map_or(seq_c, |d| d.index);
                let classes = cell_class_list(ctx, vr, vc, row_index, col_index, &class_rects);
                ctx.dom.set_classes(cell, classes);
            }
        }
    }

    /// Reposition decorator bounding boxes and tear down dead ones.
    fn draw_decorators(&mut self, ctx: &mut DrawContext<'_>) {
        self.stats.draw_decorators += 1;
        for (id, bounding_box) in ctx.decorators.reap() {
            if let Some(node) = bounding_box {
                ctx.dom.remove(node);
            }
            ctx.events.fire(&GridEvent::DecoratorDestroy { decorator: id });
        }
        let Some(decorator_container) = self.decorator_container else {
            return;
        };
        let force = self.flags.forces_decorator_recompute();
        for (_, decorator) in ctx.decorators.iter_mut() {
            if decorator.bounding_box().is_none() {
                let bounding_box = ctx.dom.create_element("div");
                ctx.dom.update_style(bounding_box, |style| {
                    style.position = crate::dom::Position::Absolute;
                    style.pointer_events = false;
                });
                ctx.dom.append_child(decorator_container, bounding_box);
                let rendered = decorator.take_render().map(|mut render| {
                    let node = render(ctx.dom);
                    ctx.dom.append_child(bounding_box, node);
                    node
                });
                decorator.attach(bounding_box, rendered);
            }
            if force || decorator.is_dirty() {
                let bounds = resolve_box(decorator, ctx.viewport, ctx.rows, ctx.cols);
                if let Some(bounding_box) = decorator.bounding_box() {
                    ctx.dom.set_bounds(bounding_box, bounds);
                }
            }
            decorator.clear_dirty();
        }
    }
}

/// Resolve every class descriptor to its current slot rectangle.
fn resolve_class_rects(ctx: &DrawContext<'_>) -> Vec<(SlotRect, String)> {
    ctx.cell_classes
        .iter()
        .map(|descriptor| {
            (
                resolve_slots(descriptor, ctx.viewport),
                descriptor.class.clone(),
            )
        })
        .collect()
}

/// Structural classes plus every matching registered range.
fn cell_class_list(
    ctx: &DrawContext<'_>,
    vr: usize,
    vc: usize,
    row_index: usize,
    col_index: usize,
    class_rects: &[(SlotRect, String)],
) -> Vec<String> {
    let mut classes: Vec<String> = vec![CELL_CLASS.to_owned()];
    let header_row = row_index < ctx.rows.header_count();
    let header_col = col_index < ctx.cols.header_count();
    if header_row || header_col {
        classes.push("grid-header".to_owned());
    }
    if header_row {
        classes.push("grid-col-header".to_owned());
    }
    if header_col {
        classes.push("grid-row-header".to_owned());
    }
    let fixed_rows = ctx.viewport.fixed_rows();
    if fixed_rows > 0 && vr == fixed_rows - 1 {
        classes.push("grid-last-fixed-row".to_owned());
    }
    let fixed_cols = ctx.viewport.fixed_cols();
    if fixed_cols > 0 && vc == fixed_cols - 1 {
        classes.push("grid-last-fixed-col".to_owned());
    }
    for (rect, class) in class_rects {
        if rect.contains(vr, vc) && !classes.iter().any(|c| c == class) {
            classes.push(class.clone());
        }
    }
    classes
}

/// Swap a cell's content: throwaway text children are freed, element
/// children (builder-rendered) are only detached so a later draw can
/// re-attach them.
fn set_cell_content(dom: &mut Dom, cell: NodeId, content: Option<NodeId>, text: &str) {
    for child in dom.detach_children(cell) {
        if dom.node(child).is_some_and(Node::is_text) {
            dom.remove(child);
        }
    }
    match content {
        Some(node) => dom.append_child(cell, node),
        None => {
            let text_node = dom.create_text(text);
            dom.append_child(cell, text_node);
        }
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

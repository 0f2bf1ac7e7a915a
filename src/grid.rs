//! Grid facade: wires the models, viewport, registries, and view layer
//! together and drives the coalesced draw scheduling.
//!
//! Mutation happens synchronously through the facade (or the models'
//! own APIs); the actual pass runs at the next [`Grid::tick`], which is
//! the host's scheduler boundary — bursts of mutation coalesce into one
//! tree write.

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, NodeId};
use crate::error::{GridError, Result};
use crate::layout::Viewport;
use crate::model::{DataModel, ScrollModel, SimpleDataModel, SizeModel};
use crate::model::{DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
use crate::types::RowColDescriptor;
use crate::view::cell_classes::CellClassRegistry;
use crate::view::col_builders::ColBuilderRegistry;
use crate::view::decorators::DecoratorRegistry;
use crate::view::events::{ChangeAction, EventLoop, GridEvent};
use crate::view::hidden_cols::HiddenColToggles;
use crate::view::mouse::{CellMouseModel, GridMouseEvent, MouseInput};
use crate::view::{DrawContext, DrawStats, ViewLayer};

/// Construction parameters for a grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Row descriptor count (headers included).
    pub rows: usize,
    /// Column descriptor count (headers included).
    pub cols: usize,
    /// Default row height in pixels.
    pub row_height: f32,
    /// Default column width in pixels.
    pub col_width: f32,
    /// Per-row height overrides, cycled over the rows. Empty = uniform.
    #[serde(default)]
    pub row_heights: Vec<f32>,
    /// Per-column width overrides, cycled over the columns.
    #[serde(default)]
    pub col_widths: Vec<f32>,
    /// Leading fixed rows (headers are implicitly fixed).
    #[serde(default)]
    pub fixed_rows: usize,
    /// Leading fixed columns.
    #[serde(default)]
    pub fixed_cols: usize,
    /// Leading header rows.
    #[serde(default)]
    pub header_rows: usize,
    /// Leading header columns.
    #[serde(default)]
    pub header_cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            row_height: DEFAULT_ROW_HEIGHT,
            col_width: DEFAULT_COL_WIDTH,
            row_heights: Vec::new(),
            col_widths: Vec::new(),
            fixed_rows: 0,
            fixed_cols: 0,
            header_rows: 0,
            header_cols: 0,
        }
    }
}

/// The assembled grid.
pub struct Grid<D: DataModel = SimpleDataModel> {
    dom: Dom,
    container: Option<NodeId>,
    rows: SizeModel,
    cols: SizeModel,
    scroll: ScrollModel,
    data: D,
    data_dirty: bool,
    viewport: Viewport,
    decorators: DecoratorRegistry,
    cell_classes: CellClassRegistry,
    col_builders: ColBuilderRegistry,
    events: EventLoop,
    mouse: CellMouseModel,
    hidden_toggles: Option<HiddenColToggles>,
    view: ViewLayer,
}

impl Grid<SimpleDataModel> {
    /// A `rows` × `cols` grid over generated data, default sizes, no
    /// fixed panes or headers.
    #[must_use]
    pub fn simple(rows: usize, cols: usize) -> Self {
        Self::with_config(&GridConfig {
            rows,
            cols,
            ..GridConfig::default()
        })
    }

    /// A grid over generated data matching `config`.
    #[must_use]
    pub fn with_config(config: &GridConfig) -> Self {
        let data = SimpleDataModel::with_headers(
            config.rows.saturating_sub(config.header_rows),
            config.cols.saturating_sub(config.header_cols),
            config.header_rows,
            config.header_cols,
        );
        Self::with_data(config, data)
    }
}

impl<D: DataModel> Grid<D> {
    /// A grid over a caller-supplied data model.
    pub fn with_data(config: &GridConfig, data: D) -> Self {
        let rows = build_axis(
            config.rows,
            config.row_height,
            &config.row_heights,
            config.fixed_rows,
            config.header_rows,
        );
        let cols = build_axis(
            config.cols,
            config.col_width,
            &config.col_widths,
            config.fixed_cols,
            config.header_cols,
        );
        Self {
            dom: Dom::new(),
            container: None,
            rows,
            cols,
            scroll: ScrollModel::new(),
            data,
            data_dirty: false,
            viewport: Viewport::new(),
            decorators: DecoratorRegistry::new(),
            cell_classes: CellClassRegistry::new(),
            col_builders: ColBuilderRegistry::new(),
            events: EventLoop::new(),
            mouse: CellMouseModel::new(),
            hidden_toggles: None,
            view: ViewLayer::new(),
        }
    }

    /// Create the container node at the given pixel size and build the
    /// grid structure into it.
    pub fn build(&mut self, width: f32, height: f32) -> Result<NodeId> {
        let container = self.dom.create_element("div");
        self.dom.add_class(container, "grid-container");
        self.dom.update_style(container, |style| {
            style.width = Some(width);
            style.height = Some(height);
        });
        self.container = Some(container);
        self.viewport.size_to_container(&self.dom, container);
        self.view.build(&mut self.dom, container)?;
        Ok(container)
    }

    /// Schedule a draw pass; coalesces with any already pending.
    pub fn draw(&mut self) -> Result<()> {
        self.view.request_draw()
    }

    /// Collect collaborator dirty flags and run the pass if anything is
    /// scheduled or dirty. Returns whether a pass ran.
    pub fn tick(&mut self) -> Result<bool> {
        if self.view.is_destroyed() {
            return Err(GridError::Destroyed);
        }
        self.view.flags.viewport |= self.viewport.take_dirty();
        self.view.flags.row_model |= self.rows.take_dirty();
        self.view.flags.col_model |= self.cols.take_dirty();
        self.view.flags.cell_scroll_model |= self.scroll.take_dirty();
        self.view.flags.data_model |= std::mem::take(&mut self.data_dirty);
        self.view.flags.col_builders |= self.col_builders.take_dirty();
        self.view.flags.decorators |= self.decorators.take_dirty();
        self.view.flags.cell_classes |= self.cell_classes.take_dirty();

        if !self.view.pending() && !self.view.flags.any() {
            return Ok(false);
        }
        let mut ctx = DrawContext {
            dom: &mut self.dom,
            rows: &self.rows,
            cols: &self.cols,
            scroll: &self.scroll,
            data: &self.data,
            viewport: &mut self.viewport,
            decorators: &mut self.decorators,
            cell_classes: &self.cell_classes,
            col_builders: &mut self.col_builders,
            events: &mut self.events,
        };
        self.view.draw_now(&mut ctx)?;
        Ok(true)
    }

    /// Tear down the grid subtree and suppress any pending draw.
    /// Idempotent; later draws error with [`GridError::Destroyed`].
    pub fn destroy(&mut self) {
        if self.view.is_destroyed() {
            return;
        }
        self.view
            .destroy(&mut self.dom, &mut self.decorators, &mut self.events);
        self.events.fire(&GridEvent::Destroy);
    }

    /// Scroll to an absolute cell position.
    pub fn scroll_to(&mut self, row: usize, col: usize) {
        self.scroll.scroll_to(row, col);
    }

    // ------------------------------------------------------------------
    // Collaborator access
    // ------------------------------------------------------------------

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport access (host-driven resizes mark it dirty).
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn rows(&self) -> &SizeModel {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut SizeModel {
        &mut self.rows
    }

    pub fn cols(&self) -> &SizeModel {
        &self.cols
    }

    pub fn cols_mut(&mut self) -> &mut SizeModel {
        &mut self.cols
    }

    pub fn scroll(&self) -> &ScrollModel {
        &self.scroll
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    /// Mutable data access; marks the data model dirty.
    pub fn data_mut(&mut self) -> &mut D {
        self.data_dirty = true;
        &mut self.data
    }

    pub fn decorators(&self) -> &DecoratorRegistry {
        &self.decorators
    }

    pub fn decorators_mut(&mut self) -> &mut DecoratorRegistry {
        &mut self.decorators
    }

    pub fn cell_classes(&self) -> &CellClassRegistry {
        &self.cell_classes
    }

    pub fn cell_classes_mut(&mut self) -> &mut CellClassRegistry {
        &mut self.cell_classes
    }

    pub fn col_builders(&self) -> &ColBuilderRegistry {
        &self.col_builders
    }

    pub fn col_builders_mut(&mut self) -> &mut ColBuilderRegistry {
        &mut self.col_builders
    }

    pub fn events_mut(&mut self) -> &mut EventLoop {
        &mut self.events
    }

    pub fn view(&self) -> &ViewLayer {
        &self.view
    }

    /// Draw sub-step counters.
    pub fn stats(&self) -> DrawStats {
        self.view.stats()
    }

    // ------------------------------------------------------------------
    // Model change operations (fire change notifications)
    // ------------------------------------------------------------------

    /// Append a row descriptor and notify subscribers.
    pub fn add_row(&mut self, descriptor: RowColDescriptor) {
        let index = self.rows.len();
        self.rows.add(descriptor);
        self.events.fire(&GridEvent::RowChange {
            action: ChangeAction::Add,
            indices: vec![index],
        });
    }

    /// Append a column descriptor and notify subscribers.
    pub fn add_col(&mut self, descriptor: RowColDescriptor) {
        let index = self.cols.len();
        let hidden = descriptor.hidden;
        self.cols.add(descriptor);
        if hidden {
            if let Some(toggles) = self.hidden_toggles.as_mut() {
                toggles.sync(index, true, &self.cols, &mut self.decorators);
            }
        }
        self.events.fire(&GridEvent::ColChange {
            action: ChangeAction::Add,
            indices: vec![index],
        });
    }

    /// Hide or show a row and notify subscribers.
    pub fn set_row_hidden(&mut self, row: usize, hidden: bool) {
        self.rows.set_hidden(row, hidden);
        let action = if hidden {
            ChangeAction::Hide
        } else {
            ChangeAction::Show
        };
        self.events.fire(&GridEvent::RowChange {
            action,
            indices: vec![row],
        });
    }

    /// Hide or show a column, keep reveal affordances in sync, and
    /// notify subscribers.
    pub fn set_col_hidden(&mut self, col: usize, hidden: bool) {
        self.cols.set_hidden(col, hidden);
        if let Some(toggles) = self.hidden_toggles.as_mut() {
            toggles.sync(col, hidden, &self.cols, &mut self.decorators);
        }
        let action = if hidden {
            ChangeAction::Hide
        } else {
            ChangeAction::Show
        };
        self.events.fire(&GridEvent::ColChange {
            action,
            indices: vec![col],
        });
    }

    /// Track hidden columns with reveal-affordance decorators. Columns
    /// already hidden get affordances immediately.
    pub fn enable_hidden_col_toggles(&mut self) {
        if self.hidden_toggles.is_some() {
            return;
        }
        let mut toggles = HiddenColToggles::new();
        for index in 0..self.cols.len() {
            if self.cols.get(index).is_some_and(|d| d.hidden) {
                toggles.sync(index, true, &self.cols, &mut self.decorators);
            }
        }
        self.hidden_toggles = Some(toggles);
    }

    pub fn hidden_col_toggles(&self) -> Option<&HiddenColToggles> {
        self.hidden_toggles.as_ref()
    }

    /// Show the contiguous run of hidden columns immediately before
    /// `col`, innermost first. Returns the indices shown.
    pub fn show_cols_before(&mut self, col: usize) -> Vec<usize> {
        let mut shown = Vec::new();
        let mut col = col;
        while col > 0 && self.cols.get(col - 1).is_some_and(|d| d.hidden) {
            col -= 1;
            self.cols.set_hidden(col, false);
            if let Some(toggles) = self.hidden_toggles.as_mut() {
                toggles.sync(col, false, &self.cols, &mut self.decorators);
            }
            shown.push(col);
        }
        if !shown.is_empty() {
            self.events.fire(&GridEvent::ColChange {
                action: ChangeAction::Show,
                indices: shown.clone(),
            });
        }
        shown
    }

    /// Annotate raw pointer input with grid coordinates and advance the
    /// drag state machine, firing synthesized drag events.
    pub fn dispatch_mouse(&mut self, input: MouseInput) -> GridMouseEvent {
        let event = self.mouse.annotate(&self.viewport, &input);
        self.mouse.handle(&event, &mut self.events);
        event
    }
}

/// Build one axis model from config.
fn build_axis(
    count: usize,
    default_size: f32,
    overrides: &[f32],
    fixed: usize,
    headers: usize,
) -> SizeModel {
    let mut model = SizeModel::with_count(count, default_size);
    if !overrides.is_empty() {
        for index in 0..count {
            let size = overrides.get(index % overrides.len()).copied();
            model.set_size(index, size);
        }
    }
    // Headers never scroll, so they count toward the fixed pane.
    let fixed = fixed.max(headers).min(count);
    for index in 0..fixed {
        model.set_fixed(index, true);
    }
    model.set_header_count(headers.min(count));
    let _ = model.take_dirty();
    model
}

//! Pointer translation and drag synthesis.
//!
//! The cell mouse model consumes exactly one interface from the core: the
//! viewport's coordinate mapper. It annotates raw pointer input with grid
//! coordinates and synthesizes drag events from down/move/up sequences:
//! `DragStart` once on the first move, `Drag` on every move, `CellDrag`
//! only when the pointer crosses into a different cell, `DragEnd` on
//! release.

use crate::layout::Viewport;
use crate::view::events::{EventLoop, GridEvent};

/// Raw pointer input kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Move,
    Up,
    Click,
}

/// Raw pointer input in host-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub kind: MouseKind,
    pub x: f32,
    pub y: f32,
}

/// Pointer input annotated with grid coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMouseEvent {
    pub kind: MouseKind,
    /// Grid-relative pixel position.
    pub grid_x: f32,
    pub grid_y: f32,
    /// Containing virtual slot (clamped to the visible window).
    pub row: usize,
    pub col: usize,
    /// Whether the press preceding this event turned into a drag. Only
    /// meaningful on `Click`.
    pub was_dragged: bool,
}

#[derive(Debug, Clone, Copy)]
struct DragTracker {
    last_row: usize,
    last_col: usize,
    started: bool,
}

/// Drag-state machine over annotated pointer events.
#[derive(Debug, Default)]
pub struct CellMouseModel {
    drag: Option<DragTracker>,
    was_dragged: bool,
}

impl CellMouseModel {
    /// Create an idle model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotate raw input with grid coordinates through the mapper.
    #[must_use]
    pub fn annotate(&self, viewport: &Viewport, input: &MouseInput) -> GridMouseEvent {
        let grid_x = viewport.to_grid_x(input.x);
        let grid_y = viewport.to_grid_y(input.y);
        GridMouseEvent {
            kind: input.kind,
            grid_x,
            grid_y,
            row: viewport.virtual_row_by_top(grid_y),
            col: viewport.virtual_col_by_left(grid_x),
            was_dragged: self.was_dragged,
        }
    }

    /// Advance the drag state machine, firing synthesized events.
    pub fn handle(&mut self, event: &GridMouseEvent, events: &mut EventLoop) {
        match event.kind {
            MouseKind::Down => {
                self.was_dragged = false;
                self.drag = Some(DragTracker {
                    last_row: event.row,
                    last_col: event.col,
                    started: false,
                });
            }
            MouseKind::Move => {
                let Some(mut tracker) = self.drag else {
                    return;
                };
                if !tracker.started {
                    tracker.started = true;
                    self.was_dragged = true;
                    events.fire(&GridEvent::DragStart(event.clone()));
                }
                events.fire(&GridEvent::Drag(event.clone()));
                if event.row != tracker.last_row || event.col != tracker.last_col {
                    events.fire(&GridEvent::CellDrag(event.clone()));
                    tracker.last_row = event.row;
                    tracker.last_col = event.col;
                }
                self.drag = Some(tracker);
            }
            MouseKind::Up => {
                if self.drag.take().is_some() {
                    events.fire(&GridEvent::DragEnd(event.clone()));
                }
            }
            MouseKind::Click => {}
        }
    }
}

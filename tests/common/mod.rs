//! Common test utilities and assertion helpers.
//!
//! Builds grids against a fixed 800×500 container and provides node
//! query helpers over the retained tree.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::dom::NodeId;
use gridview::types::PxBox;
use gridview::view::decorators::DecoratorId;
use gridview::{Grid, GridConfig};

pub const CONTAINER_WIDTH: f32 = 800.0;
pub const CONTAINER_HEIGHT: f32 = 500.0;

/// Build a default 100×10 grid into the standard container.
pub fn simple_grid() -> Grid {
    grid_with(&GridConfig {
        rows: 100,
        cols: 10,
        ..GridConfig::default()
    })
}

/// Build a grid from config into the standard container.
pub fn grid_with(config: &GridConfig) -> Grid {
    let mut grid = Grid::with_config(config);
    grid.build(CONTAINER_WIDTH, CONTAINER_HEIGHT)
        .expect("build grid");
    grid
}

/// Config with varied (cycled) sizes, the standard fixture shape.
pub fn varied_config(row_heights: &[f32], col_widths: &[f32]) -> GridConfig {
    GridConfig {
        rows: 100,
        cols: 10,
        row_heights: row_heights.to_vec(),
        col_widths: col_widths.to_vec(),
        ..GridConfig::default()
    }
}

/// Run the scheduled/dirty draw pass (the host tick boundary).
pub fn tick(grid: &mut Grid) {
    grid.tick().expect("tick");
}

/// Schedule a draw and run it.
pub fn draw(grid: &mut Grid) {
    grid.draw().expect("draw");
    tick(grid);
}

/// The cell node at a visible slot.
pub fn cell(grid: &Grid, row: usize, col: usize) -> NodeId {
    grid.view()
        .cell_at(row, col)
        .unwrap_or_else(|| panic!("no cell at ({row}, {col})"))
}

/// Rendered text of the cell at a visible slot.
pub fn cell_text(grid: &Grid, row: usize, col: usize) -> String {
    grid.dom().deep_text(cell(grid, row, col))
}

/// Whether the cell at a visible slot carries a class.
pub fn cell_has_class(grid: &Grid, row: usize, col: usize, class: &str) -> bool {
    grid.dom().has_class(cell(grid, row, col), class)
}

/// (top, left, width, height) of a cell; the row wrapper carries the
/// vertical position, the cell the horizontal.
pub fn cell_box(grid: &Grid, row: usize, col: usize) -> PxBox {
    let row_node = grid.view().row_node(row).expect("row node");
    let row_style = &grid.dom().node(row_node).expect("row").style;
    let style = &grid.dom().node(cell(grid, row, col)).expect("cell").style;
    PxBox {
        top: row_style.top.unwrap_or(0.0),
        left: style.left.unwrap_or(0.0),
        width: style.width.unwrap_or(0.0),
        height: style.height.unwrap_or(0.0),
    }
}

/// Count cell nodes actually attached under the cell container.
pub fn attached_cell_count(grid: &Grid) -> usize {
    let cells = grid.view().cell_container().expect("cell container");
    let dom = grid.dom();
    dom.node(cells)
        .expect("cell container node")
        .children()
        .iter()
        .map(|row| dom.node(*row).map_or(0, |n| n.children().len()))
        .sum()
}

/// Count row wrapper nodes attached under the cell container.
pub fn attached_row_count(grid: &Grid) -> usize {
    let cells = grid.view().cell_container().expect("cell container");
    grid.dom().child_count(cells)
}

/// Pixel box written to a decorator's bounding box node.
pub fn decorator_box(grid: &Grid, id: DecoratorId) -> PxBox {
    let decorator = grid.decorators().get(id).expect("decorator");
    let node = decorator.bounding_box().expect("bounding box");
    let style = &grid.dom().node(node).expect("bounding box node").style;
    PxBox {
        top: style.top.unwrap_or(0.0),
        left: style.left.unwrap_or(0.0),
        width: style.width.unwrap_or(0.0),
        height: style.height.unwrap_or(0.0),
    }
}

/// Assert the class appears on exactly the cells inside
/// `[top, top+height) × [left, left+width)` and nowhere else.
pub fn expect_only_range_has_class(
    grid: &Grid,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
    class: &str,
) {
    for row in 0..grid.viewport().rows() {
        for col in 0..grid.viewport().cols() {
            let inside = row >= top && row < top + height && col >= left && col < left + width;
            assert_eq!(
                cell_has_class(grid, row, col, class),
                inside,
                "class `{class}` at ({row}, {col}): expected inside={inside}"
            );
        }
    }
}

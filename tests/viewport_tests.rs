//! Viewport windowing and coordinate mapper integration tests.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use gridview::GridConfig;
use test_case::test_case;

#[test]
fn test_window_counts_for_standard_container() {
    let mut grid = simple_grid();
    draw(&mut grid);
    // 500px / 30px rows -> 16 full + 1 partial; 800px / 100px cols -> 8.
    assert_eq!(grid.viewport().rows(), 17);
    assert_eq!(grid.viewport().cols(), 8);
}

#[test]
fn test_resize_recomputes_counts() {
    let mut grid = simple_grid();
    draw(&mut grid);
    grid.viewport_mut().set_height(90.0);
    tick(&mut grid);
    assert_eq!(grid.viewport().rows(), 3);
}

#[test_case(0.0, 0; "top edge")]
#[test_case(29.0, 0; "inside first row")]
#[test_case(30.0, 1; "second row boundary")]
#[test_case(-5.0, 0; "clamps above")]
#[test_case(9_999.0, 16; "clamps below")]
fn test_virtual_row_by_top(y: f32, expected: usize) {
    let mut grid = simple_grid();
    draw(&mut grid);
    assert_eq!(grid.viewport().virtual_row_by_top(y), expected);
}

#[test]
fn test_pointer_pipeline_maps_into_scrolled_cells() {
    let mut grid = simple_grid();
    grid.scroll_to(5, 6);
    tick(&mut grid);
    // The mapper works in visible-slot space; the content of slot (1, 1)
    // is the scrolled cell (6, 7).
    let y = grid.viewport().to_grid_y(45.0);
    let x = grid.viewport().to_grid_x(150.0);
    let row = grid.viewport().virtual_row_by_top(y);
    let col = grid.viewport().virtual_col_by_left(x);
    assert_eq!((row, col), (1, 1));
    assert_eq!(cell_text(&grid, row, col), "r6 c7");
}

#[test]
fn test_snapshot_reflects_window_state() {
    let mut grid = grid_with(&GridConfig {
        rows: 100,
        cols: 10,
        fixed_rows: 1,
        ..GridConfig::default()
    });
    grid.scroll_to(3, 2);
    tick(&mut grid);
    let snapshot = grid.viewport().snapshot();
    assert_eq!(snapshot.scroll_row, 3);
    assert_eq!(snapshot.scroll_col, 2);
    assert_eq!(snapshot.fixed_rows, 1);
    assert_eq!(snapshot.width, CONTAINER_WIDTH);
    assert_eq!(snapshot.height, CONTAINER_HEIGHT);
    assert_eq!(snapshot.row_offsets.len(), snapshot.rows);
    assert_eq!(snapshot.row_offsets[0], 0.0);
    assert_eq!(snapshot.row_offsets[1], 30.0);
}

#[test]
fn test_offsets_are_monotonically_non_decreasing() {
    let mut grid = grid_with(&varied_config(&[20.0, 30.0, 40.0], &[99.0, 100.0, 101.0]));
    grid.scroll_to(2, 1);
    tick(&mut grid);
    let snapshot = grid.viewport().snapshot();
    for pair in snapshot.row_offsets.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    for pair in snapshot.col_offsets.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn test_adding_rows_extends_a_short_window() {
    let mut grid = grid_with(&GridConfig {
        rows: 3,
        cols: 10,
        ..GridConfig::default()
    });
    draw(&mut grid);
    assert_eq!(grid.viewport().rows(), 3);
    for _ in 0..5 {
        grid.rows_mut().add(gridview::types::RowColDescriptor::new());
    }
    tick(&mut grid);
    assert_eq!(grid.viewport().rows(), 8);
    assert_eq!(cell_text(&grid, 7, 0), "r7 c0");
}

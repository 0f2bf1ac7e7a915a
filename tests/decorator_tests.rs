//! Decorator lifecycle and positioning tests across the space × unit
//! matrix.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::*;
use gridview::view::decorators::Decorator;
use gridview::view::events::GridEvent;
use gridview::{Extent, GridConfig, Space, Units};
use test_case::test_case;

fn cell_decorator(row: f32, col: f32, height: f32, width: f32) -> Decorator {
    Decorator::new(
        row,
        col,
        Extent::Len(height),
        Extent::Len(width),
        Units::Cell,
        Space::Virtual,
    )
}

#[test]
fn test_draws_only_when_dirty() {
    let mut grid = simple_grid();
    draw(&mut grid);
    let before = grid.stats();
    grid.decorators_mut().add(cell_decorator(0.0, 0.0, 1.0, 1.0));
    tick(&mut grid);
    assert_eq!(grid.stats().draw_decorators, before.draw_decorators + 1);

    let before = grid.stats();
    draw(&mut grid);
    assert_eq!(grid.stats().draw_decorators, before.draw_decorators);
}

#[test]
fn test_renders_into_bounding_box_without_pointer_events() {
    let mut grid = simple_grid();
    let id = {
        let mut decorator = cell_decorator(0.0, 0.0, 1.0, 1.0);
        decorator.set_render(|dom| dom.create_element("div"));
        grid.decorators_mut().add(decorator)
    };
    draw(&mut grid);

    let decorator = grid.decorators().get(id).unwrap();
    let bounding_box = decorator.bounding_box().unwrap();
    let rendered = decorator.rendered().unwrap();
    assert_eq!(grid.dom().node(rendered).unwrap().parent(), Some(bounding_box));
    assert_eq!(
        grid.dom().node(bounding_box).unwrap().parent(),
        grid.view().decorator_container()
    );
    assert!(!grid.dom().node(bounding_box).unwrap().style.pointer_events);
}

#[test]
fn test_destroy_fires_teardown_and_detaches() {
    let mut grid = simple_grid();
    let id = grid.decorators_mut().add(cell_decorator(0.0, 0.0, 1.0, 1.0));
    draw(&mut grid);

    let seen = Rc::new(Cell::new(false));
    {
        let seen = Rc::clone(&seen);
        grid.events_mut().bind(move |event| {
            if matches!(event, GridEvent::DecoratorDestroy { .. }) {
                seen.set(true);
            }
        });
    }
    grid.destroy();
    assert!(seen.get());
    assert!(grid.decorators().get(id).unwrap().bounding_box().is_none());
}

#[test]
fn test_dead_decorators_destroyed_on_next_draw() {
    let mut grid = simple_grid();
    let id = grid.decorators_mut().add(cell_decorator(0.0, 0.0, 1.0, 1.0));
    draw(&mut grid);
    let bounding_box = grid.decorators().get(id).unwrap().bounding_box().unwrap();

    let seen = Rc::new(Cell::new(false));
    {
        let seen = Rc::clone(&seen);
        grid.events_mut().bind(move |event| {
            if matches!(event, GridEvent::DecoratorDestroy { .. }) {
                seen.set(true);
            }
        });
    }
    grid.decorators_mut().remove(id);
    tick(&mut grid);
    assert!(seen.get());
    assert!(grid.dom().node(bounding_box).is_none());
    assert!(grid.decorators().get(id).is_none());
    assert_eq!(grid.decorators().alive_count(), 0);
}

#[test]
fn test_positions_virtual_cell_range() {
    let mut grid = simple_grid();
    let id = grid.decorators_mut().add(cell_decorator(5.0, 6.0, 3.0, 3.0));
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    // The extra pixel overlaps the borders.
    assert_eq!(bounds.top, 5.0 * 30.0);
    assert_eq!(bounds.left, 6.0 * 100.0);
    assert_eq!(bounds.height, 3.0 * 30.0 + 1.0);
    assert_eq!(bounds.width, 3.0 * 100.0 + 1.0);
}

#[test]
fn test_positions_data_cell_range_offset_by_headers() {
    let mut grid = grid_with(&GridConfig {
        rows: 100,
        cols: 10,
        header_rows: 1,
        header_cols: 1,
        ..GridConfig::default()
    });
    let id = {
        let mut decorator = cell_decorator(5.0, 6.0, 3.0, 3.0);
        decorator.set_space(Space::Data);
        grid.decorators_mut().add(decorator)
    };
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!(bounds.top, 6.0 * 30.0);
    assert_eq!(bounds.left, 7.0 * 100.0);
    assert_eq!(bounds.height, 3.0 * 30.0 + 1.0);
    assert_eq!(bounds.width, 3.0 * 100.0 + 1.0);
}

#[test]
fn test_virtual_range_scrolled_out_of_view_collapses() {
    let mut grid = simple_grid();
    grid.scroll_to(2, 2);
    let id = grid.decorators_mut().add(cell_decorator(1.0, 1.0, 1.0, 1.0));
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!(bounds.width, 0.0);
    assert_eq!(bounds.height, 0.0);
}

#[test]
fn test_invalid_range_collapses() {
    let mut grid = simple_grid();
    let id = grid
        .decorators_mut()
        .add(cell_decorator(-1.0, -1.0, -1.0, -1.0));
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!(bounds.width, 0.0);
    assert_eq!(bounds.height, 0.0);
}

#[test]
fn test_real_cell_range_is_scroll_invariant() {
    let mut grid = simple_grid();
    let id = {
        let mut decorator = cell_decorator(5.0, 6.0, 3.0, 3.0);
        decorator.set_space(Space::Real);
        grid.decorators_mut().add(decorator)
    };
    grid.scroll_to(1, 1);
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!(bounds.top, 5.0 * 30.0);
    assert_eq!(bounds.left, 6.0 * 100.0);
    assert_eq!(bounds.height, 3.0 * 30.0 + 1.0);
    assert_eq!(bounds.width, 3.0 * 100.0 + 1.0);

    grid.scroll_to(3, 2);
    tick(&mut grid);
    assert_eq!(decorator_box(&grid, id), bounds, "scroll must not move it");
}

#[test]
fn test_real_pixel_range_used_directly() {
    let mut grid = simple_grid();
    let id = grid.decorators_mut().add(Decorator::new(
        5.0,
        6.0,
        Extent::Len(2.0),
        Extent::Len(4.0),
        Units::Px,
        Space::Real,
    ));
    grid.scroll_to(1, 1);
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!((bounds.top, bounds.left), (5.0, 6.0));
    assert_eq!((bounds.height, bounds.width), (2.0, 4.0));
}

#[test]
fn test_repositions_when_range_changes() {
    let mut grid = simple_grid();
    let id = {
        let mut decorator = cell_decorator(5.0, 6.0, 2.0, 3.0);
        decorator.set_units(Units::Px);
        decorator.set_space(Space::Real);
        grid.decorators_mut().add(decorator)
    };
    draw(&mut grid);
    assert_eq!(decorator_box(&grid, id).top, 5.0);

    grid.decorators_mut()
        .update(id, |d| d.set_range(1.0, 6.0, Extent::Len(6.0), Extent::Len(3.0)));
    tick(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!((bounds.top, bounds.left), (1.0, 6.0));
    assert_eq!((bounds.height, bounds.width), (6.0, 3.0));
}

#[test]
fn test_repositions_when_units_change() {
    let mut grid = simple_grid();
    let id = {
        let mut decorator = cell_decorator(5.0, 6.0, 2.0, 3.0);
        decorator.set_space(Space::Real);
        grid.decorators_mut().add(decorator)
    };
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!((bounds.top, bounds.left), (150.0, 600.0));
    assert_eq!((bounds.height, bounds.width), (61.0, 301.0));

    grid.decorators_mut().update(id, |d| d.set_units(Units::Px));
    tick(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!((bounds.top, bounds.left), (5.0, 6.0));
    assert_eq!((bounds.height, bounds.width), (2.0, 3.0));
}

#[test]
fn test_unrelated_decorators_are_not_recomputed() {
    let mut grid = simple_grid();
    let moving = {
        let mut decorator = cell_decorator(1.0, 1.0, 1.0, 1.0);
        decorator.set_units(Units::Px);
        decorator.set_space(Space::Real);
        grid.decorators_mut().add(decorator)
    };
    let stable = grid.decorators_mut().add(cell_decorator(2.0, 2.0, 1.0, 1.0));
    draw(&mut grid);
    let stable_before = decorator_box(&grid, stable);

    grid.decorators_mut()
        .update(moving, |d| d.set_range(9.0, 9.0, Extent::Len(9.0), Extent::Len(9.0)));
    tick(&mut grid);
    assert_eq!(decorator_box(&grid, moving).top, 9.0);
    assert_eq!(decorator_box(&grid, stable), stable_before);
}

#[test_case(Space::Real; "real space")]
#[test_case(Space::Virtual; "virtual space")]
fn test_unbounded_px_extent_clamps_to_remaining_viewport(space: Space) {
    let mut grid = simple_grid();
    let id = grid.decorators_mut().add(Decorator::new(
        5.0,
        6.0,
        Extent::Unbounded,
        Extent::Unbounded,
        Units::Px,
        space,
    ));
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!(bounds.height, CONTAINER_HEIGHT - 5.0);
    assert_eq!(bounds.width, CONTAINER_WIDTH - 6.0);
}

#[test]
fn test_unbounded_cell_extent_clamps_to_remaining_viewport() {
    let mut grid = simple_grid();
    let id = grid.decorators_mut().add(Decorator::new(
        2.0,
        3.0,
        Extent::Unbounded,
        Extent::Unbounded,
        Units::Cell,
        Space::Real,
    ));
    draw(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!((bounds.top, bounds.left), (60.0, 300.0));
    assert_eq!(bounds.height, CONTAINER_HEIGHT - 60.0);
    assert_eq!(bounds.width, CONTAINER_WIDTH - 300.0);
}

#[test]
fn test_virtual_range_shifts_by_cumulative_size_delta_on_scroll() {
    let mut grid = simple_grid();
    let id = grid.decorators_mut().add(cell_decorator(5.0, 6.0, 2.0, 2.0));
    draw(&mut grid);
    assert_eq!(decorator_box(&grid, id).top, 150.0);
    assert_eq!(decorator_box(&grid, id).left, 600.0);

    grid.scroll_to(2, 3);
    tick(&mut grid);
    let bounds = decorator_box(&grid, id);
    assert_eq!(bounds.top, 150.0 - 2.0 * 30.0);
    assert_eq!(bounds.left, 600.0 - 3.0 * 100.0);
}

#[test]
fn test_virtual_shift_with_varied_sizes_is_exact() {
    let mut grid = grid_with(&varied_config(&[20.0, 30.0, 40.0], &[]));
    let id = grid.decorators_mut().add(cell_decorator(5.0, 0.0, 1.0, 1.0));
    draw(&mut grid);
    // Rows 0..5 cycle 20,30,40,20,30 -> 140.
    assert_eq!(decorator_box(&grid, id).top, 140.0);

    grid.scroll_to(2, 0);
    tick(&mut grid);
    // Scrolled past rows 0 and 1 (20 + 30).
    assert_eq!(decorator_box(&grid, id).top, 140.0 - 50.0);
}

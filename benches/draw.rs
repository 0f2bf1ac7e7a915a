//! Benchmarks for the draw cycle.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridview::view::cell_classes::CellClassDescriptor;
use gridview::view::decorators::Decorator;
use gridview::{Extent, Grid, Space};

fn built_grid(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::simple(rows, cols);
    grid.build(800.0, 500.0).expect("build");
    grid.tick().expect("initial draw");
    grid
}

/// Full structural build + first draw of a large grid.
fn bench_initial_draw(c: &mut Criterion) {
    c.bench_function("initial_draw_10k_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::simple(black_box(10_000), black_box(100));
            grid.build(800.0, 500.0).expect("build");
            grid.tick().expect("draw");
            grid.viewport().rows()
        })
    });
}

/// Incremental redraw after a scroll: cells revalued, structure kept.
fn bench_scroll_redraw(c: &mut Criterion) {
    let mut grid = built_grid(10_000, 100);
    let mut row = 0usize;
    c.bench_function("scroll_redraw", |b| {
        b.iter(|| {
            row = (row + 7) % 9_000;
            grid.scroll_to(black_box(row), black_box(row % 80));
            grid.tick().expect("draw");
        })
    });
}

/// Redraw with overlay work: decorators and class ranges resolved per pass.
fn bench_overlay_redraw(c: &mut Criterion) {
    let mut grid = built_grid(10_000, 100);
    for i in 0..20_i64 {
        #[allow(clippy::cast_precision_loss)]
        let offset = (i * 3) as f32;
        grid.decorators_mut().add(Decorator::new(
            offset,
            offset,
            Extent::Len(3.0),
            Extent::Len(3.0),
            gridview::Units::Cell,
            Space::Virtual,
        ));
        grid.cell_classes_mut().add(CellClassDescriptor::ranged(
            i * 3,
            0,
            "stripe",
            Extent::Len(2.0),
            Extent::Unbounded,
            Space::Real,
        ));
    }
    grid.tick().expect("overlay draw");
    let mut row = 0usize;
    c.bench_function("overlay_scroll_redraw", |b| {
        b.iter(|| {
            row = (row + 13) % 9_000;
            grid.scroll_to(black_box(row), 0);
            grid.tick().expect("draw");
        })
    });
}

criterion_group!(
    benches,
    bench_initial_draw,
    bench_scroll_redraw,
    bench_overlay_redraw
);
criterion_main!(benches);

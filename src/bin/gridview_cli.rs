//! CLI demo for gridview - renders a generated grid window to stdout
//!
//! Usage:
//!   gridview_cli [rows cols]             # Render the visible window as text
//!   gridview_cli [rows cols] --scroll r,c
//!   gridview_cli [rows cols] --snapshot  # Dump the viewport snapshot as JSON

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;

use gridview::Grid;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut rows = 100usize;
    let mut cols = 10usize;
    let mut scroll = (0usize, 0usize);
    let mut snapshot = false;

    let mut positional = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--snapshot" => snapshot = true,
            "--scroll" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("--scroll requires r,c");
                    std::process::exit(1);
                };
                let parts: Vec<&str> = value.split(',').collect();
                if parts.len() != 2 {
                    eprintln!("--scroll requires r,c");
                    std::process::exit(1);
                }
                scroll = (
                    parts[0].parse().unwrap_or(0),
                    parts[1].parse().unwrap_or(0),
                );
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }
    if positional.len() >= 2 {
        rows = positional[0].parse().unwrap_or(rows);
        cols = positional[1].parse().unwrap_or(cols);
    }

    let mut grid = Grid::simple(rows, cols);
    if grid.build(800.0, 500.0).is_err() {
        eprintln!("Error building grid");
        std::process::exit(1);
    }
    grid.scroll_to(scroll.0, scroll.1);
    if grid.tick().is_err() {
        eprintln!("Error drawing grid");
        std::process::exit(1);
    }

    if snapshot {
        match serde_json::to_string_pretty(&grid.viewport().snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing snapshot: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let view_rows = grid.viewport().rows();
    let view_cols = grid.viewport().cols();
    for vr in 0..view_rows {
        let mut line = String::new();
        for vc in 0..view_cols {
            let text = grid
                .view()
                .cell_at(vr, vc)
                .map(|cell| grid.dom().deep_text(cell))
                .unwrap_or_default();
            line.push_str(&format!("{text:>10} "));
        }
        println!("{line}");
    }
    eprintln!(
        "({} x {} grid, showing {} x {} slots scrolled to {},{})",
        rows, cols, view_rows, view_cols, scroll.0, scroll.1
    );
}

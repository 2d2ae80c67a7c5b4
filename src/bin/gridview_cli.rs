//! CLI tool for gridview - renders a grid document as a text table
//!
//! Usage:
//!   gridview_cli <grid.json>              # Print the table
//!   gridview_cli <grid.json> --page 2     # Print page 2 with paging controls
//!   gridview_cli <grid.json> --valid      # Also print valid rows as JSON
//!
//! Set `RUST_LOG=debug` to trace grid state changes.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use gridview::render::{render_text, RecordingSurface};
use gridview::GridDocument;
use std::env;
use std::fs;
use std::io::{self, Write};

fn usage() -> ! {
    eprintln!("Usage: gridview_cli <grid.json> [--page N] [--valid]");
    std::process::exit(1);
}

fn main() {
    gridview::logging::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let input_path = &args[1];
    let mut page = None;
    let mut show_valid = false;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--page" => {
                let Some(n) = rest.next().and_then(|n| n.parse::<u32>().ok()) else {
                    eprintln!("--page expects a positive number");
                    usage();
                };
                page = Some(n);
            }
            "--valid" => show_valid = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    // Read input file
    let json = match fs::read_to_string(input_path) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let mut document = match GridDocument::from_json(&json) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing grid document: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(page) = page {
        document.select_page(page);
    }

    let grid = document.into_grid(RecordingSurface::new());
    let mut out = io::stdout().lock();
    out.write_all(render_text(grid.surface()).as_bytes()).unwrap();

    if show_valid {
        let valid: Vec<serde_json::Value> = grid
            .valid_rows()
            .iter()
            .map(|row| row.borrow().to_json())
            .collect();
        let json = serde_json::to_string_pretty(&valid).expect("rows serialize");
        writeln!(out, "{}", json).unwrap();
    }
}

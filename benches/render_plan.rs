//! Benchmarks for render-plan derivation and incremental row insertion.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridview::grid::Grid;
use gridview::render::RecordingSurface;
use gridview::types::{CellValue, ColumnDef, Edge, Row, SpanFn};

const COLS: usize = 20;

fn columns() -> Vec<ColumnDef> {
    let mut defs: Vec<ColumnDef> = (0..COLS / 2)
        .map(|c| ColumnDef::new(format!("c{c}"), format!("Col {c}")))
        .collect();
    defs.push(ColumnDef::group(
        "Group",
        (COLS / 2..COLS)
            .map(|c| ColumnDef::new(format!("c{c}"), format!("Col {c}")))
            .collect(),
    ));
    // Every tenth row merges the first two columns.
    if let Some(first) = defs.first_mut() {
        *first = ColumnDef::new("c0", "Col 0").renderer(SpanFn(
            |_: &CellValue, _: &Row, i: usize| -> i64 { if i % 10 == 0 { 2 } else { 1 } },
        ));
    }
    defs
}

fn rows(count: usize, offset: usize) -> Vec<Row> {
    (0..count)
        .map(|r| {
            (0..COLS)
                .map(|c| (format!("c{c}"), format!("r{}c{c}", r + offset)))
                .collect()
        })
        .collect()
}

/// Full render plan for growing row counts.
fn bench_render_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_plan");
    for count in [100usize, 1_000, 5_000] {
        let mut grid = Grid::new(RecordingSurface::new());
        grid.set_columns(columns());
        grid.set_rows(rows(count, 0));

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("rows", count), &grid, |b, grid| {
            b.iter(|| black_box(grid.render_plan()))
        });
    }
    group.finish();
}

/// Appending a page to an existing table paints only the new rows.
fn bench_add_rows(c: &mut Criterion) {
    let page = rows(50, 1_000);
    c.bench_function("add_rows_page_of_50", |b| {
        b.iter_batched(
            || {
                let mut grid = Grid::new(RecordingSurface::new());
                grid.set_columns(columns());
                grid.set_rows(rows(1_000, 0));
                grid
            },
            |mut grid| {
                grid.add_rows(page.clone(), Edge::End);
                black_box(grid.row_count())
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_render_plan, bench_add_rows);

criterion_main!(benches);

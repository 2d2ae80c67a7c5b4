//! Common test utilities for grid tests.
//!
//! Grids are built on a `RecordingSurface`, which keeps a model of what has
//! been painted plus a log of every surface call.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::grid::{Grid, GridEvent, PageRequest};
use gridview::render::RecordingSurface;
use gridview::types::{CellValue, ColumnDef, Row, RowHandle};
use std::cell::RefCell;
use std::rc::Rc;

pub type TestGrid = Grid<RecordingSurface>;

// ============================================================================
// Builders
// ============================================================================

/// `id`, `name`, `age` leaf columns.
pub fn flat_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID"),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("age", "Age"),
    ]
}

/// `id` plus a "Person" group over `name` and `age`.
pub fn grouped_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID"),
        ColumnDef::group(
            "Person",
            vec![ColumnDef::new("name", "Name"), ColumnDef::new("age", "Age")],
        ),
    ]
}

pub fn id_row(id: i32) -> Row {
    Row::new().with("id", id)
}

/// Rows with ids `1..=count`.
pub fn id_rows(count: i32) -> Vec<Row> {
    (1..=count).map(id_row).collect()
}

pub fn grid() -> TestGrid {
    let mut grid = Grid::new(RecordingSurface::new());
    grid.set_columns(flat_columns());
    grid
}

pub fn grid_with_rows(count: i32) -> TestGrid {
    let mut grid = grid();
    grid.set_rows(id_rows(count));
    grid
}

// ============================================================================
// Inspection
// ============================================================================

pub fn ids(grid: &TestGrid) -> Vec<CellValue> {
    grid.rows().iter().map(|row| row.value("id")).collect()
}

pub fn painted_ids(grid: &TestGrid) -> Vec<String> {
    grid.surface()
        .rows
        .iter()
        .map(|row| row.cells[0].value.display())
        .collect()
}

pub fn painted_indices(grid: &TestGrid) -> Vec<usize> {
    grid.surface().rows.iter().map(|row| row.index).collect()
}

pub fn values(ids: &[i32]) -> Vec<CellValue> {
    ids.iter().copied().map(CellValue::from).collect()
}

// ============================================================================
// Listener capture
// ============================================================================

/// Records everything delivered to the grid's listeners.
#[derive(Default, Clone)]
pub struct Captured {
    pub row_clicks: Rc<RefCell<Vec<(Row, usize)>>>,
    pub page_changes: Rc<RefCell<Vec<PageRequest>>>,
    pub actions: Rc<RefCell<Vec<(String, usize)>>>,
    pub edits: Rc<RefCell<Vec<(usize, String, CellValue)>>>,
    pub load_more: Rc<RefCell<usize>>,
}

impl Captured {
    pub fn attach(grid: &mut TestGrid) -> Self {
        let captured = Self::default();

        let clicks = Rc::clone(&captured.row_clicks);
        grid.on_row_click(move |row: &RowHandle, index| {
            clicks.borrow_mut().push((row.snapshot(), index));
        });
        let pages = Rc::clone(&captured.page_changes);
        grid.on_page_change(move |request| pages.borrow_mut().push(request));
        let actions = Rc::clone(&captured.actions);
        grid.on_action(move |action, _row, index| {
            actions.borrow_mut().push((action.to_string(), index));
        });
        let edits = Rc::clone(&captured.edits);
        grid.on_cell_edit(move |_row, index, field, value| {
            edits.borrow_mut().push((index, field.to_string(), value.clone()));
        });
        captured
    }

    /// Enable infinite scroll with a load-more counter.
    pub fn enable_infinite_scroll(&self, grid: &mut TestGrid) {
        let count = Rc::clone(&self.load_more);
        grid.enable_infinite_scroll(move || *count.borrow_mut() += 1);
    }

    pub fn load_more_calls(&self) -> usize {
        *self.load_more.borrow()
    }
}

pub fn page_requests(events: &[GridEvent]) -> Vec<PageRequest> {
    events
        .iter()
        .filter_map(|event| match event {
            GridEvent::PageChangeRequested(request) => Some(*request),
            _ => None,
        })
        .collect()
}

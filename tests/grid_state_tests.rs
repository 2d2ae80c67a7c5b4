//! Row lifecycle and loading/error/empty overlay tests.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use gridview::grid::{GridEvent, HostEvent, LoadState, Overlay};
use gridview::render::SurfaceOp;
use gridview::types::{CellValue, Edge, Row, RowHandle, RowStyle, RowTarget};

// ============================================================================
// setRows / placeholder
// ============================================================================

#[test]
fn test_empty_rows_show_single_placeholder() {
    let mut grid = grid();
    grid.set_rows(Vec::<Row>::new());

    assert!(grid.valid_rows().is_empty());
    assert_eq!(grid.surface().rows.len(), 0);
    assert_eq!(grid.surface().visible_body_rows(), 1);
    assert_eq!(
        grid.overlay(),
        &Overlay::Empty {
            span: 3,
            text: "No data available".into()
        }
    );
}

#[test]
fn test_placeholder_spans_one_column_without_columns() {
    let mut grid = gridview::Grid::new(gridview::render::RecordingSurface::new());
    grid.set_rows(Vec::<Row>::new());
    assert!(matches!(grid.overlay(), Overlay::Empty { span: 1, .. }));
}

#[test]
fn test_placeholder_span_follows_grouped_columns() {
    let mut grid = grid();
    grid.set_columns(grouped_columns());
    assert!(matches!(grid.overlay(), Overlay::Empty { span: 3, .. }));
}

#[test]
fn test_set_rows_replaces_and_clears_overlay() {
    let mut grid = grid_with_rows(3);
    grid.set_loading(true, true);
    assert!(grid.is_loading());

    grid.set_rows(id_rows(2));
    assert_eq!(grid.load_state(), &LoadState::Idle);
    assert!(grid.overlay().is_none());
    assert_eq!(painted_ids(&grid), ["1", "2"]);
}

#[test]
fn test_set_rows_clears_error_banner() {
    let mut grid = grid_with_rows(2);
    grid.set_error("boom");
    grid.set_rows(id_rows(1));
    assert!(grid.overlay().is_none());
    assert_eq!(grid.row_count(), 1);
}

#[test]
fn test_missing_field_renders_empty() {
    let mut grid = grid();
    grid.set_rows([Row::new().with("id", 1)]);
    let cells = &grid.surface().rows[0].cells;
    assert_eq!(cells[1].content.plain_text(), "");
    assert_eq!(cells[2].value, CellValue::Null);
}

// ============================================================================
// addRows
// ============================================================================

#[test]
fn test_add_rows_at_begin_reports_final_index() {
    let mut grid = grid_with_rows(3);
    let captured = Captured::attach(&mut grid);

    grid.add_rows([id_row(4)], Edge::parse("begin").unwrap());
    assert_eq!(ids(&grid), values(&[4, 1, 2, 3]));
    assert_eq!(painted_ids(&grid), ["4", "1", "2", "3"]);
    assert_eq!(painted_indices(&grid), [0, 1, 2, 3]);

    grid.handle_and_emit(HostEvent::RowClick { index: 0 });
    let clicks = captured.row_clicks.borrow();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].1, 0);
    assert_eq!(clicks[0].0, id_row(4));
}

#[test]
fn test_add_rows_paints_only_new_rows() {
    let mut grid = grid_with_rows(2);
    grid.surface_mut().clear_ops();

    grid.add_rows(id_rows(2), Edge::End);
    assert_eq!(grid.surface().ops, [SurfaceOp::InsertRows(Edge::End, 2)]);
    assert_eq!(painted_indices(&grid), [0, 1, 2, 3]);
}

#[test]
fn test_add_rows_style_callback_sees_final_index() {
    let mut grid = grid_with_rows(2);
    grid.set_row_style(|_row, index| Some(RowStyle::Classes(format!("row-{index}"))));
    grid.add_rows([id_row(9)], Edge::End);

    let last = grid.surface().rows.last().unwrap();
    assert_eq!(last.index, 2);
    assert_eq!(last.style, Some(RowStyle::Classes("row-2".into())));
    // Rows painted before the callback was set keep their presentation.
    assert_eq!(grid.surface().rows[0].style, None);
}

#[test]
fn test_add_rows_to_empty_grid_behaves_like_set_rows() {
    let mut grid = grid();
    grid.set_loading(true, true);
    grid.surface_mut().clear_ops();

    grid.add_rows(id_rows(2), Edge::Start);
    assert_eq!(ids(&grid), values(&[1, 2]));
    assert!(grid.surface().ops.contains(&SurfaceOp::PaintBody(2)));
    assert_eq!(grid.load_state(), &LoadState::Idle);
    assert!(grid.overlay().is_none());
}

#[test]
fn test_add_no_rows_is_noop() {
    let mut grid = grid_with_rows(2);
    grid.surface_mut().clear_ops();
    grid.add_rows(Vec::<Row>::new(), Edge::End);
    assert!(grid.surface().ops.is_empty());
    assert_eq!(grid.row_count(), 2);
}

// ============================================================================
// deleteRow
// ============================================================================

#[test]
fn test_delete_by_key_removes_one_row() {
    let mut grid = grid_with_rows(3);
    let removed = grid.delete_row(2, "id");
    assert_eq!(removed.map(|r| r.snapshot()), Some(id_row(2)));
    assert_eq!(ids(&grid), values(&[1, 3]));
    assert_eq!(painted_ids(&grid), ["1", "3"]);
    assert_eq!(painted_indices(&grid), [0, 1]);
}

#[test]
fn test_delete_unknown_key_is_noop() {
    let mut grid = grid_with_rows(3);
    grid.surface_mut().clear_ops();
    assert!(grid.delete_row(99, "id").is_none());
    assert_eq!(ids(&grid), values(&[1, 2, 3]));
    assert!(grid.surface().ops.is_empty());
}

#[test]
fn test_delete_by_handle_uses_identity() {
    let mut grid = grid();
    let twin_a = RowHandle::new(id_row(7));
    let twin_b = RowHandle::new(id_row(7));
    grid.set_rows([twin_a.clone(), twin_b.clone()]);

    grid.delete_row(&twin_b, "id");
    assert_eq!(grid.row_count(), 1);
    assert!(grid.rows()[0].ptr_eq(&twin_a));
}

#[test]
fn test_delete_by_default_key_field() {
    let mut grid = grid_with_rows(2);
    assert!(grid.delete_row_by_key(1).is_some());
    assert_eq!(ids(&grid), values(&[2]));
}

#[test]
fn test_delete_matching_row() {
    let mut grid = grid();
    grid.set_rows([
        Row::new().with("id", 1).with("name", "a"),
        Row::new().with("id", 1).with("name", "b"),
    ]);
    let target = RowTarget::Matching(Row::new().with("id", 1).with("name", "b"));
    assert!(grid.delete_row(target, "id").is_some());
    assert_eq!(grid.rows()[0].value("name"), CellValue::from("a"));
}

#[test]
fn test_delete_last_row_restores_placeholder() {
    let mut grid = grid_with_rows(1);
    grid.delete_row(1, "id");
    assert!(matches!(grid.overlay(), Overlay::Empty { .. }));
    assert_eq!(grid.surface().visible_body_rows(), 1);
}

// ============================================================================
// Loading / error state machine
// ============================================================================

#[test]
fn test_loading_with_reset_discards_rows() {
    let mut grid = grid_with_rows(3);
    grid.set_loading(true, true);

    assert_eq!(grid.row_count(), 0);
    assert!(grid.surface().rows.is_empty());
    assert!(matches!(
        grid.overlay(),
        Overlay::Busy {
            below_rows: false,
            span: 3,
            ..
        }
    ));
}

#[test]
fn test_loading_without_reset_keeps_rows() {
    let mut grid = grid_with_rows(3);
    grid.set_loading(true, false);

    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.surface().rows.len(), 3);
    assert!(matches!(grid.overlay(), Overlay::Busy { below_rows: true, .. }));
    assert_eq!(grid.surface().visible_body_rows(), 4);
}

#[test]
fn test_stop_loading_keeps_rows() {
    let mut grid = grid_with_rows(2);
    grid.set_loading(true, false);
    grid.set_loading(false, true);
    assert_eq!(grid.load_state(), &LoadState::Idle);
    assert_eq!(ids(&grid), values(&[1, 2]));
    assert!(grid.overlay().is_none());
}

#[test]
fn test_stop_loading_when_idle_is_noop() {
    let mut grid = grid_with_rows(2);
    grid.surface_mut().clear_ops();
    grid.set_loading(false, true);
    assert!(grid.surface().ops.is_empty());
    assert_eq!(ids(&grid), values(&[1, 2]));
}

#[test]
fn test_stop_loading_without_rows_shows_placeholder() {
    let mut grid = grid_with_rows(2);
    grid.set_loading(true, true);
    grid.set_loading(false, true);
    assert!(matches!(grid.overlay(), Overlay::Empty { .. }));
}

#[test]
fn test_error_wipes_rows_and_replaces_banner() {
    let mut grid = grid_with_rows(3);
    grid.set_loading(true, false);
    grid.set_error("first");
    grid.set_error("second");

    assert_eq!(grid.row_count(), 0);
    assert!(grid.surface().rows.is_empty());
    assert_eq!(
        grid.surface().overlay,
        Overlay::Error {
            message: "second".into()
        }
    );
    // The banner sits above the body, not in it.
    assert_eq!(grid.surface().visible_body_rows(), 0);
    // The header is kept.
    assert!(grid.surface().header.is_some());
}

#[test]
fn test_error_without_message_uses_default_text() {
    let mut grid = grid();
    grid.set_error("");
    assert_eq!(
        grid.overlay(),
        &Overlay::Error {
            message: "Error loading data".into()
        }
    );
}

#[test]
fn test_loading_after_error_replaces_banner() {
    let mut grid = grid();
    grid.set_error("boom");
    grid.set_loading(true, true);
    assert!(matches!(grid.surface().overlay, Overlay::Busy { .. }));
    grid.set_loading(false, true);
    assert!(matches!(grid.surface().overlay, Overlay::Empty { .. }));
}

#[test]
fn test_painted_overlay_matches_state() {
    let mut grid = grid_with_rows(2);
    let steps: [(&str, fn(&mut TestGrid)); 5] = [
        ("loading", |g| g.set_loading(true, false)),
        ("error", |g| g.set_error("x")),
        ("rows", |g| g.set_rows(id_rows(1))),
        ("delete", |g| {
            g.delete_row(1, "id");
        }),
        ("append", |g| g.add_rows(id_rows(1), Edge::End)),
    ];
    for (name, step) in steps {
        step(&mut grid);
        assert_eq!(&grid.surface().overlay, grid.overlay(), "after {name}");
        assert_eq!(grid.surface().rows.len(), grid.row_count(), "after {name}");
    }
}

// ============================================================================
// Full render
// ============================================================================

#[test]
fn test_render_repaints_everything() {
    let mut grid = grid_with_rows(2);
    grid.surface_mut().clear_ops();
    grid.render();
    assert_eq!(
        grid.surface().ops,
        [
            SurfaceOp::PaintHeader,
            SurfaceOp::PaintBody(2),
            SurfaceOp::PaintOverlay,
            SurfaceOp::HidePaging,
        ]
    );
    assert_eq!(grid.render_plan().body, grid.surface().rows);
}

#[test]
fn test_row_click_on_missing_row_raises_nothing() {
    let mut grid = grid_with_rows(1);
    assert!(grid.handle(HostEvent::RowClick { index: 5 }).is_empty());
    let events = grid.handle(HostEvent::RowClick { index: 0 });
    assert!(matches!(
        events.as_slice(),
        [GridEvent::RowClicked { index: 0, .. }]
    ));
}

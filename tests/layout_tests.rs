//! Column flattening, header layout, spans and cell content tests.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use gridview::editors::{EditorKind, TextEditor};
use gridview::layout::{HeaderLayout, TableSizing};
use gridview::types::{
    flatten_columns, ActionButton, CellContent, CellValue, ColumnDef, ColumnWidth, FnRenderer,
    Row, SpanFn, TextAlign,
};

fn cell_fields(grid: &TestGrid, row: usize) -> Vec<(String, usize)> {
    grid.surface().rows[row]
        .cells
        .iter()
        .map(|cell| (cell.field.clone(), cell.col_span))
        .collect()
}

// ============================================================================
// Flattening / header
// ============================================================================

#[test]
fn test_flatten_length_matches_leaf_count() {
    let sets = [
        flat_columns(),
        grouped_columns(),
        vec![
            ColumnDef::group("A", vec![ColumnDef::new("a1", "1"), ColumnDef::new("a2", "2")]),
            ColumnDef::group("B", vec![ColumnDef::new("b1", "1")]),
            ColumnDef::new("c", "C"),
        ],
        Vec::new(),
    ];
    for defs in sets {
        let expected: usize = defs.iter().map(ColumnDef::leaf_count).sum();
        assert_eq!(flatten_columns(&defs).len(), expected);
    }
}

#[test]
fn test_flatten_keeps_display_order() {
    let flat = flatten_columns(&grouped_columns());
    let fields: Vec<&str> = flat.iter().map(|col| col.field.as_str()).collect();
    assert_eq!(fields, ["id", "name", "age"]);
}

#[test]
fn test_flat_columns_use_one_header_row() {
    let header = HeaderLayout::from_columns(&flat_columns());
    assert_eq!(header.depth(), 1);
    assert_eq!(header.width(), 3);
    assert!(header.rows[0]
        .iter()
        .all(|cell| cell.col_span == 1 && cell.row_span == 1));
}

#[test]
fn test_grouped_columns_use_two_header_rows() {
    let header = HeaderLayout::from_columns(&grouped_columns());
    assert_eq!(header.depth(), 2);
    assert_eq!(header.width(), 3);

    let top: Vec<(&str, usize, usize)> = header.rows[0]
        .iter()
        .map(|cell| (cell.text.as_str(), cell.col_span, cell.row_span))
        .collect();
    assert_eq!(top, [("ID", 1, 2), ("Person", 2, 1)]);

    let bottom: Vec<&str> = header.rows[1].iter().map(|cell| cell.text.as_str()).collect();
    assert_eq!(bottom, ["Name", "Age"]);
}

#[test]
fn test_header_tooltip_and_alignment() {
    let mut grid = grid();
    grid.set_columns(vec![
        ColumnDef::new("qty", "Qty")
            .tooltip("Units on hand")
            .align(TextAlign::Right),
        ColumnDef::new("name", "Name"),
    ]);
    let header = grid.surface().header.as_ref().unwrap();
    assert_eq!(header.rows[0][0].tooltip.as_deref(), Some("Units on hand"));
    assert_eq!(header.rows[0][0].align, TextAlign::Right);
    assert_eq!(header.rows[0][1].tooltip, None);
}

#[test]
fn test_set_columns_repaints_existing_rows() {
    let mut grid = grid_with_rows(2);
    grid.set_columns(grouped_columns());
    assert_eq!(grid.surface().rows.len(), 2);
    assert_eq!(grid.surface().header.as_ref().unwrap().depth(), 2);
    assert_eq!(grid.surface().rows[0].cells.len(), 3);
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_fixed_span_suppresses_covered_columns() {
    let mut grid = grid();
    grid.set_columns(vec![
        ColumnDef::new("id", "ID").span(2),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("age", "Age"),
    ]);
    grid.set_rows(id_rows(1));
    assert_eq!(
        cell_fields(&grid, 0),
        [("id".to_string(), 2), ("age".to_string(), 1)]
    );
    assert_eq!(grid.surface().rows[0].cells[1].column, 2);
}

#[test]
fn test_span_past_last_column_is_clamped() {
    let mut grid = grid();
    grid.set_columns(vec![
        ColumnDef::new("id", "ID"),
        ColumnDef::new("name", "Name").span(10),
    ]);
    grid.set_rows(id_rows(1));
    assert_eq!(
        cell_fields(&grid, 0),
        [("id".to_string(), 1), ("name".to_string(), 1)]
    );
}

#[test]
fn test_zero_and_negative_spans_become_one() {
    for span in [0, -1, -40] {
        let mut grid = grid();
        grid.set_columns(vec![
            ColumnDef::new("id", "ID").span(span),
            ColumnDef::new("name", "Name"),
        ]);
        grid.set_rows(id_rows(1));
        assert_eq!(grid.surface().rows[0].cells.len(), 2, "span {span}");
    }
}

#[test]
fn test_span_function_varies_per_row() {
    let mut grid = grid();
    grid.set_columns(vec![
        ColumnDef::new("id", "ID").renderer(SpanFn(|value: &CellValue, _: &Row, _: usize| -> i64 {
            // Subtotal rows merge across the whole table.
            if value.as_str() == Some("total") {
                3
            } else {
                1
            }
        })),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("age", "Age"),
    ]);
    grid.set_rows([
        Row::new().with("id", 1).with("name", "a"),
        Row::new().with("id", "total"),
    ]);

    assert_eq!(grid.surface().rows[0].cells.len(), 3);
    assert_eq!(cell_fields(&grid, 1), [("id".to_string(), 3)]);
    assert_eq!(grid.surface().rows[1].cells[0].content, CellContent::Text("total".into()));
}

#[test]
fn test_span_function_overrides_fixed_span() {
    let mut grid = grid();
    grid.set_columns(vec![
        ColumnDef::new("id", "ID")
            .span(3)
            .renderer(SpanFn(|_: &CellValue, _: &Row, i: usize| -> i64 {
                if i == 0 {
                    2
                } else {
                    1
                }
            })),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("age", "Age"),
    ]);
    grid.set_rows(id_rows(2));
    assert_eq!(grid.surface().rows[0].cells.len(), 2);
    assert_eq!(grid.surface().rows[1].cells.len(), 3);
}

// ============================================================================
// Cell content
// ============================================================================

#[test]
fn test_renderer_wins_over_editor() {
    let mut grid = grid();
    grid.set_columns(vec![ColumnDef::new("name", "Name")
        .editor(EditorKind::Text(TextEditor::default()))
        .renderer(FnRenderer(|value: &CellValue, _: &Row| {
            CellContent::Markup(format!("<b>{value}</b>"))
        }))]);
    grid.set_rows([Row::new().with("name", "Ann")]);
    assert_eq!(
        grid.surface().rows[0].cells[0].content,
        CellContent::Markup("<b>Ann</b>".into())
    );
}

#[test]
fn test_editor_wins_over_text() {
    let mut grid = grid();
    grid.set_columns(vec![ColumnDef::new("done", "Done").editor(EditorKind::Checkbox)]);
    grid.set_rows([Row::new().with("done", true)]);

    let cell = &grid.surface().rows[0].cells[0];
    assert_eq!(cell.content, CellContent::Editor(EditorKind::Checkbox));
    assert!(cell.content.owns_click());
    assert_eq!(cell.value, CellValue::Bool(true));
}

#[test]
fn test_span_only_strategy_keeps_editor() {
    let mut grid = grid();
    grid.set_columns(vec![
        ColumnDef::new("done", "Done")
            .editor(EditorKind::Checkbox)
            .renderer(SpanFn(|_: &CellValue, _: &Row, _: usize| -> i64 { 2 })),
        ColumnDef::new("name", "Name"),
    ]);
    grid.set_rows([Row::new()]);

    let cell = &grid.surface().rows[0].cells[0];
    assert_eq!(cell.col_span, 2);
    assert_eq!(cell.content, CellContent::Editor(EditorKind::Checkbox));
}

#[test]
fn test_renderer_returning_nothing_renders_empty() {
    let mut grid = grid();
    grid.set_columns(vec![
        ColumnDef::new("id", "ID").renderer(FnRenderer(|_: &CellValue, _: &Row| CellContent::Empty)),
    ]);
    grid.set_rows(id_rows(1));
    assert_eq!(grid.surface().rows[0].cells[0].content.plain_text(), "");
}

#[test]
fn test_action_buttons_own_clicks() {
    let content = CellContent::Actions(vec![
        ActionButton::new("edit", "icon-pencil").with_title("Edit"),
        ActionButton::new("delete", "icon-trash"),
    ]);
    assert!(content.owns_click());
    assert_eq!(content.plain_text(), "<edit> <delete>");
    assert!(!CellContent::Text("x".into()).owns_click());
}

#[test]
fn test_cell_alignment_follows_column() {
    let mut grid = grid();
    grid.set_columns(vec![ColumnDef::new("id", "ID").align(TextAlign::Center)]);
    grid.set_rows(id_rows(1));
    assert_eq!(grid.surface().rows[0].cells[0].align, TextAlign::Center);
}

// ============================================================================
// Sizing
// ============================================================================

#[test]
fn test_auto_width_is_default() {
    let grid = grid();
    assert_eq!(grid.surface().sizing, Some(TableSizing::Auto));
}

#[test]
fn test_fixed_width_uses_column_widths() {
    let mut grid = grid();
    grid.set_columns(vec![
        ColumnDef::new("id", "ID").width(ColumnWidth::Px(80.0)),
        ColumnDef::group(
            "Person",
            vec![
                ColumnDef::new("name", "Name").width(ColumnWidth::Css("12em".into())),
                ColumnDef::new("age", "Age"),
            ],
        ),
    ]);
    grid.set_auto_width(false);
    assert_eq!(
        grid.surface().sizing,
        Some(TableSizing::Fixed(vec![
            Some("80px".into()),
            Some("12em".into()),
            None
        ]))
    );
}

#[test]
fn test_set_auto_width_only_repaints_on_change() {
    let mut grid = grid();
    grid.surface_mut().clear_ops();
    grid.set_auto_width(true);
    assert!(grid.surface().ops.is_empty());
    grid.set_auto_width(false);
    assert_eq!(grid.surface().ops, [gridview::render::SurfaceOp::PaintHeader]);
}

#[test]
fn test_column_defs_from_json() {
    let defs: Vec<ColumnDef> = serde_json::from_value(serde_json::json!([
        {"field": "id", "headerName": "ID", "width": 60},
        {"headerName": "Person", "children": [
            {"field": "name", "headerName": "Name", "textAlign": "center"},
            {"field": "dob", "headerName": "Born", "editor": {"type": "date"}}
        ]}
    ]))
    .unwrap();
    let flat = flatten_columns(&defs);
    assert_eq!(flat.len(), 3);
    assert_eq!(defs[0].width, Some(ColumnWidth::Px(60.0)));
    assert_eq!(flat[1].text_align, TextAlign::Center);
    assert_eq!(flat[2].editor.as_ref().map(EditorKind::name), Some("date"));
}

//! Body row layout: per-cell content and column spans.

use crate::types::{CellContent, CellValue, ColumnDef, Row, RowStyle, TextAlign};

/// Row-style callback: `(row, index)` to optional extra presentation.
pub type RowStyler = dyn Fn(&Row, usize) -> Option<RowStyle>;

#[derive(Debug, Clone, PartialEq)]
pub struct BodyCell {
    pub field: String,
    /// Position of the cell's first leaf column.
    pub column: usize,
    pub col_span: usize,
    pub align: TextAlign,
    /// The row's value for `field`; editors start from it.
    pub value: CellValue,
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    /// Position of the row in the grid's row sequence.
    pub index: usize,
    pub style: Option<RowStyle>,
    pub cells: Vec<BodyCell>,
}

/// Lay out one row against the flattened columns.
///
/// A cell spanning `k` columns suppresses the next `k - 1` columns. Spans are
/// clamped to at least 1 and never run past the last column.
pub fn layout_row(
    columns: &[ColumnDef],
    row: &Row,
    index: usize,
    styler: Option<&RowStyler>,
) -> BodyRow {
    let mut cells = Vec::with_capacity(columns.len());
    let mut col = 0;
    while let Some(column) = columns.get(col) {
        let value = row.value(&column.field);
        let remaining = columns.len() - col;
        let span = effective_span(column, row, index, remaining);

        let renderer = column
            .renderer
            .as_ref()
            .filter(|renderer| renderer.renders_content());
        let content = match (renderer, &column.editor) {
            (Some(renderer), _) => renderer.render(&value, row),
            (None, Some(editor)) => CellContent::Editor(editor.clone()),
            (None, None) => CellContent::Text(value.display()),
        };

        cells.push(BodyCell {
            field: column.field.clone(),
            column: col,
            col_span: span,
            align: column.text_align,
            value,
            content,
        });
        col += span;
    }

    BodyRow {
        index,
        style: styler.and_then(|style| style(row, index)),
        cells,
    }
}

/// Column span for `column` in `row`, clamped to `1..=remaining`.
pub fn effective_span(column: &ColumnDef, row: &Row, index: usize, remaining: usize) -> usize {
    let requested = column
        .renderer
        .as_ref()
        .and_then(|r| r.col_span(&row.value(&column.field), row, index))
        .or(column.col_span)
        .unwrap_or(1);

    let span = match usize::try_from(requested) {
        Ok(0) => 1,
        Ok(span) => span,
        Err(_) => {
            log::warn!(
                "column {:?}: span {requested} is not positive, using 1",
                column.field
            );
            1
        }
    };
    if span > remaining {
        log::trace!(
            "column {:?}: span {span} clamped to {remaining} remaining columns",
            column.field
        );
    }
    span.min(remaining.max(1))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::SpanFn;

    #[test]
    fn test_negative_span_clamps_to_one() {
        let col = ColumnDef::new("a", "A").span(-3);
        assert_eq!(effective_span(&col, &Row::new(), 0, 4), 1);
    }

    #[test]
    fn test_span_function_sees_row_index() {
        let col = ColumnDef::new("a", "A").renderer(SpanFn(|_: &CellValue, _: &Row, i: usize| -> i64 {
            i64::try_from(i).unwrap_or(1)
        }));
        assert_eq!(effective_span(&col, &Row::new(), 2, 4), 2);
        assert_eq!(effective_span(&col, &Row::new(), 0, 4), 1);
        assert_eq!(effective_span(&col, &Row::new(), 9, 4), 4);
    }
}

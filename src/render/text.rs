//! Plain-text rendering of a [`RecordingSurface`].
//!
//! Produces a boxed table with the header rows, one line per body row (or the
//! overlay placeholder), an error banner above the table and the paging bar
//! below it. Column spans merge the covered columns into one slot.

use super::recording::RecordingSurface;
use crate::grid::{Overlay, PagingBar};
use crate::layout::{BodyRow, HeaderCell, HeaderLayout};
use crate::types::TextAlign;
use std::fmt::Write;

/// Longest text a single slot shows before it is cut.
const MAX_CELL_WIDTH: usize = 40;

const BUSY_TEXT: &str = "...";

/// Render everything the surface currently shows.
pub fn render_text(surface: &RecordingSurface) -> String {
    let header = surface.header.as_ref();
    let leaf_count = header.map_or(0, HeaderLayout::width).max(1);
    let mut widths = column_widths(header, &surface.rows, leaf_count);
    match &surface.overlay {
        Overlay::Empty { text, .. } => widen(&mut widths, 0, leaf_count, text_width(text)),
        Overlay::Busy { .. } => widen(&mut widths, 0, leaf_count, BUSY_TEXT.len()),
        Overlay::None | Overlay::Error { .. } => {}
    }

    let mut out = String::new();
    if let Overlay::Error { message } = &surface.overlay {
        let _ = writeln!(out, "!! {message}");
    }

    let rule = rule_line(&widths);
    out.push_str(&rule);
    if let Some(header) = header {
        for line in header_lines(header, &widths) {
            out.push_str(&line);
        }
        out.push_str(&rule);
    }

    for row in &surface.rows {
        out.push_str(&body_line(row, &widths));
    }
    match &surface.overlay {
        Overlay::Empty { text, .. } => out.push_str(&full_width_line(text, &widths)),
        Overlay::Busy { lines, .. } => {
            for _ in 0..(*lines).max(1) {
                out.push_str(&full_width_line(BUSY_TEXT, &widths));
            }
        }
        Overlay::None | Overlay::Error { .. } => {}
    }
    out.push_str(&rule);

    if surface.paging_visible {
        if let Some(bar) = &surface.paging {
            out.push_str(&paging_line(bar));
        }
    }
    out
}

/// Leaf header cells in column order.
fn leaf_headers(header: &HeaderLayout) -> Vec<&HeaderCell> {
    let mut leaves = Vec::with_capacity(header.width());
    let mut second_row = header.rows.get(1).map(|row| row.iter());
    for cell in header.rows.first().into_iter().flatten() {
        if cell.row_span > 1 || header.depth() == 1 {
            leaves.push(cell);
        } else if let Some(children) = second_row.as_mut() {
            leaves.extend(children.by_ref().take(cell.col_span));
        }
    }
    leaves
}

fn column_widths(header: Option<&HeaderLayout>, rows: &[BodyRow], leaf_count: usize) -> Vec<usize> {
    let mut widths = vec![1; leaf_count];
    if let Some(header) = header {
        for (slot, cell) in widths.iter_mut().zip(leaf_headers(header)) {
            *slot = (*slot).max(text_width(&cell.text));
        }
    }
    for row in rows {
        for cell in row.cells.iter().filter(|cell| cell.col_span == 1) {
            if let Some(slot) = widths.get_mut(cell.column) {
                *slot = (*slot).max(text_width(&cell.content.plain_text()));
            }
        }
    }
    // Spanned cells only grow the last slot they cover, once single cells are sized.
    for row in rows {
        for cell in row.cells.iter().filter(|cell| cell.col_span > 1) {
            let needed = text_width(&cell.content.plain_text());
            widen(&mut widths, cell.column, cell.col_span, needed);
        }
    }
    widths
}

/// Grow the last of the `span` slots from `first` until `needed` fits.
fn widen(widths: &mut [usize], first: usize, span: usize, needed: usize) {
    let available = span_width(widths, first, span);
    if needed <= available {
        return;
    }
    let last = (first + span.max(1)).min(widths.len()).saturating_sub(1);
    if let Some(slot) = widths.get_mut(last) {
        *slot += needed - available;
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count().min(MAX_CELL_WIDTH)
}

/// Width of `span` slots starting at `first`, separators included.
fn span_width(widths: &[usize], first: usize, span: usize) -> usize {
    let covered = widths.iter().skip(first).take(span.max(1));
    let count = covered.clone().count();
    covered.sum::<usize>() + 3 * count.saturating_sub(1)
}

fn pad(text: &str, width: usize, align: TextAlign) -> String {
    let text: String = text
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(width)
        .collect();
    match align {
        TextAlign::Left => format!("{text:<width$}"),
        TextAlign::Center => format!("{text:^width$}"),
        TextAlign::Right => format!("{text:>width$}"),
    }
}

fn rule_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn header_lines(header: &HeaderLayout, widths: &[usize]) -> Vec<String> {
    let leaves = leaf_headers(header);
    let mut lines = Vec::with_capacity(header.depth());
    if header.depth() == 1 {
        let slots = leaves.iter().enumerate().map(|(i, cell)| (i, 1, marked(cell)));
        lines.push(slot_line(slots, widths, TextAlign::Left));
        return lines;
    }

    // Top row: group names over their children, leaves repeated on both lines.
    let mut top = Vec::new();
    let mut bottom = Vec::new();
    let mut column = 0;
    let mut leaf_iter = leaves.iter();
    for cell in header.rows.first().into_iter().flatten() {
        if cell.row_span > 1 {
            if let Some(leaf) = leaf_iter.next() {
                top.push((column, 1, marked(leaf)));
                bottom.push((column, 1, String::new()));
            }
            column += 1;
        } else {
            top.push((column, cell.col_span, marked(cell)));
            for (offset, child) in leaf_iter.by_ref().take(cell.col_span).enumerate() {
                bottom.push((column + offset, 1, marked(child)));
            }
            column += cell.col_span;
        }
    }
    lines.push(slot_line(top.into_iter(), widths, TextAlign::Center));
    lines.push(slot_line(bottom.into_iter(), widths, TextAlign::Left));
    lines
}

fn marked(cell: &HeaderCell) -> String {
    if cell.tooltip.is_some() {
        format!("{} (?)", cell.text)
    } else {
        cell.text.clone()
    }
}

fn slot_line(
    slots: impl Iterator<Item = (usize, usize, String)>,
    widths: &[usize],
    align: TextAlign,
) -> String {
    let mut line = String::from("|");
    for (first, span, text) in slots {
        let width = span_width(widths, first, span);
        let _ = write!(line, " {} |", pad(&text, width, align));
    }
    line.push('\n');
    line
}

fn body_line(row: &BodyRow, widths: &[usize]) -> String {
    let mut line = String::from("|");
    for cell in &row.cells {
        let width = span_width(widths, cell.column, cell.col_span);
        let _ = write!(line, " {} |", pad(&cell.content.plain_text(), width, cell.align));
    }
    line.push('\n');
    line
}

fn full_width_line(text: &str, widths: &[usize]) -> String {
    let width = span_width(widths, 0, widths.len());
    format!("| {} |\n", pad(text, width, TextAlign::Center))
}

fn paging_line(bar: &PagingBar) -> String {
    let sizes = bar
        .page_sizes
        .iter()
        .map(|size| {
            if *size == bar.page_row {
                format!("[{size}]")
            } else {
                size.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let previous = if bar.previous_enabled { "<" } else { " " };
    let next = if bar.next_enabled { ">" } else { " " };
    format!("{}: {sizes}  {previous} {} {next}\n", bar.label, bar.indicator())
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
    use crate::grid::{Grid, PaginationState};
    use crate::types::{ColumnDef, Row};

    fn grid() -> Grid<RecordingSurface> {
        let mut grid = Grid::new(RecordingSurface::new());
        grid.set_columns(vec![
            ColumnDef::new("id", "ID"),
            ColumnDef::group(
                "Person",
                vec![ColumnDef::new("name", "Name"), ColumnDef::new("age", "Age")],
            ),
        ]);
        grid
    }

    #[test]
    fn test_renders_group_header_and_rows() {
        let mut grid = grid();
        grid.set_rows([
            Row::new().with("id", 1).with("name", "Ada").with("age", 36),
            Row::new().with("id", 2).with("name", "Linus"),
        ]);
        let text = render_text(grid.surface());
        assert!(text.contains("Person"));
        assert!(text.contains("Ada"));
        assert!(text.contains("Linus"));
        assert!(!text.contains("No data available"));
    }

    #[test]
    fn test_renders_placeholder_and_paging() {
        let mut grid = grid();
        grid.set_pagination(PaginationState::new(2, 20, 100, 0));
        let text = render_text(grid.surface());
        assert!(text.contains("No data available"));
        assert!(text.contains("Page 2 of 5"));
        assert!(text.contains("[20]"));
    }

    #[test]
    fn test_placeholder_wider_than_columns_is_not_cut() {
        let mut grid = Grid::with_options(
            RecordingSurface::new(),
            crate::config::GridOptions {
                empty_text: "Nothing matched the current filters".into(),
                ..crate::config::GridOptions::default()
            },
        );
        grid.set_columns(vec![ColumnDef::new("id", "ID")]);
        let text = render_text(grid.surface());
        assert!(text.contains("| Nothing matched the current filters |"), "{text}");

        let widths: Vec<usize> = text.lines().map(|line| line.chars().count()).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "{text}");
    }

    #[test]
    fn test_spanned_cell_widens_last_covered_column() {
        let mut grid = Grid::new(RecordingSurface::new());
        grid.set_columns(vec![
            ColumnDef::new("id", "ID").span(2),
            ColumnDef::new("n", "N"),
        ]);
        grid.set_rows([Row::new().with("id", "a rather long merged value")]);
        let text = render_text(grid.surface());
        assert!(text.contains("a rather long merged value"), "{text}");
    }

    #[test]
    fn test_error_banner_above_table() {
        let mut grid = grid();
        grid.set_error("boom");
        let text = render_text(grid.surface());
        assert!(text.starts_with("!! boom"));
    }

    #[test]
    fn test_leaf_headers_follow_groups() {
        let grid = grid();
        let header = grid.surface().header.as_ref().unwrap();
        let names: Vec<&str> = leaf_headers(header).iter().map(|c| c.text.as_str()).collect();
        assert_eq!(names, ["ID", "Name", "Age"]);
    }
}

//! Header layout: one header row for flat column sets, two when any column
//! is a group.

use crate::types::{ColumnDef, TextAlign};

/// A header cell with its spans in leaf columns / header rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub text: String,
    pub tooltip: Option<String>,
    pub align: TextAlign,
    pub col_span: usize,
    pub row_span: usize,
}

impl HeaderCell {
    fn from_def(def: &ColumnDef, col_span: usize, row_span: usize) -> Self {
        Self {
            text: def.header_name.clone(),
            tooltip: def.header_tooltip.clone(),
            align: def.text_align,
            col_span,
            row_span,
        }
    }
}

/// Header rows, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub rows: Vec<Vec<HeaderCell>>,
}

impl HeaderLayout {
    pub fn from_columns(defs: &[ColumnDef]) -> Self {
        if !defs.iter().any(ColumnDef::is_group) {
            let row = defs.iter().map(|def| HeaderCell::from_def(def, 1, 1)).collect();
            return Self { rows: vec![row] };
        }

        let mut top = Vec::with_capacity(defs.len());
        let mut bottom = Vec::new();
        for def in defs {
            if def.is_group() {
                top.push(HeaderCell::from_def(def, def.children.len(), 1));
                bottom.extend(def.children.iter().map(|child| HeaderCell::from_def(child, 1, 1)));
            } else {
                // Leaf columns fill the space of the second header row.
                top.push(HeaderCell::from_def(def, 1, 2));
            }
        }
        Self {
            rows: vec![top, bottom],
        }
    }

    /// Number of header rows (1 or 2).
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Leaf columns covered by the header.
    pub fn width(&self) -> usize {
        self.rows
            .first()
            .map_or(0, |row| row.iter().map(|cell| cell.col_span).sum())
    }
}

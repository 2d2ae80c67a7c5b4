use crate::types::ColumnDef;

/// Table sizing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSizing {
    /// Columns size to content; the table fills at least the container width.
    Auto,
    /// Fixed table layout with one CSS width slot per leaf column.
    Fixed(Vec<Option<String>>),
}

impl TableSizing {
    pub fn for_columns(auto_width: bool, flat_columns: &[ColumnDef]) -> Self {
        if auto_width {
            return Self::Auto;
        }
        Self::Fixed(
            flat_columns
                .iter()
                .map(|col| col.width.as_ref().map(|w| w.to_css()))
                .collect(),
        )
    }
}

//! A grid described as one JSON document.
//!
//! ```json
//! {
//!   "options": { "autoWidth": false },
//!   "columns": [{ "field": "id", "headerName": "ID" }],
//!   "rows": [{ "id": 1 }],
//!   "requiredColumns": ["id"],
//!   "pagination": { "pageNo": 1, "pageRow": 10, "totalRecord": 1 }
//! }
//! ```

use crate::config::GridOptions;
use crate::error::Result;
use crate::grid::{Grid, PaginationState};
use crate::render::Surface;
use crate::types::{ColumnDef, Row};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridDocument {
    pub options: GridOptions,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Row>,
    pub required_columns: Vec<String>,
    pub pagination: Option<PaginationState>,
}

impl GridDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: Self = serde_json::from_str(json)?;
        document.options = document.options.validate()?;
        Ok(document)
    }

    /// Keep only page `page_no` of the rows and describe it as pagination.
    ///
    /// The page size comes from the document's pagination, falling back to
    /// the first page-size choice.
    pub fn select_page(&mut self, page_no: u32) {
        let page_row = self
            .pagination
            .map(|p| p.page_row)
            .filter(|size| *size > 0)
            .or_else(|| self.options.page_size_choices.first().copied())
            .unwrap_or(10);
        let total = self.rows.len();
        let start = usize::try_from(page_no.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(usize::try_from(page_row).unwrap_or(usize::MAX));
        self.rows = self
            .rows
            .drain(..)
            .skip(start)
            .take(usize::try_from(page_row).unwrap_or(usize::MAX))
            .collect();
        self.pagination = Some(PaginationState::new(
            page_no.max(1),
            page_row,
            u64::try_from(total).unwrap_or(u64::MAX),
            0,
        ));
    }

    /// Build and paint a grid on `surface`.
    pub fn into_grid<S: Surface>(self, surface: S) -> Grid<S> {
        let mut grid = Grid::with_options(surface, self.options);
        grid.set_columns(self.columns);
        grid.set_required_columns(self.required_columns);
        grid.set_rows(self.rows);
        if let Some(pagination) = self.pagination {
            grid.set_pagination(pagination);
        }
        grid
    }
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
    use crate::render::RecordingSurface;
    use crate::types::CellValue;

    const DOC: &str = r#"{
        "columns": [
            {"field": "id", "headerName": "ID"},
            {"headerName": "Person", "children": [
                {"field": "name", "headerName": "Name"},
                {"field": "age", "headerName": "Age", "textAlign": "right"}
            ]}
        ],
        "rows": [{"id": 1, "name": "Ada"}, {"id": 2, "name": ""}, {"id": 3, "name": "Grace"}],
        "requiredColumns": ["name"]
    }"#;

    #[test]
    fn test_document_builds_grid() {
        let grid = GridDocument::from_json(DOC)
            .unwrap()
            .into_grid(RecordingSurface::new());
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.flat_columns().len(), 3);
        assert_eq!(grid.valid_rows().len(), 2);
        assert_eq!(grid.surface().rows.len(), 3);
    }

    #[test]
    fn test_select_page_slices_rows() {
        let mut document = GridDocument::from_json(DOC).unwrap();
        document.pagination = Some(PaginationState::new(1, 2, 0, 0));
        document.select_page(2);
        assert_eq!(document.rows.len(), 1);
        assert_eq!(document.rows[0].value("id"), CellValue::from(3));
        let pagination = document.pagination.unwrap();
        assert_eq!(pagination.total_pages(), 2);
        assert_eq!(pagination.page_no, 2);
    }

    #[test]
    fn test_invalid_options_rejected() {
        assert!(GridDocument::from_json(r#"{"options": {"pageSizeChoices": []}}"#).is_err());
    }
}

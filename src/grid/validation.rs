//! Required-column validation and the auto-add-row policy.

use crate::types::{Edge, Row, RowHandle};

/// Fields that must hold a non-blank value for a row to be valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredColumns(Vec<String>);

impl RequiredColumns {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// With no required fields every row is valid.
    pub fn is_satisfied_by(&self, row: &Row) -> bool {
        self.0
            .iter()
            .all(|field| row.get(field).is_some_and(|value| !value.is_blank()))
    }
}

/// Self-extension policy: once the edge row is filled and valid, a blank row
/// is added at that edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoAddRow {
    pub enabled: bool,
    pub edge: Edge,
}

impl AutoAddRow {
    pub fn new(enabled: bool, edge: Edge) -> Self {
        Self { enabled, edge }
    }

    /// The row currently at the policy's edge.
    pub fn edge_row<'a>(&self, rows: &'a [RowHandle]) -> Option<&'a RowHandle> {
        match self.edge {
            Edge::Start => rows.first(),
            Edge::End => rows.last(),
        }
    }

    /// Whether editing `edited` should add a blank row.
    ///
    /// Only the edge row counts, it must be filled (some field non-blank) and
    /// valid. A freshly inserted blank row is never filled, so the check does
    /// not retrigger on its own insertion.
    pub fn should_extend(
        &self,
        edited: &RowHandle,
        rows: &[RowHandle],
        required: &RequiredColumns,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(edge_row) = self.edge_row(rows) else {
            return false;
        };
        if !edge_row.ptr_eq(edited) {
            return false;
        }
        let row = edited.borrow();
        row.is_filled() && required.is_satisfied_by(&row)
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

    #[test]
    fn test_required_fields_reject_blank_and_missing() {
        let required = RequiredColumns::new(["name"]);
        assert!(!required.is_satisfied_by(&Row::new().with("name", "").with("age", 5)));
        assert!(!required.is_satisfied_by(&Row::new().with("age", 5)));
        assert!(required.is_satisfied_by(&Row::new().with("name", "x").with("age", 5)));
        assert!(RequiredColumns::default().is_satisfied_by(&Row::new()));
    }

    #[test]
    fn test_only_edge_row_extends() {
        let rows: Vec<RowHandle> = vec![
            Row::new().with("sku", "A").into(),
            Row::new().with("sku", "B").into(),
        ];
        let policy = AutoAddRow::new(true, Edge::End);
        let required = RequiredColumns::new(["sku"]);
        assert!(policy.should_extend(&rows[1], &rows, &required));
        assert!(!policy.should_extend(&rows[0], &rows, &required));
        assert!(AutoAddRow::new(true, Edge::Start).should_extend(&rows[0], &rows, &required));
        assert!(!AutoAddRow::new(false, Edge::End).should_extend(&rows[1], &rows, &required));
    }
}

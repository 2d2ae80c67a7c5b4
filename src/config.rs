//! Grid options.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

/// Presentation options fixed at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Size the table to its content. When false, columns use fixed widths.
    pub auto_width: bool,
    /// Choices offered by the page-size selector.
    pub page_size_choices: Vec<u32>,
    /// Distance from the bottom of the scroll extent that triggers load-more.
    pub scroll_threshold: f64,
    pub empty_text: String,
    /// Banner text used when an error is reported without a message.
    pub error_text: String,
    pub page_size_label: String,
    /// Skeleton lines drawn by the busy placeholder.
    pub busy_lines: u32,
    /// Default key field for deleting rows by key.
    pub key_field: String,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            auto_width: true,
            page_size_choices: vec![10, 20, 50],
            scroll_threshold: 50.0,
            empty_text: "No data available".to_string(),
            error_text: "Error loading data".to_string(),
            page_size_label: "Rows per page".to_string(),
            busy_lines: 3,
            key_field: "id".to_string(),
        }
    }
}

impl GridOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()
    }

    /// Reject option sets the grid cannot render.
    pub fn validate(self) -> Result<Self> {
        if self.page_size_choices.is_empty() {
            return Err(GridError::Config("pageSizeChoices must not be empty".into()));
        }
        if self.page_size_choices.contains(&0) {
            return Err(GridError::Config("page sizes must be positive".into()));
        }
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            return Err(GridError::Config(format!(
                "scrollThreshold must be a non-negative number, got {}",
                self.scroll_threshold
            )));
        }
        Ok(self)
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
    fn test_defaults_fill_missing_fields() {
        let options = GridOptions::from_json(r#"{"autoWidth": false}"#).unwrap();
        assert!(!options.auto_width);
        assert_eq!(options.page_size_choices, vec![10, 20, 50]);
        assert_eq!(options.scroll_threshold, 50.0);
        assert_eq!(options.key_field, "id");
    }

    #[test]
    fn test_rejects_empty_page_sizes() {
        let err = GridOptions::from_json(r#"{"pageSizeChoices": []}"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }
}

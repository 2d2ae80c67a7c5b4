//! Loading / error / empty presentation.
//!
//! The load state is what the caller last reported; the overlay is what the
//! body shows on top of (or instead of) the data rows. At most one overlay is
//! visible, which the enum makes structural.

use crate::config::GridOptions;

/// Data-fetch state reported by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    /// A fetch is in flight. `keep_rows` is set for append-style fetches that
    /// leave the current rows visible.
    Loading { keep_rows: bool },
    /// The last fetch failed; rows were discarded.
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// The single placeholder or banner currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    /// Data rows only.
    #[default]
    None,
    /// Full-width "no data" row.
    Empty { span: usize, text: String },
    /// Full-width busy skeleton row, below the data rows when `below_rows`.
    Busy {
        span: usize,
        lines: u32,
        below_rows: bool,
    },
    /// Banner above the body.
    Error { message: String },
}

impl Overlay {
    /// Overlay implied by the load state and row count.
    ///
    /// `span` is the number of leaf columns (at least 1).
    pub fn derive(state: &LoadState, row_count: usize, span: usize, options: &GridOptions) -> Self {
        let span = span.max(1);
        match state {
            LoadState::Loading { keep_rows } => Self::Busy {
                span,
                lines: options.busy_lines,
                below_rows: *keep_rows && row_count > 0,
            },
            LoadState::Error(message) => Self::Error {
                message: message.clone(),
            },
            LoadState::Idle if row_count == 0 => Self::Empty {
                span,
                text: options.empty_text.clone(),
            },
            LoadState::Idle => Self::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether the overlay occupies a row of the table body (the error banner
    /// sits outside it).
    pub fn is_body_row(&self) -> bool {
        matches!(self, Self::Empty { .. } | Self::Busy { .. })
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
    fn test_idle_without_rows_is_empty() {
        let options = GridOptions::default();
        assert_eq!(
            Overlay::derive(&LoadState::Idle, 0, 0, &options),
            Overlay::Empty {
                span: 1,
                text: "No data available".into()
            }
        );
        assert_eq!(Overlay::derive(&LoadState::Idle, 3, 4, &options), Overlay::None);
    }

    #[test]
    fn test_error_hides_empty_placeholder() {
        let options = GridOptions::default();
        let overlay = Overlay::derive(&LoadState::Error("boom".into()), 0, 2, &options);
        assert_eq!(overlay, Overlay::Error { message: "boom".into() });
        assert!(!overlay.is_body_row());
    }

    #[test]
    fn test_busy_below_rows_only_when_rows_kept() {
        let options = GridOptions::default();
        let keep = LoadState::Loading { keep_rows: true };
        assert!(matches!(
            Overlay::derive(&keep, 2, 3, &options),
            Overlay::Busy { below_rows: true, span: 3, .. }
        ));
        assert!(matches!(
            Overlay::derive(&keep, 0, 3, &options),
            Overlay::Busy { below_rows: false, .. }
        ));
    }
}

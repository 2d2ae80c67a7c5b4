//! Pagination and infinite scroll.
//!
//! Exactly one paging affordance is visible: the controls bar in
//! [`PagingMode::Paged`], the scroll observer in
//! [`PagingMode::InfiniteScroll`]. Pagination state survives switching modes.

use crate::config::GridOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Callback invoked when the user scrolls near the bottom.
pub type LoadMore = Rc<dyn Fn()>;

/// Server-side paging position reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationState {
    /// 1-based current page.
    pub page_no: u32,
    /// Rows per page.
    pub page_row: u32,
    pub total_record: u64,
    /// Total pages; 0 means "derive from `total_record`".
    pub total_page: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_no: 1,
            page_row: 10,
            total_record: 0,
            total_page: 0,
        }
    }
}

/// A page the user asked for. The caller fetches it and sets rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_no: u32,
    pub page_row: u32,
}

impl PaginationState {
    pub fn new(page_no: u32, page_row: u32, total_record: u64, total_page: u32) -> Self {
        Self {
            page_no,
            page_row,
            total_record,
            total_page,
        }
    }

    /// Page count, derived from the record count when not given.
    pub fn total_pages(&self) -> u32 {
        if self.total_page > 0 || self.total_record == 0 {
            return self.total_page;
        }
        let pages = self.total_record.div_ceil(u64::from(self.page_row.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_previous(&self) -> bool {
        self.page_no > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_no < self.total_pages()
    }

    pub fn previous(self) -> Option<PageRequest> {
        self.has_previous().then(|| PageRequest {
            page_no: self.page_no - 1,
            page_row: self.page_row,
        })
    }

    pub fn next(self) -> Option<PageRequest> {
        self.has_next().then(|| PageRequest {
            page_no: self.page_no + 1,
            page_row: self.page_row,
        })
    }

    /// Same page, different page size.
    pub fn with_page_size(&self, page_row: u32) -> PageRequest {
        PageRequest {
            page_no: self.page_no,
            page_row,
        }
    }
}

/// The pagination controls as painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingBar {
    pub label: String,
    pub page_sizes: Vec<u32>,
    pub page_row: u32,
    pub page_no: u32,
    pub total_pages: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PagingBar {
    pub fn new(state: &PaginationState, options: &GridOptions) -> Self {
        Self {
            label: options.page_size_label.clone(),
            page_sizes: options.page_size_choices.clone(),
            page_row: state.page_row,
            page_no: state.page_no,
            total_pages: state.total_pages(),
            previous_enabled: state.has_previous(),
            next_enabled: state.has_next(),
        }
    }

    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.page_no, self.total_pages)
    }
}

/// Which paging affordance is active.
#[derive(Clone, Default)]
pub enum PagingMode {
    #[default]
    Paged,
    InfiniteScroll { load_more: Option<LoadMore> },
}

impl PagingMode {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::InfiniteScroll { .. })
    }

    pub fn load_more(&self) -> Option<LoadMore> {
        match self {
            Self::InfiniteScroll { load_more } => load_more.as_ref().map(Rc::clone),
            Self::Paged => None,
        }
    }
}

impl fmt::Debug for PagingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paged => f.write_str("Paged"),
            Self::InfiniteScroll { load_more } => f
                .debug_struct("InfiniteScroll")
                .field("load_more", &load_more.is_some())
                .finish(),
        }
    }
}

/// Scroll position of the grid's scrollable region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// The visible bottom edge is within `threshold` of the scroll extent.
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - threshold
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
    fn test_total_pages_derived_from_records() {
        assert_eq!(PaginationState::new(1, 10, 95, 0).total_pages(), 10);
        assert_eq!(PaginationState::new(1, 10, 95, 3).total_pages(), 3);
        assert_eq!(PaginationState::new(1, 0, 5, 0).total_pages(), 5);
        assert_eq!(PaginationState::default().total_pages(), 0);
    }

    #[test]
    fn test_previous_and_next_stop_at_edges() {
        let first = PaginationState::new(1, 10, 30, 0);
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(PageRequest { page_no: 2, page_row: 10 }));

        let last = PaginationState::new(3, 10, 30, 0);
        assert_eq!(last.previous(), Some(PageRequest { page_no: 2, page_row: 10 }));
        assert_eq!(last.next(), None);
        assert_eq!(last.with_page_size(20), PageRequest { page_no: 3, page_row: 20 });
    }

    #[test]
    fn test_near_bottom_threshold() {
        assert!(ScrollMetrics::new(450.0, 1000.0, 500.0).near_bottom(50.0));
        assert!(!ScrollMetrics::new(449.0, 1000.0, 500.0).near_bottom(50.0));
    }
}

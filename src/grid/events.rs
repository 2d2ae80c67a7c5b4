//! Host input and caller-facing events.
//!
//! The host surface reports what the user did as a [`HostEvent`]. The grid
//! applies any state change first, then returns the [`GridEvent`]s the caller
//! should see. Listeners are `Rc` handles so a host can take a snapshot with
//! [`Grid::listeners`](super::Grid::listeners), release its borrow of the
//! grid, and only then invoke them; callbacks may call back into the grid.

use super::paging::{LoadMore, PageRequest, ScrollMetrics};
use crate::types::{CellValue, RowHandle};
use std::fmt;
use std::rc::Rc;

/// User interaction reported by the host surface.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Click on the body row at `index`.
    RowClick { index: usize },
    /// Click on an action button inside the row at `index`.
    ActionClick { index: usize, action: String },
    /// An editor in row `index` committed `raw` for `field`.
    CellInput {
        index: usize,
        field: String,
        raw: String,
    },
    /// Page-size selector changed.
    PageSizeSelected(u32),
    PreviousPage,
    NextPage,
    /// The scrollable region moved.
    Scroll(ScrollMetrics),
}

/// Something the caller should react to.
#[derive(Debug, Clone)]
pub enum GridEvent {
    RowClicked {
        row: RowHandle,
        index: usize,
    },
    PageChangeRequested(PageRequest),
    /// Infinite scroll reached the bottom while idle.
    LoadMore,
    ActionClicked {
        action: String,
        row: RowHandle,
        index: usize,
    },
    CellEdited {
        row: RowHandle,
        index: usize,
        field: String,
        value: CellValue,
    },
}

pub type RowClickListener = Rc<dyn Fn(&RowHandle, usize)>;
pub type PageChangeListener = Rc<dyn Fn(PageRequest)>;
pub type ActionListener = Rc<dyn Fn(&str, &RowHandle, usize)>;
pub type CellEditListener = Rc<dyn Fn(&RowHandle, usize, &str, &CellValue)>;

/// Registered caller callbacks.
#[derive(Clone, Default)]
pub struct Listeners {
    pub(crate) row_click: Option<RowClickListener>,
    pub(crate) page_change: Option<PageChangeListener>,
    pub(crate) action: Option<ActionListener>,
    pub(crate) cell_edit: Option<CellEditListener>,
    pub(crate) load_more: Option<LoadMore>,
}

impl Listeners {
    /// Deliver one event to its listener, if registered.
    pub fn emit(&self, event: &GridEvent) {
        match event {
            GridEvent::RowClicked { row, index } => {
                if let Some(listener) = &self.row_click {
                    listener(row, *index);
                }
            }
            GridEvent::PageChangeRequested(request) => {
                if let Some(listener) = &self.page_change {
                    listener(*request);
                }
            }
            GridEvent::LoadMore => {
                if let Some(listener) = &self.load_more {
                    listener();
                }
            }
            GridEvent::ActionClicked { action, row, index } => {
                if let Some(listener) = &self.action {
                    listener(action, row, *index);
                }
            }
            GridEvent::CellEdited {
                row,
                index,
                field,
                value,
            } => {
                if let Some(listener) = &self.cell_edit {
                    listener(row, *index, field, value);
                }
            }
        }
    }

    pub fn emit_all(&self, events: &[GridEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("row_click", &self.row_click.is_some())
            .field("page_change", &self.page_change.is_some())
            .field("action", &self.action.is_some())
            .field("cell_edit", &self.cell_edit.is_some())
            .field("load_more", &self.load_more.is_some())
            .finish()
    }
}

//! Layout engine for deriving what the grid paints.
//!
//! This module handles:
//! - Header rows with group spans
//! - Body rows with per-cell content and clamped column spans
//! - Table sizing (auto vs fixed column widths)
//!
//! Everything here is a pure function of column definitions and row data.

mod body;
mod header;
mod sizing;

pub use body::{effective_span, layout_row, BodyCell, BodyRow, RowStyler};
pub use header::{HeaderCell, HeaderLayout};
pub use sizing::TableSizing;

//! Host surface trait for pluggable rendering implementations.
//!
//! This module defines the `Surface` trait the grid engine paints through,
//! allowing different hosts (DOM table, in-memory recording, text) to be used
//! interchangeably. The engine decides *what* changed; a surface only mirrors
//! it.

use crate::error::Result;
use crate::grid::{Overlay, PagingBar};
use crate::layout::{BodyRow, HeaderLayout, TableSizing};
use crate::types::Edge;

/// Trait for host surfaces
///
/// Body rows are addressed by their position among data rows; overlay rows
/// (busy / empty placeholders) are managed separately through
/// [`Surface::paint_overlay`] and never count toward that position.
pub trait Surface {
    /// Replace the header and column sizing.
    fn paint_header(&mut self, header: &HeaderLayout, sizing: &TableSizing) -> Result<()>;

    /// Replace every data row.
    fn paint_body(&mut self, rows: &[BodyRow]) -> Result<()>;

    /// Add rows at one edge, keeping the rows already painted.
    fn insert_rows(&mut self, edge: Edge, rows: &[BodyRow]) -> Result<()>;

    /// Remove the data row at `index`.
    fn remove_row(&mut self, index: usize) -> Result<()>;

    /// Show `overlay`, clearing whichever overlay was shown before.
    fn paint_overlay(&mut self, overlay: &Overlay) -> Result<()>;

    /// Show the paging controls, or hide them with `None`.
    ///
    /// Hiding must not lose anything the host needs to show them again.
    fn paint_paging(&mut self, bar: Option<&PagingBar>) -> Result<()>;

    /// Start reporting scroll positions of the scrollable region.
    fn attach_scroll_observer(&mut self) -> Result<()>;

    /// Stop reporting scroll positions. Must be idempotent.
    fn detach_scroll_observer(&mut self);
}

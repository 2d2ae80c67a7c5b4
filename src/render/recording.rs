//! In-memory surface that keeps a model of what has been painted.
//!
//! Used by tests and the CLI in place of a DOM.

use super::backend::Surface;
use crate::error::{GridError, Result};
use crate::grid::{Overlay, PagingBar};
use crate::layout::{BodyRow, HeaderLayout, TableSizing};
use crate::types::Edge;

/// One call made on the surface, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    PaintHeader,
    PaintBody(usize),
    InsertRows(Edge, usize),
    RemoveRow(usize),
    PaintOverlay,
    ShowPaging,
    HidePaging,
    AttachScroll,
    DetachScroll,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub header: Option<HeaderLayout>,
    pub sizing: Option<TableSizing>,
    pub rows: Vec<BodyRow>,
    pub overlay: Overlay,
    /// Last paging bar painted; kept while hidden.
    pub paging: Option<PagingBar>,
    pub paging_visible: bool,
    pub scroll_observed: bool,
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the op log, keeping painted state.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of body rows a user would see, placeholders included.
    pub fn visible_body_rows(&self) -> usize {
        self.rows.len() + usize::from(self.overlay.is_body_row())
    }

    fn reindex(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.index = i;
        }
    }
}

impl Surface for RecordingSurface {
    fn paint_header(&mut self, header: &HeaderLayout, sizing: &TableSizing) -> Result<()> {
        self.header = Some(header.clone());
        self.sizing = Some(sizing.clone());
        self.ops.push(SurfaceOp::PaintHeader);
        Ok(())
    }

    fn paint_body(&mut self, rows: &[BodyRow]) -> Result<()> {
        self.rows = rows.to_vec();
        self.ops.push(SurfaceOp::PaintBody(rows.len()));
        Ok(())
    }

    fn insert_rows(&mut self, edge: Edge, rows: &[BodyRow]) -> Result<()> {
        match edge {
            Edge::Start => {
                self.rows.splice(0..0, rows.iter().cloned());
            }
            Edge::End => self.rows.extend_from_slice(rows),
        }
        // Rows painted earlier keep their content; only positions move.
        self.reindex();
        self.ops.push(SurfaceOp::InsertRows(edge, rows.len()));
        Ok(())
    }

    fn remove_row(&mut self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(GridError::Render(format!(
                "no painted row at {index} ({} rows)",
                self.rows.len()
            )));
        }
        self.rows.remove(index);
        self.reindex();
        self.ops.push(SurfaceOp::RemoveRow(index));
        Ok(())
    }

    fn paint_overlay(&mut self, overlay: &Overlay) -> Result<()> {
        self.overlay = overlay.clone();
        self.ops.push(SurfaceOp::PaintOverlay);
        Ok(())
    }

    fn paint_paging(&mut self, bar: Option<&PagingBar>) -> Result<()> {
        match bar {
            Some(bar) => {
                self.paging = Some(bar.clone());
                self.paging_visible = true;
                self.ops.push(SurfaceOp::ShowPaging);
            }
            None => {
                self.paging_visible = false;
                self.ops.push(SurfaceOp::HidePaging);
            }
        }
        Ok(())
    }

    fn attach_scroll_observer(&mut self) -> Result<()> {
        self.scroll_observed = true;
        self.ops.push(SurfaceOp::AttachScroll);
        Ok(())
    }

    fn detach_scroll_observer(&mut self) {
        if self.scroll_observed {
            self.scroll_observed = false;
            self.ops.push(SurfaceOp::DetachScroll);
        }
    }
}

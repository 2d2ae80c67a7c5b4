//! gridview - data grid for the web
//!
//! A table widget engine driven from JavaScript via WebAssembly:
//! - Grouped headers, column spans and per-cell renderers
//! - Paginated or infinitely scrolling bodies
//! - Busy, error and "no data" presentation
//! - Required-column validation and self-extending editable tables
//!
//! The engine ([`grid::Grid`]) is host-agnostic and paints through a
//! [`render::Surface`]. In the browser the surface is a DOM table; tests and
//! the CLI use an in-memory recording surface.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const grid = new GridView(document.getElementById('grid'), { autoWidth: true });
//! grid.setColumns([{ field: 'id', headerName: 'ID' }, { field: 'name', headerName: 'Name' }]);
//! grid.setOnPageChange((pageNo, pageRow) => fetchPage(pageNo, pageRow));
//! grid.setLoading(true);
//! grid.setRows(await fetchPage(1, 10));
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use gridview::grid::Grid;
//! use gridview::render::RecordingSurface;
//! use gridview::types::{ColumnDef, Row};
//!
//! let mut grid = Grid::new(RecordingSurface::new());
//! grid.set_columns(vec![ColumnDef::new("id", "ID")]);
//! grid.set_rows([Row::new().with("id", 1)]);
//! assert_eq!(grid.surface().rows.len(), 1);
//! ```

pub mod config;
pub mod document;
pub mod editors;
pub mod error;
pub mod grid;
pub mod layout;
pub mod logging;
pub mod render;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

pub use config::GridOptions;
pub use document::GridDocument;
pub use error::{GridError, Result};
pub use grid::{Grid, GridEvent, HostEvent};

/// Render a grid document (see [`GridDocument`]) as a plain-text table.
///
/// # Errors
/// Returns an error if the document is not valid JSON or has invalid options.
#[wasm_bindgen(js_name = "renderText")]
pub fn render_text(json: &str) -> std::result::Result<String, JsValue> {
    let grid = GridDocument::from_json(json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .into_grid(render::RecordingSurface::new());
    Ok(render::render_text(grid.surface()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

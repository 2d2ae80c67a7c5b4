//! Structured error types for gridview.
//!
//! Errors only arise at decoding boundaries (JSON, `JsValue`) and while
//! building DOM elements. Data-shape problems inside rows never error.

/// All errors that can occur while configuring or painting a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid options or column configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON decoding error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The grid was constructed without a host element to render into.
    #[error("No host element supplied for the grid")]
    MissingSurface,

    /// A surface operation failed.
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for GridError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::Config(e.to_string())
    }
}

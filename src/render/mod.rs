//! Host surfaces the grid paints through.
//!
//! This module provides:
//! - The [`Surface`] trait the engine drives
//! - [`RecordingSurface`], an in-memory surface for tests and the CLI
//! - Plain-text rendering of a recorded surface
//! - The DOM table surface (wasm32 only)

pub mod backend;
pub mod recording;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use backend::Surface;
pub use recording::{RecordingSurface, SurfaceOp};
pub use text::render_text;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomSurface, HostSink};

//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the layer
//! above it. Runtime internals stay private; the app sees one `FrameCtx` per frame.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, RenderResult, WindowCtx};

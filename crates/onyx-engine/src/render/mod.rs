//! GPU rendering.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The vertex shader converts to NDC using a viewport uniform.

mod ctx;
mod fill;

pub use ctx::{RenderCtx, RenderTarget};
pub use fill::FillRenderer;

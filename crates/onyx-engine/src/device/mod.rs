//! GPU device + surface management.
//!
//! Creates the wgpu instance/adapter/device/queue for the window, keeps the
//! surface configured across resizes, and hands out one frame at a time.

mod frame;
mod gpu;
mod init;
mod surface;

pub use frame::{GpuFrame, SurfaceErrorAction};
pub use gpu::Gpu;
pub use init::GpuInit;

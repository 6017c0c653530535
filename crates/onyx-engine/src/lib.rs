//! Onyx engine crate.
//!
//! Owns the platform pieces the `onyx` lifecycle layer sits on: the winit
//! window and event loop, the wgpu surface, input translation, frame timing,
//! and a solid-fill draw list with its GPU renderer.

pub mod coords;
pub mod core;
pub mod device;
pub mod draw;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

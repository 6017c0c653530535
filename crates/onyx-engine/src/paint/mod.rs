//! Paint model shared by scenes, components and renderers.
//!
//! Only solid colors exist: every draw command is a solid fill.

mod color;

pub use color::Color;

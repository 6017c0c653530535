//! Draw stream types.
//!
//! - `Surface` is what components paint into during a frame
//! - `DrawList` stores the recorded solid fills with deterministic ordering
//!   (z-index, then insertion order)
//!
//! Nothing here touches the GPU; `render::FillRenderer` consumes the list.

mod list;
mod order;
mod surface;

pub use list::{DrawItem, DrawList, FillCmd};
pub use order::{SortKey, ZIndex};
pub use surface::Surface;

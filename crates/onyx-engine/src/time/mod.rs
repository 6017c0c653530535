//! Time subsystem.
//!
//! - `FrameClock` measures the delta between presented frames.
//! - `FramePacer` decides when the next frame is due for a target rate.
//!
//! Neither type touches the runtime, so both can be driven with synthetic instants.

mod frame_clock;
mod frame_pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_pacer::FramePacer;

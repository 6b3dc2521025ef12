//! Time subsystem.
//!
//! One `FrameClock` per frame loop; call a tick method once per presented frame
//! to obtain `FrameTime`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};

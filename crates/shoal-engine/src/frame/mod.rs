//! Per-frame pipeline: the animation loop and the scheduler that drives it.
//!
//! One tick of [`AnimationLoop`] clears the surface, advances the simulation,
//! then draws every food followed by every organism. [`FrameScheduler`] owns
//! the start/stop lifecycle and fires ticks until stopped.

mod animation;
mod scheduler;
mod visualization;

pub use animation::{AnimationLoop, TickReport};
pub use scheduler::{FrameScheduler, FrameTask, LoopState, StopToken};
pub use visualization::Visualization;

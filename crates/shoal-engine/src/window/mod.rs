//! Native window runtime.
//!
//! Owns the `winit` event loop and one window wired to a GPU surface, and
//! requests a redraw for every display frame.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};

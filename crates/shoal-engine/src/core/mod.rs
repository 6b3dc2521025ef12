//! Core engine-facing contracts.
//!
//! [`AppControl`] is shared by every frame callback. With the `native`
//! feature, [`App`] and the per-frame contexts form the interface between the
//! winit runtime and the host application.

mod control;

#[cfg(feature = "native")]
mod app;
#[cfg(feature = "native")]
mod ctx;

pub use control::AppControl;

#[cfg(feature = "native")]
pub use app::App;
#[cfg(feature = "native")]
pub use ctx::{FrameCtx, WindowCtx};

//! wgpu device and window swapchain.
//!
//! [`Gpu`] owns the device, queue and the surface for one window; frames are
//! acquired as [`GpuFrame`]s and surface errors map to a [`SurfaceErrorAction`].

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;

//! GPU presentation of the CPU-rasterized surface.
//!
//! The visualization is drawn on the CPU into a pixmap; this module uploads
//! it to a texture and draws it over the window with nearest sampling, so
//! physical pixels map one-to-one without smoothing.

mod blit;
mod ctx;

pub use blit::PixmapBlitter;
pub use ctx::{RenderCtx, RenderTarget};

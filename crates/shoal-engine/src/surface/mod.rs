//! Drawing surface and its host.
//!
//! A [`Surface`] owns the physical backing buffer and the drawing context bound
//! to it. A [`SurfaceHost`] locates surfaces by id and reports the window
//! metrics they are sized from. [`ViewportManager`] keeps the two in step.

mod error;
mod manager;
mod raster;
mod recording;

pub use error::InitError;
pub use manager::ViewportManager;
pub use raster::{RasterHost, RasterSurface};
pub use recording::{RecordingHost, RecordingSurface};

use crate::canvas::Canvas2d;
use crate::coords::WindowMetrics;

/// Well-known id of the visualization surface.
pub const VIEWPORT_SURFACE_ID: &str = "viewport";

/// Host element that owns a backing buffer and a 2D context.
pub trait Surface {
    type Canvas: Canvas2d;

    /// Sets the backing buffer size in physical pixels.
    ///
    /// Resets every drawing-context state (transform, styles, save stack),
    /// whether or not the size changed.
    fn set_backing_size(&mut self, width: u32, height: u32);

    fn backing_size(&self) -> (u32, u32);

    /// Sets the on-screen size in logical pixels.
    fn set_display_size(&mut self, width: f32, height: f32);

    fn display_size(&self) -> (f32, f32);

    fn canvas(&mut self) -> &mut Self::Canvas;
}

/// Environment that owns surfaces and reports window metrics.
pub trait SurfaceHost {
    type Surface: Surface;

    /// Looks up the surface with `id` and acquires its 2D context.
    fn find_surface(&mut self, id: &str) -> Result<Self::Surface, InitError>;

    /// Current window size and device pixel ratio.
    fn metrics(&self) -> WindowMetrics;
}

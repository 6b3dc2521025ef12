use crate::canvas::RecordingCanvas;
use crate::coords::WindowMetrics;

use super::{InitError, Surface, SurfaceHost, VIEWPORT_SURFACE_ID};

/// Headless surface over a [`RecordingCanvas`].
#[derive(Debug, Default)]
pub struct RecordingSurface {
    backing: (u32, u32),
    display: (f32, f32),
    canvas: RecordingCanvas,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn canvas_ref(&self) -> &RecordingCanvas {
        &self.canvas
    }
}

impl Surface for RecordingSurface {
    type Canvas = RecordingCanvas;

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
        self.canvas.reset();
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_display_size(&mut self, width: f32, height: f32) {
        self.display = (width, height);
    }

    fn display_size(&self) -> (f32, f32) {
        self.display
    }

    fn canvas(&mut self) -> &mut RecordingCanvas {
        &mut self.canvas
    }
}

/// Scriptable host for [`RecordingSurface`]s.
///
/// Exposes one surface id (by default [`VIEWPORT_SURFACE_ID`]) and reports
/// whatever metrics it was last given.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    metrics: WindowMetrics,
    surface_id: String,
    context_available: bool,
}

impl RecordingHost {
    pub fn new(metrics: WindowMetrics) -> Self {
        Self {
            metrics,
            surface_id: VIEWPORT_SURFACE_ID.to_string(),
            context_available: true,
        }
    }

    pub fn with_surface_id(mut self, id: impl Into<String>) -> Self {
        self.surface_id = id.into();
        self
    }

    /// The surface exists but refuses a 2D context.
    pub fn without_context(mut self) -> Self {
        self.context_available = false;
        self
    }
}

impl SurfaceHost for RecordingHost {
    type Surface = RecordingSurface;

    fn find_surface(&mut self, id: &str) -> Result<RecordingSurface, InitError> {
        if id != self.surface_id {
            return Err(InitError::SurfaceNotFound { id: id.to_string() });
        }
        if !self.context_available {
            return Err(InitError::ContextUnavailable { id: id.to_string() });
        }
        Ok(RecordingSurface::new())
    }

    fn metrics(&self) -> WindowMetrics {
        self.metrics
    }
}

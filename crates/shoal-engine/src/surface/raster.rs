use crate::canvas::PixmapCanvas;
use crate::coords::WindowMetrics;

use super::{InitError, Surface, SurfaceHost, VIEWPORT_SURFACE_ID};

/// Surface backed by a CPU pixmap, presented by the native runtime.
pub struct RasterSurface {
    display: (f32, f32),
    canvas: PixmapCanvas,
}

impl RasterSurface {
    pub fn new() -> Self {
        Self { display: (0.0, 0.0), canvas: PixmapCanvas::new(0, 0) }
    }

    #[inline]
    pub fn canvas_ref(&self) -> &PixmapCanvas {
        &self.canvas
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RasterSurface {
    type Canvas = PixmapCanvas;

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
    }

    fn backing_size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    fn set_display_size(&mut self, width: f32, height: f32) {
        self.display = (width, height);
    }

    fn display_size(&self) -> (f32, f32) {
        self.display
    }

    fn canvas(&mut self) -> &mut PixmapCanvas {
        &mut self.canvas
    }
}

/// Native window as a surface host: one raster surface with the viewport id.
#[derive(Debug, Copy, Clone)]
pub struct RasterHost {
    metrics: WindowMetrics,
}

impl RasterHost {
    pub fn new(metrics: WindowMetrics) -> Self {
        Self { metrics }
    }
}

impl SurfaceHost for RasterHost {
    type Surface = RasterSurface;

    fn find_surface(&mut self, id: &str) -> Result<RasterSurface, InitError> {
        if id != VIEWPORT_SURFACE_ID {
            return Err(InitError::SurfaceNotFound { id: id.to_string() });
        }
        Ok(RasterSurface::new())
    }

    fn metrics(&self) -> WindowMetrics {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ViewportManager;

    #[test]
    fn raster_backing_follows_device_scale() {
        let mut host = RasterHost::new(WindowMetrics::new(120.0, 80.0, Some(1.5)));
        let mut vm = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).unwrap();
        assert_eq!(vm.surface().backing_size(), (180, 120));

        vm.resize(WindowMetrics::new(10.0, 10.0, Some(3.0))).unwrap();
        assert_eq!(vm.surface().canvas_ref().size(), (30, 30));
        assert_eq!(vm.surface().canvas_ref().transform().mean_scale(), 3.0);
    }

    #[test]
    fn oversized_window_keeps_a_bounded_pixmap() {
        let mut host = RasterHost::new(WindowMetrics::new(100000.0, 2.0, Some(2.0)));
        let mut vm = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).unwrap();
        assert_eq!(vm.surface().canvas_ref().size(), (crate::coords::MAX_BACKING_DIMENSION, 4));

        vm.resize(WindowMetrics::new(2.0, 100000.0, Some(2.0))).unwrap();
        assert_eq!(vm.surface().canvas_ref().size(), (4, crate::coords::MAX_BACKING_DIMENSION));
        assert_eq!(vm.state().logical.height, 100000.0);
    }
}

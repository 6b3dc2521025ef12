use crate::canvas::{Canvas2d, CanvasResult};
use crate::coords::{ViewportState, WindowMetrics, MAX_BACKING_DIMENSION};

use super::{InitError, Surface, SurfaceHost};

/// Keeps a surface's backing buffer and scale transform in step with the window.
///
/// After every [`resize`](Self::resize) the backing buffer is
/// `round(logical × scale)` physical pixels, the display size is the logical
/// size, and the drawing context carries a uniform `scale` transform so that
/// all drawing happens in logical pixels.
pub struct ViewportManager<S> {
    id: String,
    surface: S,
    state: ViewportState,
    image_smoothing: Option<bool>,
}

impl<S: Surface> ViewportManager<S> {
    /// Locates the surface `id` on `host` and sizes it from the host metrics.
    pub fn attach<H>(host: &mut H, id: &str) -> Result<Self, InitError>
    where
        H: SurfaceHost<Surface = S>,
    {
        let surface = host.find_surface(id)?;
        let mut manager = Self {
            id: id.to_string(),
            surface,
            state: ViewportState::default(),
            image_smoothing: None,
        };

        manager.resize(host.metrics())?;

        let (w, h) = manager.surface.backing_size();
        log::info!(
            "surface `{}` attached: {}x{} logical, scale {}, backing {w}x{h}",
            manager.id,
            manager.state.logical.width,
            manager.state.logical.height,
            manager.state.device_scale,
        );

        Ok(manager)
    }

    /// Applies new window metrics.
    ///
    /// Idempotent: repeated calls with the same metrics leave the surface in
    /// the same state.
    pub fn resize(&mut self, metrics: WindowMetrics) -> CanvasResult {
        let state = ViewportState::from_metrics(metrics);
        let (bw, bh) = state.backing_size();
        if state.is_capped() {
            let (rw, rh) = state.requested_size();
            log::warn!(
                "surface `{}` backing {rw}x{rh} exceeds the {MAX_BACKING_DIMENSION}px limit, using {bw}x{bh}",
                self.id,
            );
        }

        self.surface.set_backing_size(bw, bh);
        self.surface.set_display_size(state.logical.width, state.logical.height);
        self.state = state;

        // The backing resize dropped all context state.
        let canvas = self.surface.canvas();
        canvas.reset_transform()?;
        canvas.scale(state.device_scale, state.device_scale)?;
        if let Some(enabled) = self.image_smoothing {
            canvas.set_image_smoothing(enabled);
        }

        log::debug!(
            "surface `{}` resized: {}x{} @ {} -> {bw}x{bh}",
            self.id,
            state.logical.width,
            state.logical.height,
            state.device_scale,
        );
        Ok(())
    }

    /// Sets image smoothing now and after every later resize.
    pub fn set_image_smoothing(&mut self, enabled: bool) {
        self.image_smoothing = Some(enabled);
        self.surface.canvas().set_image_smoothing(enabled);
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[inline]
    pub fn canvas_mut(&mut self) -> &mut S::Canvas {
        self.surface.canvas()
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawOp;
    use crate::coords::{Transform, Viewport};
    use crate::surface::{RecordingHost, VIEWPORT_SURFACE_ID};

    fn host(w: f32, h: f32, dpr: Option<f32>) -> RecordingHost {
        RecordingHost::new(WindowMetrics::new(w, h, dpr))
    }

    #[test]
    fn attach_sizes_backing_buffer() {
        let mut host = host(800.0, 600.0, Some(2.0));
        let vm = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).unwrap();

        assert_eq!(vm.surface().backing_size(), (1600, 1200));
        assert_eq!(vm.surface().display_size(), (800.0, 600.0));
        assert_eq!(vm.state().logical, Viewport::new(800.0, 600.0));
        assert_eq!(vm.surface().canvas_ref().transform(), Transform::from_scale(2.0, 2.0));
    }

    #[test]
    fn missing_ratio_uses_unit_scale() {
        let mut host = host(640.0, 480.0, None);
        let vm = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).unwrap();
        assert_eq!(vm.state().device_scale, 1.0);
        assert_eq!(vm.surface().backing_size(), (640, 480));
    }

    #[test]
    fn missing_surface_fails_fast() {
        let mut host = host(10.0, 10.0, None);
        let err = ViewportManager::attach(&mut host, "elsewhere").err();
        assert_eq!(err, Some(InitError::SurfaceNotFound { id: "elsewhere".into() }));
    }

    #[test]
    fn unavailable_context_fails_fast() {
        let mut host = host(10.0, 10.0, None).without_context();
        let err = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).err();
        assert_eq!(err, Some(InitError::ContextUnavailable { id: VIEWPORT_SURFACE_ID.into() }));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut host = host(800.0, 600.0, Some(2.0));
        let mut vm = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).unwrap();
        let metrics = WindowMetrics::new(1024.0, 768.0, Some(1.5));

        vm.resize(metrics).unwrap();
        let first = (vm.state(), vm.surface().backing_size(), vm.surface().canvas_ref().transform());
        vm.resize(metrics).unwrap();
        let second = (vm.state(), vm.surface().backing_size(), vm.surface().canvas_ref().transform());

        assert_eq!(first, second);
        assert_eq!(second.1, (1536, 1152));
    }

    #[test]
    fn backing_size_is_capped_for_huge_windows() {
        let mut host = host(800.0, 600.0, Some(2.0));
        let mut vm = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).unwrap();
        vm.resize(WindowMetrics::new(100000.0, 100000.0, Some(2.0))).unwrap();

        assert_eq!(vm.surface().backing_size(), (MAX_BACKING_DIMENSION, MAX_BACKING_DIMENSION));
        assert_eq!(vm.surface().display_size(), (100000.0, 100000.0));
        assert_eq!(vm.surface().canvas_ref().transform().mean_scale(), 2.0);
    }

    #[test]
    fn scale_is_not_compounded_across_resizes() {
        let mut host = host(100.0, 100.0, Some(2.0));
        let mut vm = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).unwrap();
        for _ in 0..3 {
            vm.resize(WindowMetrics::new(100.0, 100.0, Some(2.0))).unwrap();
        }
        assert_eq!(vm.surface().canvas_ref().transform().mean_scale(), 2.0);
    }

    #[test]
    fn image_smoothing_survives_resize() {
        let mut host = host(100.0, 100.0, None);
        let mut vm = ViewportManager::attach(&mut host, VIEWPORT_SURFACE_ID).unwrap();
        vm.set_image_smoothing(false);
        vm.canvas_mut().clear_ops();

        vm.resize(WindowMetrics::new(50.0, 50.0, None)).unwrap();
        assert_eq!(vm.surface().canvas_ref().ops().last(), Some(&DrawOp::ImageSmoothing(false)));
    }
}

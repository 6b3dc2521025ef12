use anyhow::Result;

use crate::canvas::CanvasResult;
use crate::config::RenderConfig;
use crate::coords::WindowMetrics;
use crate::core::AppControl;
use crate::surface::{Surface, SurfaceHost, VIEWPORT_SURFACE_ID, ViewportManager};
use crate::time::FrameTime;
use crate::world::Simulation;

use super::{AnimationLoop, FrameTask, TickReport};

/// One animation loop bound to one viewport surface.
pub struct Visualization<S, F> {
    animation: AnimationLoop<S>,
    viewport: ViewportManager<F>,
    last_report: TickReport,
}

impl<S, F> Visualization<S, F>
where
    S: Simulation,
    F: Surface,
{
    pub fn new(animation: AnimationLoop<S>, viewport: ViewportManager<F>) -> Self {
        Self { animation, viewport, last_report: TickReport::default() }
    }

    /// Attaches to the host's `"viewport"` surface and applies `config`.
    pub fn attach<H>(host: &mut H, simulation: S, config: &RenderConfig) -> Result<Self>
    where
        H: SurfaceHost<Surface = F>,
    {
        let animation = AnimationLoop::from_config(simulation, config)?;
        let mut viewport = ViewportManager::attach(host, VIEWPORT_SURFACE_ID)?;
        viewport.set_image_smoothing(config.image_smoothing);
        Ok(Self::new(animation, viewport))
    }

    /// Resize notification from the host.
    pub fn resize(&mut self, metrics: WindowMetrics) -> CanvasResult {
        self.viewport.resize(metrics)
    }

    pub fn tick(&mut self) -> TickReport {
        let logical = self.viewport.state().logical;
        let report = self.animation.tick(self.viewport.canvas_mut(), logical);
        self.last_report = report;
        report
    }

    #[inline]
    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    #[inline]
    pub fn animation(&self) -> &AnimationLoop<S> {
        &self.animation
    }

    #[inline]
    pub fn animation_mut(&mut self) -> &mut AnimationLoop<S> {
        &mut self.animation
    }

    #[inline]
    pub fn viewport(&self) -> &ViewportManager<F> {
        &self.viewport
    }

    #[inline]
    pub fn viewport_mut(&mut self) -> &mut ViewportManager<F> {
        &mut self.viewport
    }
}

impl<S, F> FrameTask for Visualization<S, F>
where
    S: Simulation,
    F: Surface,
{
    fn on_frame(&mut self, _time: &FrameTime) -> AppControl {
        self.tick();
        AppControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawOp;
    use crate::frame::{FrameScheduler, LoopState};
    use crate::surface::{InitError, RecordingHost};
    use crate::world::{Food, WorldSnapshot};

    struct OneFood;

    impl Simulation for OneFood {
        fn step(&mut self) {}

        fn world(&self) -> WorldSnapshot {
            WorldSnapshot { foods: vec![Food::new(0.5, 0.5, "#ff0000")], animals: vec![] }
        }
    }

    fn host() -> RecordingHost {
        RecordingHost::new(WindowMetrics::new(800.0, 600.0, Some(2.0)))
    }

    #[test]
    fn attach_disables_smoothing_by_default() {
        let vis = Visualization::attach(&mut host(), OneFood, &RenderConfig::default()).unwrap();
        let ops = vis.viewport().surface().canvas_ref().ops();
        assert_eq!(ops.last(), Some(&DrawOp::ImageSmoothing(false)));
    }

    #[test]
    fn attach_reports_missing_surface() {
        let mut host = host().with_surface_id("other");
        let err = Visualization::attach(&mut host, OneFood, &RenderConfig::default()).err().unwrap();
        assert_eq!(
            err.downcast_ref::<InitError>(),
            Some(&InitError::SurfaceNotFound { id: VIEWPORT_SURFACE_ID.into() })
        );
    }

    #[test]
    fn scheduler_drives_ticks_until_stopped() {
        let vis = Visualization::attach(&mut host(), OneFood, &RenderConfig::default()).unwrap();
        let mut scheduler = FrameScheduler::new(vis);
        let token = scheduler.start();

        assert_eq!(scheduler.run_frames(4), 4);
        assert_eq!(scheduler.task().animation().ticks(), 4);
        assert_eq!(scheduler.task().last_report().foods_drawn, 1);

        scheduler.stop(&token);
        assert_eq!(scheduler.run_frames(4), 0);
        assert_eq!(scheduler.state(), LoopState::Stopped);
        assert_eq!(scheduler.task().animation().ticks(), 4);
    }

    #[test]
    fn resize_between_ticks_applies_to_next_clear() {
        let mut vis = Visualization::attach(&mut host(), OneFood, &RenderConfig::default()).unwrap();
        vis.resize(WindowMetrics::new(400.0, 300.0, Some(1.0))).unwrap();
        vis.viewport_mut().canvas_mut().clear_ops();
        vis.tick();

        let ops = vis.viewport().surface().canvas_ref().ops();
        match &ops[0] {
            DrawOp::ClearRect { rect, .. } => assert_eq!((rect.size.x, rect.size.y), (400.0, 300.0)),
            other => panic!("expected clear, got {other:?}"),
        }
    }
}

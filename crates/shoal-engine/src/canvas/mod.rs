//! Immediate-mode 2D drawing context.
//!
//! `Canvas2d` is the contract the shape renderer draws against. It mirrors the
//! browser canvas model: a current transform and style state with a save/restore
//! stack, a single current path, and fill/stroke operations that rasterize it.
//!
//! Backends:
//! - [`RecordingCanvas`]: records operations; headless embedding and tests
//! - [`PixmapCanvas`]: CPU rasterizer backed by `tiny-skia`
//!
//! Path coordinates are transformed by the transform current at the time each
//! path command is issued.

mod arc;
mod error;
mod raster;
mod recording;

pub use arc::{arc_sweep, ArcSegment, EllipseArc};
pub use error::CanvasError;
pub use raster::PixmapCanvas;
pub use recording::{DrawOp, RecordingCanvas};

use crate::coords::{Rect, Transform};
use crate::paint::Color;

pub type CanvasResult = Result<(), CanvasError>;

/// Transform and style state covered by `save`/`restore`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct CanvasState {
    pub transform: Transform,
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            fill: Color::black(),
            stroke: Color::black(),
            line_width: 1.0,
        }
    }
}

/// Fails with [`CanvasError::NonFinite`] unless every value is finite.
pub fn check_finite(op: &'static str, values: &[f32]) -> CanvasResult {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CanvasError::NonFinite { op })
    }
}

/// Fails with [`CanvasError::NegativeRadius`] for `radius < 0`.
pub fn check_radius(op: &'static str, radius: f32) -> CanvasResult {
    if radius < 0.0 {
        Err(CanvasError::NegativeRadius { op, radius })
    } else {
        Ok(())
    }
}

/// Host drawing-context contract.
///
/// Transform and path operations may be rejected by a backend (for example a
/// browser context refusing a negative radius); callers treat such failures as
/// local to the primitive being drawn.
pub trait Canvas2d {
    // ── state ────────────────────────────────────────────────────────────

    /// Pushes transform and style state.
    fn save(&mut self);

    /// Pops the most recent [`save`](Self::save). Unbalanced calls are ignored.
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32) -> CanvasResult;
    fn rotate(&mut self, angle: f32) -> CanvasResult;
    fn scale(&mut self, sx: f32, sy: f32) -> CanvasResult;
    fn reset_transform(&mut self) -> CanvasResult;

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn set_image_smoothing(&mut self, enabled: bool);

    // ── pixels ───────────────────────────────────────────────────────────

    /// Sets every pixel inside `rect` (under the current transform) to transparent.
    fn clear_rect(&mut self, rect: Rect);

    // ── path ─────────────────────────────────────────────────────────────

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32) -> CanvasResult;
    fn line_to(&mut self, x: f32, y: f32) -> CanvasResult;
    fn close_path(&mut self);

    /// Circular arc; connects from the current point with a straight line.
    fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    ) -> CanvasResult;

    /// Elliptical arc rotated by `rotation`; connects like [`arc`](Self::arc).
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        rotation: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    ) -> CanvasResult;

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) -> CanvasResult;

    /// Fills the current path (nonzero winding) with the fill color.
    fn fill(&mut self) -> CanvasResult;

    /// Strokes the current path with the stroke color and line width.
    fn stroke(&mut self) -> CanvasResult;
}

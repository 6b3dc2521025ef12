use crate::coords::{Rect, Transform, Vec2};
use crate::paint::Color;

use super::{check_finite, check_radius, Canvas2d, CanvasError, CanvasResult, CanvasState};

/// A single recorded canvas operation.
///
/// Path commands carry the transform that was current when they were issued,
/// so recorded geometry can be mapped to device space after the fact.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Backing store was reset (surface resized); all state returned to defaults.
    Reset,
    Save,
    Restore,
    Transform(Transform),
    ClearRect { rect: Rect, transform: Transform },
    BeginPath,
    MoveTo { to: Vec2, transform: Transform },
    LineTo { to: Vec2, transform: Transform },
    ClosePath,
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
        transform: Transform,
    },
    Ellipse {
        center: Vec2,
        rx: f32,
        ry: f32,
        rotation: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
        transform: Transform,
    },
    QuadraticCurveTo { ctrl: Vec2, to: Vec2, transform: Transform },
    Fill { color: Color },
    Stroke { color: Color, width: f32 },
    ImageSmoothing(bool),
}

/// Canvas backend that records operations instead of rasterizing them.
///
/// Validation mirrors a strict browser context: non-finite arguments and
/// negative radii are rejected with a [`CanvasError`].
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    state: CanvasState,
    stack: Vec<CanvasState>,
}

impl RecordingCanvas {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations in issue order.
    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drops recorded operations, keeping the current state.
    #[inline]
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Returns every state to its default, as a backing-store resize does.
    pub fn reset(&mut self) {
        self.state = CanvasState::default();
        self.stack.clear();
        self.ops.push(DrawOp::Reset);
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// Number of unmatched `save` calls.
    #[inline]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Fill and stroke operations, the units that put pixels on the surface.
    pub fn paint_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Fill { .. } | DrawOp::Stroke { .. }))
    }

    fn set_transform(&mut self, transform: Transform) -> CanvasResult {
        if !transform.is_finite() {
            return Err(CanvasError::NonFinite { op: "transform" });
        }
        self.state.transform = transform;
        self.ops.push(DrawOp::Transform(transform));
        Ok(())
    }
}

impl Canvas2d for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
            self.ops.push(DrawOp::Restore);
        }
    }

    fn translate(&mut self, x: f32, y: f32) -> CanvasResult {
        check_finite("translate", &[x, y])?;
        self.set_transform(self.state.transform.translate(x, y))
    }

    fn rotate(&mut self, angle: f32) -> CanvasResult {
        check_finite("rotate", &[angle])?;
        self.set_transform(self.state.transform.rotate(angle))
    }

    fn scale(&mut self, sx: f32, sy: f32) -> CanvasResult {
        check_finite("scale", &[sx, sy])?;
        self.set_transform(self.state.transform.scale(sx, sy))
    }

    fn reset_transform(&mut self) -> CanvasResult {
        self.set_transform(Transform::identity())
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        // Canvas ignores non-positive and non-finite widths.
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.ops.push(DrawOp::ImageSmoothing(enabled));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::ClearRect { rect, transform: self.state.transform });
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) -> CanvasResult {
        check_finite("move_to", &[x, y])?;
        self.ops.push(DrawOp::MoveTo { to: Vec2::new(x, y), transform: self.state.transform });
        Ok(())
    }

    fn line_to(&mut self, x: f32, y: f32) -> CanvasResult {
        check_finite("line_to", &[x, y])?;
        self.ops.push(DrawOp::LineTo { to: Vec2::new(x, y), transform: self.state.transform });
        Ok(())
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    ) -> CanvasResult {
        check_finite("arc", &[cx, cy, radius, start, end])?;
        check_radius("arc", radius)?;
        self.ops.push(DrawOp::Arc {
            center: Vec2::new(cx, cy),
            radius,
            start,
            end,
            anticlockwise,
            transform: self.state.transform,
        });
        Ok(())
    }

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
    ) -> CanvasResult {
        check_finite("ellipse", &[cx, cy, rx, ry, rotation, start, end])?;
        check_radius("ellipse", rx)?;
        check_radius("ellipse", ry)?;
        self.ops.push(DrawOp::Ellipse {
            center: Vec2::new(cx, cy),
            rx,
            ry,
            rotation,
            start,
            end,
            anticlockwise,
            transform: self.state.transform,
        });
        Ok(())
    }

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) -> CanvasResult {
        check_finite("quadratic_curve_to", &[cpx, cpy, x, y])?;
        self.ops.push(DrawOp::QuadraticCurveTo {
            ctrl: Vec2::new(cpx, cpy),
            to: Vec2::new(x, y),
            transform: self.state.transform,
        });
        Ok(())
    }

    fn fill(&mut self) -> CanvasResult {
        self.ops.push(DrawOp::Fill { color: self.state.fill });
        Ok(())
    }

    fn stroke(&mut self) -> CanvasResult {
        self.ops.push(DrawOp::Stroke { color: self.state.stroke, width: self.state.line_width });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_returns_saved_transform_and_styles() {
        let mut c = RecordingCanvas::new();
        c.scale(2.0, 2.0).unwrap();
        c.save();
        c.translate(10.0, 0.0).unwrap();
        c.set_fill_color(Color::white());
        c.restore();

        assert_eq!(c.transform(), Transform::from_scale(2.0, 2.0));
        c.fill().unwrap();
        assert_eq!(c.ops().last(), Some(&DrawOp::Fill { color: Color::black() }));
    }

    #[test]
    fn unbalanced_restore_is_ignored() {
        let mut c = RecordingCanvas::new();
        c.restore();
        assert_eq!(c.save_depth(), 0);
        assert!(c.ops().is_empty());
    }

    #[test]
    fn reset_drops_state_stack() {
        let mut c = RecordingCanvas::new();
        c.save();
        c.scale(3.0, 3.0).unwrap();
        c.reset();
        assert_eq!(c.save_depth(), 0);
        assert_eq!(c.transform(), Transform::identity());
        assert_eq!(c.ops().last(), Some(&DrawOp::Reset));
    }

    #[test]
    fn rejects_negative_radius_and_nan() {
        let mut c = RecordingCanvas::new();
        assert_eq!(
            c.arc(0.0, 0.0, -1.0, 0.0, 1.0, false),
            Err(CanvasError::NegativeRadius { op: "arc", radius: -1.0 })
        );
        assert_eq!(c.move_to(f32::NAN, 0.0), Err(CanvasError::NonFinite { op: "move_to" }));
        assert!(c.arc(0.0, 0.0, 0.0, 0.0, 1.0, false).is_ok());
    }

    #[test]
    fn line_width_ignores_invalid_values() {
        let mut c = RecordingCanvas::new();
        c.set_line_width(0.0);
        c.set_line_width(f32::NAN);
        c.stroke().unwrap();
        assert_eq!(c.ops().last(), Some(&DrawOp::Stroke { color: Color::black(), width: 1.0 }));
    }
}

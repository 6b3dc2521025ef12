use tiny_skia::{BlendMode, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke};

use crate::coords::{Rect, Transform, Vec2, MAX_BACKING_DIMENSION};
use crate::paint::Color;

use super::arc::{arc_sweep, EllipseArc};
use super::{check_finite, check_radius, Canvas2d, CanvasError, CanvasResult, CanvasState};

/// Device-space path command.
#[derive(Debug, Copy, Clone)]
enum PathCmd {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo(Vec2, Vec2),
    CubicTo(Vec2, Vec2, Vec2),
    Close,
}

/// CPU raster canvas backed by a `tiny-skia` pixmap.
///
/// Path points are transformed into device pixels as they are issued. Stroke
/// widths are scaled by the geometric-mean scale of the transform current at
/// `stroke` time, which is exact for the uniform scales and rotations used here.
///
/// A zero-sized canvas has no pixmap; every operation still updates state but
/// nothing is rasterized.
pub struct PixmapCanvas {
    pixmap: Option<Pixmap>,
    state: CanvasState,
    stack: Vec<CanvasState>,
    path: Vec<PathCmd>,
    current: Option<Vec2>,
    subpath_start: Option<Vec2>,
    image_smoothing: bool,
}

impl PixmapCanvas {
    /// Each edge is capped at [`MAX_BACKING_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width.min(MAX_BACKING_DIMENSION), height.min(MAX_BACKING_DIMENSION));
        Self {
            pixmap: Pixmap::new(width, height),
            state: CanvasState::default(),
            stack: Vec::new(),
            path: Vec::new(),
            current: None,
            subpath_start: None,
            image_smoothing: true,
        }
    }

    /// Replaces the backing store. All pixels and state are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[inline]
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Backing size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        self.pixmap.as_ref().map_or((0, 0), |p| (p.width(), p.height()))
    }

    /// Premultiplied RGBA8 bytes, row-major, or an empty slice when zero-sized.
    pub fn data(&self) -> &[u8] {
        self.pixmap.as_ref().map_or(&[], |p| p.data())
    }

    /// Straight-alpha RGBA of one physical pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    #[inline]
    pub fn image_smoothing(&self) -> bool {
        self.image_smoothing
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Transform) -> CanvasResult {
        if !transform.is_finite() {
            return Err(CanvasError::NonFinite { op: "transform" });
        }
        self.state.transform = transform;
        Ok(())
    }

    fn to_device(&self, x: f32, y: f32) -> Vec2 {
        self.state.transform.apply(Vec2::new(x, y))
    }

    fn push_move(&mut self, p: Vec2) {
        self.path.push(PathCmd::MoveTo(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn push_line(&mut self, p: Vec2) {
        if self.current.is_none() {
            self.push_move(p);
            return;
        }
        self.path.push(PathCmd::LineTo(p));
        self.current = Some(p);
    }

    fn push_arc(&mut self, arc: EllipseArc) {
        let t = self.state.transform;
        self.push_line(t.apply(arc.start_point()));
        for seg in arc.segments() {
            self.path.push(PathCmd::CubicTo(t.apply(seg.ctrl1), t.apply(seg.ctrl2), t.apply(seg.to)));
        }
        self.current = Some(t.apply(arc.end_point()));
    }

    fn build_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        for cmd in &self.path {
            match *cmd {
                PathCmd::MoveTo(p) => pb.move_to(p.x, p.y),
                PathCmd::LineTo(p) => pb.line_to(p.x, p.y),
                PathCmd::QuadTo(c, p) => pb.quad_to(c.x, c.y, p.x, p.y),
                PathCmd::CubicTo(c1, c2, p) => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathCmd::Close => pb.close(),
            }
        }
        // `None` for empty or zero-area paths: nothing to draw.
        pb.finish()
    }
}

fn solid_paint(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgb_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

impl Canvas2d for PixmapCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
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
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.image_smoothing = enabled;
    }

    fn clear_rect(&mut self, rect: Rect) {
        if !rect.is_finite() {
            return;
        }
        let t = self.state.transform;
        let Some(pixmap) = self.pixmap.as_mut() else { return };

        let [p0, p1, p2, p3] = rect.normalized().corners().map(|c| t.apply(c));
        let mut pb = PathBuilder::new();
        pb.move_to(p0.x, p0.y);
        pb.line_to(p1.x, p1.y);
        pb.line_to(p2.x, p2.y);
        pb.line_to(p3.x, p3.y);
        pb.close();
        let Some(path) = pb.finish() else { return };

        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        paint.anti_alias = false;
        pixmap.fill_path(&path, &paint, FillRule::Winding, tiny_skia::Transform::identity(), None);
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, x: f32, y: f32) -> CanvasResult {
        check_finite("move_to", &[x, y])?;
        let p = self.to_device(x, y);
        self.push_move(p);
        Ok(())
    }

    fn line_to(&mut self, x: f32, y: f32) -> CanvasResult {
        check_finite("line_to", &[x, y])?;
        let p = self.to_device(x, y);
        self.push_line(p);
        Ok(())
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.path.push(PathCmd::Close);
            self.current = self.subpath_start;
        }
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
        self.push_arc(EllipseArc {
            center: Vec2::new(cx, cy),
            rx: radius,
            ry: radius,
            rotation: 0.0,
            start,
            sweep: arc_sweep(start, end, anticlockwise),
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
        self.push_arc(EllipseArc {
            center: Vec2::new(cx, cy),
            rx,
            ry,
            rotation,
            start,
            sweep: arc_sweep(start, end, anticlockwise),
        });
        Ok(())
    }

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) -> CanvasResult {
        check_finite("quadratic_curve_to", &[cpx, cpy, x, y])?;
        let ctrl = self.to_device(cpx, cpy);
        let to = self.to_device(x, y);
        if self.current.is_none() {
            self.push_move(ctrl);
        }
        self.path.push(PathCmd::QuadTo(ctrl, to));
        self.current = Some(to);
        Ok(())
    }

    fn fill(&mut self) -> CanvasResult {
        let Some(path) = self.build_path() else { return Ok(()) };
        let paint = solid_paint(self.state.fill);
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, tiny_skia::Transform::identity(), None);
        }
        Ok(())
    }

    fn stroke(&mut self) -> CanvasResult {
        let width = self.state.line_width * self.state.transform.mean_scale();
        if !(width.is_finite() && width > 0.0) {
            return Ok(());
        }
        let Some(path) = self.build_path() else { return Ok(()) };
        let paint = solid_paint(self.state.stroke);
        let stroke = Stroke { width, ..Stroke::default() };
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
        }
        Ok(())
    }
}

use shoal_engine::canvas::{Canvas2d, CanvasError, CanvasResult, check_finite, check_radius};
use shoal_engine::coords::Rect;
use shoal_engine::paint::Color;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// [`Canvas2d`] over a browser `CanvasRenderingContext2d`.
///
/// Browsers silently drop non-finite arguments; this adapter rejects them up
/// front so every backend reports the same failures.
pub struct CanvasContext {
    ctx: CanvasRenderingContext2d,
}

impl CanvasContext {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    #[inline]
    pub fn raw(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

fn backend(op: &'static str) -> impl FnOnce(JsValue) -> CanvasError {
    move |err| CanvasError::Backend {
        op,
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

impl Canvas2d for CanvasContext {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) -> CanvasResult {
        check_finite("translate", &[x, y])?;
        self.ctx.translate(x.into(), y.into()).map_err(backend("translate"))
    }

    fn rotate(&mut self, angle: f32) -> CanvasResult {
        check_finite("rotate", &[angle])?;
        self.ctx.rotate(angle.into()).map_err(backend("rotate"))
    }

    fn scale(&mut self, sx: f32, sy: f32) -> CanvasResult {
        check_finite("scale", &[sx, sy])?;
        self.ctx.scale(sx.into(), sy.into()).map_err(backend("scale"))
    }

    fn reset_transform(&mut self) -> CanvasResult {
        self.ctx.reset_transform().map_err(backend("reset_transform"))
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width.into());
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.ctx.set_image_smoothing_enabled(enabled);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Rect { origin, size } = rect;
        self.ctx.clear_rect(origin.x.into(), origin.y.into(), size.x.into(), size.y.into());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) -> CanvasResult {
        check_finite("move_to", &[x, y])?;
        self.ctx.move_to(x.into(), y.into());
        Ok(())
    }

    fn line_to(&mut self, x: f32, y: f32) -> CanvasResult {
        check_finite("line_to", &[x, y])?;
        self.ctx.line_to(x.into(), y.into());
        Ok(())
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
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
        self.ctx
            .arc_with_anticlockwise(cx.into(), cy.into(), radius.into(), start.into(), end.into(), anticlockwise)
            .map_err(backend("arc"))
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
        self.ctx
            .ellipse_with_anticlockwise(
                cx.into(),
                cy.into(),
                rx.into(),
                ry.into(),
                rotation.into(),
                start.into(),
                end.into(),
                anticlockwise,
            )
            .map_err(backend("ellipse"))
    }

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) -> CanvasResult {
        check_finite("quadratic_curve_to", &[cpx, cpy, x, y])?;
        self.ctx.quadratic_curve_to(cpx.into(), cpy.into(), x.into(), y.into());
        Ok(())
    }

    fn fill(&mut self) -> CanvasResult {
        self.ctx.fill();
        Ok(())
    }

    fn stroke(&mut self) -> CanvasResult {
        self.ctx.stroke();
        Ok(())
    }
}

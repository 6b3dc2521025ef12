use std::f32::consts::TAU;

use crate::canvas::{Canvas2d, CanvasResult};
use crate::paint::Color;

pub(super) fn trace<C>(canvas: &mut C, x: f32, y: f32, radius: f32, color: Color) -> CanvasResult
where
    C: Canvas2d + ?Sized,
{
    canvas.begin_path();
    canvas.arc(x, y, radius.max(0.0), 0.0, TAU, false)?;
    canvas.set_fill_color(color);
    canvas.fill()
}

#[cfg(test)]
mod tests {
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::coords::{Transform, Vec2};
    use crate::paint::Color;
    use crate::shapes::ShapeRenderer;

    #[test]
    fn food_is_filled_circle_without_stroke() {
        let mut c = RecordingCanvas::new();
        let red = Color::from_srgb_u8(255, 0, 0, 255);
        ShapeRenderer::default().draw_food(&mut c, 400.0, 300.0, 4.0, red).unwrap();

        let arc = c.ops().iter().find_map(|op| match op {
            DrawOp::Arc { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        });
        assert_eq!(arc, Some((Vec2::new(400.0, 300.0), 4.0)));
        assert_eq!(c.paint_ops().collect::<Vec<_>>(), vec![&DrawOp::Fill { color: red }]);
        assert_eq!(c.save_depth(), 0);
        assert_eq!(c.transform(), Transform::identity());
    }

    #[test]
    fn negative_radius_collapses() {
        let mut c = RecordingCanvas::new();
        let r = ShapeRenderer::default().draw_food(&mut c, 1.0, 1.0, -3.0, Color::black());
        assert!(r.is_ok());
        assert!(c.ops().iter().any(|op| matches!(op, DrawOp::Arc { radius, .. } if *radius == 0.0)));
    }
}

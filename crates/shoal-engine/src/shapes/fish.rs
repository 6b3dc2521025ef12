use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::canvas::{Canvas2d, CanvasResult};

use super::FishStyle;

// Proportions relative to the body semi-major axis.
const BODY_ASPECT: f32 = 0.6;
const TAIL_REACH: f32 = 1.7;
const TAIL_SPREAD: f32 = 0.6;
const FEATURE_RADIUS: f32 = 0.1;
const MOUTH_X: f32 = 1.0 - FEATURE_RADIUS * 2.0;
const EYE_X: f32 = 0.4;
const EYE_Y: f32 = -0.4;

pub(super) fn trace<C>(
    canvas: &mut C,
    style: &FishStyle,
    x: f32,
    y: f32,
    size: f32,
    rotation: f32,
) -> CanvasResult
where
    C: Canvas2d + ?Sized,
{
    let s = size.max(0.0);

    canvas.translate(x, y)?;
    canvas.rotate(rotation + FRAC_PI_2)?;

    canvas.begin_path();

    // body
    canvas.ellipse(0.0, 0.0, s, s * BODY_ASPECT, 0.0, 0.0, TAU, false)?;

    // tail
    canvas.move_to(-s, 0.0)?;
    canvas.line_to(-s * TAIL_REACH, -s * TAIL_SPREAD)?;
    canvas.line_to(-s * TAIL_REACH, s * TAIL_SPREAD)?;
    canvas.close_path();

    // dorsal fin
    canvas.move_to(-s * 0.5, -s * 0.6)?;
    canvas.quadratic_curve_to(0.0, -s * 1.3, s * 0.4, -s * 0.5)?;

    // ventral fin
    canvas.move_to(-s * 0.5, s * 0.4)?;
    canvas.quadratic_curve_to(0.0, s * 0.6, s * 0.4, s * 0.2)?;

    // mouth: lower half-circle just behind the nose
    let r = s * FEATURE_RADIUS;
    canvas.move_to(s * MOUTH_X + r, 0.0)?;
    canvas.arc(s * MOUTH_X, 0.0, r, 0.0, PI, false)?;

    // eye
    canvas.move_to(s * EYE_X + r, s * EYE_Y)?;
    canvas.arc(s * EYE_X, s * EYE_Y, r, 0.0, TAU, false)?;

    canvas.set_fill_color(style.body);
    canvas.fill()?;
    canvas.set_stroke_color(style.outline);
    canvas.set_line_width(style.line_width);
    canvas.stroke()
}

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::coords::Vec2;

/// Signed sweep of an arc from `start` to `end`, following canvas semantics.
///
/// A difference of a full turn or more in the drawing direction yields a full
/// circle; otherwise the sweep is reduced into `[0, 2π)` (or `(-2π, 0]` when
/// anticlockwise).
pub fn arc_sweep(start: f32, end: f32, anticlockwise: bool) -> f32 {
    if !anticlockwise {
        let d = end - start;
        if d >= TAU { TAU } else { d.rem_euclid(TAU) }
    } else {
        let d = start - end;
        if d >= TAU { -TAU } else { -d.rem_euclid(TAU) }
    }
}

/// One cubic Bézier piece of a flattened arc.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcSegment {
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub to: Vec2,
}

/// Elliptical arc in local coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EllipseArc {
    pub center: Vec2,
    pub rx: f32,
    pub ry: f32,
    pub rotation: f32,
    pub start: f32,
    pub sweep: f32,
}

impl EllipseArc {
    pub fn point_at(&self, t: f32) -> Vec2 {
        let local = Vec2::new(self.rx * t.cos(), self.ry * t.sin());
        self.center + rotate(local, self.rotation)
    }

    pub fn start_point(&self) -> Vec2 {
        self.point_at(self.start)
    }

    pub fn end_point(&self) -> Vec2 {
        self.point_at(self.start + self.sweep)
    }

    /// Approximates the arc with cubics spanning at most a quarter turn each.
    pub fn segments(&self) -> Vec<ArcSegment> {
        if self.sweep == 0.0 || !self.sweep.is_finite() {
            return Vec::new();
        }

        let count = (self.sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let delta = self.sweep / count as f32;
        let k = 4.0 / 3.0 * (delta / 4.0).tan();

        (0..count)
            .map(|i| {
                let t0 = self.start + delta * i as f32;
                let t1 = t0 + delta;
                let p0 = self.point_at(t0);
                let p1 = self.point_at(t1);
                ArcSegment {
                    ctrl1: p0 + self.tangent_at(t0) * k,
                    ctrl2: p1 - self.tangent_at(t1) * k,
                    to: p1,
                }
            })
            .collect()
    }

    fn tangent_at(&self, t: f32) -> Vec2 {
        rotate(Vec2::new(-self.rx * t.sin(), self.ry * t.cos()), self.rotation)
    }
}

#[inline]
fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn full_turn_clockwise() {
        assert_eq!(arc_sweep(0.0, TAU, false), TAU);
        assert_eq!(arc_sweep(0.0, 3.0 * TAU, false), TAU);
    }

    #[test]
    fn half_turn_clockwise() {
        assert!((arc_sweep(0.0, PI, false) - PI).abs() < 1e-6);
    }

    #[test]
    fn anticlockwise_sweeps_negative() {
        assert!((arc_sweep(0.0, PI, true) + PI).abs() < 1e-6);
        assert_eq!(arc_sweep(TAU, 0.0, true), -TAU);
    }

    #[test]
    fn backwards_clockwise_wraps() {
        // From 3π/2 to π/2 clockwise travels half a turn.
        assert!((arc_sweep(1.5 * PI, 0.5 * PI, false) - PI).abs() < 1e-5);
    }

    #[test]
    fn full_circle_uses_four_segments_ending_at_start() {
        let arc = EllipseArc { center: Vec2::new(5.0, 5.0), rx: 2.0, ry: 2.0, rotation: 0.0, start: 0.0, sweep: TAU };
        let segs = arc.segments();
        assert_eq!(segs.len(), 4);
        assert!(close(segs[3].to, Vec2::new(7.0, 5.0)));
        assert!(close(segs[0].to, Vec2::new(5.0, 7.0)));
    }

    #[test]
    fn ellipse_axes_respected() {
        let arc = EllipseArc { center: Vec2::zero(), rx: 8.0, ry: 4.8, rotation: 0.0, start: 0.0, sweep: TAU };
        assert!(close(arc.point_at(0.0), Vec2::new(8.0, 0.0)));
        assert!(close(arc.point_at(FRAC_PI_2), Vec2::new(0.0, 4.8)));
    }

    #[test]
    fn zero_sweep_has_no_segments() {
        let arc = EllipseArc { center: Vec2::zero(), rx: 1.0, ry: 1.0, rotation: 0.0, start: 1.0, sweep: 0.0 };
        assert!(arc.segments().is_empty());
    }
}

use core::ops::Mul;

use super::Vec2;

/// 2D affine transform in canvas matrix order.
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// `translate`, `rotate` and `scale` post-multiply, matching the immediate-mode
/// canvas convention: the most recently applied operation acts first on points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    #[inline]
    pub const fn from_scale(sx: f32, sy: f32) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, e: 0.0, f: 0.0 }
    }

    #[inline]
    pub const fn from_translate(tx: f32, ty: f32) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: ty }
    }

    #[inline]
    pub fn from_rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    #[inline]
    pub fn translate(self, tx: f32, ty: f32) -> Self {
        self * Self::from_translate(tx, ty)
    }

    #[inline]
    pub fn rotate(self, angle: f32) -> Self {
        self * Self::from_rotation(angle)
    }

    #[inline]
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        self * Self::from_scale(sx, sy)
    }

    /// Maps a point (translation applies).
    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Maps a direction (translation ignored).
    #[inline]
    pub fn apply_vector(self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Geometric-mean scale, used to size strokes under the transform.
    #[inline]
    pub fn mean_scale(self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f].iter().all(|v| v.is_finite())
    }
}

impl Mul for Transform {
    type Output = Transform;

    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn translate_then_rotate_acts_rotation_first() {
        let t = Transform::identity().translate(10.0, 20.0).rotate(FRAC_PI_2);
        // +x rotated a quarter turn is +y (y-down), then offset.
        assert!(approx(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(10.0, 21.0)));
    }

    #[test]
    fn scale_composes_under_translation() {
        let t = Transform::from_scale(2.0, 2.0).translate(5.0, 5.0);
        assert!(approx(t.apply(Vec2::zero()), Vec2::new(10.0, 10.0)));
        assert_eq!(t.mean_scale(), 2.0);
    }

    #[test]
    fn vectors_ignore_translation() {
        let t = Transform::from_translate(3.0, 4.0);
        assert_eq!(t.apply_vector(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
    }
}

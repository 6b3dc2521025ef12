/// Premultiplied RGBA color with sRGB-encoded channels in `[0, 1]`.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
///
/// Canvas backends receive this type; conversion to backend formats
/// (straight bytes, CSS strings) goes through [`to_srgb_u8`](Self::to_srgb_u8).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    ///
    /// This is the preferred constructor for colors coming from hex literals or
    /// CSS color tokens, which produce straight-alpha RGBA.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Straight-alpha bytes, the inverse of [`from_srgb_u8`](Self::from_srgb_u8).
    #[inline]
    pub fn to_srgb_u8(self) -> [u8; 4] {
        let (r, g, b, a) = self.to_straight();
        [to_byte(r), to_byte(g), to_byte(b), to_byte(a)]
    }

    /// CSS `rgba(..)` token for hosts that take string fill styles.
    pub fn to_css(self) -> String {
        let [r, g, b, a] = self.to_srgb_u8();
        if a == u8::MAX {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {})", a as f32 / 255.0)
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_survive_premultiplication() {
        let c = Color::from_srgb_u8(77, 182, 172, 255);
        assert_eq!(c.to_srgb_u8(), [77, 182, 172, 255]);

        let c = Color::from_srgb_u8(200, 100, 50, 128);
        assert_eq!(c.to_srgb_u8(), [200, 100, 50, 128]);
    }

    #[test]
    fn transparent_drops_rgb() {
        assert_eq!(Color::transparent().to_srgb_u8(), [0, 0, 0, 0]);
    }

    #[test]
    fn css_token_for_opaque_and_translucent() {
        assert_eq!(Color::from_srgb_u8(255, 0, 0, 255).to_css(), "rgb(255, 0, 0)");
        assert_eq!(Color::from_srgb_u8(0, 0, 0, 0).to_css(), "rgba(0, 0, 0, 0)");
    }
}

use super::{Vec2, Viewport};

/// Food radius as a fraction of the reference axis.
pub const FOOD_RADIUS_FACTOR: f32 = 0.005;

/// Organism size as a fraction of the reference axis.
pub const ORGANISM_SIZE_FACTOR: f32 = 0.01;

/// Viewport axis a normalized length is measured against.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Axis {
    /// Width. The reference axis for both primitive sizes.
    #[default]
    Horizontal,
    Vertical,
}

/// Maps normalized world space (`[0, 1]` per axis) into logical pixels.
///
/// No clamping: coordinates outside `[0, 1]` land outside the visible surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoordinateMapper {
    viewport: Viewport,
}

impl CoordinateMapper {
    #[inline]
    pub const fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn map_position(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x * self.viewport.width, y * self.viewport.height)
    }

    #[inline]
    pub fn map_length(&self, size: f32, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => size * self.viewport.width,
            Axis::Vertical => size * self.viewport.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_scales_each_axis() {
        let m = CoordinateMapper::new(Viewport::new(800.0, 600.0));
        assert_eq!(m.map_position(0.5, 0.5), Vec2::new(400.0, 300.0));
        assert_eq!(m.map_position(0.25, 0.75), Vec2::new(200.0, 450.0));
    }

    #[test]
    fn position_is_exact_over_unit_square() {
        let vp = Viewport::new(1366.0, 768.0);
        let m = CoordinateMapper::new(vp);
        for i in 0..=10 {
            for j in 0..=10 {
                let (x, y) = (i as f32 / 10.0, j as f32 / 10.0);
                assert_eq!(m.map_position(x, y), Vec2::new(x * vp.width, y * vp.height));
            }
        }
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        let m = CoordinateMapper::new(Viewport::new(100.0, 50.0));
        assert_eq!(m.map_position(-0.5, 1.5), Vec2::new(-50.0, 75.0));
    }

    #[test]
    fn lengths_use_requested_axis() {
        let m = CoordinateMapper::new(Viewport::new(800.0, 600.0));
        assert_eq!(m.map_length(FOOD_RADIUS_FACTOR, Axis::Horizontal), 4.0);
        assert_eq!(m.map_length(ORGANISM_SIZE_FACTOR, Axis::Horizontal), 8.0);
        assert_eq!(m.map_length(ORGANISM_SIZE_FACTOR, Axis::Vertical), 6.0);
    }
}

use super::Rect;

/// Largest backing-buffer edge in physical pixels.
///
/// Matches the default `max_texture_dimension_2d` of the GPU presenter.
pub const MAX_BACKING_DIMENSION: u32 = 8192;

/// Viewport size in logical pixels.
///
/// This is the coordinate basis for all drawing calls: once the surface scale
/// transform is applied, logical pixels map to `device_scale` physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The full visible region, origin top-left.
    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Environment inputs sampled at startup and on every resize notification.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct WindowMetrics {
    /// Window inner width in logical (CSS) pixels.
    pub width: f32,
    /// Window inner height in logical (CSS) pixels.
    pub height: f32,
    /// Physical-to-logical pixel ratio, if the environment reports one.
    pub device_pixel_ratio: Option<f32>,
}

impl WindowMetrics {
    #[inline]
    pub const fn new(width: f32, height: f32, device_pixel_ratio: Option<f32>) -> Self {
        Self { width, height, device_pixel_ratio }
    }

    /// Device scale with the fallback rule applied.
    ///
    /// Unreported, non-finite and non-positive ratios all resolve to `1.0`.
    #[inline]
    pub fn device_scale(self) -> f32 {
        match self.device_pixel_ratio {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
            _ => 1.0,
        }
    }
}

/// Logical size plus device scale of the drawing surface.
///
/// Invariant (maintained by `ViewportManager`): the surface backing buffer is
/// always [`backing_size`](Self::backing_size) physical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportState {
    pub logical: Viewport,
    pub device_scale: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self { logical: Viewport::default(), device_scale: 1.0 }
    }
}

impl ViewportState {
    #[inline]
    pub const fn new(logical: Viewport, device_scale: f32) -> Self {
        Self { logical, device_scale }
    }

    pub fn from_metrics(metrics: WindowMetrics) -> Self {
        let width = if metrics.width.is_finite() { metrics.width.max(0.0) } else { 0.0 };
        let height = if metrics.height.is_finite() { metrics.height.max(0.0) } else { 0.0 };
        Self::new(Viewport::new(width, height), metrics.device_scale())
    }

    /// Physical backing-buffer size, `round(logical × device_scale)` per axis,
    /// capped at [`MAX_BACKING_DIMENSION`].
    #[inline]
    pub fn backing_size(self) -> (u32, u32) {
        let (w, h) = self.requested_size();
        (w.min(MAX_BACKING_DIMENSION), h.min(MAX_BACKING_DIMENSION))
    }

    /// Uncapped `round(logical × device_scale)` per axis.
    #[inline]
    pub fn requested_size(self) -> (u32, u32) {
        (
            to_physical(self.logical.width, self.device_scale),
            to_physical(self.logical.height, self.device_scale),
        )
    }

    #[inline]
    pub fn is_capped(self) -> bool {
        self.requested_size() != self.backing_size()
    }
}

#[inline]
fn to_physical(logical: f32, scale: f32) -> u32 {
    // `as` saturates, so oversized values cannot wrap.
    (logical * scale).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ratio_defaults_to_one() {
        assert_eq!(WindowMetrics::new(10.0, 10.0, None).device_scale(), 1.0);
    }

    #[test]
    fn degenerate_ratio_defaults_to_one() {
        assert_eq!(WindowMetrics::new(10.0, 10.0, Some(0.0)).device_scale(), 1.0);
        assert_eq!(WindowMetrics::new(10.0, 10.0, Some(-2.0)).device_scale(), 1.0);
        assert_eq!(WindowMetrics::new(10.0, 10.0, Some(f32::NAN)).device_scale(), 1.0);
    }

    #[test]
    fn backing_size_scales_and_rounds() {
        let state = ViewportState::from_metrics(WindowMetrics::new(800.0, 600.0, Some(2.0)));
        assert_eq!(state.backing_size(), (1600, 1200));

        let state = ViewportState::from_metrics(WindowMetrics::new(333.0, 101.0, Some(1.5)));
        // 499.5 rounds away from zero, 151.5 likewise.
        assert_eq!(state.backing_size(), (500, 152));
    }

    #[test]
    fn negative_metrics_collapse_to_zero() {
        let state = ViewportState::from_metrics(WindowMetrics::new(-5.0, f32::INFINITY, None));
        assert_eq!(state.logical, Viewport::new(0.0, 0.0));
        assert_eq!(state.backing_size(), (0, 0));
    }

    #[test]
    fn huge_windows_cap_backing_size() {
        let state = ViewportState::from_metrics(WindowMetrics::new(100000.0, 100000.0, Some(2.0)));
        assert_eq!(state.requested_size(), (200000, 200000));
        assert_eq!(state.backing_size(), (MAX_BACKING_DIMENSION, MAX_BACKING_DIMENSION));
        assert!(state.is_capped());

        let state = ViewportState::from_metrics(WindowMetrics::new(4096.0, 10.0, Some(2.0)));
        assert_eq!(state.backing_size(), (8192, 20));
        assert!(!state.is_capped());
    }

    #[test]
    fn bounds_cover_viewport() {
        assert_eq!(Viewport::new(4.0, 3.0).bounds(), Rect::new(0.0, 0.0, 4.0, 3.0));
    }
}

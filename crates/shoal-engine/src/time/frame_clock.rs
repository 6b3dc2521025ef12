use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Timestamp of the tick on the clock's timeline.
    pub now: Duration,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Ticks either read the monotonic system clock ([`tick`](Self::tick), native
/// only) or take a host timestamp such as the one `requestAnimationFrame`
/// passes to its callback ([`tick_at`](Self::tick_at)).
///
/// Delta time is clamped so a stalled or backgrounded host does not produce
/// pathological values.
#[derive(Debug, Clone)]
pub struct FrameClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: Instant,
    last: Option<Duration>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: Instant::now(),
            last: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Forgets the previous tick; the next one reports the minimum delta.
    pub fn reset(&mut self) {
        self.last = None;
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock using the system monotonic clock.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn tick(&mut self) -> FrameTime {
        let now = self.origin.elapsed();
        self.tick_at(now)
    }

    /// Advances the clock to the host timestamp `now`.
    ///
    /// Timestamps that go backwards are treated as a zero delta.
    pub fn tick_at(&mut self, now: Duration) -> FrameTime {
        let dt = match self.last {
            Some(last) => now.saturating_sub(last).clamp(self.dt_min, self.dt_max),
            None => self.dt_min,
        };
        self.last = Some(now);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_reports_minimum_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Duration::from_secs(5));
        assert_eq!(ft.frame_index, 0);
        assert_eq!(ft.dt, Duration::from_micros(100).as_secs_f32());
    }

    #[test]
    fn deltas_are_clamped() {
        let mut clock = FrameClock::new();
        clock.tick_at(Duration::from_millis(0));
        let ft = clock.tick_at(Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);

        let stalled = clock.tick_at(Duration::from_secs(10));
        assert_eq!(stalled.dt, 0.25);

        let backwards = clock.tick_at(Duration::from_secs(1));
        assert_eq!(backwards.dt, Duration::from_micros(100).as_secs_f32());
        assert_eq!(backwards.frame_index, 3);
    }

    #[test]
    fn reset_keeps_frame_index() {
        let mut clock = FrameClock::new();
        clock.tick_at(Duration::ZERO);
        clock.reset();
        let ft = clock.tick_at(Duration::from_secs(3));
        assert_eq!(ft.frame_index, 1);
        assert_eq!(ft.dt, Duration::from_micros(100).as_secs_f32());
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::core::AppControl;
use crate::time::{FrameClock, FrameTime};

/// Work performed once per scheduled frame.
pub trait FrameTask {
    fn on_frame(&mut self, time: &FrameTime) -> AppControl;
}

impl<F> FrameTask for F
where
    F: FnMut(&FrameTime) -> AppControl,
{
    fn on_frame(&mut self, time: &FrameTime) -> AppControl {
        self(time)
    }
}

/// Lifecycle of a [`FrameScheduler`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Never started.
    Idle,
    Running,
    Stopped,
}

/// Handle returned by [`FrameScheduler::start`].
///
/// Cancelling is thread-safe; the scheduler observes it at the next frame
/// boundary.
#[derive(Debug, Clone)]
pub struct StopToken {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl StopToken {
    fn new(generation: u64) -> Self {
        Self { generation, cancelled: Arc::new(AtomicBool::new(false)) }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Start/stop frame scheduler.
///
/// The host calls [`fire`](Self::fire) once per display frame; the scheduler
/// runs its task while armed. A task returning [`AppControl::Exit`] stops the
/// loop as if its token had been cancelled.
pub struct FrameScheduler<T> {
    task: T,
    state: LoopState,
    clock: FrameClock,
    token: Option<StopToken>,
    generation: u64,
}

impl<T: FrameTask> FrameScheduler<T> {
    pub fn new(task: T) -> Self {
        Self {
            task,
            state: LoopState::Idle,
            clock: FrameClock::new(),
            token: None,
            generation: 0,
        }
    }

    /// Arms the scheduler. Starting a running scheduler returns its live token.
    pub fn start(&mut self) -> StopToken {
        self.observe_cancel();
        if let Some(token) = &self.token {
            return token.clone();
        }

        self.generation += 1;
        let token = StopToken::new(self.generation);
        self.token = Some(token.clone());
        self.state = LoopState::Running;
        self.clock.reset();

        log::info!("frame loop started (generation {})", self.generation);
        token
    }

    /// Disarms the scheduler if `token` belongs to the current run.
    ///
    /// Returns `false` for stale tokens from an earlier run.
    pub fn stop(&mut self, token: &StopToken) -> bool {
        match &self.token {
            Some(current) if current.generation == token.generation => {
                current.cancel();
                self.halt();
                true
            }
            _ => false,
        }
    }

    /// Whether the next [`fire`](Self::fire) will run the task.
    pub fn is_armed(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Runs one frame if armed. Returns whether another frame is armed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn fire(&mut self) -> bool {
        self.fire_with(FrameClock::tick)
    }

    /// Like [`fire`](Self::fire), timed by a host timestamp.
    pub fn fire_at(&mut self, now: Duration) -> bool {
        self.fire_with(|clock| clock.tick_at(now))
    }

    fn fire_with(&mut self, tick: impl FnOnce(&mut FrameClock) -> FrameTime) -> bool {
        self.observe_cancel();
        if self.token.is_none() {
            return false;
        }

        let time = tick(&mut self.clock);
        if self.task.on_frame(&time) == AppControl::Exit {
            if let Some(token) = &self.token {
                token.cancel();
            }
            self.halt();
        }

        self.observe_cancel();
        self.token.is_some()
    }

    /// Fires up to `frames` frames, stopping early once disarmed.
    ///
    /// Returns the number of frames the task ran for.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        let mut ran = 0;
        while ran < frames && self.is_armed() {
            self.fire();
            ran += 1;
        }
        self.observe_cancel();
        ran
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn task(&self) -> &T {
        &self.task
    }

    #[inline]
    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    pub fn into_task(self) -> T {
        self.task
    }

    fn observe_cancel(&mut self) {
        if self.token.as_ref().is_some_and(StopToken::is_cancelled) {
            self.halt();
        }
    }

    fn halt(&mut self) {
        if self.token.take().is_some() {
            self.state = LoopState::Stopped;
            log::info!("frame loop stopped (generation {})", self.generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> FrameScheduler<impl FnMut(&FrameTime) -> AppControl> {
        let mut frames = 0u32;
        FrameScheduler::new(move |_: &FrameTime| {
            frames += 1;
            AppControl::Continue
        })
    }

    #[test]
    fn idle_until_started() {
        let mut s = counter();
        assert_eq!(s.state(), LoopState::Idle);
        assert!(!s.fire());
        assert_eq!(s.run_frames(5), 0);
    }

    #[test]
    fn runs_until_stopped() {
        let mut s = counter();
        let token = s.start();
        assert_eq!(s.state(), LoopState::Running);
        assert_eq!(s.run_frames(3), 3);

        assert!(s.stop(&token));
        assert_eq!(s.state(), LoopState::Stopped);
        assert!(!s.fire());
        assert_eq!(s.run_frames(3), 0);
    }

    #[test]
    fn out_of_band_cancel_is_seen_at_next_frame() {
        let mut s = counter();
        let token = s.start();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();

        assert!(!s.fire());
        assert_eq!(s.state(), LoopState::Stopped);
    }

    #[test]
    fn restart_rearms_and_old_token_is_stale() {
        let mut s = counter();
        let first = s.start();
        s.stop(&first);

        let second = s.start();
        assert_eq!(s.state(), LoopState::Running);
        assert!(!s.stop(&first));
        assert!(s.is_armed());
        assert!(s.stop(&second));
    }

    #[test]
    fn start_while_running_returns_live_token() {
        let mut s = counter();
        let a = s.start();
        let b = s.start();
        assert!(s.stop(&b));
        assert!(a.is_cancelled());
    }

    #[test]
    fn exit_from_task_stops_loop() {
        let mut n = 0;
        let mut s = FrameScheduler::new(move |_: &FrameTime| {
            n += 1;
            if n == 2 { AppControl::Exit } else { AppControl::Continue }
        });
        s.start();
        assert_eq!(s.run_frames(10), 2);
        assert_eq!(s.state(), LoopState::Stopped);
    }

    #[test]
    fn host_timestamps_drive_delta() {
        let mut dts = Vec::new();
        let mut s = FrameScheduler::new(|t: &FrameTime| {
            dts.push(t.dt);
            AppControl::Continue
        });
        s.start();
        s.fire_at(Duration::from_millis(1000));
        s.fire_at(Duration::from_millis(1020));
        drop(s);
        assert!((dts[1] - 0.020).abs() < 1e-6);
    }

    #[test]
    fn frame_indices_advance() {
        let mut seen = Vec::new();
        let mut s = FrameScheduler::new(|t: &FrameTime| {
            seen.push(t.frame_index);
            AppControl::Continue
        });
        s.start();
        s.run_frames(3);
        drop(s);
        assert_eq!(seen, vec![0, 1, 2]);
    }
}

use winit::event::WindowEvent;

use super::AppControl;
use super::ctx::{FrameCtx, WindowCtx};

/// Application contract driven by the native runtime.
pub trait App {
    /// Called once per window, after its GPU surface is ready and before the
    /// first frame.
    fn on_window_created(&mut self, window: &WindowCtx<'_>) -> AppControl {
        let _ = window;
        AppControl::Continue
    }

    /// Called for window events, before the runtime's own resize handling.
    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called once per redraw per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}

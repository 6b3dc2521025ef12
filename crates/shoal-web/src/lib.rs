//! Browser host for the shoal renderer.
//!
//! Draws onto the page's `<canvas id="viewport">` through its 2D context,
//! schedules frames with `requestAnimationFrame` and follows window resizes.
//! The simulation lives on the JavaScript side and is reached through
//! [`JsSimulation`].

#![cfg(target_arch = "wasm32")]

mod bridge;
mod canvas;
mod host;
mod logger;
mod viewer;

pub use bridge::{JsBridge, JsSimulation};
pub use canvas::CanvasContext;
pub use host::{CanvasSurface, DocumentHost};
pub use logger::init_console_logging;
pub use viewer::Viewer;

use wasm_bindgen::prelude::*;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsError::new(&err.to_string()).into()
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

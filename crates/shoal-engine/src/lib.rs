//! Shoal engine crate.
//!
//! Renders an ecosystem simulation's foods and organisms onto a 2D drawing
//! surface once per display frame.
//!
//! Layers, bottom-up:
//! - `coords`, `paint`: geometry, transforms and colors
//! - `canvas`: the immediate-mode drawing contract and its CPU backends
//! - `shapes`: food and fish drawing
//! - `surface`: the device-pixel-ratio-aware viewport
//! - `world`: the simulation collaborator and its snapshot types
//! - `frame`: the per-frame step-clear-draw pipeline and its scheduler
//!
//! With the `native` feature (default), `window`, `device` and `render` host
//! the pipeline in a `winit` window and present the rasterized surface through
//! `wgpu`.

pub mod canvas;
pub mod config;
pub mod coords;
pub mod core;
pub mod frame;
pub mod paint;
pub mod shapes;
pub mod surface;
pub mod time;
pub mod world;

#[cfg(feature = "native")]
pub mod device;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod render;
#[cfg(feature = "native")]
pub mod window;

//! Procedural shapes for the two world primitives.
//!
//! Every draw call is bracketed by `save`/`restore` on the canvas, and the
//! restore runs even when a primitive in the middle fails.

mod fish;
mod food;

use std::fmt;

use crate::canvas::{Canvas2d, CanvasError, CanvasResult};
use crate::paint::Color;
use crate::world::SnapshotError;

/// Fill/stroke style of the organism shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FishStyle {
    pub body: Color,
    pub outline: Color,
    /// Outline width in logical pixels.
    pub line_width: f32,
}

impl Default for FishStyle {
    fn default() -> Self {
        Self {
            body: Color::from_srgb_u8(0x4D, 0xB6, 0xAC, 0xFF),
            outline: Color::from_srgb_u8(0x00, 0x4D, 0x40, 0xFF),
            line_width: 2.0,
        }
    }
}

/// Issues the path and paint operations for food and organisms.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ShapeRenderer {
    pub style: FishStyle,
}

impl ShapeRenderer {
    pub fn new(style: FishStyle) -> Self {
        Self { style }
    }

    /// Filled circle at `(x, y)` in logical pixels. No stroke.
    ///
    /// Negative radii draw nothing visible rather than failing.
    pub fn draw_food<C>(&self, canvas: &mut C, x: f32, y: f32, radius: f32, color: Color) -> CanvasResult
    where
        C: Canvas2d + ?Sized,
    {
        scoped(canvas, |c| food::trace(c, x, y, radius, color))
    }

    /// Fish shape centered at `(x, y)`, scaled by `size` and facing `rotation`.
    ///
    /// The shape is authored nose along local +x; a quarter-turn offset maps
    /// it onto the world heading convention (rotation 0 faces +y).
    pub fn draw_organism<C>(&self, canvas: &mut C, x: f32, y: f32, size: f32, rotation: f32) -> CanvasResult
    where
        C: Canvas2d + ?Sized,
    {
        scoped(canvas, |c| fish::trace(c, &self.style, x, y, size, rotation))
    }
}

fn scoped<C, F>(canvas: &mut C, draw: F) -> CanvasResult
where
    C: Canvas2d + ?Sized,
    F: FnOnce(&mut C) -> CanvasResult,
{
    canvas.save();
    let result = draw(canvas);
    canvas.restore();
    result
}

/// Why an entity was skipped during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    Snapshot(SnapshotError),
    Canvas(CanvasError),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::Snapshot(err) => write!(f, "malformed entity: {err}"),
            DrawError::Canvas(err) => write!(f, "draw failed: {err}"),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawError::Snapshot(err) => Some(err),
            DrawError::Canvas(err) => Some(err),
        }
    }
}

impl From<SnapshotError> for DrawError {
    fn from(err: SnapshotError) -> Self {
        DrawError::Snapshot(err)
    }
}

impl From<CanvasError> for DrawError {
    fn from(err: CanvasError) -> Self {
        DrawError::Canvas(err)
    }
}

//! Coordinate and geometry types shared by the canvas backends and shapes.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! World space is normalized `[0, 1]` per axis; `CoordinateMapper` converts it
//! into logical pixels of the current viewport.

mod mapper;
mod rect;
mod transform;
mod vec2;
mod viewport;

pub use mapper::{Axis, CoordinateMapper, FOOD_RADIUS_FACTOR, ORGANISM_SIZE_FACTOR};
pub use rect::Rect;
pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::{Viewport, ViewportState, WindowMetrics, MAX_BACKING_DIMENSION};

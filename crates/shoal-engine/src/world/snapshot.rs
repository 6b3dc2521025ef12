use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::Vec2;
use crate::paint::{parse_css_color, Color, ColorParseError};

/// Immutable read of simulation state for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSnapshot {
    pub foods: Vec<Food>,
    pub animals: Vec<Organism>,
}

impl WorldSnapshot {
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.foods.len() + self.animals.len()
    }
}

/// Food particle at a normalized position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub x: f32,
    pub y: f32,
    /// CSS color token.
    pub color: String,
}

impl Food {
    pub fn new(x: f32, y: f32, color: impl Into<String>) -> Self {
        Self { x, y, color: color.into() }
    }

    /// Checks the entity against `policy` and resolves its fill color.
    pub fn validate(&self, policy: Validation) -> Result<Color, SnapshotError> {
        check_position(self.x, self.y, policy)?;
        parse_css_color(&self.color).map_err(SnapshotError::Color)
    }
}

/// Organism at a normalized position, facing `rotation` radians.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl Organism {
    pub const fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }

    /// Unit direction of travel in screen space (y down).
    ///
    /// Rotation 0 faces +y; positive rotation turns clockwise on screen.
    pub fn heading(&self) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec2::new(-sin, cos)
    }

    pub fn validate(&self, policy: Validation) -> Result<(), SnapshotError> {
        if !self.rotation.is_finite() {
            return Err(SnapshotError::NonFinite { field: "rotation" });
        }
        check_position(self.x, self.y, policy)
    }
}

/// How strictly snapshot entities are checked before drawing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Reject non-finite values and positions outside `[0, 1]`.
    #[default]
    Strict,
    /// Reject non-finite values only; out-of-range positions draw off-surface.
    FiniteOnly,
}

/// A snapshot entity that cannot be drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    NonFinite { field: &'static str },
    OutOfRange { field: &'static str, value: f32 },
    Color(ColorParseError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NonFinite { field } => write!(f, "`{field}` is not finite"),
            SnapshotError::OutOfRange { field, value } => {
                write!(f, "`{field}` = {value} is outside [0, 1]")
            }
            SnapshotError::Color(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Color(err) => Some(err),
            _ => None,
        }
    }
}

fn check_position(x: f32, y: f32, policy: Validation) -> Result<(), SnapshotError> {
    for (field, value) in [("x", x), ("y", y)] {
        if !value.is_finite() {
            return Err(SnapshotError::NonFinite { field });
        }
        if policy == Validation::Strict && !(0.0..=1.0).contains(&value) {
            return Err(SnapshotError::OutOfRange { field, value });
        }
    }
    Ok(())
}

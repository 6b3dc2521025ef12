use std::fmt;

/// Failure reported by a canvas backend for a single drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasError {
    /// A coordinate, radius or transform component was NaN or infinite.
    NonFinite { op: &'static str },
    /// A radius was negative where the backend requires a non-negative one.
    NegativeRadius { op: &'static str, radius: f32 },
    /// The backend rejected the call for its own reasons.
    Backend { op: &'static str, message: String },
}

impl CanvasError {
    #[inline]
    pub fn op(&self) -> &'static str {
        match self {
            CanvasError::NonFinite { op }
            | CanvasError::NegativeRadius { op, .. }
            | CanvasError::Backend { op, .. } => op,
        }
    }
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::NonFinite { op } => write!(f, "{op}: non-finite argument"),
            CanvasError::NegativeRadius { op, radius } => {
                write!(f, "{op}: negative radius {radius}")
            }
            CanvasError::Backend { op, message } => write!(f, "{op}: {message}"),
        }
    }
}

impl std::error::Error for CanvasError {}

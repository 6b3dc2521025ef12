use std::fmt;

use crate::canvas::CanvasError;

/// Failure to bring up the drawing surface. Hosts abort startup on any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// No element with the requested id exists on the host.
    SurfaceNotFound { id: String },
    /// The element exists but refused to hand out a 2D drawing context.
    ContextUnavailable { id: String },
    /// The drawing context rejected the initial scale transform.
    Canvas(CanvasError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::SurfaceNotFound { id } => write!(f, "surface `{id}` not found"),
            InitError::ContextUnavailable { id } => {
                write!(f, "surface `{id}` has no 2D drawing context")
            }
            InitError::Canvas(err) => write!(f, "surface setup failed: {err}"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Canvas(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CanvasError> for InitError {
    fn from(err: CanvasError) -> Self {
        InitError::Canvas(err)
    }
}

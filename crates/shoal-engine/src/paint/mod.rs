//! Paint model shared by the shape renderer and canvas backends.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - CSS color token parsing for collaborator-supplied colors (`csscolorparser`)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod css;

pub use color::Color;
pub use css::{parse_css_color, ColorParseError};

use std::fmt;
use std::str::FromStr;

use super::Color;

/// A color token the canvas backends cannot interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorParseError {
    pub token: String,
    pub message: String,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color `{}`: {}", self.token, self.message)
    }
}

impl std::error::Error for ColorParseError {}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_css_color(s)
    }
}

/// Parses a CSS color token as a browser `fillStyle` would.
///
/// Covers CSS Color 4 syntax: hex forms, every named color, `rgb()`/`rgba()`
/// with comma or space separators and percentages, `hsl()`, `hwb()` and
/// `transparent`. Out-of-range components clamp.
pub fn parse_css_color(token: &str) -> Result<Color, ColorParseError> {
    let parsed = csscolorparser::parse(token.trim()).map_err(|err| ColorParseError {
        token: token.to_string(),
        message: err.to_string(),
    })?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Color::from_srgb_u8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(token: &str) -> [u8; 4] {
        parse_css_color(token).unwrap().to_srgb_u8()
    }

    #[test]
    fn hex_forms() {
        assert_eq!(bytes("#ff0000"), [255, 0, 0, 255]);
        assert_eq!(bytes("#4DB6AC"), [77, 182, 172, 255]);
        assert_eq!(bytes("#0f0"), [0, 255, 0, 255]);
        assert_eq!(bytes("#00000080"), [0, 0, 0, 128]);
    }

    #[test]
    fn collaborator_rgb_tokens() {
        assert_eq!(bytes("rgb(12, 200, 7)"), [12, 200, 7, 255]);
        assert_eq!(bytes("rgb(0,0,0)"), [0, 0, 0, 255]);
        assert_eq!(bytes("RGBA(10, 20, 30, 0.5)"), [10, 20, 30, 128]);
    }

    #[test]
    fn named_colors() {
        assert_eq!(bytes("red"), [255, 0, 0, 255]);
        assert_eq!(bytes("purple"), [128, 0, 128, 255]);
        assert_eq!(bytes("Gold"), [255, 215, 0, 255]);
        assert_eq!(bytes("transparent"), [0, 0, 0, 0]);
    }

    #[test]
    fn css_color_4_functions() {
        assert_eq!(bytes("hsl(120, 100%, 50%)"), [0, 255, 0, 255]);
        assert_eq!(bytes("rgb(255 0 0)"), [255, 0, 0, 255]);
        assert_eq!(bytes("rgb(100%, 0%, 0%)"), [255, 0, 0, 255]);
        assert_eq!(bytes("rgb(300, 0, 0)"), [255, 0, 0, 255]);
    }

    #[test]
    fn rejects_malformed_tokens() {
        for bad in ["", "#12", "#gg0000", "rgb(1, 2)", "nope", "not-a-color"] {
            assert!(parse_css_color(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn error_names_the_token() {
        let err = parse_css_color("#12").unwrap_err();
        assert_eq!(err.token, "#12");
        assert!(err.to_string().contains("#12"));
    }
}

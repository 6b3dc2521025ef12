//! Render configuration.
//!
//! Every field is optional in TOML; missing fields take the defaults below.
//!
//! ```toml
//! food_radius_factor = 0.005
//! organism_size_factor = 0.01
//! validation = "strict"
//! image_smoothing = false
//! background = "#ffffff"
//!
//! [fish]
//! body = "#4DB6AC"
//! outline = "#004D40"
//! line_width = 2.0
//!
//! [step_ratio]
//! steps = 1
//! frames = 1
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::coords::{FOOD_RADIUS_FACTOR, ORGANISM_SIZE_FACTOR};
#[cfg(feature = "native")]
use crate::logging::LoggingConfig;
use crate::paint::{Color, ColorParseError, parse_css_color};
use crate::shapes::FishStyle;
use crate::world::Validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Food radius as a fraction of viewport width.
    pub food_radius_factor: f32,
    /// Organism size as a fraction of viewport width.
    pub organism_size_factor: f32,
    pub validation: Validation,
    pub image_smoothing: bool,
    /// Clear color behind the surface (native host only).
    pub background: String,
    pub fish: FishSection,
    pub step_ratio: StepRatio,
    pub logging: LoggingSection,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            food_radius_factor: FOOD_RADIUS_FACTOR,
            organism_size_factor: ORGANISM_SIZE_FACTOR,
            validation: Validation::default(),
            image_smoothing: false,
            background: "#ffffff".to_string(),
            fish: FishSection::default(),
            step_ratio: StepRatio::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: RenderConfig =
            toml::from_str(contents).context("failed to parse render config toml")?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read render config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid render config at {}", path.display()))
    }

    /// Rejects values the pipeline cannot use.
    pub fn check(&self) -> Result<()> {
        for (name, value) in [
            ("food_radius_factor", self.food_radius_factor),
            ("organism_size_factor", self.organism_size_factor),
            ("fish.line_width", self.fish.line_width),
        ] {
            ensure!(value.is_finite() && value >= 0.0, "`{name}` must be a non-negative number, got {value}");
        }
        if self.step_ratio.frames == 0 {
            bail!("`step_ratio.frames` must be at least 1");
        }
        self.fish_style().context("invalid `fish` colors")?;
        self.background_color().context("invalid `background`")?;
        Ok(())
    }

    pub fn fish_style(&self) -> Result<FishStyle, ColorParseError> {
        Ok(FishStyle {
            body: parse_css_color(&self.fish.body)?,
            outline: parse_css_color(&self.fish.outline)?,
            line_width: self.fish.line_width,
        })
    }

    pub fn background_color(&self) -> Result<Color, ColorParseError> {
        parse_css_color(&self.background)
    }

    #[cfg(feature = "native")]
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.logging.filter.clone(),
            ..LoggingConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishSection {
    pub body: String,
    pub outline: String,
    pub line_width: f32,
}

impl Default for FishSection {
    fn default() -> Self {
        Self {
            body: "#4DB6AC".to_string(),
            outline: "#004D40".to_string(),
            line_width: 2.0,
        }
    }
}

/// Simulation steps per rendered frames.
///
/// `1:1` steps once per frame, `1:2` every other frame, `3:1` three times per frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepRatio {
    pub steps: u32,
    pub frames: u32,
}

impl Default for StepRatio {
    fn default() -> Self {
        Self { steps: 1, frames: 1 }
    }
}

impl StepRatio {
    pub const fn new(steps: u32, frames: u32) -> Self {
        Self { steps, frames }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `env_logger` filter; falls back to `RUST_LOG`, then `info`.
    pub filter: Option<String>,
}

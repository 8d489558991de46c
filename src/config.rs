//! Runtime settings
//!
//! Every section has defaults matching the built-in constants, so an empty
//! TOML document (or no file at all) yields a working configuration:
//!
//! ```toml
//! [gravity]
//! attractor = 6.674e7       # m^3/s^2
//! repulsor = 6.674e5        # m^3/s^2
//! time_step_secs = 10
//! threshold_m = 2000.0
//! max_iterations = 10000
//! placeholder_alt = 42.0
//! damping = { kind = "fixed", factor = 0.998 }
//!
//! [overlay]
//! samples = 400
//! artwork_dir = "artwork"
//!
//! [split]
//! trim_fraction = 0.25
//!
//! [strategy]
//! dummy = 0
//! gravity = 1
//! overlay = 1
//!
//! [[targets]]
//! zone = 30
//! lat = 51.4715
//! lon = -0.4520
//! label = "LHR"
//!
//! [[artworks]]
//! name = "parachute.svg"
//! descent = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::strategy::dummy::DummyParams;
use crate::strategy::gravity::{Damping, GravityParams};
use crate::track::splitter::DEFAULT_TRIM_FRACTION;
use crate::types::Target;

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gravity: GravityParams,
    pub overlay: OverlaySettings,
    pub split: SplitSettings,
    pub dummy: DummyParams,
    pub strategy: StrategyWeights,
    pub targets: Vec<Target>,
    pub artworks: Vec<ArtworkEntry>,
}

/// Curve overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Number of points every overlaid window is resampled to
    pub samples: usize,
    /// Directory holding the artwork SVG files
    pub artwork_dir: PathBuf,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            samples: 400,
            artwork_dir: PathBuf::from("artwork"),
        }
    }
}

/// Window trimming settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Arc-length fraction trimmed from each end of the working window
    pub trim_fraction: f64,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            trim_fraction: DEFAULT_TRIM_FRACTION,
        }
    }
}

/// Relative odds of each strategy being drawn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyWeights {
    pub dummy: u32,
    pub gravity: u32,
    pub overlay: u32,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            dummy: 0,
            gravity: 1,
            overlay: 1,
        }
    }
}

/// One entry of the artwork catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkEntry {
    /// File name inside the artwork directory
    pub name: String,
    /// Drawn on the descent instead of the ascent
    #[serde(default)]
    pub descent: bool,
}

impl ArtworkEntry {
    pub fn new(name: &str, descent: bool) -> Self {
        Self {
            name: name.to_string(),
            descent,
        }
    }

    /// Metric-friendly name: the file name without its extension
    pub fn stem(&self) -> &str {
        self.name.strip_suffix(".svg").unwrap_or(&self.name)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GravityParams::default(),
            overlay: OverlaySettings::default(),
            split: SplitSettings::default(),
            dummy: DummyParams::default(),
            strategy: StrategyWeights::default(),
            targets: vec![Target::new(30, 51.4715, -0.4520, "LHR")],
            artworks: vec![
                ArtworkEntry::new("hello.svg", false),
                ArtworkEntry::new("zigzag.svg", false),
                ArtworkEntry::new("parachute.svg", true),
                ArtworkEntry::new("hello_ground.svg", true),
            ],
        }
    }
}

impl Settings {
    /// Parses settings from a TOML document and validates them
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)
            .map_err(|e| Error::Config(format!("Invalid settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a TOML file
    ///
    /// A relative `artwork_dir` is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let mut settings = Self::from_toml(&text)?;

        if settings.overlay.artwork_dir.is_relative() {
            if let Some(parent) = path.parent() {
                settings.overlay.artwork_dir = parent.join(&settings.overlay.artwork_dir);
            }
        }

        Ok(settings)
    }

    /// Checks value ranges and cross-section consistency
    pub fn validate(&self) -> Result<()> {
        let g = &self.gravity;
        if g.time_step_secs <= 0 {
            return Err(Error::Config("gravity.time_step_secs must be positive".to_string()));
        }
        if g.max_iterations == 0 {
            return Err(Error::Config("gravity.max_iterations must be positive".to_string()));
        }
        if !(g.threshold_m.is_finite() && g.threshold_m > 0.0) {
            return Err(Error::Config("gravity.threshold_m must be positive".to_string()));
        }
        if !(g.attractor.is_finite() && g.attractor > 0.0) || !(g.repulsor.is_finite() && g.repulsor >= 0.0) {
            return Err(Error::Config("gravity attractor must be positive and repulsor non-negative".to_string()));
        }
        let factor = g.damping.factor();
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(Error::Config(format!("damping factor {} outside (0, 1]", factor)));
        }
        if self.overlay.samples < 2 {
            return Err(Error::Config("overlay.samples must be at least 2".to_string()));
        }
        if !(0.0..0.5).contains(&self.split.trim_fraction) {
            return Err(Error::Config(format!(
                "split.trim_fraction {} outside [0, 0.5)",
                self.split.trim_fraction
            )));
        }
        if self.dummy.period == 0 {
            return Err(Error::Config("dummy.period must be positive".to_string()));
        }

        let w = &self.strategy;
        if w.dummy == 0 && w.gravity == 0 && w.overlay == 0 {
            return Err(Error::Config("at least one strategy weight must be non-zero".to_string()));
        }
        if w.gravity > 0 && self.targets.is_empty() {
            return Err(Error::Config("gravity strategy enabled without targets".to_string()));
        }
        if w.overlay > 0 && self.artworks.is_empty() {
            return Err(Error::Config("overlay strategy enabled without artworks".to_string()));
        }

        Ok(())
    }
}

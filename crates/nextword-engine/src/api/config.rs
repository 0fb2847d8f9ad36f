use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::components::color::Rgb;

/// Configuration for the app. Every field has a default so a partial JSON
/// document (or none at all) is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Predictor endpoint (POST, JSON).
    pub endpoint: String,
    /// The sentence revealed one word at a time.
    pub sentence: String,
    pub font: FontConfig,
    pub canvas: CanvasConfig,
    pub timing: TimingConfig,
    pub colors: ColorConfig,
    /// Seed for rotation and spiral start choices. Unset means the host picks
    /// one per page load; headless runs fall back to [`DEFAULT_SEED`].
    pub seed: Option<u64>,
}

/// Layout seed used when the config leaves it unset and no host supplies one.
pub const DEFAULT_SEED: u64 = 42;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from("/predict"),
            sentence: String::from("Every word carries the weight of infinite possibilities"),
            font: FontConfig::default(),
            canvas: CanvasConfig::default(),
            timing: TimingConfig::default(),
            colors: ColorConfig::default(),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Parse a config from a JSON string. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The configured seed, or [`DEFAULT_SEED`].
    pub fn layout_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Font sizing for the cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    /// Font size for the least important word (px).
    pub min_px: f32,
    /// Font size for the most important word (px).
    pub max_px: f32,
    /// Power-scale exponent; below 1 compresses high outliers.
    pub exponent: f32,
    /// Gap kept around every placed word (px).
    pub padding: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: String::from("Impact"),
            min_px: 50.0,
            max_px: 200.0,
            exponent: 0.5,
            padding: 2.0,
        }
    }
}

/// Canvas sizing relative to the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width_fraction: f32,
    pub max_width: f32,
    /// Viewports narrower than this use `narrow_height_fraction`.
    pub narrow_breakpoint: f32,
    pub narrow_height_fraction: f32,
    pub wide_height_fraction: f32,
    pub max_height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.8,
            max_width: 1200.0,
            narrow_breakpoint: 768.0,
            narrow_height_fraction: 0.8,
            wide_height_fraction: 0.5,
            max_height: 800.0,
        }
    }
}

/// Animation timings, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fade_base_delay_ms: f32,
    pub fade_stagger_ms: f32,
    pub fade_duration_ms: f32,
    pub highlight_duration_ms: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fade_base_delay_ms: 2000.0,
            fade_stagger_ms: 500.0,
            fade_duration_ms: 1000.0,
            highlight_duration_ms: 500.0,
        }
    }
}

impl TimingConfig {
    /// Delay before the `index`-th non-target word starts fading.
    pub fn fade_delay(&self, index: usize) -> f32 {
        self.fade_base_delay_ms + index as f32 * self.fade_stagger_ms
    }

    /// Delay before the target word starts turning red, given how many words fade.
    pub fn highlight_delay(&self, fading: usize) -> f32 {
        self.fade_base_delay_ms + fading as f32 * self.fade_stagger_ms - self.fade_stagger_ms
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub initial_fill: Rgb,
    pub highlight_fill: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            initial_fill: Rgb::CYAN,
            highlight_fill: Rgb::RED,
        }
    }
}

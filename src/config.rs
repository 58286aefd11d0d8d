//! Configuration for rendering and resizing.
//!
//! Values come from three layers, later layers winning:
//!
//! 1. stock defaults ([`AppConfig::default`])
//! 2. `thumbcard.toml` in the storage root, if present
//! 3. command-line flags (applied by the binary)
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [render]
//! # font_path = "fonts/custom.ttf" # TrueType font; unset = bundled DejaVu Sans
//! dpi = 72.0                     # Screen resolution in dots per inch
//! size = 14.0                    # Font size in points
//! hinting = "none"               # "none" | "full"
//! spacing = 1.5                  # Line spacing multiplier (2.0 = double spaced)
//! white_on_black = false         # White text on a black background
//!
//! [resize]
//! size = 128                     # Edge of the square output, in pixels
//! quality = 75                   # JPEG quality (1-100)
//! ```
//!
//! Config files are sparse; unknown keys are rejected to catch typos early.
//! The loaded [`AppConfig`] is immutable and passed explicitly to each call.

use crate::imaging::MAX_EDGE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the storage root.
pub const CONFIG_FILE_NAME: &str = "thumbcard.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Text card rendering.
    pub render: RenderConfig,
    /// Image resizing.
    pub resize: ResizeConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        self.resize.validate()
    }
}

/// Glyph hinting mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Hinting {
    /// Sub-pixel glyph placement.
    #[default]
    None,
    /// Glyph origins and advances snapped to whole pixels.
    Full,
}

/// Text card rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// TrueType font file. `None` uses the font bundled with the crate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    /// Screen resolution in dots per inch.
    pub dpi: f64,
    /// Font size in points.
    pub size: f64,
    pub hinting: Hinting,
    /// Line spacing multiplier.
    pub spacing: f64,
    /// White text on a black background instead of black on white.
    pub white_on_black: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            dpi: 72.0,
            size: 14.0,
            hinting: Hinting::None,
            spacing: 1.5,
            white_on_black: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("render.dpi", self.dpi),
            ("render.size", self.size),
            ("render.spacing", self.spacing),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Image resize settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Edge length of the square output in pixels.
    pub size: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            size: 128,
            quality: 75,
        }
    }
}

impl ResizeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_EDGE).contains(&self.size) {
            return Err(ConfigError::Validation(format!(
                "resize.size must be 1-{MAX_EDGE}, got {}",
                self.size
            )));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation(
                "resize.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(AppConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `thumbcard.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `thumbcard.toml` in the given directory.
///
/// Missing file means stock defaults. A relative `render.font_path` is left
/// as written; it resolves against the working directory, not `dir`.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `thumbcard.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# thumbcard configuration
# =======================
# Place this file in the storage root as thumbcard.toml.
# All settings are optional. Values shown below are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Text card rendering (thumbcard render)
# ---------------------------------------------------------------------------
[render]
# TrueType font used for the caption and body lines. When unset, the
# DejaVu Sans font bundled with thumbcard is used.
# font_path = "fonts/custom.ttf"

# Screen resolution in dots per inch. Pixel size = size * dpi / 72.
dpi = 72.0

# Font size in points.
size = 14.0

# Glyph hinting: "none" keeps sub-pixel positions, "full" snaps to pixels.
hinting = "none"

# Line spacing multiplier (e.g. 2.0 means double spaced).
spacing = 1.5

# White text on a black background.
white_on_black = false

# ---------------------------------------------------------------------------
# Image resizing (thumbcard resize)
# ---------------------------------------------------------------------------
[resize]
# Edge of the square output image, in pixels (1-65535).
size = 128

# JPEG quality (1 = worst, 100 = best).
quality = 75
"##
}

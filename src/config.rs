//! Shrink settings.
//!
//! Stock defaults are overridden by an optional `config.toml` placed in the
//! source directory. The file is sparse: set only the keys you want to
//! change. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [limits]
//! max_size_mb = 0.9         # Files larger than this (MiB) get shrunk
//!
//! [resize]
//! initial_long_edge = 2500  # Long edge of the first attempt (px)
//! step = 500                # Long edge decrease per attempt (px)
//! min_long_edge = 100       # Never try a long edge below this (px)
//! max_attempts = 10         # Hard ceiling on attempts per image
//!
//! [jpeg]
//! quality = 90              # JPEG quality (1-100)
//!
//! [output]
//! keep_intermediate = false # Keep superseded attempt files
//! ```

use crate::imaging::{Quality, mb_to_bytes};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the settings file looked up in the source directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShrinkConfig {
    /// Size threshold.
    pub limits: LimitsConfig,
    /// Long-edge schedule of the shrink loop.
    pub resize: ResizeConfig,
    /// Encoder settings.
    pub jpeg: JpegConfig,
    /// Output directory housekeeping.
    pub output: OutputConfig,
}

impl ShrinkConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.limits.max_size_mb > 0.0 && self.limits.max_size_mb.is_finite()) {
            return Err(ConfigError::Validation(
                "limits.max_size_mb must be a positive number".into(),
            ));
        }
        if self.jpeg.quality == 0 || self.jpeg.quality > 100 {
            return Err(ConfigError::Validation("jpeg.quality must be 1-100".into()));
        }
        if self.resize.initial_long_edge == 0 {
            return Err(ConfigError::Validation(
                "resize.initial_long_edge must be non-zero".into(),
            ));
        }
        if self.resize.step == 0 {
            return Err(ConfigError::Validation(
                "resize.step must be non-zero".into(),
            ));
        }
        if self.resize.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "resize.max_attempts must be at least 1".into(),
            ));
        }
        if self.resize.min_long_edge > self.resize.initial_long_edge {
            return Err(ConfigError::Validation(
                "resize.min_long_edge must not exceed resize.initial_long_edge".into(),
            ));
        }
        Ok(())
    }

    /// Size limit in bytes. Files strictly larger than this are over the limit.
    pub fn limit_bytes(&self) -> u64 {
        mb_to_bytes(self.limits.max_size_mb)
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.jpeg.quality)
    }
}

/// Size threshold settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum acceptable output size in MiB.
    pub max_size_mb: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_size_mb: 0.9 }
    }
}

/// Long-edge schedule of the shrink loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Long edge of the first attempt, in pixels.
    pub initial_long_edge: u32,
    /// Decrease of the long edge between attempts, in pixels.
    pub step: u32,
    /// Smallest long edge the loop will try.
    pub min_long_edge: u32,
    /// Maximum number of attempts per image.
    pub max_attempts: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            initial_long_edge: 2500,
            step: 500,
            min_long_edge: 100,
            max_attempts: 10,
        }
    }
}

/// JPEG encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegConfig {
    /// Encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for JpegConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Output directory housekeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Keep superseded attempt files instead of deleting them.
    pub keep_intermediate: bool,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ShrinkConfig::default()).expect("default config must serialize")
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<ShrinkConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: ShrinkConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# downsize configuration
# ======================
# Place this file as config.toml in the source directory.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Size limit
# ---------------------------------------------------------------------------
[limits]
# Images larger than this many MiB are shrunk, and every attempt is
# re-measured against it.
max_size_mb = 0.9

# ---------------------------------------------------------------------------
# Resize schedule
# ---------------------------------------------------------------------------
[resize]
# Long edge (the larger of width and height) of the first attempt, in pixels.
initial_long_edge = 2500

# Each retry shrinks the long edge by this many pixels.
step = 500

# The loop gives up instead of trying a long edge below this.
min_long_edge = 100

# Hard ceiling on attempts per image.
max_attempts = 10

# ---------------------------------------------------------------------------
# JPEG encoding
# ---------------------------------------------------------------------------
[jpeg]
# Encoding quality (1 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Keep superseded attempt files (name-1.jpeg, name-2.jpeg, ...) next to the
# final one instead of deleting them. Useful for debugging.
keep_intermediate = false
"##
}

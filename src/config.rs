//! Tool configuration module.
//!
//! Handles loading, validating, and merging `squeeze.toml`. Stock defaults
//! are serialized to a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to change. CLI flags override
//! the merged result in `main`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [compression]
//! mode = "fixed"            # "fixed" or "target"
//! quality = 50              # JPEG quality for mode = "fixed" (0-100)
//! target_kb = 500           # Size budget for mode = "target" (KB, > 0)
//!
//! [gallery]
//! directory = "Pictures"    # Where compressed images are saved
//! file_name = "compressed_image.jpg"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::compress::CompressionPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `squeeze.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default compression policy.
    pub compression: CompressionConfig,
    /// Where published images go.
    pub gallery: GalleryConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compression.quality > 100 {
            return Err(ConfigError::Validation(
                "compression.quality must be 0-100".into(),
            ));
        }
        if self.compression.target_kb == 0 {
            return Err(ConfigError::Validation(
                "compression.target_kb must be greater than zero".into(),
            ));
        }
        if self.gallery.file_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery.file_name must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded config.
    ///
    /// `quality` selects fixed mode and `target_kb` selects target mode; the
    /// CLI never passes both. Returns the re-validated config.
    pub fn with_overrides(
        mut self,
        quality: Option<u32>,
        target_kb: Option<u64>,
        gallery_dir: Option<String>,
        file_name: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(q) = quality {
            self.compression.mode = CompressionMode::Fixed;
            self.compression.quality = q;
        }
        if let Some(kb) = target_kb {
            self.compression.mode = CompressionMode::Target;
            self.compression.target_kb = kb;
        }
        if let Some(dir) = gallery_dir {
            self.gallery.directory = dir;
        }
        if let Some(name) = file_name {
            self.gallery.file_name = name;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Which policy `compress` uses when no CLI flag picks one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    #[default]
    Fixed,
    Target,
}

/// Default compression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressionConfig {
    pub mode: CompressionMode,
    /// JPEG quality used in fixed mode (0 = smallest, 100 = best).
    pub quality: u32,
    /// Size budget in KB (1024 bytes) used in target mode.
    pub target_kb: u64,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            mode: CompressionMode::Fixed,
            quality: 50,
            target_kb: 500,
        }
    }
}

impl CompressionConfig {
    /// The policy this config selects.
    pub fn policy(&self) -> CompressionPolicy {
        match self.mode {
            CompressionMode::Fixed => CompressionPolicy::Fixed(self.quality),
            CompressionMode::Target => CompressionPolicy::target_kb(self.target_kb),
        }
    }
}

/// Gallery output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Directory published images are written to.
    pub directory: String,
    /// Display name for published images. Collisions get ` (N)` appended.
    pub file_name: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            directory: "Pictures".to_string(),
            file_name: "compressed_image.jpg".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `squeeze.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# squeeze configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Command-line flags (--quality, --target-kb, --gallery, --name) override
# these values.

# ---------------------------------------------------------------------------
# Compression
# ---------------------------------------------------------------------------
[compression]
# "fixed": encode once at `quality`.
# "target": start at quality 100 and step down by 5 until the file fits in
#           `target_kb`. If it never fits, the smallest attempt is kept.
mode = "fixed"

# JPEG quality for fixed mode (0 = smallest file, 100 = best quality).
quality = 50

# Size budget in KB (1 KB = 1024 bytes) for target mode.
target_kb = 500

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
# Directory compressed images are saved to.
directory = "Pictures"

# File name for saved images. Existing files are never overwritten:
# "photo.jpg" becomes "photo (1).jpg", "photo (2).jpg", ...
file_name = "compressed_image.jpg"
"##
}

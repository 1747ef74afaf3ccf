//! Generator configuration module.
//!
//! Handles loading, validating, and merging `traitmint.toml`. Stock defaults
//! are serialized to a TOML value and the user file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! composition = "overlap"     # "overlap" or "horizontal"
//! output_dir = "generated"    # Where generated images are written
//!
//! [[traits]]                  # One entry per trait, in layer order
//! path = "traits/background"  # Relative to the config file's directory
//! rarity_multiplier = 2       # Optional, defaults to 2
//!
//! [[traits]]
//! path = "traits/body"
//!
//! [processing]
//! max_processes = 4           # Max parallel decoders (omit for auto = CPU cores)
//! ```
//!
//! Trait order matters twice over: it is the layer order of the composed
//! image and the order in which traits consume the seed's digit groups.
//! Reordering traits changes every generated image.
//!
//! Unknown keys are rejected to catch typos early.

use crate::compositor::CompositionStrategy;
use crate::traits::DEFAULT_RARITY_MULTIPLIER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
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

/// Generator configuration loaded from `traitmint.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// How selected variations are arranged in the final image.
    pub composition: CompositionStrategy,
    /// Directory generated images (and their audit records) are written to.
    pub output_dir: PathBuf,
    /// Trait directories, in layer order.
    pub traits: Vec<TraitConfig>,
    /// Parallel decoding settings.
    pub processing: ProcessingConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            composition: CompositionStrategy::default(),
            output_dir: PathBuf::from("generated"),
            traits: Vec::new(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.traits.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[traits]] entry is required".into(),
            ));
        }
        for (i, t) in self.traits.iter().enumerate() {
            if t.rarity_multiplier == 0 {
                return Err(ConfigError::Validation(format!(
                    "traits[{i}].rarity_multiplier must be positive ({})",
                    t.path.display()
                )));
            }
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve relative trait and output paths against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for t in &mut self.traits {
            if t.path.is_relative() {
                t.path = base.join(&t.path);
            }
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
    }
}

/// One trait directory and its rarity multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraitConfig {
    /// Trait directory containing one subdirectory per rarity level.
    pub path: PathBuf,
    /// Ratio by which each rarity level is less likely than the level below.
    #[serde(default = "default_rarity_multiplier")]
    pub rarity_multiplier: u32,
}

fn default_rarity_multiplier() -> u32 {
    DEFAULT_RARITY_MULTIPLIER
}

impl TraitConfig {
    /// A trait entry with the default rarity multiplier.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rarity_multiplier: DEFAULT_RARITY_MULTIPLIER,
        }
    }

    pub fn with_multiplier(mut self, rarity_multiplier: u32) -> Self {
        self.rarity_multiplier = rarity_multiplier;
        self
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image decoding workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GeneratorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (including arrays) replace base values entirely.
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

/// Merge an overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: toml::Value) -> Result<GeneratorConfig, ConfigError> {
    let merged = merge_toml(stock_defaults_value(), overlay);
    let config: GeneratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Parse config from a TOML string (paths left as written).
pub fn parse_config(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let value: toml::Value = toml::from_str(content)?;
    resolve_config(value)
}

/// Load config from a `traitmint.toml` file.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// validates the result, and resolves relative paths against the file's
/// directory.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    config.resolve_paths(base);
    Ok(config)
}

/// Returns a fully-commented stock `traitmint.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# traitmint configuration
# =======================
# Values shown below are the defaults unless noted otherwise.
# Unknown keys will cause an error.

# How selected variations are arranged:
#   "overlap"    - layers stacked at the origin, later traits on top
#                  (canvas = widest x tallest variation)
#   "horizontal" - variations side by side, first trait on the left
#                  (canvas = summed widths x tallest variation)
composition = "overlap"

# Directory for generated <seed>.png images and <seed>.json audit records.
# Relative paths resolve against this file's directory.
output_dir = "generated"

# ---------------------------------------------------------------------------
# Traits
# ---------------------------------------------------------------------------
# One [[traits]] entry per trait directory, in layer order (first = bottom).
# The order also fixes which digits of the seed each trait reads, so
# reordering traits changes every generated image.
#
# Each trait directory holds one subdirectory per rarity level (0, 1, 2, ...)
# containing .png variations. Rarity 0 is the most common.
#
# rarity_multiplier: how many times less likely each rarity level is than
# the level below it. Defaults to 2.

[[traits]]
path = "traits/background"
rarity_multiplier = 2

[[traits]]
path = "traits/body"
rarity_multiplier = 2

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-decoding workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

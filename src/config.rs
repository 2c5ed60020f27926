//! Run configuration.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. stock defaults ([`AugmentConfig::default`]);
//! 2. an optional TOML file passed with `--config`;
//! 3. command-line flags ([`Overrides`]).
//!
//! ## Configuration File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [warp]
//! enabled = false       # Write warped copies
//! angle_range = 5.0     # Rotation drawn from [-angle_range, angle_range] degrees
//! # seed = 42           # Fixed seed for reproducible warps (omit for random)
//!
//! [tiles]
//! enabled = false       # Tile the warped copies (ignored unless warp.enabled)
//! size = 256            # Tile edge in pixels
//!
//! [output]
//! jpeg_quality = 95     # JPEG encoding quality (1-100)
//! report = false        # Write report.json into the output folder
//! ```
//!
//! Unknown keys are rejected to catch typos early. Resize factors are not
//! part of the file; they are always given on the command line.

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
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Augmentation settings shared by every image in a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AugmentConfig {
    /// Rotation + perspective augmentation.
    pub warp: WarpConfig,
    /// Tiling of warped copies.
    pub tiles: TileConfig,
    /// Encoding and reporting.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarpConfig {
    pub enabled: bool,
    /// Half-width of the rotation range, in degrees. The sign is ignored.
    pub angle_range: f32,
    /// Seed for the random generator. `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            angle_range: 5.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileConfig {
    pub enabled: bool,
    /// Tile edge length in pixels.
    pub size: u32,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            size: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1-100). PNG output is lossless and ignores it.
    pub jpeg_quality: u32,
    /// Write `report.json` into the output folder.
    pub report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            report: false,
        }
    }
}

/// Values given on the command line. Flags only ever switch features on;
/// `None` leaves the lower layers in charge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub warp: bool,
    pub angle_range: Option<f32>,
    pub tile: bool,
    pub tile_size: Option<u32>,
    pub seed: Option<u64>,
    pub jpeg_quality: Option<u32>,
    pub report: bool,
}

impl AugmentConfig {
    /// Layer command-line values on top of this config.
    pub fn apply(&mut self, overrides: &Overrides) {
        self.warp.enabled |= overrides.warp;
        self.tiles.enabled |= overrides.tile;
        self.output.report |= overrides.report;
        if let Some(range) = overrides.angle_range {
            self.warp.angle_range = range;
        }
        if let Some(size) = overrides.tile_size {
            self.tiles.size = size;
        }
        if let Some(seed) = overrides.seed {
            self.warp.seed = Some(seed);
        }
        if let Some(quality) = overrides.jpeg_quality {
            self.output.jpeg_quality = quality;
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.warp.angle_range.is_finite() {
            return Err(ConfigError::Validation(
                "warp.angle_range must be a finite number of degrees".into(),
            ));
        }
        if self.tiles.size == 0 {
            return Err(ConfigError::Validation("tiles.size must be positive".into()));
        }
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(AugmentConfig::default())?)
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

/// Read a TOML file as a raw value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load the config, merging `file` (if any) over the stock defaults.
///
/// The result is not validated: command-line overrides still have to be
/// applied. Call [`AugmentConfig::validate`] on the final value.
pub fn load_config(file: Option<&Path>) -> Result<AugmentConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match file {
        Some(path) => merge_toml(base, load_raw_config(path)?),
        None => base,
    };
    Ok(merged.try_into()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = AugmentConfig::default();
        assert!(!config.warp.enabled);
        assert_eq!(config.warp.angle_range, 5.0);
        assert_eq!(config.warp.seed, None);
        assert!(!config.tiles.enabled);
        assert_eq!(config.tiles.size, 256);
        assert_eq!(config.output.jpeg_quality, 95);
        assert!(!config.output.report);
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(AugmentConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[warp]
angle_range = 12
"#;
        let config: AugmentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.warp.angle_range, 12.0);
        // Unspecified values are defaults
        assert!(!config.warp.enabled);
        assert_eq!(config.tiles.size, 256);
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[tiles]
sise = 128
"#;
        let result: Result<AugmentConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<AugmentConfig, _> = toml::from_str("[colors]\nbackground = 1\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_without_file_is_default() {
        assert_eq!(load_config(None).unwrap(), AugmentConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("augment.toml");
        fs::write(
            &path,
            r#"
[warp]
enabled = true
seed = 7

[tiles]
enabled = true
size = 128

[output]
jpeg_quality = 80
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(config.warp.enabled);
        assert_eq!(config.warp.seed, Some(7));
        assert_eq!(config.warp.angle_range, 5.0);
        assert!(config.tiles.enabled);
        assert_eq!(config.tiles.size, 128);
        assert_eq!(config.output.jpeg_quality, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_config_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("augment.toml");
        fs::write(&path, "this is not [valid toml").unwrap();

        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_unknown_key_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("augment.toml");
        fs::write(&path, "[warp]\nangle = 3\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = AugmentConfig::default();
        config.warp.angle_range = 20.0;
        config.tiles.size = 64;

        config.apply(&Overrides {
            angle_range: Some(2.5),
            tile_size: Some(512),
            seed: Some(99),
            jpeg_quality: Some(70),
            ..Overrides::default()
        });

        assert_eq!(config.warp.angle_range, 2.5);
        assert_eq!(config.tiles.size, 512);
        assert_eq!(config.warp.seed, Some(99));
        assert_eq!(config.output.jpeg_quality, 70);
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let mut config = AugmentConfig::default();
        config.warp.enabled = true;
        config.warp.seed = Some(5);

        config.apply(&Overrides::default());

        assert!(config.warp.enabled);
        assert_eq!(config.warp.seed, Some(5));
        assert_eq!(config.warp.angle_range, 5.0);
    }

    #[test]
    fn flags_switch_features_on() {
        let mut config = AugmentConfig::default();
        config.apply(&Overrides {
            warp: true,
            tile: true,
            report: true,
            ..Overrides::default()
        });
        assert!(config.warp.enabled);
        assert!(config.tiles.enabled);
        assert!(config.output.report);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_negative_angle_range_ok() {
        let mut config = AugmentConfig::default();
        config.warp.angle_range = -5.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_huge_angle_range_ok() {
        let mut config = AugmentConfig::default();
        config.warp.angle_range = f32::MAX;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_infinite_angle_range() {
        let mut config = AugmentConfig::default();
        config.warp.angle_range = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_nan_angle_range() {
        let mut config = AugmentConfig::default();
        config.warp.angle_range = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_angle_range_ok() {
        let mut config = AugmentConfig::default();
        config.warp.angle_range = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_zero_tile_size() {
        let mut config = AugmentConfig::default();
        config.tiles.size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_tiles_without_warp_ok() {
        let mut config = AugmentConfig::default();
        config.tiles.enabled = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_jpeg_quality_bounds() {
        let mut config = AugmentConfig::default();
        config.output.jpeg_quality = 0;
        assert!(config.validate().is_err());
        config.output.jpeg_quality = 101;
        assert!(config.validate().is_err());
        config.output.jpeg_quality = 100;
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value().unwrap();
        let table = value.as_table().unwrap();
        assert!(table.contains_key("warp"));
        assert!(table.contains_key("tiles"));
        assert!(table.contains_key("output"));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str("[tiles]\nenabled = false\nsize = 256\n").unwrap();
        let overlay: toml::Value = toml::from_str("[tiles]\nsize = 32\n").unwrap();

        let merged = merge_toml(base, overlay);
        let tiles = merged.get("tiles").unwrap();
        assert_eq!(tiles.get("size").unwrap().as_integer(), Some(32));
        assert_eq!(tiles.get("enabled").unwrap().as_bool(), Some(false));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(toml::Value::Integer(1), toml::Value::Integer(2));
        assert_eq!(merged.as_integer(), Some(2));
    }
}

//! TOML-loadable settings covering both stages.

use serde::Deserialize;

use boreas_dealias::DealiasConfig;
use boreas_superob::SuperobConfig;

/// Error type for loading [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Returned when the TOML text does not parse.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level Boreas settings.
///
/// Every field has a default, so an empty document is a valid
/// configuration running both stages with their standard thresholds.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Dealiasing stage settings.
    #[serde(default)]
    pub dealiasing: DealiasSettings,

    /// Super-observation stage settings.
    #[serde(default)]
    pub superobing: SuperobSettings,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }
}

/// Settings of the dealiasing stage.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DealiasSettings {
    /// Whether the stage runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Height-slab thickness in meters.
    #[serde(default = "default_z_sector_size")]
    pub z_sector_size: f64,
    /// Height ceiling in meters above sea level.
    #[serde(default = "default_z_max")]
    pub z_max: f64,
    /// Minimum eligible gates per slab.
    #[serde(default = "default_min_good_points")]
    pub min_good_points: usize,
    /// Maximum credible wind speed in m/s.
    #[serde(default = "default_max_wind")]
    pub max_wind: f64,
}

impl DealiasSettings {
    /// Converts to the stage configuration.
    pub fn to_config(&self) -> DealiasConfig {
        DealiasConfig::new()
            .with_z_sector_size(self.z_sector_size)
            .with_z_max(self.z_max)
            .with_min_good_points(self.min_good_points)
            .with_max_wind(self.max_wind)
    }
}

impl Default for DealiasSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            z_sector_size: default_z_sector_size(),
            z_max: default_z_max(),
            min_good_points: default_min_good_points(),
            max_wind: default_max_wind(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_z_sector_size() -> f64 {
    200.0
}
fn default_z_max() -> f64 {
    12_000.0
}
fn default_min_good_points() -> usize {
    300
}
fn default_max_wind() -> f64 {
    50.0
}

/// Settings of the super-observation stage.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuperobSettings {
    /// Whether the stage runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Source gates folded into one coarse gate radially.
    #[serde(default = "default_range_bin_factor")]
    pub range_bin_factor: usize,
    /// Source rays folded into one coarse ray.
    #[serde(default = "default_ray_angle_factor")]
    pub ray_angle_factor: usize,
    /// Maximum coarse-cell arc length in meters.
    #[serde(default = "default_max_arc_size")]
    pub max_arc_size: f64,
    /// Quality threshold a source gate must exceed.
    #[serde(default = "default_min_quality")]
    pub min_quality: f64,
    /// Clear-sky reflectivity threshold in dBZ.
    #[serde(default)]
    pub dbz_clearsky: f64,
    /// Required wet fraction of a coarse reflectivity cell.
    #[serde(default = "default_dbz_percentage")]
    pub dbz_percentage: f64,
    /// Required defined fraction of a coarse velocity cell.
    #[serde(default = "default_vrad_percentage")]
    pub vrad_percentage: f64,
    /// Maximum velocity spread of a coarse cell in m/s.
    #[serde(default = "default_vrad_max_std")]
    pub vrad_max_std: f64,
}

impl SuperobSettings {
    /// Converts to the stage configuration.
    pub fn to_config(&self) -> SuperobConfig {
        SuperobConfig::new()
            .with_range_bin_factor(self.range_bin_factor)
            .with_ray_angle_factor(self.ray_angle_factor)
            .with_max_arc_size(self.max_arc_size)
            .with_min_quality(self.min_quality)
            .with_dbz_clearsky(self.dbz_clearsky)
            .with_dbz_percentage(self.dbz_percentage)
            .with_vrad_percentage(self.vrad_percentage)
            .with_vrad_max_std(self.vrad_max_std)
    }
}

impl Default for SuperobSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            range_bin_factor: default_range_bin_factor(),
            ray_angle_factor: default_ray_angle_factor(),
            max_arc_size: default_max_arc_size(),
            min_quality: default_min_quality(),
            dbz_clearsky: 0.0,
            dbz_percentage: default_dbz_percentage(),
            vrad_percentage: default_vrad_percentage(),
            vrad_max_std: default_vrad_max_std(),
        }
    }
}

fn default_range_bin_factor() -> usize {
    4
}
fn default_ray_angle_factor() -> usize {
    3
}
fn default_max_arc_size() -> f64 {
    10_000.0
}
fn default_min_quality() -> f64 {
    0.8
}
fn default_dbz_percentage() -> f64 {
    0.3
}
fn default_vrad_percentage() -> f64 {
    0.5
}
fn default_vrad_max_std() -> f64 {
    3.0
}

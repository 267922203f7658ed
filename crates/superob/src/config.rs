//! Configuration for the super-observation stage.

use crate::error::SuperobError;

/// Configuration for the super-observation stage.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use boreas_superob::SuperobConfig;
///
/// let config = SuperobConfig::new()
///     .with_range_bin_factor(5)
///     .with_max_arc_size(15_000.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SuperobConfig {
    range_bin_factor: usize,
    ray_angle_factor: usize,
    max_arc_size: f64,
    min_quality: f64,
    dbz_clearsky: f64,
    dbz_percentage: f64,
    vrad_percentage: f64,
    vrad_max_std: f64,
}

impl SuperobConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `range_bin_factor = 4`, `ray_angle_factor = 3`,
    /// `max_arc_size = 10_000 m`, `min_quality = 0.8`,
    /// `dbz_clearsky = 0 dBZ`, `dbz_percentage = 0.3`,
    /// `vrad_percentage = 0.5`, `vrad_max_std = 3 m/s`.
    pub fn new() -> Self {
        Self {
            range_bin_factor: 4,
            ray_angle_factor: 3,
            max_arc_size: 10_000.0,
            min_quality: 0.8,
            dbz_clearsky: 0.0,
            dbz_percentage: 0.3,
            vrad_percentage: 0.5,
            vrad_max_std: 3.0,
        }
    }

    /// Sets how many source gates fold into one coarse gate radially.
    pub fn with_range_bin_factor(mut self, f: usize) -> Self {
        self.range_bin_factor = f;
        self
    }

    /// Sets how many source rays fold into one coarse ray.
    pub fn with_ray_angle_factor(mut self, f: usize) -> Self {
        self.ray_angle_factor = f;
        self
    }

    /// Sets the maximum arc length of a coarse cell in meters.
    pub fn with_max_arc_size(mut self, s: f64) -> Self {
        self.max_arc_size = s;
        self
    }

    /// Sets the quality threshold a source gate must exceed.
    pub fn with_min_quality(mut self, q: f64) -> Self {
        self.min_quality = q;
        self
    }

    /// Sets the reflectivity threshold separating precipitation from
    /// clear sky.
    pub fn with_dbz_clearsky(mut self, t: f64) -> Self {
        self.dbz_clearsky = t;
        self
    }

    /// Sets the wet fraction a coarse reflectivity cell must exceed.
    pub fn with_dbz_percentage(mut self, p: f64) -> Self {
        self.dbz_percentage = p;
        self
    }

    /// Sets the good fraction a coarse velocity cell must exceed.
    pub fn with_vrad_percentage(mut self, p: f64) -> Self {
        self.vrad_percentage = p;
        self
    }

    /// Sets the maximum velocity spread of a coarse cell in m/s.
    pub fn with_vrad_max_std(mut self, s: f64) -> Self {
        self.vrad_max_std = s;
        self
    }

    /// Returns the radial fold factor.
    pub fn range_bin_factor(&self) -> usize {
        self.range_bin_factor
    }

    /// Returns the azimuthal fold factor.
    pub fn ray_angle_factor(&self) -> usize {
        self.ray_angle_factor
    }

    /// Returns the maximum coarse-cell arc length in meters.
    pub fn max_arc_size(&self) -> f64 {
        self.max_arc_size
    }

    /// Returns the source-gate quality threshold.
    pub fn min_quality(&self) -> f64 {
        self.min_quality
    }

    /// Returns the clear-sky reflectivity threshold.
    pub fn dbz_clearsky(&self) -> f64 {
        self.dbz_clearsky
    }

    /// Returns the required wet fraction.
    pub fn dbz_percentage(&self) -> f64 {
        self.dbz_percentage
    }

    /// Returns the required good fraction for velocity.
    pub fn vrad_percentage(&self) -> f64 {
        self.vrad_percentage
    }

    /// Returns the maximum velocity spread in m/s.
    pub fn vrad_max_std(&self) -> f64 {
        self.vrad_max_std
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SuperobError> {
        if self.range_bin_factor == 0 {
            return Err(SuperobError::InvalidConfig {
                reason: "range_bin_factor must be >= 1".to_string(),
            });
        }
        if self.ray_angle_factor == 0 {
            return Err(SuperobError::InvalidConfig {
                reason: "ray_angle_factor must be >= 1".to_string(),
            });
        }
        if !self.max_arc_size.is_finite() || self.max_arc_size <= 0.0 {
            return Err(SuperobError::InvalidConfig {
                reason: format!(
                    "max_arc_size must be finite and positive, got {}",
                    self.max_arc_size
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.min_quality) {
            return Err(SuperobError::InvalidConfig {
                reason: format!("min_quality must be in [0, 1], got {}", self.min_quality),
            });
        }
        if !self.dbz_clearsky.is_finite() {
            return Err(SuperobError::InvalidConfig {
                reason: format!("dbz_clearsky must be finite, got {}", self.dbz_clearsky),
            });
        }
        if !(0.0..=1.0).contains(&self.dbz_percentage) {
            return Err(SuperobError::InvalidConfig {
                reason: format!(
                    "dbz_percentage must be in [0, 1], got {}",
                    self.dbz_percentage
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.vrad_percentage) {
            return Err(SuperobError::InvalidConfig {
                reason: format!(
                    "vrad_percentage must be in [0, 1], got {}",
                    self.vrad_percentage
                ),
            });
        }
        if !self.vrad_max_std.is_finite() || self.vrad_max_std <= 0.0 {
            return Err(SuperobError::InvalidConfig {
                reason: format!(
                    "vrad_max_std must be finite and positive, got {}",
                    self.vrad_max_std
                ),
            });
        }
        Ok(())
    }
}

impl Default for SuperobConfig {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration for the dealiasing stage.

use crate::error::DealiasError;

/// Configuration for the dealiasing stage.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use boreas_dealias::DealiasConfig;
///
/// let config = DealiasConfig::new()
///     .with_z_sector_size(150.0)
///     .with_max_wind(60.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DealiasConfig {
    z_sector_size: f64,
    z_max: f64,
    min_good_points: usize,
    max_wind: f64,
}

impl DealiasConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `z_sector_size = 200 m`, `z_max = 12_000 m`,
    /// `min_good_points = 300`, `max_wind = 50 m/s`.
    pub fn new() -> Self {
        Self {
            z_sector_size: 200.0,
            z_max: 12_000.0,
            min_good_points: 300,
            max_wind: 50.0,
        }
    }

    /// Sets the height-slab thickness in meters.
    pub fn with_z_sector_size(mut self, size: f64) -> Self {
        self.z_sector_size = size;
        self
    }

    /// Sets the height ceiling in meters above sea level.
    pub fn with_z_max(mut self, z: f64) -> Self {
        self.z_max = z;
        self
    }

    /// Sets the minimum number of eligible gates a slab needs for a fit.
    pub fn with_min_good_points(mut self, n: usize) -> Self {
        self.min_good_points = n;
        self
    }

    /// Sets the maximum credible wind speed in m/s.
    pub fn with_max_wind(mut self, w: f64) -> Self {
        self.max_wind = w;
        self
    }

    /// Returns the height-slab thickness in meters.
    pub fn z_sector_size(&self) -> f64 {
        self.z_sector_size
    }

    /// Returns the height ceiling in meters.
    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// Returns the minimum eligible-gate count per slab.
    pub fn min_good_points(&self) -> usize {
        self.min_good_points
    }

    /// Returns the maximum credible wind speed in m/s.
    pub fn max_wind(&self) -> f64 {
        self.max_wind
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), DealiasError> {
        if !self.z_sector_size.is_finite() || self.z_sector_size <= 0.0 {
            return Err(DealiasError::InvalidConfig {
                reason: format!(
                    "z_sector_size must be finite and positive, got {}",
                    self.z_sector_size
                ),
            });
        }
        if !self.z_max.is_finite() || self.z_max <= 0.0 {
            return Err(DealiasError::InvalidConfig {
                reason: format!("z_max must be finite and positive, got {}", self.z_max),
            });
        }
        if self.min_good_points == 0 {
            return Err(DealiasError::InvalidConfig {
                reason: "min_good_points must be >= 1".to_string(),
            });
        }
        if !self.max_wind.is_finite() || self.max_wind <= 0.0 {
            return Err(DealiasError::InvalidConfig {
                reason: format!(
                    "max_wind must be finite and positive, got {}",
                    self.max_wind
                ),
            });
        }
        Ok(())
    }
}

impl Default for DealiasConfig {
    fn default() -> Self {
        Self::new()
    }
}

//! Error type for the super-observation stage.

use boreas_odim::OdimError;

/// Error type for all fallible operations in the super-observation stage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SuperobError {
    /// Returned when a configuration value is out of range.
    #[error("invalid superob configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending value.
        reason: String,
    },

    /// Returned when the volume has neither reflectivity nor velocity
    /// sweeps.
    #[error("no data to superob")]
    NoData,

    /// Returned when every measurement of both moments is missing.
    #[error("all measurements are missing")]
    AllMissing,

    /// Returned when the output file rejects a write or lacks a required
    /// attribute.
    #[error("output file: {0}")]
    Output(#[from] OdimError),
}

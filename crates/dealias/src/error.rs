//! Error type for the dealiasing stage.

use boreas_odim::OdimError;

/// Error type for all fallible operations in the dealiasing stage.
///
/// Any of these aborts processing of the current volume; the caller moves
/// on to the next file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DealiasError {
    /// Returned when a configuration value is out of range.
    #[error("invalid dealias configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending value.
        reason: String,
    },

    /// Returned when the volume carries no radial-velocity sweeps.
    #[error("no VRAD datasets in volume")]
    NoVradData,

    /// Returned when every radial-velocity measurement is missing.
    #[error("all VRAD measurements are missing")]
    AllMissing,

    /// Returned when the output file rejects a write or lacks a required
    /// attribute.
    #[error("output file: {0}")]
    Output(#[from] OdimError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_no_vrad() {
        assert_eq!(
            DealiasError::NoVradData.to_string(),
            "no VRAD datasets in volume"
        );
    }

    #[test]
    fn error_all_missing() {
        assert_eq!(
            DealiasError::AllMissing.to_string(),
            "all VRAD measurements are missing"
        );
    }

    #[test]
    fn error_wraps_odim() {
        let e = DealiasError::from(OdimError::MissingAttribute {
            path: "dataset1/data1/what".to_string(),
            name: "nodata".to_string(),
        });
        assert_eq!(
            e.to_string(),
            "output file: missing attribute nodata at dataset1/data1/what"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<DealiasError>();
    }
}

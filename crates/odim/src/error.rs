//! Error type for output-file operations.

/// Error type for all fallible operations against an ODIM output file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OdimError {
    /// Returned when a required attribute is absent from the file.
    #[error("missing attribute {name} at {path}")]
    MissingAttribute {
        /// Group path the attribute was looked up under.
        path: String,
        /// Attribute name.
        name: String,
    },

    /// Returned when the backing store rejects a write.
    #[error("write to {path} failed: {reason}")]
    WriteFailed {
        /// Group path of the rejected write.
        path: String,
        /// Backend-specific failure description.
        reason: String,
    },
}

//! The writer trait the processing stages emit their results through.

use ndarray::Array2;

use crate::error::OdimError;

/// An attribute value in the ODIM hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// 64-bit float attribute.
    Double(f64),
    /// 64-bit integer attribute.
    Int(i64),
    /// String attribute.
    Text(String),
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Handle to an open output file in the ODIM group layout.
///
/// Paths are `/`-separated group paths relative to the file root, e.g.
/// `dataset2/data1/what`. Implementations are expected to overwrite
/// existing attributes and datasets silently.
pub trait OdimWriter {
    /// Writes (or overwrites) an attribute under `path`.
    fn write_attr(&mut self, path: &str, name: &str, value: AttrValue) -> Result<(), OdimError>;

    /// Reads a numeric attribute under `path`, if present.
    ///
    /// Integer attributes are widened to `f64`; string attributes read as
    /// `None`.
    fn read_attr(&self, path: &str, name: &str) -> Option<f64>;

    /// Writes (or overwrites) a 2-D byte dataset named `name` under `path`.
    fn write_dataset(&mut self, path: &str, name: &str, data: &Array2<u8>)
        -> Result<(), OdimError>;
}

/// Reads a numeric attribute that must be present, turning absence into
/// an [`OdimError::MissingAttribute`].
pub fn require_attr(file: &dyn OdimWriter, path: &str, name: &str) -> Result<f64, OdimError> {
    file.read_attr(path, name)
        .ok_or_else(|| OdimError::MissingAttribute {
            path: path.to_string(),
            name: name.to_string(),
        })
}

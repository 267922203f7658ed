//! In-memory ODIM store.

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::error::OdimError;
use crate::writer::{AttrValue, OdimWriter};

/// In-memory [`OdimWriter`] implementation.
///
/// Keeps attributes and datasets in sorted maps keyed by `(path, name)`.
/// Used throughout the test suites and usable by tooling that wants to
/// inspect stage output without a file on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryOdim {
    attrs: BTreeMap<(String, String), AttrValue>,
    datasets: BTreeMap<(String, String), Array2<u8>>,
}

impl MemoryOdim {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the attribute stored under `(path, name)`, if any.
    pub fn attr(&self, path: &str, name: &str) -> Option<&AttrValue> {
        self.attrs.get(&(path.to_string(), name.to_string()))
    }

    /// Returns the dataset stored under `(path, name)`, if any.
    pub fn dataset(&self, path: &str, name: &str) -> Option<&Array2<u8>> {
        self.datasets.get(&(path.to_string(), name.to_string()))
    }

    /// Number of stored datasets.
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }
}

impl OdimWriter for MemoryOdim {
    fn write_attr(&mut self, path: &str, name: &str, value: AttrValue) -> Result<(), OdimError> {
        self.attrs
            .insert((path.to_string(), name.to_string()), value);
        Ok(())
    }

    fn read_attr(&self, path: &str, name: &str) -> Option<f64> {
        match self.attr(path, name)? {
            AttrValue::Double(v) => Some(*v),
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Text(_) => None,
        }
    }

    fn write_dataset(
        &mut self,
        path: &str,
        name: &str,
        data: &Array2<u8>,
    ) -> Result<(), OdimError> {
        self.datasets
            .insert((path.to_string(), name.to_string()), data.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attrs_round_trip() {
        let mut file = MemoryOdim::new();
        file.write_attr("dataset1/where", "rscale", AttrValue::Double(2000.0))
            .unwrap();
        file.write_attr("dataset1/where", "nbins", AttrValue::Int(120))
            .unwrap();
        file.write_attr("dataset1/quality1/how", "task", AttrValue::from("superobing"))
            .unwrap();

        assert_eq!(file.read_attr("dataset1/where", "rscale"), Some(2000.0));
        assert_eq!(file.read_attr("dataset1/where", "nbins"), Some(120.0));
        // String attributes are not numeric.
        assert_eq!(file.read_attr("dataset1/quality1/how", "task"), None);
        assert_eq!(file.read_attr("dataset1/where", "absent"), None);
    }

    #[test]
    fn attrs_overwrite() {
        let mut file = MemoryOdim::new();
        file.write_attr("p", "gain", AttrValue::Double(1.0)).unwrap();
        file.write_attr("p", "gain", AttrValue::Double(0.5)).unwrap();
        assert_eq!(file.read_attr("p", "gain"), Some(0.5));
    }

    #[test]
    fn datasets_stored_by_path_and_name() {
        let mut file = MemoryOdim::new();
        let bytes = Array2::from_shape_fn((2, 3), |(j, k)| (j * 3 + k) as u8);
        file.write_dataset("dataset1/data1", "data", &bytes).unwrap();
        assert_eq!(file.dataset_count(), 1);
        let stored = file.dataset("dataset1/data1", "data").unwrap();
        assert_eq!(stored[[1, 2]], 5);
        assert!(file.dataset("dataset1/data2", "data").is_none());
    }
}

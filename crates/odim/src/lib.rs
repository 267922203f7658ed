//! Output-file seam and 8-bit encoding for the Boreas radar post-processor.
//!
//! The processing stages never touch HDF5 themselves; they talk to an
//! [`OdimWriter`], which exposes the three operations the ODIM layout
//! needs: scalar/string attributes, a numeric attribute lookup, and 2-D
//! byte datasets. The ingest side of the pipeline provides the file-backed
//! implementation; [`MemoryOdim`] is an in-memory implementation for tests
//! and downstream tooling.
//!
//! The [`quantize`] module holds the 8-bit gain/offset encoding shared by
//! every write path.

mod error;
mod memory;
pub mod quantize;
mod writer;

pub use error::OdimError;
pub use memory::MemoryOdim;
pub use writer::{require_attr, AttrValue, OdimWriter};

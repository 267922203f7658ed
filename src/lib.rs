//! Boreas — polar-volume weather-radar post-processing.
//!
//! Boreas takes homogenized ODIM polar volumes and prepares them for
//! assimilation in two stages: Doppler velocity dealiasing
//! ([`boreas_dealias`]) and super-observation generation
//! ([`boreas_superob`]). This crate wires the stages into a per-volume
//! [`pipeline`] driven by a single TOML-loadable [`Settings`] value.
//!
//! Reading and homogenizing the input files is the job of the host
//! application; it hands each volume over as a
//! [`PolarVolume`](boreas_volume::PolarVolume) together with an
//! [`OdimWriter`](boreas_odim::OdimWriter) for the output file.
//!
//! ```ignore
//! use boreas::{pipeline, Settings};
//!
//! let settings: Settings = toml::from_str(&config_text)?;
//! for file in input_files {
//!     let (mut volume, mut out) = ingest(&file)?;
//!     match pipeline::process_volume(&mut volume, &settings, &mut out) {
//!         Ok(summary) => tracing::info!(?summary, "volume processed"),
//!         Err(e) => tracing::error!(error = %e, "volume failed"),
//!     }
//! }
//! ```

pub mod logging;
pub mod pipeline;
mod settings;

pub use pipeline::{process_volume, PipelineError, ProcessSummary};
pub use settings::{DealiasSettings, Settings, SettingsError, SuperobSettings};

pub use boreas_dealias::{dealias, DealiasConfig, DealiasError, DealiasSummary};
pub use boreas_odim::{AttrValue, MemoryOdim, OdimError, OdimWriter};
pub use boreas_superob::{superob, SuperobConfig, SuperobError, SuperobSummary};
pub use boreas_volume::{Moment, PolarVolume, SweepGeometry};

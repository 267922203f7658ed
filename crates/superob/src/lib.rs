//! Super-observation generation for polar radar volumes.
//!
//! Assimilation wants far fewer, better-qualified observations than a
//! radar volume carries. This stage folds blocks of source gates into
//! coarse cells on a reduced polar grid:
//!
//! 1. lay out the coarse grid from the fold factors ([`grid`]);
//! 2. bound each cell's arc length by shrinking far-range ray bundles
//!    ([`borders`]);
//! 3. aggregate reflectivity with clear-sky handling and velocity with a
//!    spread gate ([`aggregate`]);
//! 4. write the coarse planes back quantized.
//!
//! # Quick start
//!
//! ```ignore
//! use boreas_superob::{superob, SuperobConfig};
//!
//! let config = SuperobConfig::new().with_max_arc_size(15_000.0);
//! let summary = superob(&mut volume, &config, &mut out_file)?;
//! ```

pub mod aggregate;
pub mod borders;
mod config;
mod error;
pub mod grid;
mod write;

pub use config::SuperobConfig;
pub use error::SuperobError;

use tracing::info;

use boreas_odim::OdimWriter;
use boreas_volume::PolarVolume;

/// What the super-observation stage did to a volume.
#[derive(Debug, Clone)]
pub struct SuperobSummary {
    /// Recoverable conditions encountered, for the caller's logger.
    pub warnings: Vec<String>,
    /// Number of coarse reflectivity cells emitted.
    pub dbz_cells: usize,
    /// Number of coarse velocity cells emitted.
    pub vrad_cells: usize,
    /// Whether the velocity aggregation consumed the dealiased cube.
    pub used_dealiased: bool,
}

/// Runs the super-observation stage on `volume` and writes the result
/// through `out`.
///
/// Reflectivity and velocity are processed independently; a moment with
/// no sweeps is skipped. An all-NaN moment on one side only degrades to a
/// warning (its coarse planes come out empty); missing everything is
/// fatal. On success the volume carries `sdbz` and `svrad`.
pub fn superob(
    volume: &mut PolarVolume,
    config: &SuperobConfig,
    out: &mut dyn OdimWriter,
) -> Result<SuperobSummary, SuperobError> {
    config.validate()?;

    if volume.dbz.is_empty() && volume.vrad.is_empty() {
        return Err(SuperobError::NoData);
    }
    let mut warnings = Vec::new();
    let dbz_missing = volume.dbz.all_missing();
    let vrad_missing = volume.vrad.all_missing();
    if dbz_missing && vrad_missing {
        return Err(SuperobError::AllMissing);
    }
    if dbz_missing {
        warnings.push("all DBZ measurements are missing".to_string());
    }
    if vrad_missing {
        warnings.push("all VRAD measurements are missing".to_string());
    }

    let mut dbz_cells = 0;
    let mut vrad_cells = 0;

    if !volume.dbz.is_empty() {
        let mut coarse = grid::coarse_moment(&volume.dbz, config);
        aggregate::aggregate_dbz(&volume.dbz, &mut coarse, config);
        dbz_cells = coarse.meas.iter().filter(|v| !v.is_nan()).count();
        info!(cells = dbz_cells, "reflectivity super-observations made");
        write::write_coarse_dbz(&coarse, out)?;
        volume.sdbz = Some(coarse);
    }

    let used_dealiased = volume.dvrads.is_some();
    if !volume.vrad.is_empty() {
        let mut coarse = grid::coarse_moment(&volume.vrad, config);
        aggregate::aggregate_vrad(&volume.vrad, volume.velocity_source(), &mut coarse, config);
        vrad_cells = coarse.meas.iter().filter(|v| !v.is_nan()).count();
        info!(
            cells = vrad_cells,
            dealiased = used_dealiased,
            "velocity super-observations made"
        );
        write::write_coarse_vrad(&coarse, out)?;
        volume.svrad = Some(coarse);
    }

    Ok(SuperobSummary {
        warnings,
        dbz_cells,
        vrad_cells,
        used_dealiased,
    })
}

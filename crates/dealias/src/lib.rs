//! Doppler velocity dealiasing for polar radar volumes.
//!
//! Pulse radars measure radial velocity only modulo twice the Nyquist
//! velocity; real winds beyond that band fold back into it. This stage
//! recovers the unfolded field in four steps:
//!
//! 1. evaluate fold-invariant model quantities per gate ([`model`]);
//! 2. partition eligible gates into height slabs ([`sectors`]);
//! 3. fit one horizontal wind per slab by linear least squares and
//!    evaluate the modelled radial velocity per gate ([`fit`]);
//! 4. pick, per gate, the Nyquist-interval multiplier bringing the
//!    measurement closest to the model ([`unfold`]), and write the
//!    result back quantized.
//!
//! # Quick start
//!
//! ```ignore
//! use boreas_dealias::{dealias, DealiasConfig};
//!
//! let config = DealiasConfig::new().with_max_wind(60.0);
//! let summary = dealias(&mut volume, &config, &mut out_file)?;
//! for w in &summary.warnings {
//!     eprintln!("warning: {w}");
//! }
//! ```

mod config;
mod error;
pub mod fit;
pub mod model;
pub mod sectors;
pub mod unfold;
mod write;

pub use config::DealiasConfig;
pub use error::DealiasError;

use tracing::{debug, info};

use boreas_odim::OdimWriter;
use boreas_volume::heights::fill_heights;
use boreas_volume::PolarVolume;

/// What the dealiasing stage did to a volume.
#[derive(Debug, Clone)]
pub struct DealiasSummary {
    /// Recoverable conditions encountered, for the caller's logger.
    pub warnings: Vec<String>,
    /// Smallest finite Nyquist velocity found.
    pub vny_min: f64,
    /// Number of height slabs considered.
    pub sectors_total: usize,
    /// Number of slabs that produced a wind fit.
    pub sectors_fitted: usize,
    /// Number of gates that received a dealiased value.
    pub gates_unfolded: usize,
}

/// Runs the dealiasing stage on `volume` and writes the result through
/// `out`.
///
/// On success the volume carries `sectors`, `w_models`,
/// `nyquist_multipliers` and `dvrads`. Fatal conditions (no velocity
/// sweeps, an all-NaN velocity cube, a rejected write) abort the volume
/// and leave it unchanged apart from possibly computed gate heights.
pub fn dealias(
    volume: &mut PolarVolume,
    config: &DealiasConfig,
    out: &mut dyn OdimWriter,
) -> Result<DealiasSummary, DealiasError> {
    config.validate()?;

    if volume.vrad.is_empty() {
        return Err(DealiasError::NoVradData);
    }
    if volume.vrad.all_missing() {
        return Err(DealiasError::AllMissing);
    }

    let mut warnings = Vec::new();

    if volume.vrad.zs.is_none() {
        debug!("computing gate heights");
        fill_heights(&mut volume.vrad, volume.site_height);
    }

    let qty = model::compute_model_quantities(&volume.vrad);
    if qty.vny_min.is_infinite() {
        warnings.push("no sweep carries a Nyquist velocity; leaving volume folded".to_string());
    }

    let sectors = sectors::determine_sectors(&volume.vrad, &qty.d, volume.site_height, config);
    info!(slabs = sectors.len(), "height slabs determined");

    let w_models = fit::compute_wind_models(&volume.vrad, &qty, &sectors, config);
    let sectors_fitted = sectors
        .bins
        .iter()
        .filter(|bins| {
            bins.len() >= config.min_good_points()
                && bins.iter().any(|&(e, a, r)| !w_models[[e, a, r]].is_nan())
        })
        .count();
    if sectors_fitted == 0 && !sectors.is_empty() {
        warnings.push("no height slab produced a wind fit; leaving volume folded".to_string());
    }

    let unfolded = unfold::unfold(&volume.vrad, &qty, &w_models, config);
    let gates_unfolded = unfolded.dvrads.iter().filter(|v| !v.is_nan()).count();
    info!(gates = gates_unfolded, "gates unfolded");

    write::write_dealiased(&volume.vrad, &unfolded.dvrads, out)?;

    let summary = DealiasSummary {
        warnings,
        vny_min: qty.vny_min,
        sectors_total: sectors.len(),
        sectors_fitted,
        gates_unfolded,
    };
    volume.sectors = Some(sectors);
    volume.w_models = Some(w_models);
    volume.nyquist_multipliers = Some(unfolded.multipliers);
    volume.dvrads = Some(unfolded.dvrads);
    Ok(summary)
}

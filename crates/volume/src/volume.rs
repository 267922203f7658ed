//! The per-file volume bundle passed through the processing stages.

use ndarray::Array3;

use crate::moment::Moment;

/// Cube index of a single gate: `(elevation, azimuth, range)`.
pub type BinIndex = (usize, usize, usize);

/// Vertical slabs used by the wind-model fit.
///
/// Gates eligible for the fit are partitioned into slabs of equal height
/// extent; each slab is fitted independently.
#[derive(Debug, Clone, Default)]
pub struct HeightSectors {
    /// Lower slab boundaries, meters above sea level.
    pub starts: Vec<f64>,
    /// Upper slab boundaries, meters above sea level.
    pub ends: Vec<f64>,
    /// Eligible gate indices per slab.
    pub bins: Vec<Vec<BinIndex>>,
}

impl HeightSectors {
    /// Number of slabs.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True when no slab exists.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// All data belonging to one input volume file.
///
/// Built by the ingest stage with `dbz` and `vrad` populated (either may
/// be empty), then mutated in turn: the dealiaser attaches `sectors`,
/// `w_models`, `nyquist_multipliers` and `dvrads`; the superober attaches
/// `sdbz` and `svrad`. The bundle is dropped once the results are written.
#[derive(Debug, Clone)]
pub struct PolarVolume {
    /// Radar site identifier from the input file name.
    pub site: String,
    /// Radar feedhorn height above sea level, meters.
    pub site_height: f64,
    /// Reflectivity moment (with `ths` and `quals` companions).
    pub dbz: Moment,
    /// Radial-velocity moment.
    pub vrad: Moment,
    /// Wind-fit height slabs.
    pub sectors: Option<HeightSectors>,
    /// Modelled radial velocity per gate, from the fitted wind.
    pub w_models: Option<Array3<f64>>,
    /// Chosen Nyquist interval multiplier per gate.
    pub nyquist_multipliers: Option<Array3<i32>>,
    /// Dealiased radial velocity per gate.
    pub dvrads: Option<Array3<f64>>,
    /// Super-observed reflectivity.
    pub sdbz: Option<Moment>,
    /// Super-observed radial velocity.
    pub svrad: Option<Moment>,
}

impl PolarVolume {
    /// Creates a volume with no stage products attached.
    pub fn new(site: impl Into<String>, site_height: f64, dbz: Moment, vrad: Moment) -> Self {
        Self {
            site: site.into(),
            site_height,
            dbz,
            vrad,
            sectors: None,
            w_models: None,
            nyquist_multipliers: None,
            dvrads: None,
            sdbz: None,
            svrad: None,
        }
    }

    /// The velocity cube the superober should consume: the dealiased cube
    /// when the dealiaser ran, the raw measurements otherwise.
    pub fn velocity_source(&self) -> &Array3<f64> {
        self.dvrads.as_ref().unwrap_or(&self.vrad.meas)
    }
}

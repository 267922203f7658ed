//! Coarse-grid preparation.

use ndarray::Array3;

use boreas_volume::grid::linspace;
use boreas_volume::Moment;

use crate::config::SuperobConfig;

/// Builds the coarse counterpart of `source`.
///
/// Per elevation, ray and gate counts divide by the fold factors
/// (truncating; leftover source gates and rays are dropped), the gate
/// length multiplies by the radial factor, and fresh uniform azimuth and
/// range grids are laid out. Dataset identifiers and elevation angles
/// carry over so the write path can address the original groups. The
/// measurement cube is allocated all-NaN at the coarse dimensions.
pub fn coarse_moment(source: &Moment, config: &SuperobConfig) -> Moment {
    let bin_f = config.range_bin_factor();
    let ray_f = config.ray_angle_factor();
    let nel = source.nel();

    let naz: Vec<usize> = source.naz.iter().map(|&n| n / ray_f).collect();
    let nr: Vec<usize> = source.nr.iter().map(|&n| n / bin_f).collect();
    let naz_max = naz.iter().copied().max().unwrap_or(0);
    let nr_max = nr.iter().copied().max().unwrap_or(0);

    let mut azimuths = Vec::with_capacity(nel);
    let mut ranges = Vec::with_capacity(nel);
    let mut rscales = Vec::with_capacity(nel);
    for e in 0..nel {
        let rstart = source.rstarts[e];
        let rscale = bin_f as f64 * source.rscales[e];
        azimuths.push(linspace(0.0, 2.0 * std::f64::consts::PI, naz[e]));
        ranges.push(linspace(rstart, rstart + rscale * nr[e] as f64, nr[e]));
        rscales.push(rscale);
    }

    Moment {
        datasets: source.datasets.clone(),
        elangles: source.elangles.clone(),
        naz,
        nr,
        azimuths,
        ranges,
        rstarts: source.rstarts.clone(),
        rscales,
        vnys: source.vnys.clone(),
        meas: Array3::from_elem((nel, naz_max, nr_max), f64::NAN),
        ths: None,
        quals: None,
        zs: None,
    }
}

//! Folding source gates into coarse cells.

use ndarray::Array3;

use boreas_volume::grid::nan_min_max;
use boreas_volume::Moment;

use crate::borders::{compute_borders, BinBorders};
use crate::config::SuperobConfig;

/// Rolls a cube along the azimuth axis by `shift` rays, per elevation.
///
/// Ray bundles are centered by rolling before aggregation, so the integer
/// borders land symmetrically around the coarse ray directions. Cells
/// outside the valid `(naz[e], nr[e])` region keep `fill`.
fn roll_azimuth(
    cube: &Array3<f64>,
    naz: &[usize],
    nr: &[usize],
    shift: usize,
    fill: f64,
) -> Array3<f64> {
    let mut rolled = Array3::from_elem(cube.dim(), fill);
    for e in 0..naz.len() {
        if naz[e] == 0 {
            continue;
        }
        for a in 0..naz[e] {
            let target = (a + shift) % naz[e];
            for r in 0..nr[e] {
                rolled[[e, target, r]] = cube[[e, a, r]];
            }
        }
    }
    rolled
}

/// Aggregates reflectivity onto the coarse grid.
///
/// A source gate takes part when its total quality exceeds the quality
/// threshold. Participating gates above the clear-sky threshold are WET
/// and averaged; the rest are DRY. A coarse cell whose wet fraction
/// exceeds `dbz_percentage` gets the wet average (and the wet TH average
/// where TH is present); a cell with only dry gates gets the volume-wide
/// reflectivity minimum as a clear-sky value. Both carry quality 1.0;
/// everything else stays NaN.
pub fn aggregate_dbz(dbz: &Moment, coarse: &mut Moment, config: &SuperobConfig) {
    let shift = BinBorders::shrink_limit(config);
    let dbz_min = nan_min_max(dbz.meas.iter())
        .map(|(lo, _)| lo)
        .unwrap_or(f64::NAN);

    let meas = roll_azimuth(&dbz.meas, &dbz.naz, &dbz.nr, shift, f64::NAN);
    let nan_cube = Array3::from_elem(dbz.meas.dim(), f64::NAN);
    let ths = roll_azimuth(
        dbz.ths.as_ref().unwrap_or(&nan_cube),
        &dbz.naz,
        &dbz.nr,
        shift,
        f64::NAN,
    );
    let zero_cube = Array3::from_elem(dbz.meas.dim(), 0.0);
    let quals = roll_azimuth(
        dbz.quals.as_ref().unwrap_or(&zero_cube),
        &dbz.naz,
        &dbz.nr,
        shift,
        0.0,
    );

    let dim = coarse.meas.dim();
    let mut out_ths = Array3::from_elem(dim, f64::NAN);
    let mut out_quals = Array3::from_elem(dim, f64::NAN);

    for e in 0..coarse.nel() {
        let borders = compute_borders(
            dbz.naz[e],
            coarse.naz[e],
            coarse.nr[e],
            dbz.rscales[e],
            config,
        );
        for j in 0..coarse.nr[e] {
            let start_gate = borders.range[j];
            let end_gate = borders.range[j + 1];
            for k in 0..coarse.naz[e] {
                let start_ray = borders.start_ray[j][k];
                let end_ray = borders.end_ray[j][k];

                let mut n_wet = 0_usize;
                let mut n_dry = 0_usize;
                let mut wet_sum = 0.0;
                let mut n_wet_th = 0_usize;
                let mut wet_th_sum = 0.0;
                for ray in start_ray..end_ray {
                    for gate in start_gate..end_gate {
                        if !(quals[[e, ray, gate]] > config.min_quality()) {
                            continue;
                        }
                        if meas[[e, ray, gate]] > config.dbz_clearsky() {
                            n_wet += 1;
                            wet_sum += meas[[e, ray, gate]];
                            let th = ths[[e, ray, gate]];
                            if th < 1e5 {
                                n_wet_th += 1;
                                wet_th_sum += th;
                            }
                        } else {
                            n_dry += 1;
                        }
                    }
                }

                let cell_gates = (end_ray - start_ray) * (end_gate - start_gate);
                if n_wet as f64 > config.dbz_percentage() * cell_gates as f64 {
                    coarse.meas[[e, k, j]] = wet_sum / n_wet as f64;
                    if n_wet_th > 0 {
                        out_ths[[e, k, j]] = wet_th_sum / n_wet_th as f64;
                    }
                    out_quals[[e, k, j]] = 1.0;
                } else if n_dry > 0 {
                    coarse.meas[[e, k, j]] = dbz_min;
                    out_quals[[e, k, j]] = 1.0;
                }
            }
        }
    }

    coarse.ths = Some(out_ths);
    coarse.quals = Some(out_quals);
}

/// Aggregates radial velocity onto the coarse grid.
///
/// `source` is the velocity cube to fold (dealiased when available). A
/// coarse cell is emitted when its defined fraction exceeds
/// `vrad_percentage` and the spread of the defined gates stays below
/// `vrad_max_std`; it gets the plain average and quality 1.0. Gated-out
/// cells keep NaN with quality 0.0.
pub fn aggregate_vrad(
    vrad: &Moment,
    source: &Array3<f64>,
    coarse: &mut Moment,
    config: &SuperobConfig,
) {
    let shift = BinBorders::shrink_limit(config);
    let meas = roll_azimuth(source, &vrad.naz, &vrad.nr, shift, f64::NAN);

    let dim = coarse.meas.dim();
    let mut out_quals = Array3::from_elem(dim, 0.0);

    for e in 0..coarse.nel() {
        let borders = compute_borders(
            vrad.naz[e],
            coarse.naz[e],
            coarse.nr[e],
            vrad.rscales[e],
            config,
        );
        for j in 0..coarse.nr[e] {
            let start_gate = borders.range[j];
            let end_gate = borders.range[j + 1];
            for k in 0..coarse.naz[e] {
                let start_ray = borders.start_ray[j][k];
                let end_ray = borders.end_ray[j][k];

                let mut n_good = 0_usize;
                let mut sum = 0.0;
                let mut sum_sq = 0.0;
                for ray in start_ray..end_ray {
                    for gate in start_gate..end_gate {
                        let v = meas[[e, ray, gate]];
                        if v.is_nan() {
                            continue;
                        }
                        n_good += 1;
                        sum += v;
                        sum_sq += v * v;
                    }
                }

                let cell_gates = (end_ray - start_ray) * (end_gate - start_gate);
                if n_good == 0 || n_good as f64 <= config.vrad_percentage() * cell_gates as f64 {
                    continue;
                }
                let avg = sum / n_good as f64;
                let variance = ((sum_sq - sum * avg) / n_good as f64).max(0.0);
                if variance.sqrt() < config.vrad_max_std() {
                    coarse.meas[[e, k, j]] = avg;
                    out_quals[[e, k, j]] = 1.0;
                }
            }
        }
    }

    coarse.quals = Some(out_quals);
}

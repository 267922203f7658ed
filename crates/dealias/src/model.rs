//! Per-gate quantities feeding the wind-model fit.
//!
//! A radial velocity `v` folded around the Nyquist velocity `V` is only
//! known modulo `2V`, but `sin(πv/V)` and `(V/π)·cos(πv/V)` are invariant
//! under folding. Writing the true radial wind as
//! `vr = cos(el)·(u·sin(az) + v·cos(az))`, the azimuthal derivative of
//! the second invariant is linear in the unknown wind components:
//!
//! ```text
//! d/daz [ (V/π)·cos(π·vr/V) ] = -A·u + B·v
//! ```
//!
//! with `A = cos(el)·cos(az)·sin(π·vr/V)` and
//! `B = cos(el)·sin(az)·sin(π·vr/V)`. This module evaluates `A`, `B` and
//! the discretised derivative `D` from the folded measurements.

use ndarray::Array3;

use boreas_volume::Moment;

/// Trigonometric caches and fit quantities for one volume.
#[derive(Debug, Clone)]
pub struct ModelQuantities {
    /// `cos(el)·cos(az)·sin(π·v/V)` per gate.
    pub a: Array3<f64>,
    /// `cos(el)·sin(az)·sin(π·v/V)` per gate.
    pub b: Array3<f64>,
    /// Centered azimuthal difference of `(V/π)·cos(π·v/V)` per gate.
    pub d: Array3<f64>,
    /// Cosine of the elevation angle per sweep.
    pub cos_els: Vec<f64>,
    /// Cosine of the azimuth per sweep and ray.
    pub cos_azs: Vec<Vec<f64>>,
    /// Sine of the azimuth per sweep and ray.
    pub sin_azs: Vec<Vec<f64>>,
    /// Smallest finite Nyquist velocity in the volume; infinite when none.
    pub vny_min: f64,
}

/// Evaluates the fit quantities for every valid gate of `vrad`.
///
/// Gates whose measurement (or whose azimuthal neighbors, for `d`) are
/// NaN produce NaN quantities, which excludes them downstream.
pub fn compute_model_quantities(vrad: &Moment) -> ModelQuantities {
    use std::f64::consts::PI;

    let dim = vrad.meas.dim();
    let nel = vrad.nel();
    let mut a = Array3::from_elem(dim, f64::NAN);
    let mut b = Array3::from_elem(dim, f64::NAN);
    let mut d = Array3::from_elem(dim, f64::NAN);
    let mut f3 = Array3::from_elem(dim, f64::NAN);
    let mut cos_els = Vec::with_capacity(nel);
    let mut cos_azs = Vec::with_capacity(nel);
    let mut sin_azs = Vec::with_capacity(nel);

    let mut vny_min = f64::INFINITY;
    for e in 0..nel {
        let cos_el = vrad.elangles[e].cos();
        cos_els.push(cos_el);
        let vny = vrad.vnys[e];
        if vny.is_finite() && vny < vny_min {
            vny_min = vny;
        }
        let mut cos_az = Vec::with_capacity(vrad.naz[e]);
        let mut sin_az = Vec::with_capacity(vrad.naz[e]);
        for aa in 0..vrad.naz[e] {
            let az = vrad.azimuths[e][aa];
            cos_az.push(az.cos());
            sin_az.push(az.sin());
            for r in 0..vrad.nr[e] {
                let v = vrad.meas[[e, aa, r]];
                let phase = PI * v / vny;
                a[[e, aa, r]] = cos_el * cos_az[aa] * phase.sin();
                b[[e, aa, r]] = cos_el * sin_az[aa] * phase.sin();
                f3[[e, aa, r]] = vny * phase.cos() / PI;
            }
        }
        cos_azs.push(cos_az);
        sin_azs.push(sin_az);
    }

    // Centered azimuthal difference of f3. The azimuth grid wraps, so the
    // spacing at the first and last ray is corrected by a full turn.
    for e in 0..nel {
        let naz = vrad.naz[e];
        for aa in 0..naz {
            let next = (aa + 1) % naz;
            let prev = (aa + naz - 1) % naz;
            let mut daz = vrad.azimuths[e][next] - vrad.azimuths[e][prev];
            if aa == 0 || aa == naz - 1 {
                daz -= 2.0 * PI;
            }
            for r in 0..vrad.nr[e] {
                d[[e, aa, r]] = (f3[[e, next, r]] - f3[[e, prev, r]]) / daz;
            }
        }
    }

    ModelQuantities {
        a,
        b,
        d,
        cos_els,
        cos_azs,
        sin_azs,
        vny_min,
    }
}

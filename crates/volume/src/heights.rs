//! Equivalent-Earth beam-height map.
//!
//! Beam propagation under mean refractivity is modelled by inflating the
//! Earth radius by 4/3, after which rays travel in straight lines. The
//! height of a gate at slant range `r` and elevation `θ` above a radar at
//! height `h0` is then
//!
//! ```text
//! z(θ, r) = sqrt(r² + (KR)² + 2·r·KR·sin θ) − (KR − h0)
//! ```

use ndarray::Array3;

use crate::moment::Moment;

/// Earth radius used by the equivalent-Earth model, meters.
pub const EARTH_RADIUS: f64 = 6_371_200.0;

/// Equivalent-Earth radius inflation factor.
pub const EQUIVALENT_EARTH_FACTOR: f64 = 4.0 / 3.0;

/// Computes gate heights for every valid `(elevation, azimuth, range)`
/// cell of `moment` and stores them in `moment.zs`.
///
/// `site_height` is the radar feedhorn height above sea level in meters.
/// Padded cells keep NaN.
pub fn fill_heights(moment: &mut Moment, site_height: f64) {
    let dim = moment.meas.dim();
    let mut zs = Array3::from_elem(dim, f64::NAN);
    let kr = EQUIVALENT_EARTH_FACTOR * EARTH_RADIUS;
    let kr_sq = kr * kr;
    let kr_h = kr - site_height;
    for e in 0..moment.nel() {
        let two_kr_sin = 2.0 * kr * moment.elangles[e].sin();
        for a in 0..moment.naz[e] {
            for r in 0..moment.nr[e] {
                let range = moment.ranges[e][r];
                zs[[e, a, r]] = (range * range + kr_sq + range * two_kr_sin).sqrt() - kr_h;
            }
        }
    }
    moment.zs = Some(zs);
}

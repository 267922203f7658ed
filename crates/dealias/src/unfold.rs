//! Nyquist-interval unfolding.

use ndarray::Array3;

use boreas_volume::Moment;

use crate::config::DealiasConfig;
use crate::model::ModelQuantities;

/// Result of the unfolding search.
#[derive(Debug, Clone)]
pub struct Unfolded {
    /// Dealiased radial velocity per gate.
    pub dvrads: Array3<f64>,
    /// Chosen interval multiplier per gate (meaningful only where
    /// `dvrads` is defined).
    pub multipliers: Array3<i32>,
}

/// Unfolds every gate that has both a measurement and a modelled
/// velocity.
///
/// For each such gate the integer `k` with the smallest
/// `|meas + 2·k·vny − model|` is selected from `[-n_max, n_max]`, where
/// `n_max = floor(max_wind / vny_min)`; ties resolve to the smaller
/// `|k|` (and to the positive `k` between equals). The dealiased value is
/// `meas + 2·k·vny`. Gates without a model, a measurement or a defined
/// azimuthal derivative stay NaN.
pub fn unfold(
    vrad: &Moment,
    qty: &ModelQuantities,
    w_models: &Array3<f64>,
    config: &DealiasConfig,
) -> Unfolded {
    let dim = vrad.meas.dim();
    let mut dvrads = Array3::from_elem(dim, f64::NAN);
    let mut multipliers = Array3::from_elem(dim, 0_i32);

    let n_max = if qty.vny_min.is_finite() && qty.vny_min > 0.0 {
        (config.max_wind() / qty.vny_min).floor() as i32
    } else {
        0
    };

    for e in 0..vrad.nel() {
        let vny = vrad.vnys[e];
        for a in 0..vrad.naz[e] {
            for r in 0..vrad.nr[e] {
                let model = w_models[[e, a, r]];
                let meas = vrad.meas[[e, a, r]];
                if model.is_nan() || meas.is_nan() {
                    continue;
                }
                let k = best_multiplier(meas, model, vny, n_max);
                multipliers[[e, a, r]] = k;
                if !qty.d[[e, a, r]].is_nan() {
                    dvrads[[e, a, r]] = meas + 2.0 * f64::from(k) * vny;
                }
            }
        }
    }

    Unfolded {
        dvrads,
        multipliers,
    }
}

/// Picks the interval multiplier closest to the model: candidates are
/// tried in the order `0, +1, -1, +2, -2, ...` and only a strictly
/// smaller distance replaces the incumbent, so ties keep the earlier
/// candidate.
fn best_multiplier(meas: f64, model: f64, vny: f64, n_max: i32) -> i32 {
    let mut best_k = 0;
    let mut best = (meas - model).abs();
    for magnitude in 1..=n_max {
        for k in [magnitude, -magnitude] {
            let distance = (meas + 2.0 * f64::from(k) * vny - model).abs();
            if distance < best {
                best = distance;
                best_k = k;
            }
        }
    }
    best_k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_multiplier_when_model_close() {
        assert_eq!(best_multiplier(1.0, 0.0, 10.0, 4), 0);
    }

    #[test]
    fn picks_folded_interval() {
        // True velocity 15 folded to -5 with vny = 10; model near truth.
        assert_eq!(best_multiplier(-5.0, 14.0, 10.0, 4), 1);
        // And the mirrored case.
        assert_eq!(best_multiplier(5.0, -14.0, 10.0, 4), -1);
    }

    #[test]
    fn respects_search_bound() {
        // Model far beyond the allowed band: the best in-band multiplier
        // still wins.
        assert_eq!(best_multiplier(0.0, 100.0, 10.0, 2), 2);
    }

    #[test]
    fn tie_prefers_smaller_magnitude() {
        // meas = -vny: k = 0 gives |-10 - 0| = 10, k = 1 gives |10 - 0| = 10.
        assert_eq!(best_multiplier(-10.0, 0.0, 10.0, 4), 0);
        // Same tie on the other side.
        assert_eq!(best_multiplier(10.0, 0.0, 10.0, 4), 0);
    }

    #[test]
    fn equidistant_pairs_keep_the_identity() {
        // meas == model: every +m/-m pair ties at 2*m*vny, so nothing
        // ever strictly beats the first candidate, k = 0.
        assert_eq!(best_multiplier(3.0, 3.0, 10.0, 4), 0);
    }

    #[test]
    fn zero_bound_forces_identity() {
        assert_eq!(best_multiplier(-5.0, 14.0, 10.0, 0), 0);
    }
}

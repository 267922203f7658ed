//! Per-slab wind fit.
//!
//! Each height slab yields one horizontal wind estimate `(u, v)` from the
//! overdetermined linear system `-A·u + B·v = D` over its eligible gates.
//! Two unknowns never justify a linear-algebra dependency: the normal
//! equations are accumulated and solved on the stack.

use ndarray::Array3;

use boreas_volume::{HeightSectors, Moment};

use crate::config::DealiasConfig;
use crate::model::ModelQuantities;

/// A fitted horizontal wind, east and north components in m/s.
#[derive(Debug, Clone, Copy)]
pub struct WindFit {
    /// Eastward component.
    pub u: f64,
    /// Northward component.
    pub v: f64,
}

/// Accumulated normal equations of the slab system.
#[derive(Debug, Clone, Copy, Default)]
struct Normal2 {
    sxx: f64,
    sxy: f64,
    syy: f64,
    sxd: f64,
    syd: f64,
}

impl Normal2 {
    fn add(&mut self, x: f64, y: f64, d: f64) {
        self.sxx += x * x;
        self.sxy += x * y;
        self.syy += y * y;
        self.sxd += x * d;
        self.syd += y * d;
    }

    fn solve(&self) -> Option<WindFit> {
        let det = self.sxx * self.syy - self.sxy * self.sxy;
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return None;
        }
        Some(WindFit {
            u: (self.syy * self.sxd - self.sxy * self.syd) / det,
            v: (self.sxx * self.syd - self.sxy * self.sxd) / det,
        })
    }
}

/// Least-squares solution of `min Σ (-a·u + b·v - d)²`.
///
/// Returns `None` for a singular system (e.g. all gates on one ray).
pub fn fit_wind(a: &[f64], b: &[f64], d: &[f64]) -> Option<WindFit> {
    let mut normal = Normal2::default();
    for i in 0..a.len() {
        normal.add(-a[i], b[i], d[i]);
    }
    normal.solve()
}

/// Fits one wind per sufficiently populated slab and evaluates the
/// modelled radial velocity at every gate of that slab.
///
/// Gates whose modelled speed reaches `config.max_wind()` are rejected
/// and keep NaN, as do all gates of slabs below
/// `config.min_good_points()` or with a singular system.
pub fn compute_wind_models(
    vrad: &Moment,
    qty: &ModelQuantities,
    sectors: &HeightSectors,
    config: &DealiasConfig,
) -> Array3<f64> {
    let mut w_models = Array3::from_elem(vrad.meas.dim(), f64::NAN);

    for bins in &sectors.bins {
        if bins.len() < config.min_good_points() {
            tracing::debug!(gates = bins.len(), "slab below minimum point count, skipped");
            continue;
        }
        let mut normal = Normal2::default();
        for &(e, a, r) in bins {
            normal.add(-qty.a[[e, a, r]], qty.b[[e, a, r]], qty.d[[e, a, r]]);
        }
        let Some(fit) = normal.solve() else {
            tracing::debug!(gates = bins.len(), "singular slab system, skipped");
            continue;
        };
        for &(e, a, r) in bins {
            let vm = qty.cos_els[e] * (fit.u * qty.sin_azs[e][a] + fit.v * qty.cos_azs[e][a]);
            if vm.abs() < config.max_wind() {
                w_models[[e, a, r]] = vm;
            }
        }
    }
    w_models
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_solution() {
        // Build a consistent system from a known wind.
        let (u_true, v_true) = (4.5, -11.0);
        let mut a = Vec::new();
        let mut b = Vec::new();
        let mut d = Vec::new();
        for i in 0..12 {
            let az = i as f64 * 0.5;
            let (ai, bi) = (az.cos() * 0.7, az.sin() * 0.7);
            a.push(ai);
            b.push(bi);
            d.push(-ai * u_true + bi * v_true);
        }
        let fit = fit_wind(&a, &b, &d).unwrap();
        assert_relative_eq!(fit.u, u_true, epsilon = 1e-9);
        assert_relative_eq!(fit.v, v_true, epsilon = 1e-9);
    }

    #[test]
    fn least_squares_averages_noise() {
        // Symmetric residuals around a known solution cancel.
        let a = vec![1.0, 1.0, 0.0, 0.0];
        let b = vec![0.0, 0.0, 1.0, 1.0];
        let d = vec![-2.0 + 0.25, -2.0 - 0.25, 3.0 + 0.5, 3.0 - 0.5];
        let fit = fit_wind(&a, &b, &d).unwrap();
        assert_relative_eq!(fit.u, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.v, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn singular_system_rejected() {
        // All gates on one ray: A and B are proportional.
        let a = vec![0.5, 0.5, 0.5];
        let b = vec![0.5, 0.5, 0.5];
        let d = vec![1.0, 1.0, 1.0];
        assert!(fit_wind(&a, &b, &d).is_none());
    }

    #[test]
    fn empty_system_rejected() {
        assert!(fit_wind(&[], &[], &[]).is_none());
    }
}

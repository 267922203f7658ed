//! Source-gate borders of coarse cells.
//!
//! Radially, every coarse cell spans `range_bin_factor` source gates.
//! Azimuthally, a fixed bundle of `ray_angle_factor` source rays would
//! subtend an ever longer arc with range, so the bundle is shrunk
//! symmetrically in tiers: each coarse range tier drops one more ray from
//! each side of the bundle until the arc-length bound holds.

use crate::config::SuperobConfig;

/// Per-elevation source-gate borders of the coarse cells.
#[derive(Debug, Clone)]
pub struct BinBorders {
    /// Radial borders, `nr' + 1` entries: coarse cell `j` spans source
    /// gates `[range[j], range[j + 1])`.
    pub range: Vec<usize>,
    /// First source ray of coarse cell `(j, k)`, indexed `[j][k]`.
    pub start_ray: Vec<Vec<usize>>,
    /// One past the last source ray of coarse cell `(j, k)`.
    pub end_ray: Vec<Vec<usize>>,
}

impl BinBorders {
    /// Maximum rays dropped from one side of a bundle.
    pub fn shrink_limit(config: &SuperobConfig) -> usize {
        (config.ray_angle_factor() - 1) / 2
    }
}

/// Computes the cell borders for one elevation.
///
/// `naz` is the source ray count, `nsaz`/`nsr` the coarse dimensions,
/// `rscale` the source gate length in meters. Source gates beyond
/// `nsr * range_bin_factor` belong to no coarse cell.
pub fn compute_borders(
    naz: usize,
    nsaz: usize,
    nsr: usize,
    rscale: f64,
    config: &SuperobConfig,
) -> BinBorders {
    let bin_f = config.range_bin_factor();
    let ray_f = config.ray_angle_factor();
    let z_max = BinBorders::shrink_limit(config);

    let range: Vec<usize> = (0..=nsr).map(|j| j * bin_f).collect();

    // Arc bound expressed in coarse range steps: a bundle of `fac` source
    // rays stays short enough out to coarse index lim(fac).
    let arc_steps = 360.0 * 360.0 * config.max_arc_size()
        / (2.0 * std::f64::consts::PI * (naz * bin_f) as f64 * rscale);
    let mut limits = Vec::with_capacity(z_max + 1);
    for z in 0..=z_max {
        let fac = 2 * (z_max - z) + 1;
        let lim = (arc_steps / fac as f64 - 1.0).floor() as i64 + 1;
        limits.push(lim.clamp(0, range.len() as i64) as usize);
    }
    // The narrowest bundle covers whatever remains.
    if let Some(last) = limits.last_mut() {
        *last = range.len();
    }

    // Shrink amount per coarse range index: the widest bundle still within
    // its limit.
    let shrink: Vec<usize> = (0..nsr)
        .map(|j| {
            limits
                .iter()
                .position(|&lim| j < lim)
                .unwrap_or(z_max)
        })
        .collect();

    let mut start_ray = vec![vec![0; nsaz]; nsr];
    let mut end_ray = vec![vec![0; nsaz]; nsr];
    for (j, &s) in shrink.iter().enumerate() {
        for k in 0..nsaz {
            start_ray[j][k] = k * ray_f + s;
            end_ray[j][k] = (k + 1) * ray_f - s;
        }
    }

    BinBorders {
        range,
        start_ray,
        end_ray,
    }
}

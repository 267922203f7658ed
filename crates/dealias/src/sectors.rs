//! Partitioning of eligible gates into height slabs.

use ndarray::Array3;

use boreas_volume::{HeightSectors, Moment};

use crate::config::DealiasConfig;

/// Splits the eligible gates of `vrad` into height slabs of thickness
/// `config.z_sector_size()`.
///
/// Slabs start at the radar site height and stop at the lower of the
/// highest observed gate and `config.z_max()`. A gate is eligible when
/// its height, its measurement and its azimuthal derivative are all
/// defined and its height lies within the slab range.
///
/// Returns empty sectors when no gate height is defined or the data sit
/// entirely below the site.
pub fn determine_sectors(
    vrad: &Moment,
    d: &Array3<f64>,
    site_height: f64,
    config: &DealiasConfig,
) -> HeightSectors {
    let zs = match &vrad.zs {
        Some(zs) => zs,
        None => return HeightSectors::default(),
    };
    let dz = config.z_sector_size();
    let z_start = site_height;
    let z_data_max = boreas_volume::grid::nan_min_max(zs.iter()).map(|(_, hi)| hi);
    let z_ceil = match z_data_max {
        Some(hi) => hi.min(config.z_max()),
        None => return HeightSectors::default(),
    };
    if z_ceil < z_start {
        return HeightSectors::default();
    }

    let nl = ((z_ceil - z_start) / dz) as usize + 1;
    let mut sectors = HeightSectors {
        starts: (0..nl).map(|n| z_start + n as f64 * dz).collect(),
        ends: (0..nl).map(|n| z_start + (n + 1) as f64 * dz).collect(),
        bins: vec![Vec::new(); nl],
    };

    for e in 0..vrad.nel() {
        for a in 0..vrad.naz[e] {
            for r in 0..vrad.nr[e] {
                let z = zs[[e, a, r]];
                if z.is_nan() || vrad.meas[[e, a, r]].is_nan() || d[[e, a, r]].is_nan() {
                    continue;
                }
                if z < z_start || z > z_ceil {
                    continue;
                }
                let idx = ((z - z_start) / dz) as usize;
                sectors.bins[idx.min(nl - 1)].push((e, a, r));
            }
        }
    }
    sectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use boreas_volume::heights::fill_heights;
    use boreas_volume::SweepGeometry;

    fn vrad_with_heights(elangle_deg: f64, naz: usize, nr: usize, rscale: f64) -> Moment {
        let mut m = Moment::with_geometry(&[SweepGeometry {
            dataset: "dataset1".into(),
            elangle: elangle_deg.to_radians(),
            naz,
            nr,
            rstart: 0.0,
            rscale,
            vny: 10.0,
        }]);
        m.meas.fill(1.0);
        fill_heights(&mut m, 0.0);
        m
    }

    fn zero_d(m: &Moment) -> Array3<f64> {
        Array3::from_elem(m.meas.dim(), 0.0)
    }

    #[test]
    fn slab_boundaries() {
        let vrad = vrad_with_heights(10.0, 4, 40, 1000.0);
        let d = zero_d(&vrad);
        let config = DealiasConfig::new().with_z_sector_size(500.0).with_z_max(5_000.0);
        let s = determine_sectors(&vrad, &d, 0.0, &config);
        // Ceiling is z_max here, so 5000/500 + 1 slabs.
        assert_eq!(s.len(), 11);
        assert_eq!(s.starts[0], 0.0);
        assert_eq!(s.ends[0], 500.0);
        assert_eq!(s.starts[10], 5_000.0);
    }

    #[test]
    fn gates_above_ceiling_excluded() {
        let vrad = vrad_with_heights(10.0, 4, 40, 1000.0);
        let d = zero_d(&vrad);
        let config = DealiasConfig::new().with_z_sector_size(500.0).with_z_max(5_000.0);
        let s = determine_sectors(&vrad, &d, 0.0, &config);
        let zs = vrad.zs.as_ref().unwrap();
        let total: usize = s.bins.iter().map(Vec::len).sum();
        let expected = zs.iter().filter(|z| **z <= 5_000.0).count();
        assert_eq!(total, expected);
        for (n, bins) in s.bins.iter().enumerate() {
            for &(e, a, r) in bins {
                let z = zs[[e, a, r]];
                assert!(z >= s.starts[n] && z < s.ends[n] || (n == s.len() - 1 && z <= 5_000.0));
            }
        }
    }

    #[test]
    fn nan_measurement_excluded() {
        let mut vrad = vrad_with_heights(1.0, 4, 10, 500.0);
        vrad.meas[[0, 2, 3]] = f64::NAN;
        let d = zero_d(&vrad);
        let config = DealiasConfig::new().with_z_sector_size(1_000.0);
        let s = determine_sectors(&vrad, &d, 0.0, &config);
        let total: usize = s.bins.iter().map(Vec::len).sum();
        assert_eq!(total, 4 * 10 - 1);
        assert!(!s.bins.iter().flatten().any(|&t| t == (0, 2, 3)));
    }

    #[test]
    fn nan_derivative_excluded() {
        let vrad = vrad_with_heights(1.0, 4, 10, 500.0);
        let mut d = zero_d(&vrad);
        d[[0, 1, 1]] = f64::NAN;
        let config = DealiasConfig::new().with_z_sector_size(1_000.0);
        let s = determine_sectors(&vrad, &d, 0.0, &config);
        let total: usize = s.bins.iter().map(Vec::len).sum();
        assert_eq!(total, 4 * 10 - 1);
    }

    #[test]
    fn no_heights_yields_no_sectors() {
        let mut vrad = vrad_with_heights(1.0, 4, 10, 500.0);
        vrad.zs = None;
        let d = zero_d(&vrad);
        let s = determine_sectors(&vrad, &d, 0.0, &DealiasConfig::new());
        assert!(s.is_empty());
    }

    #[test]
    fn highest_gate_is_still_binned() {
        // A single-gate sweep: the only gate defines the data ceiling and
        // must land in the last slab rather than fall off it.
        let vrad = vrad_with_heights(0.0, 4, 1, 500.0);
        let d = zero_d(&vrad);
        let config = DealiasConfig::new().with_z_sector_size(100.0);
        let s = determine_sectors(&vrad, &d, 0.0, &config);
        let total: usize = s.bins.iter().map(Vec::len).sum();
        assert_eq!(total, 4);
    }
}

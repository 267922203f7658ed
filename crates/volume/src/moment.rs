//! One radar moment across a volume scan.

use ndarray::Array3;

use crate::grid::{all_nan, linspace};

/// Scan geometry of a single sweep, used to build [`Moment`]s.
#[derive(Debug, Clone)]
pub struct SweepGeometry {
    /// Dataset group identifier in the output file (e.g. `"dataset3"`).
    pub dataset: String,
    /// Elevation angle in radians.
    pub elangle: f64,
    /// Number of rays.
    pub naz: usize,
    /// Number of range gates.
    pub nr: usize,
    /// Range of the first gate center in meters.
    pub rstart: f64,
    /// Gate length in meters.
    pub rscale: f64,
    /// Nyquist velocity in m/s; NaN when the sweep carries none.
    pub vny: f64,
}

/// One radar moment (DBZ or VRAD) for a whole volume scan.
///
/// Sweeps may differ in ray and gate counts, so the measurement cube is
/// allocated to the per-elevation maxima and padded with NaN: for
/// elevation `e`, `meas[[e, a, r]]` is meaningful only for `a < naz[e]`
/// and `r < nr[e]`.
///
/// The auxiliary cubes (`ths`, `quals`, `zs`) share the `meas` shape and
/// exist only where a stage needs them: linear reflectivity and total
/// quality accompany DBZ, beam heights accompany VRAD.
#[derive(Debug, Clone, Default)]
pub struct Moment {
    /// Dataset group identifiers, one per elevation.
    pub datasets: Vec<String>,
    /// Elevation angles in radians.
    pub elangles: Vec<f64>,
    /// Ray count per elevation.
    pub naz: Vec<usize>,
    /// Gate count per elevation.
    pub nr: Vec<usize>,
    /// Azimuths in radians per elevation, uniform on `[0, 2π)`.
    pub azimuths: Vec<Vec<f64>>,
    /// Gate-center ranges in meters per elevation.
    pub ranges: Vec<Vec<f64>>,
    /// Range of the first gate center per elevation, meters.
    pub rstarts: Vec<f64>,
    /// Gate length per elevation, meters.
    pub rscales: Vec<f64>,
    /// Nyquist velocity per elevation, m/s; NaN where absent.
    pub vnys: Vec<f64>,
    /// Measurement cube, `(nel, naz_max, nr_max)`, NaN-padded.
    pub meas: Array3<f64>,
    /// Linear reflectivity companion of DBZ.
    pub ths: Option<Array3<f64>>,
    /// Total quality in `[0, 1]`.
    pub quals: Option<Array3<f64>>,
    /// Gate heights above sea level, meters.
    pub zs: Option<Array3<f64>>,
}

impl Moment {
    /// An empty moment: no sweeps, zero-sized cube.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a moment from sweep geometry, with azimuth and range grids
    /// filled in and the measurement cube all-NaN.
    pub fn with_geometry(sweeps: &[SweepGeometry]) -> Self {
        let naz_max = sweeps.iter().map(|s| s.naz).max().unwrap_or(0);
        let nr_max = sweeps.iter().map(|s| s.nr).max().unwrap_or(0);
        let mut moment = Self {
            datasets: sweeps.iter().map(|s| s.dataset.clone()).collect(),
            elangles: sweeps.iter().map(|s| s.elangle).collect(),
            naz: sweeps.iter().map(|s| s.naz).collect(),
            nr: sweeps.iter().map(|s| s.nr).collect(),
            azimuths: Vec::with_capacity(sweeps.len()),
            ranges: Vec::with_capacity(sweeps.len()),
            rstarts: sweeps.iter().map(|s| s.rstart).collect(),
            rscales: sweeps.iter().map(|s| s.rscale).collect(),
            vnys: sweeps.iter().map(|s| s.vny).collect(),
            meas: Array3::from_elem((sweeps.len(), naz_max, nr_max), f64::NAN),
            ths: None,
            quals: None,
            zs: None,
        };
        for s in sweeps {
            moment
                .azimuths
                .push(linspace(0.0, 2.0 * std::f64::consts::PI, s.naz));
            moment
                .ranges
                .push(linspace(s.rstart, s.rstart + s.rscale * s.nr as f64, s.nr));
        }
        moment
    }

    /// Number of elevations.
    pub fn nel(&self) -> usize {
        self.datasets.len()
    }

    /// True when the moment has no sweeps at all.
    pub fn is_empty(&self) -> bool {
        self.nel() == 0
    }

    /// Azimuth dimension of the cube (maximum ray count).
    pub fn naz_max(&self) -> usize {
        self.meas.dim().1
    }

    /// Range dimension of the cube (maximum gate count).
    pub fn nr_max(&self) -> usize {
        self.meas.dim().2
    }

    /// True when every measurement is NaN (vacuously true when empty).
    pub fn all_missing(&self) -> bool {
        all_nan(self.meas.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn two_sweeps() -> Vec<SweepGeometry> {
        vec![
            SweepGeometry {
                dataset: "dataset1".into(),
                elangle: 0.5_f64.to_radians(),
                naz: 4,
                nr: 6,
                rstart: 0.0,
                rscale: 500.0,
                vny: 8.0,
            },
            SweepGeometry {
                dataset: "dataset2".into(),
                elangle: 1.5_f64.to_radians(),
                naz: 8,
                nr: 3,
                rstart: 250.0,
                rscale: 1000.0,
                vny: f64::NAN,
            },
        ]
    }

    #[test]
    fn geometry_dimensions() {
        let m = Moment::with_geometry(&two_sweeps());
        assert_eq!(m.nel(), 2);
        assert_eq!(m.naz_max(), 8);
        assert_eq!(m.nr_max(), 6);
        assert_eq!(m.meas.dim(), (2, 8, 6));
        assert!(m.all_missing());
    }

    #[test]
    fn geometry_azimuths_uniform() {
        let m = Moment::with_geometry(&two_sweeps());
        assert_eq!(m.azimuths[0].len(), 4);
        assert_relative_eq!(m.azimuths[0][1], PI / 2.0);
        assert_relative_eq!(m.azimuths[1][1], PI / 4.0);
    }

    #[test]
    fn geometry_range_centers() {
        let m = Moment::with_geometry(&two_sweeps());
        assert_relative_eq!(m.ranges[0][3], 1500.0);
        assert_relative_eq!(m.ranges[1][2], 2250.0);
    }

    #[test]
    fn empty_moment() {
        let m = Moment::empty();
        assert!(m.is_empty());
        assert!(m.all_missing());
        assert_eq!(m.meas.dim(), (0, 0, 0));
    }

    #[test]
    fn all_missing_false_with_data() {
        let mut m = Moment::with_geometry(&two_sweeps());
        m.meas[[0, 0, 0]] = 3.5;
        assert!(!m.all_missing());
    }
}

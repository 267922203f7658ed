//! Full-pipeline run against the in-memory output store.

use approx::assert_relative_eq;
use ndarray::Array3;

use boreas::{process_volume, AttrValue, MemoryOdim, OdimWriter, Settings};
use boreas_volume::{Moment, PolarVolume, SweepGeometry};

/// Folds a velocity into the `[-vny, vny]` band.
fn fold(v: f64, vny: f64) -> f64 {
    v - 2.0 * vny * (v / (2.0 * vny)).round()
}

fn build_volume() -> PolarVolume {
    let naz = 36;
    let nr = 12;
    let vny = 10.0;

    let mut dbz = Moment::with_geometry(&[SweepGeometry {
        dataset: "dataset1".into(),
        elangle: 0.5_f64.to_radians(),
        naz,
        nr,
        rstart: 0.0,
        rscale: 500.0,
        vny: f64::NAN,
    }]);
    for a in 0..naz {
        for r in 0..nr {
            dbz.meas[[0, a, r]] = 25.0 + (a as f64) * 0.1;
        }
    }
    dbz.ths = Some(dbz.meas.clone());
    dbz.quals = Some(Array3::from_elem((1, naz, nr), 1.0));

    let mut vrad = Moment::with_geometry(&[SweepGeometry {
        dataset: "dataset2".into(),
        elangle: 0.5_f64.to_radians(),
        naz,
        nr,
        rstart: 0.0,
        rscale: 500.0,
        vny,
    }]);
    for a in 0..naz {
        let az = vrad.azimuths[0][a];
        let truth = 14.0 * az.cos();
        for r in 0..nr {
            vrad.meas[[0, a, r]] = fold(truth, vny);
        }
    }

    PolarVolume::new("site1", 300.0, dbz, vrad)
}

fn seeded_file() -> MemoryOdim {
    let mut file = MemoryOdim::new();
    for dataset in ["dataset1", "dataset2"] {
        file.write_attr(
            &format!("{dataset}/data1/what"),
            "nodata",
            AttrValue::Double(255.0),
        )
        .unwrap();
    }
    file.write_attr("dataset1/data2/what", "nodata", AttrValue::Double(255.0))
        .unwrap();
    file
}

fn settings() -> Settings {
    Settings::from_toml_str(
        r#"
        [dealiasing]
        z_sector_size = 200.0
        z_max = 12000.0
        min_good_points = 10
        max_wind = 40.0

        [superobing]
        range_bin_factor = 4
        ray_angle_factor = 3
        max_arc_size = 1000000.0
        min_quality = 0.5
        dbz_clearsky = 0.0
        dbz_percentage = 0.3
        vrad_percentage = 0.3
        vrad_max_std = 5.0
        "#,
    )
    .unwrap()
}

#[test]
fn both_stages_run_and_write() {
    let mut volume = build_volume();
    let mut file = seeded_file();

    let summary = process_volume(&mut volume, &settings(), &mut file).unwrap();

    // Dealiasing recovered the folded cosine field.
    let dealias = summary.dealias.as_ref().unwrap();
    assert!(dealias.gates_unfolded > 0);
    let dvrads = volume.dvrads.as_ref().unwrap();
    for a in 0..36 {
        let az = volume.vrad.azimuths[0][a];
        for r in 0..12 {
            let dv = dvrads[[0, a, r]];
            if dv.is_nan() {
                continue;
            }
            assert_relative_eq!(dv, 14.0 * az.cos(), epsilon = 1e-6);
        }
    }

    // Superobing consumed the dealiased cube and produced coarse planes.
    let superob = summary.superob.as_ref().unwrap();
    assert!(superob.used_dealiased);
    assert!(superob.dbz_cells > 0);
    assert!(superob.vrad_cells > 0);
    let svrad = volume.svrad.as_ref().unwrap();
    assert_eq!(svrad.naz, vec![12]);
    assert_eq!(svrad.nr, vec![3]);

    // The output store holds every plane of both stages.
    for (path, name) in [
        ("dataset2/data1", "data"),    // dealiased velocity, then coarse
        ("dataset2/quality1", "data"), // velocity quality
        ("dataset1/data1", "data"),    // coarse reflectivity
        ("dataset1/data2", "data"),    // coarse TH
        ("dataset1/quality1", "data"), // reflectivity quality
    ] {
        assert!(file.dataset(path, name).is_some(), "missing {path}/{name}");
    }
    assert_eq!(
        file.attr("dataset1/quality1/how", "task"),
        Some(&AttrValue::from("superobing"))
    );
    assert_eq!(file.read_attr("dataset1/where", "nbins"), Some(3.0));
    assert_eq!(file.read_attr("dataset1/where", "nrays"), Some(12.0));

    // Coarse velocity plane dimensions follow the coarse grid.
    let coarse_vrad = file.dataset("dataset2/data1", "data").unwrap();
    assert_eq!(coarse_vrad.dim(), (12, 3));
}

#[test]
fn dealias_disabled_feeds_raw_velocity_to_superob() {
    let mut volume = build_volume();
    let mut file = seeded_file();
    let mut settings = settings();
    settings.dealiasing.enabled = false;

    let summary = process_volume(&mut volume, &settings, &mut file).unwrap();

    assert!(summary.dealias.is_none());
    let superob = summary.superob.as_ref().unwrap();
    assert!(!superob.used_dealiased);
    assert!(volume.dvrads.is_none());
}

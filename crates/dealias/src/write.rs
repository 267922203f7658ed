//! Write-back of the dealiased velocity planes.

use ndarray::{Array2, Array3};

use boreas_odim::quantize::{quantize, quantize_quality, QUALITY_GAIN};
use boreas_odim::{require_attr, AttrValue, OdimWriter};
use boreas_volume::Moment;

use crate::error::DealiasError;

/// Writes the dealiased cube back over the original velocity planes, one
/// elevation at a time, together with a quality plane marking which gates
/// were unfolded.
pub fn write_dealiased(
    vrad: &Moment,
    dvrads: &Array3<f64>,
    out: &mut dyn OdimWriter,
) -> Result<(), DealiasError> {
    for (e, dataset) in vrad.datasets.iter().enumerate() {
        let naz = vrad.naz[e];
        let nr = vrad.nr[e];
        let field = Array2::from_shape_fn((naz, nr), |(a, r)| dvrads[[e, a, r]]);

        let data_what = format!("{dataset}/data1/what");
        let nodata = require_attr(out, &data_what, "nodata").map_err(DealiasError::from)?;
        let encoded = quantize(&field, nodata as u8);
        out.write_attr(&data_what, "gain", AttrValue::Double(encoded.gain))?;
        out.write_attr(&data_what, "offset", AttrValue::Double(encoded.offset))?;
        out.write_dataset(&format!("{dataset}/data1"), "data", &encoded.bytes)?;

        let quality = field.map(|v| if v.is_nan() { f64::NAN } else { 1.0 });
        let encoded_quality = quantize_quality(&quality);
        let quality_what = format!("{dataset}/quality1/what");
        out.write_attr(&quality_what, "gain", AttrValue::Double(QUALITY_GAIN))?;
        out.write_attr(&quality_what, "offset", AttrValue::Double(0.0))?;
        out.write_attr(
            &format!("{dataset}/quality1/how"),
            "task",
            AttrValue::from("dealiasing"),
        )?;
        out.write_dataset(
            &format!("{dataset}/quality1"),
            "data",
            &encoded_quality.bytes,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use boreas_odim::MemoryOdim;
    use boreas_volume::SweepGeometry;

    fn vrad_sweep() -> Moment {
        Moment::with_geometry(&[SweepGeometry {
            dataset: "dataset1".into(),
            elangle: 0.0,
            naz: 2,
            nr: 3,
            rstart: 0.0,
            rscale: 500.0,
            vny: 10.0,
        }])
    }

    fn seeded_file() -> MemoryOdim {
        let mut file = MemoryOdim::new();
        file.write_attr("dataset1/data1/what", "nodata", AttrValue::Double(255.0))
            .unwrap();
        file
    }

    #[test]
    fn writes_planes_and_attributes() {
        let vrad = vrad_sweep();
        let mut dvrads = Array3::from_elem((1, 2, 3), f64::NAN);
        dvrads[[0, 0, 0]] = -12.0;
        dvrads[[0, 1, 2]] = 18.0;
        let mut file = seeded_file();

        write_dealiased(&vrad, &dvrads, &mut file).unwrap();

        let data = file.dataset("dataset1/data1", "data").unwrap();
        assert_eq!(data.dim(), (2, 3));
        // Undefined gates carry the nodata byte.
        assert_eq!(data[[0, 1]], 255);

        let gain = file.read_attr("dataset1/data1/what", "gain").unwrap();
        let offset = file.read_attr("dataset1/data1/what", "offset").unwrap();
        let decoded = gain * f64::from(data[[0, 0]]) + offset;
        assert!((decoded - -12.0).abs() <= gain);

        let quality = file.dataset("dataset1/quality1", "data").unwrap();
        assert_eq!(quality[[0, 0]], 255);
        assert_eq!(quality[[0, 1]], 0);
        assert_eq!(quality[[1, 2]], 255);
        assert_relative_eq!(
            file.read_attr("dataset1/quality1/what", "gain").unwrap(),
            QUALITY_GAIN
        );
        assert_eq!(
            file.attr("dataset1/quality1/how", "task"),
            Some(&AttrValue::from("dealiasing"))
        );
    }

    #[test]
    fn missing_nodata_is_an_error() {
        let vrad = vrad_sweep();
        let dvrads = Array3::from_elem((1, 2, 3), f64::NAN);
        let mut file = MemoryOdim::new();
        let err = write_dealiased(&vrad, &dvrads, &mut file).unwrap_err();
        assert!(matches!(err, DealiasError::Output(_)));
    }
}

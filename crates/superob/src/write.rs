//! Write-back of the coarse planes.

use ndarray::{Array2, Array3};

use boreas_odim::quantize::{quantize, quantize_quality};
use boreas_odim::{require_attr, AttrValue, OdimWriter};
use boreas_volume::Moment;

use crate::error::SuperobError;

/// Byte marking missing coarse velocity gates.
const VRAD_NODATA: u8 = 255;

fn plane(cube: &Array3<f64>, e: usize, naz: usize, nr: usize) -> Array2<f64> {
    Array2::from_shape_fn((naz, nr), |(a, r)| cube[[e, a, r]])
}

fn write_coarse_dims(
    out: &mut dyn OdimWriter,
    dataset: &str,
    naz: usize,
    nr: usize,
    rscale: f64,
) -> Result<(), SuperobError> {
    let where_path = format!("{dataset}/where");
    out.write_attr(&where_path, "nbins", AttrValue::Int(nr as i64))?;
    out.write_attr(&where_path, "nrays", AttrValue::Int(naz as i64))?;
    out.write_attr(&where_path, "rscale", AttrValue::Double(rscale))?;
    Ok(())
}

fn write_quality_plane(
    out: &mut dyn OdimWriter,
    dataset: &str,
    quality: &Array2<f64>,
) -> Result<(), SuperobError> {
    let encoded = quantize_quality(quality);
    let what = format!("{dataset}/quality1/what");
    out.write_attr(&what, "gain", AttrValue::Double(encoded.gain))?;
    out.write_attr(&what, "offset", AttrValue::Double(encoded.offset))?;
    out.write_attr(
        &format!("{dataset}/quality1/how"),
        "task",
        AttrValue::from("superobing"),
    )?;
    out.write_dataset(&format!("{dataset}/quality1"), "data", &encoded.bytes)?;
    Ok(())
}

/// Writes the coarse reflectivity moment over the original DBZ planes:
/// shrunk dimensions under `where`, quantized DBZ and TH planes, and the
/// super-observation quality plane.
pub fn write_coarse_dbz(coarse: &Moment, out: &mut dyn OdimWriter) -> Result<(), SuperobError> {
    let nan_cube = Array3::from_elem(coarse.meas.dim(), f64::NAN);
    let ths = coarse.ths.as_ref().unwrap_or(&nan_cube);
    let quals = coarse.quals.as_ref().unwrap_or(&nan_cube);

    for (e, dataset) in coarse.datasets.iter().enumerate() {
        let naz = coarse.naz[e];
        let nr = coarse.nr[e];
        let nodata_dbz = require_attr(out, &format!("{dataset}/data1/what"), "nodata")?;
        let nodata_th = require_attr(out, &format!("{dataset}/data2/what"), "nodata")?;

        write_coarse_dims(out, dataset, naz, nr, coarse.rscales[e])?;

        let encoded_dbz = quantize(&plane(&coarse.meas, e, naz, nr), nodata_dbz as u8);
        let what1 = format!("{dataset}/data1/what");
        out.write_attr(&what1, "undetect", AttrValue::Double(0.0))?;
        out.write_attr(&what1, "gain", AttrValue::Double(encoded_dbz.gain))?;
        out.write_attr(&what1, "offset", AttrValue::Double(encoded_dbz.offset))?;
        out.write_dataset(&format!("{dataset}/data1"), "data", &encoded_dbz.bytes)?;

        let encoded_th = quantize(&plane(ths, e, naz, nr), nodata_th as u8);
        let what2 = format!("{dataset}/data2/what");
        out.write_attr(&what2, "gain", AttrValue::Double(encoded_th.gain))?;
        out.write_attr(&what2, "offset", AttrValue::Double(encoded_th.offset))?;
        out.write_dataset(&format!("{dataset}/data2"), "data", &encoded_th.bytes)?;

        write_quality_plane(out, dataset, &plane(quals, e, naz, nr))?;
    }
    Ok(())
}

/// Writes the coarse velocity moment over the original VRAD planes.
///
/// Velocity planes carry a fixed nodata byte of 255, written back as an
/// attribute alongside the gain and offset.
pub fn write_coarse_vrad(coarse: &Moment, out: &mut dyn OdimWriter) -> Result<(), SuperobError> {
    let nan_cube = Array3::from_elem(coarse.meas.dim(), f64::NAN);
    let quals = coarse.quals.as_ref().unwrap_or(&nan_cube);

    for (e, dataset) in coarse.datasets.iter().enumerate() {
        let naz = coarse.naz[e];
        let nr = coarse.nr[e];

        write_coarse_dims(out, dataset, naz, nr, coarse.rscales[e])?;

        let encoded = quantize(&plane(&coarse.meas, e, naz, nr), VRAD_NODATA);
        let what1 = format!("{dataset}/data1/what");
        out.write_attr(&what1, "undetect", AttrValue::Double(0.0))?;
        out.write_attr(&what1, "gain", AttrValue::Double(encoded.gain))?;
        out.write_attr(&what1, "offset", AttrValue::Double(encoded.offset))?;
        out.write_attr(&what1, "nodata", AttrValue::Double(f64::from(VRAD_NODATA)))?;
        out.write_dataset(&format!("{dataset}/data1"), "data", &encoded.bytes)?;

        write_quality_plane(out, dataset, &plane(quals, e, naz, nr))?;
    }
    Ok(())
}

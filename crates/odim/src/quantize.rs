//! 8-bit gain/offset encoding of output fields.
//!
//! ODIM data planes store one byte per gate together with `gain` and
//! `offset` attributes such that `value = gain * byte + offset`. The
//! gain/offset pair is chosen per plane from the finite value range so
//! that the quantization error never exceeds half a gain step.

use ndarray::Array2;

use boreas_volume::grid::nan_min_max;

/// Gain used for quality planes, which live on `[0, 1]`.
pub const QUALITY_GAIN: f64 = 1.0 / 255.0;

/// Gains closer to zero than this are treated as a constant field.
const GAIN_EPSILON: f64 = 1e-12;

/// An encoded 2-D plane together with its decoding attributes.
#[derive(Debug, Clone)]
pub struct Quantized {
    /// Scale of one byte step.
    pub gain: f64,
    /// Value of byte zero.
    pub offset: f64,
    /// Encoded plane, same shape as the input.
    pub bytes: Array2<u8>,
}

/// Encodes a plane of doubles into bytes.
///
/// `gain` and `offset` are derived from the finite minimum and maximum;
/// a constant (or all-NaN) plane falls back to `gain = 1`. NaN cells
/// encode as `nodata`.
pub fn quantize(field: &Array2<f64>, nodata: u8) -> Quantized {
    let mut gain = 1.0;
    let mut offset = 0.0;
    if let Some((min, max)) = nan_min_max(field.iter()) {
        gain = (max - min) / 254.0;
        if gain.abs() < GAIN_EPSILON {
            gain = 1.0;
        }
        offset = (254.0 * min - max) / 253.0;
    }
    let bytes = field.map(|&v| encode(v, gain, offset, nodata));
    Quantized {
        gain,
        offset,
        bytes,
    }
}

/// Encodes a quality plane with the fixed `[0, 1]` scaling.
///
/// NaN cells encode as byte 0, so an absent quality reads back as zero.
pub fn quantize_quality(field: &Array2<f64>) -> Quantized {
    let bytes = field.map(|&v| encode(v, QUALITY_GAIN, 0.0, 0));
    Quantized {
        gain: QUALITY_GAIN,
        offset: 0.0,
        bytes,
    }
}

fn encode(v: f64, gain: f64, offset: f64, nodata: u8) -> u8 {
    if v.is_nan() {
        nodata
    } else {
        ((v - offset + 0.5 * gain) / gain) as u8
    }
}

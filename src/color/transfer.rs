//! sRGB transfer functions.
//!
//! All functions operate on a single channel normalized to `[0, 1]`.
//! The decode thresholds differ between consumers and are not interchangeable:
//! IEC 61966-2-1 uses 0.04045, WCAG 2.1 uses 0.03928.

/// IEC 61966-2-1 decode threshold.
pub const SRGB_DECODE_THRESHOLD: f64 = 0.040_45;

/// WCAG 2.1 decode threshold.
pub const WCAG_DECODE_THRESHOLD: f64 = 0.039_28;

/// Linear-light encode threshold.
pub const SRGB_ENCODE_THRESHOLD: f64 = 0.003_130_8;

/// Piecewise sRGB decode (gamma-encoded → linear light).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    decode_with_threshold(c, SRGB_DECODE_THRESHOLD)
}

/// Piecewise sRGB decode with the WCAG 2.1 threshold.
#[inline]
#[must_use]
pub fn wcag_srgb_to_linear(c: f64) -> f64 {
    decode_with_threshold(c, WCAG_DECODE_THRESHOLD)
}

#[inline]
fn decode_with_threshold(c: f64, threshold: f64) -> f64 {
    if c <= threshold {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Piecewise sRGB encode (linear light → gamma-encoded).
///
/// Values at or below the threshold (negative values included) take the linear
/// segment, so out-of-gamut negatives never reach `powf`.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= SRGB_ENCODE_THRESHOLD {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Gamma used by [`crate::color::rgb_to_lab`]: flat power 2.2 above the sRGB
/// threshold, linear toe below.
///
/// Kept for output compatibility with existing LAB readouts. It disagrees with
/// [`srgb_to_linear`] by up to ~0.01 in mid-tones and is most likely an accuracy bug.
#[inline]
#[must_use]
pub fn lab_gamma(c: f64) -> f64 {
    if c > SRGB_DECODE_THRESHOLD {
        c.powf(2.2)
    } else {
        c / 12.92
    }
}

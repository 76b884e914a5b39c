//! HSB, HSL, CMYK and CIE L\*a\*b\* conversions.

use super::transfer::lab_gamma;
use super::Rgb;

/// Hue/Saturation/Brightness (HSV). Hue in `[0, 360)`, the others in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsb {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation percentage.
    pub s: f64,
    /// Brightness percentage.
    pub b: f64,
}

impl Hsb {
    /// Create a new HSB color.
    #[must_use]
    pub const fn new(h: f64, s: f64, b: f64) -> Self {
        Self { h, s, b }
    }

    /// Integer display triple, rounded half to even.
    #[must_use]
    pub fn rounded(self) -> (i32, i32, i32) {
        (round(self.h), round(self.s), round(self.b))
    }
}

/// Hue/Saturation/Lightness. Hue in `[0, 360)`, the others in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation percentage.
    pub s: f64,
    /// Lightness percentage.
    pub l: f64,
}

impl Hsl {
    /// Integer display triple, rounded half to even.
    #[must_use]
    pub fn rounded(self) -> (i32, i32, i32) {
        (round(self.h), round(self.s), round(self.l))
    }
}

/// Cyan/Magenta/Yellow/Key, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cmyk {
    /// Cyan percentage.
    pub c: f64,
    /// Magenta percentage.
    pub m: f64,
    /// Yellow percentage.
    pub y: f64,
    /// Key (black) percentage.
    pub k: f64,
}

impl Cmyk {
    /// Integer display quadruple, rounded half to even.
    #[must_use]
    pub fn rounded(self) -> (i32, i32, i32, i32) {
        (round(self.c), round(self.m), round(self.y), round(self.k))
    }
}

/// CIE L\*a\*b\* under D65. L in `[0, 100]`, a/b typically in `[-128, 127]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness.
    pub l: f64,
    /// Green-red axis.
    pub a: f64,
    /// Blue-yellow axis.
    pub b: f64,
}

impl Lab {
    /// Integer display triple, rounded half to even.
    #[must_use]
    pub fn rounded(self) -> (i32, i32, i32) {
        (round(self.l), round(self.a), round(self.b))
    }
}

fn round(v: f64) -> i32 {
    v.round_ties_even() as i32
}

/// sRGB → XYZ (D65) matrix rows.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

/// D65 reference white.
const D65_WHITE: [f64; 3] = [0.950_47, 1.000_00, 1.088_83];

/// CIE `f(t)` linear-segment threshold.
const LAB_EPSILON: f64 = 0.008_856;

/// Hue, saturation and value on the unit scale.
///
/// Achromatic input returns hue and saturation 0. Hue is `branch / 6` wrapped into
/// `[0, 1)` with Euclidean remainder.
pub(crate) fn rgb_to_hsv_unit(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return (0.0, 0.0, max);
    }
    let range = max - min;
    (hue_unit(r, g, b, max, range), range / max, max)
}

fn hue_unit(r: f64, g: f64, b: f64, max: f64, range: f64) -> f64 {
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    (h / 6.0).rem_euclid(1.0)
}

/// RGB → HSB.
///
/// ```
/// use colorcard::color::{rgb_to_hsb, Rgb};
///
/// assert_eq!(rgb_to_hsb(Rgb::new(0, 128, 255)).rounded(), (210, 100, 100));
/// ```
#[must_use]
pub fn rgb_to_hsb(rgb: Rgb) -> Hsb {
    let [r, g, b] = rgb.normalized();
    let (h, s, v) = rgb_to_hsv_unit(r, g, b);
    Hsb::new(h * 360.0, s * 100.0, v * 100.0)
}

/// HSB → RGB, channels rounded half to even.
#[must_use]
pub fn hsb_to_rgb(hsb: Hsb) -> Rgb {
    let h = hsb.h / 360.0;
    let s = hsb.s / 100.0;
    let v = hsb.b / 100.0;

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let sector = (h * 6.0).trunc();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    let to_byte = |c: f64| (c * 255.0).round_ties_even().clamp(0.0, 255.0) as u8;
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}

/// RGB → HSL.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let [r, g, b] = rgb.normalized();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let sum = max + min;
    let l = sum / 2.0;
    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let range = max - min;
    // 2 - max - min and 2 - sum can differ in the last bit
    let s = if l <= 0.5 { range / sum } else { range / (2.0 - max - min) };
    Hsl { h: hue_unit(r, g, b, max, range) * 360.0, s: s * 100.0, l: l * 100.0 }
}

/// RGB → CMYK. Pure black maps to `(0, 0, 0, 100)`.
#[must_use]
pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let [r, g, b] = rgb.normalized();
    let k = 1.0 - r.max(g).max(b);
    if k == 1.0 {
        return Cmyk { c: 0.0, m: 0.0, y: 0.0, k: 100.0 };
    }

    let ink = |c: f64| (1.0 - c - k) / (1.0 - k) * 100.0;
    Cmyk { c: ink(r), m: ink(g), y: ink(b), k: k * 100.0 }
}

/// RGB → CIE L\*a\*b\* (D65).
///
/// Linearizes with [`lab_gamma`](super::transfer::lab_gamma) rather than the
/// piecewise sRGB curve; coefficients and thresholds are fixed so readouts match
/// existing values exactly.
///
/// ```
/// use colorcard::color::{rgb_to_lab, Rgb};
///
/// assert_eq!(rgb_to_lab(Rgb::WHITE).rounded(), (100, 0, 0));
/// ```
#[must_use]
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let [r, g, b] = rgb.normalized().map(lab_gamma);

    let xyz = RGB_TO_XYZ.map(|row| row[0] * r + row[1] * g + row[2] * b);
    let [fx, fy, fz] = [0, 1, 2].map(|i| lab_f(xyz[i] / D65_WHITE[i]));

    Lab { l: 116.0 * fy - 16.0, a: 500.0 * (fx - fy), b: 200.0 * (fy - fz) }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.powf(1.0 / 3.0)
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

//! WCAG 2.1 contrast evaluation.
//!
//! Relative luminance here is linear light in `[0, 1]` decoded with the WCAG
//! 0.03928 threshold. It is not the display luminance used by zones.

use std::fmt;

use crate::color::transfer::wcag_srgb_to_linear;
use crate::color::{Rgb, REC709_B, REC709_G, REC709_R};

/// Normal-text AAA threshold.
pub const AAA_NORMAL: f64 = 7.0;
/// Normal-text AA threshold, also the large-text AAA threshold.
pub const AA_NORMAL: f64 = 4.5;
/// Large-text AA threshold.
pub const AA_LARGE: f64 = 3.0;

/// WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WcagLevel {
    /// Enhanced contrast.
    Aaa,
    /// Minimum contrast.
    Aa,
    /// Below minimum.
    Fail,
}

impl WcagLevel {
    /// Display label: `"AAA"`, `"AA"` or `"Fail"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::Fail => "Fail",
        }
    }

    /// True for AA or better.
    #[must_use]
    pub const fn passes(self) -> bool {
        !matches!(self, Self::Fail)
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WCAG relative luminance in `[0, 1]`.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let [r, g, b] = rgb.normalized().map(wcag_srgb_to_linear);
    REC709_R * r + REC709_G * g + REC709_B * b
}

/// Contrast ratio `(lighter + 0.05) / (darker + 0.05)`, rounded to 2 decimals.
///
/// Symmetric in its arguments and always within `[1, 21]`.
///
/// ```
/// use colorcard::color::Rgb;
/// use colorcard::contrast::contrast_ratio;
///
/// assert_eq!(contrast_ratio(Rgb::WHITE, Rgb::BLACK), 21.0);
/// ```
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    ratio_of(relative_luminance(a), relative_luminance(b))
}

fn ratio_of(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    let ratio = (lighter + 0.05) / (darker + 0.05);
    (ratio * 100.0).round_ties_even() / 100.0
}

/// Level reached by `ratio`. Thresholds are inclusive.
///
/// Normal text needs 7 for AAA and 4.5 for AA; large text needs 4.5 and 3.
#[must_use]
pub fn wcag_level(ratio: f64, is_large_text: bool) -> WcagLevel {
    let (aaa, aa) = if is_large_text { (AA_NORMAL, AA_LARGE) } else { (AAA_NORMAL, AA_NORMAL) };
    if ratio >= aaa {
        WcagLevel::Aaa
    } else if ratio >= aa {
        WcagLevel::Aa
    } else {
        WcagLevel::Fail
    }
}

/// Contrast summary for a color pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastInfo {
    /// Rounded contrast ratio.
    pub ratio: f64,
    /// Level for normal text.
    pub normal_level: WcagLevel,
    /// Level for large text.
    pub large_level: WcagLevel,
    /// `ratio >= 4.5`. Always the normal-text threshold, even for large text.
    pub passes_aa: bool,
    /// `ratio >= 7`. Always the normal-text threshold, even for large text.
    pub passes_aaa: bool,
    /// Relative luminance of the first color.
    pub luminance1: f64,
    /// Relative luminance of the second color.
    pub luminance2: f64,
}

/// Evaluate a color pair against every WCAG threshold.
#[must_use]
pub fn contrast_info(a: Rgb, b: Rgb) -> ContrastInfo {
    let luminance1 = relative_luminance(a);
    let luminance2 = relative_luminance(b);
    let ratio = ratio_of(luminance1, luminance2);

    ContrastInfo {
        ratio,
        normal_level: wcag_level(ratio, false),
        large_level: wcag_level(ratio, true),
        passes_aa: ratio >= AA_NORMAL,
        passes_aaa: ratio >= AAA_NORMAL,
        luminance1,
        luminance2,
    }
}

/// Indicator color for a ratio tier: green, blue, orange or red.
///
/// Dark themes get lighter tints of the same hues.
#[must_use]
pub fn contrast_status_color(ratio: f64, is_dark_theme: bool) -> Rgb {
    let (light, dark) = if ratio >= AAA_NORMAL {
        (Rgb::new(76, 175, 80), Rgb::new(129, 199, 132))
    } else if ratio >= AA_NORMAL {
        (Rgb::new(33, 150, 243), Rgb::new(100, 181, 246))
    } else if ratio >= AA_LARGE {
        (Rgb::new(255, 152, 0), Rgb::new(255, 183, 77))
    } else {
        (Rgb::new(244, 67, 54), Rgb::new(239, 83, 80))
    };
    if is_dark_theme {
        dark
    } else {
        light
    }
}

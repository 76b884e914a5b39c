//! Color vision deficiency simulation.
//!
//! Colors are taken to LMS cone space with the Bradford matrix, the missing cone
//! response is rebuilt from the other two, and the result is mapped back to sRGB.
//! Output channels are clamped to `[0, 1]` and truncated, not rounded.

use std::fmt;

use crate::color::transfer::{linear_to_srgb, srgb_to_linear};
use crate::color::Rgb;

/// Bradford RGB → LMS.
const RGB_TO_LMS: [[f64; 3]; 3] = [
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
];

/// Inverse Bradford LMS → RGB.
const LMS_TO_RGB: [[f64; 3]; 3] = [
    [0.986_993, -0.147_054, 0.159_963],
    [0.432_305, 0.518_36, 0.049_291],
    [-0.008_529, 0.040_043, 0.968_487],
];

/// Long, medium and short wavelength cone responses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lms {
    /// Long (red) cones.
    pub l: f64,
    /// Medium (green) cones.
    pub m: f64,
    /// Short (blue) cones.
    pub s: f64,
}

/// Supported deficiency types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CvdType {
    /// Full color vision.
    #[default]
    Normal,
    /// Missing L cones.
    Protanopia,
    /// Missing M cones.
    Deuteranopia,
    /// Missing S cones.
    Tritanopia,
    /// No color perception.
    Achromatopsia,
}

impl CvdType {
    /// Every type, `Normal` first.
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Achromatopsia,
    ];

    /// Parse a lowercase identifier such as `"protanopia"`.
    ///
    /// Unknown names map to [`CvdType::Normal`] so simulation leaves colors unchanged.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL.into_iter().find(|t| t.id() == name).unwrap_or_default()
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Achromatopsia => "achromatopsia",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal vision",
            Self::Protanopia => "Protanopia (red-blind)",
            Self::Deuteranopia => "Deuteranopia (green-blind)",
            Self::Tritanopia => "Tritanopia (blue-blind)",
            Self::Achromatopsia => "Achromatopsia (monochromacy)",
        }
    }

    /// One-sentence explanation.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Normal => "Normal color vision, the full spectrum is visible.",
            Self::Protanopia => {
                "Red cones are missing: reds and greens are hard to tell apart and reds look darker."
            }
            Self::Deuteranopia => {
                "Green cones are missing: reds and greens are hard to tell apart. The most common type."
            }
            Self::Tritanopia => {
                "Blue cones are missing: blues and yellows are hard to tell apart. Very rare."
            }
            Self::Achromatopsia => "No color is perceived, only shades of gray. Extremely rare.",
        }
    }

    /// Rebuild cone responses as seen with this deficiency.
    #[must_use]
    pub fn apply(self, lms: Lms) -> Lms {
        let Lms { l, m, s } = lms;
        match self {
            Self::Normal => lms,
            Self::Protanopia => Lms { l: 2.023_44 * m - 2.525_81 * s, m, s },
            Self::Deuteranopia => Lms { l, m: 0.494_21 * l + 1.248_27 * s, s },
            Self::Tritanopia => Lms { l, m, s: -0.395_913 * l + 0.801_109 * m },
            Self::Achromatopsia => {
                let gray = 0.299 * l + 0.587 * m + 0.114 * s;
                Lms { l: gray, m: gray, s: gray }
            }
        }
    }
}

impl fmt::Display for CvdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn mat3(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

/// sRGB → LMS through linear light.
#[must_use]
pub fn rgb_to_lms(rgb: Rgb) -> Lms {
    let [l, m, s] = mat3(&RGB_TO_LMS, rgb.normalized().map(srgb_to_linear));
    Lms { l, m, s }
}

/// LMS → sRGB. Channels are clamped to `[0, 1]` and truncated to integers.
#[must_use]
pub fn lms_to_rgb(lms: Lms) -> Rgb {
    let linear = mat3(&LMS_TO_RGB, [lms.l, lms.m, lms.s]);
    Rgb::from_array(linear.map(|c| (linear_to_srgb(c).clamp(0.0, 1.0) * 255.0) as u8))
}

/// Simulate how `rgb` appears with the given deficiency.
///
/// `Normal` returns the input unchanged without a round trip through LMS.
///
/// ```
/// use colorcard::color::Rgb;
/// use colorcard::cvd::{simulate_colorblind, CvdType};
///
/// let c = Rgb::new(200, 30, 90);
/// assert_eq!(simulate_colorblind(c, CvdType::Normal), c);
/// assert_eq!(simulate_colorblind(Rgb::BLACK, CvdType::Protanopia), Rgb::BLACK);
/// ```
#[must_use]
pub fn simulate_colorblind(rgb: Rgb, cvd: CvdType) -> Rgb {
    if cvd == CvdType::Normal {
        return rgb;
    }
    lms_to_rgb(cvd.apply(rgb_to_lms(rgb)))
}

/// [`simulate_colorblind`] keyed by identifier. Unknown names return `rgb`.
#[must_use]
pub fn simulate_by_name(rgb: Rgb, name: &str) -> Rgb {
    simulate_colorblind(rgb, CvdType::from_name(name))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Achromatopsia output is gray to within one step
        #[test]
        fn prop_achromatopsia_is_gray(rgb in any::<[u8; 3]>()) {
            let out = simulate_colorblind(Rgb::from_array(rgb), CvdType::Achromatopsia);
            let max = out.r.max(out.g).max(out.b);
            let min = out.r.min(out.g).min(out.b);
            prop_assert!(max - min <= 1, "{out:?}");
        }

        /// Unknown names never alter the color
        #[test]
        fn prop_unknown_name_identity(rgb in any::<[u8; 3]>(), name in "[A-Z][a-z]{0,8}") {
            let c = Rgb::from_array(rgb);
            prop_assert_eq!(simulate_by_name(c, &name), c);
        }
    }
}

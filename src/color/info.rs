//! Bundled color readout for a single sample point.

use super::{rgb_to_cmyk, rgb_to_hex, rgb_to_hsb, rgb_to_hsl, rgb_to_lab, Rgb};

/// Every descriptor shown for a sample point, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorInfo {
    /// Source color.
    pub rgb: Rgb,
    /// Hue (degrees), saturation and brightness (percent).
    pub hsb: (i32, i32, i32),
    /// L\*, a\*, b\*.
    pub lab: (i32, i32, i32),
    /// Hue (degrees), saturation and lightness (percent).
    pub hsl: (i32, i32, i32),
    /// Cyan, magenta, yellow and key (percent).
    pub cmyk: (i32, i32, i32, i32),
    /// `#RRGGBB`.
    pub hex: String,
}

impl ColorInfo {
    /// Compute all descriptors for `rgb`.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            hsb: rgb_to_hsb(rgb).rounded(),
            lab: rgb_to_lab(rgb).rounded(),
            hsl: rgb_to_hsl(rgb).rounded(),
            cmyk: rgb_to_cmyk(rgb).rounded(),
            hex: rgb_to_hex(rgb),
        }
    }
}

impl From<Rgb> for ColorInfo {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

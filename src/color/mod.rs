//! Color types and color space conversions.
//!
//! [`Rgb`] is the canonical input of every computation in the crate. Channels are
//! `u8`, so out-of-range values cannot reach the conversions; the one boundary that
//! accepts wider integers, [`Rgb::clamped`], clamps each channel into `[0, 255]`.
//!
//! Two distinct luminance notions exist and must not be mixed:
//!
//! - [`display_luminance`]: gamma round-tripped, `0..=255`, used for zones and histograms.
//! - [`crate::contrast::relative_luminance`]: linear light, `[0, 1]`, WCAG 2.1.
//!
//! # References
//!
//! - IEC 61966-2-1:1999, *Default RGB colour space - sRGB*.
//! - ITU-R BT.709-6, *Parameter values for the HDTV standards*.
//! - CIE 15:2004, *Colorimetry* (L\*a\*b\*).

mod hex;
mod info;
mod luminance;
mod space;
pub mod transfer;

pub use hex::{hex_to_rgb, rgb_to_hex};
pub use info::ColorInfo;
pub use luminance::{display_luminance, REC709_B, REC709_G, REC709_R};
pub use space::{
    hsb_to_rgb, rgb_to_cmyk, rgb_to_hsb, rgb_to_hsl, rgb_to_lab, Cmyk, Hsb, Hsl, Lab,
};
pub(crate) use space::rgb_to_hsv_unit;

use std::fmt;
use std::str::FromStr;

/// 8-bit sRGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Blue.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from wider integers, clamping each channel into `[0, 255]`.
    ///
    /// ```
    /// use colorcard::color::Rgb;
    ///
    /// assert_eq!(Rgb::clamped(-20, 128, 300), Rgb::new(0, 128, 255));
    /// ```
    #[must_use]
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let clamp = |c: i32| c.clamp(0, 255) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Channels scaled to `[0, 1]`, still gamma-encoded.
    #[must_use]
    pub fn normalized(self) -> [f64; 3] {
        [f64::from(self.r) / 255.0, f64::from(self.g) / 255.0, f64::from(self.b) / 255.0]
    }

    /// Attach an alpha channel.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// `#RRGGBB` representation.
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(rgb: Rgb) -> Self {
        (rgb.r, rgb.g, rgb.b)
    }
}

impl From<Rgba> for Rgb {
    fn from(rgba: Rgba) -> Self {
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&rgb_to_hex(*self))
    }
}

impl FromStr for Rgb {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Drop the alpha channel.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(255)
    }
}

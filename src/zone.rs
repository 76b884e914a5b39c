//! Zone classification of display luminance.
//!
//! The `0..=255` luminance range is split into eight 32-wide zones, labelled
//! `"0-1"` through `"7-8"` after the Zone System's stops. The label format is
//! shared with persisted sample points and must stay `"{n}-{n+1}"`.

use std::fmt;
use std::str::FromStr;

use crate::color::{display_luminance, Rgba};
use crate::error::{Error, Result};
use crate::histogram::LuminanceHistogram;
use crate::image::{ImageAccessor, SampleGrid};

/// One of eight contiguous luminance buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Zone(u8);

impl Zone {
    /// Number of zones.
    pub const COUNT: usize = 8;

    /// Luminance values per zone.
    pub const WIDTH: u8 = 32;

    /// Darkest zone, `"0-1"`.
    pub const DARKEST: Self = Self(0);

    /// Brightest zone, `"7-8"`.
    pub const BRIGHTEST: Self = Self(7);

    /// Zone with the given index, if it is in `0..=7`.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT as u8 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Zone containing a display luminance value.
    #[must_use]
    pub const fn from_luminance(luminance: u8) -> Self {
        let index = luminance / Self::WIDTH;
        Self(if index > 7 { 7 } else { index })
    }

    /// Zone index in `0..=7`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Inclusive luminance range `(min, max)` of this zone.
    #[must_use]
    pub const fn bounds(self) -> (u8, u8) {
        let min = self.0 * Self::WIDTH;
        (min, min + (Self::WIDTH - 1))
    }

    /// Whether `luminance` falls inside this zone.
    #[must_use]
    pub const fn contains(self, luminance: u8) -> bool {
        let (min, max) = self.bounds();
        luminance >= min && luminance <= max
    }

    /// All zones from darkest to brightest.
    pub fn all() -> impl Iterator<Item = Zone> {
        (0..Self::COUNT as u8).map(Zone)
    }

    /// Tonal name shown next to the label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "Black",
            1 => "Shadows",
            2 => "Dark",
            3 => "Midtones",
            4 => "Light",
            5 => "Highlights",
            6 => "White",
            _ => "Pure white",
        }
    }

    /// Translucent highlight color, running blue through green to red.
    #[must_use]
    pub const fn highlight_color(self) -> Rgba {
        const ALPHA: u8 = 100;
        match self.0 {
            0 => Rgba::new(0, 102, 255, ALPHA),
            1 => Rgba::new(0, 128, 255, ALPHA),
            2 => Rgba::new(0, 153, 255, ALPHA),
            3 => Rgba::new(0, 204, 102, ALPHA),
            4 => Rgba::new(102, 255, 102, ALPHA),
            5 => Rgba::new(255, 204, 0, ALPHA),
            6 => Rgba::new(255, 128, 0, ALPHA),
            _ => Rgba::new(255, 51, 102, ALPHA),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.0 + 1)
    }
}

impl FromStr for Zone {
    type Err = Error;

    /// Parses the integer before the first `-`; the upper label is not checked.
    fn from_str(s: &str) -> Result<Self> {
        let lead = s.split('-').next().unwrap_or_default().trim();
        lead.parse::<u8>()
            .ok()
            .and_then(Zone::new)
            .ok_or_else(|| Error::InvalidZone(s.to_string()))
    }
}

/// Zone label for a display luminance value, e.g. `"3-4"`.
#[must_use]
pub fn zone_label(luminance: u8) -> String {
    Zone::from_luminance(luminance).to_string()
}

/// Inclusive luminance range of a zone label.
///
/// ```
/// use colorcard::zone::zone_bounds;
///
/// assert_eq!(zone_bounds("3-4").unwrap(), (96, 127));
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidZone`] when the label does not start with an index in `0..=7`.
pub fn zone_bounds(label: &str) -> Result<(u8, u8)> {
    Ok(label.parse::<Zone>()?.bounds())
}

/// Zone of the pixel at `(x, y)`, or `None` outside the image.
#[must_use]
pub fn zone_at<I: ImageAccessor + ?Sized>(image: &I, x: u32, y: u32) -> Option<Zone> {
    if x >= image.width() || y >= image.height() {
        return None;
    }
    Some(Zone::from_luminance(display_luminance(image.pixel(x, y))))
}

/// Sample counts per zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneDistribution {
    counts: [u32; Zone::COUNT],
}

impl ZoneDistribution {
    /// Count zones over the strided sample grid.
    ///
    /// Unlike the luminance histogram, edge rows and columns are not supplemented.
    #[must_use]
    pub fn from_image<I: ImageAccessor + ?Sized>(image: &I, sample_step: u32) -> Self {
        let mut distribution = Self::default();
        for (x, y) in SampleGrid::strided(image.width(), image.height(), sample_step).points() {
            let zone = Zone::from_luminance(display_luminance(image.pixel(x, y)));
            distribution.counts[usize::from(zone.index())] += 1;
        }
        distribution
    }

    /// Fold a 256-bin luminance histogram into zones.
    #[must_use]
    pub fn from_histogram(histogram: &LuminanceHistogram) -> Self {
        let mut distribution = Self::default();
        for (level, &count) in histogram.bins().iter().enumerate() {
            let zone = Zone::from_luminance(level as u8);
            distribution.counts[usize::from(zone.index())] += count;
        }
        distribution
    }

    /// Count for one zone.
    #[must_use]
    pub fn count(&self, zone: Zone) -> u32 {
        self.counts[usize::from(zone.index())]
    }

    /// All eight counts, darkest first.
    #[must_use]
    pub fn counts(&self) -> &[u32; Zone::COUNT] {
        &self.counts
    }

    /// Total number of samples.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Share of samples in `zone`, `0.0` when empty.
    #[must_use]
    pub fn fraction(&self, zone: Zone) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.count(zone)) / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(zone_label(0), "0-1");
        assert_eq!(zone_label(31), "0-1");
        assert_eq!(zone_label(32), "1-2");
        assert_eq!(zone_label(127), "3-4");
        assert_eq!(zone_label(224), "7-8");
        assert_eq!(zone_label(255), "7-8");
    }

    #[test]
    fn test_zone_bounds_values() {
        assert_eq!(zone_bounds("0-1").unwrap(), (0, 31));
        assert_eq!(zone_bounds("7-8").unwrap(), (224, 255));
        assert_eq!(Zone::BRIGHTEST.bounds(), (224, 255));
    }

    #[test]
    fn test_zone_bounds_parses_leading_integer_only() {
        assert_eq!(zone_bounds("5").unwrap(), (160, 191));
        assert_eq!(zone_bounds(" 2 -3").unwrap(), (64, 95));
        assert_eq!(zone_bounds("4-99").unwrap(), (128, 159));
    }

    #[test]
    fn test_zone_bounds_rejects_garbage() {
        for bad in ["", "-1-0", "8-9", "x-1", "300-301"] {
            assert!(matches!(zone_bounds(bad), Err(Error::InvalidZone(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_zone_new_and_all() {
        assert_eq!(Zone::new(7), Some(Zone::BRIGHTEST));
        assert_eq!(Zone::new(8), None);
        let labels: Vec<String> = Zone::all().map(|z| z.to_string()).collect();
        assert_eq!(labels.len(), 8);
        assert_eq!(labels.first().map(String::as_str), Some("0-1"));
        assert_eq!(labels.last().map(String::as_str), Some("7-8"));
    }

    #[test]
    fn test_zone_names_and_colors() {
        assert_eq!(Zone::DARKEST.name(), "Black");
        assert_eq!(Zone::BRIGHTEST.name(), "Pure white");
        let colors: Vec<Rgba> = Zone::all().map(Zone::highlight_color).collect();
        assert!(colors.iter().all(|c| c.a == 100));
        assert_eq!(colors[3], Rgba::new(0, 204, 102, 100));
    }

    #[test]
    fn test_zone_at() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.clear(Rgba::WHITE);
        fb.set_pixel(1, 1, Rgba::BLACK);
        assert_eq!(zone_at(&fb, 0, 0), Some(Zone::BRIGHTEST));
        assert_eq!(zone_at(&fb, 1, 1), Some(Zone::DARKEST));
        assert_eq!(zone_at(&fb, 4, 0), None);
    }

    #[test]
    fn test_distribution_from_image_uses_plain_grid() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::BLACK);
        fb.set_pixel(9, 9, Rgba::WHITE);

        let dist = ZoneDistribution::from_image(&fb, 4);
        // 3x3 grid, the corner at (9, 9) is not on it
        assert_eq!(dist.total(), 9);
        assert_eq!(dist.count(Zone::DARKEST), 9);
        assert_eq!(dist.count(Zone::BRIGHTEST), 0);
        assert!((dist.fraction(Zone::DARKEST) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distribution_from_histogram() {
        let mut hist = LuminanceHistogram::new();
        hist.record(0);
        hist.record(31);
        hist.record(32);
        hist.record(255);
        let dist = ZoneDistribution::from_histogram(&hist);
        assert_eq!(dist.counts(), &[2, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_empty_distribution_fraction() {
        assert_eq!(ZoneDistribution::default().fraction(Zone::DARKEST), 0.0);
    }
}

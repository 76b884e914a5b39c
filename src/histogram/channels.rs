//! Per-channel and hue histograms.

use crate::color::rgb_to_hsv_unit;
use crate::image::{ImageAccessor, SampleGrid};

use super::LUMINANCE_BINS;

/// Number of hue bins, one per degree.
pub const HUE_BINS: usize = 360;

/// Saturation and value at or below this are treated as achromatic.
const ACHROMATIC_CUTOFF: f64 = 0.1;

/// Red, green and blue channel histograms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbHistogram {
    /// Red channel counts.
    pub r: [u32; LUMINANCE_BINS],
    /// Green channel counts.
    pub g: [u32; LUMINANCE_BINS],
    /// Blue channel counts.
    pub b: [u32; LUMINANCE_BINS],
}

impl Default for RgbHistogram {
    fn default() -> Self {
        Self { r: [0; LUMINANCE_BINS], g: [0; LUMINANCE_BINS], b: [0; LUMINANCE_BINS] }
    }
}

impl RgbHistogram {
    /// Samples per channel (identical for all three).
    #[must_use]
    pub fn total(&self) -> u64 {
        self.r.iter().map(|&c| u64::from(c)).sum()
    }
}

/// Hue distribution of saturated samples, one bin per degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HueHistogram {
    bins: [u32; HUE_BINS],
}

impl Default for HueHistogram {
    fn default() -> Self {
        Self { bins: [0; HUE_BINS] }
    }
}

impl HueHistogram {
    /// Raw counts, index = hue in degrees.
    #[must_use]
    pub const fn bins(&self) -> &[u32; HUE_BINS] {
        &self.bins
    }

    /// Number of counted samples.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| u64::from(c)).sum()
    }

    /// Most populated hue, lowest degree on ties. `None` when empty.
    #[must_use]
    pub fn dominant_hue(&self) -> Option<u16> {
        let (hue, &count) =
            self.bins.iter().enumerate().rev().max_by_key(|&(_, &count)| count)?;
        (count > 0).then_some(hue as u16)
    }
}

/// RGB channel histograms over the edge-supplemented sample grid.
#[must_use]
pub fn calculate_rgb_histogram<I: ImageAccessor + ?Sized>(image: &I, sample_step: u32) -> RgbHistogram {
    crate::time_scope!("histogram", "rgb");
    let mut histogram = RgbHistogram::default();
    for (x, y) in SampleGrid::for_image(image, sample_step).points() {
        let px = image.pixel(x, y);
        histogram.r[usize::from(px.r)] += 1;
        histogram.g[usize::from(px.g)] += 1;
        histogram.b[usize::from(px.b)] += 1;
    }
    histogram
}

/// Hue histogram over the plain strided grid.
///
/// Samples with HSV saturation or value at or below 10% are skipped. The bin is
/// the hue truncated to whole degrees.
#[must_use]
pub fn calculate_hue_histogram<I: ImageAccessor + ?Sized>(image: &I, sample_step: u32) -> HueHistogram {
    crate::time_scope!("histogram", "hue");
    let mut histogram = HueHistogram::default();
    for (x, y) in SampleGrid::strided(image.width(), image.height(), sample_step).points() {
        let [r, g, b] = image.pixel(x, y).normalized();
        let (h, s, v) = rgb_to_hsv_unit(r, g, b);
        if s > ACHROMATIC_CUTOFF && v > ACHROMATIC_CUTOFF {
            let bin = (h * HUE_BINS as f64) as usize % HUE_BINS;
            histogram.bins[bin] += 1;
        }
    }
    histogram
}

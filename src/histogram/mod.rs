//! Luminance, RGB and hue histograms over sampled image pixels.
//!
//! Sampling visits a stride grid (see [`SampleGrid`]). The luminance and RGB
//! histograms add the right column, bottom row and corner on top of the grid so a
//! bright edge is never missed by the stride; the hue histogram does not.

mod channels;

pub use channels::{calculate_hue_histogram, calculate_rgb_histogram, HueHistogram, RgbHistogram};

pub use crate::image::DEFAULT_SAMPLE_STEP;

use crate::color::display_luminance;
use crate::image::{ImageAccessor, SampleGrid};

/// Number of luminance levels.
pub const LUMINANCE_BINS: usize = 256;

/// Sample counts per display luminance level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceHistogram {
    bins: [u32; LUMINANCE_BINS],
}

impl Default for LuminanceHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl LuminanceHistogram {
    /// Empty histogram.
    #[must_use]
    pub const fn new() -> Self {
        Self { bins: [0; LUMINANCE_BINS] }
    }

    /// Wrap existing bin counts.
    #[must_use]
    pub const fn from_bins(bins: [u32; LUMINANCE_BINS]) -> Self {
        Self { bins }
    }

    /// Histogram of `image` sampled every `sample_step` pixels, edges included.
    #[must_use]
    pub fn calculate<I: ImageAccessor + ?Sized>(image: &I, sample_step: u32) -> Self {
        let mut histogram = Self::new();
        for (x, y) in SampleGrid::for_image(image, sample_step).points() {
            histogram.record(display_luminance(image.pixel(x, y)));
        }
        histogram
    }

    /// Count one sample at `level`.
    pub fn record(&mut self, level: u8) {
        let bin = &mut self.bins[usize::from(level)];
        *bin = bin.saturating_add(1);
    }

    /// Raw bin counts, index = luminance.
    #[must_use]
    pub const fn bins(&self) -> &[u32; LUMINANCE_BINS] {
        &self.bins
    }

    /// Count at one level.
    #[must_use]
    pub const fn count(&self, level: u8) -> u32 {
        self.bins[level as usize]
    }

    /// Total number of samples.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| u64::from(c)).sum()
    }

    /// True when nothing was sampled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.iter().all(|&c| c == 0)
    }

    /// Mean luminance, `None` when empty.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: u64 =
            self.bins.iter().enumerate().map(|(level, &c)| level as u64 * u64::from(c)).sum();
        Some(weighted as f64 / total as f64)
    }

    /// Darkest occupied level.
    #[must_use]
    pub fn min_level(&self) -> Option<u8> {
        self.bins.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Brightest occupied level.
    #[must_use]
    pub fn max_level(&self) -> Option<u8> {
        self.bins.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Smallest level at or below which at least `p` percent of samples fall.
    ///
    /// `p` is clamped to `[0, 100]`. Returns `None` for an empty histogram.
    #[must_use]
    pub fn percentile(&self, p: f64) -> Option<u8> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let target = (p.clamp(0.0, 100.0) / 100.0 * total as f64).ceil().max(1.0) as u64;
        let mut seen = 0u64;
        for (level, &count) in self.bins.iter().enumerate() {
            seen += u64::from(count);
            if seen >= target {
                return Some(level as u8);
            }
        }
        self.max_level()
    }

    /// Share of samples at pure black.
    #[must_use]
    pub fn shadow_clipping(&self) -> f64 {
        self.fraction_at(0)
    }

    /// Share of samples at pure white.
    #[must_use]
    pub fn highlight_clipping(&self) -> f64 {
        self.fraction_at(255)
    }

    fn fraction_at(&self, level: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.count(level)) / total as f64
    }
}

/// Luminance histogram of `image` at `sample_step`.
///
/// A missing or zero-size image yields all zeros. A step of 0 is treated as 1.
#[must_use]
pub fn calculate_histogram<I: ImageAccessor + ?Sized>(image: &I, sample_step: u32) -> LuminanceHistogram {
    crate::time_scope!("histogram", "luminance");
    let histogram = LuminanceHistogram::calculate(image, sample_step);
    crate::trace!(
        "histogram",
        "{}x{} step {} -> {} samples",
        image.width(),
        image.height(),
        sample_step,
        histogram.total()
    );
    histogram
}

/// Stride that keeps sampling cost roughly flat as images grow.
///
/// Two up to 1 MP, then 3, 4 (over 4 MP), 5 (over 8 MP) and 6 above 20 MP.
#[must_use]
pub fn adaptive_sample_step(width: u32, height: u32) -> u32 {
    match u64::from(width) * u64::from(height) {
        n if n > 20_000_000 => 6,
        n if n > 8_000_000 => 5,
        n if n > 4_000_000 => 4,
        n if n > 1_000_000 => 3,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::framebuffer::Framebuffer;

    fn solid(width: u32, height: u32, color: Rgba) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height).unwrap();
        fb.clear(color);
        fb
    }

    #[test]
    fn test_all_black_10x10() {
        let hist = calculate_histogram(&solid(10, 10, Rgba::BLACK), 4);
        // 9 grid + 3 right column + 3 bottom row + 1 corner
        assert_eq!(hist.count(0), 16);
        assert_eq!(hist.total(), 16);
    }

    #[test]
    fn test_bright_corner_is_not_missed() {
        let mut fb = solid(10, 10, Rgba::BLACK);
        fb.set_pixel(9, 9, Rgba::WHITE);
        let hist = calculate_histogram(&fb, 4);
        assert_eq!(hist.count(255), 1);
        assert_eq!(hist.count(0), 15);
    }

    #[test]
    fn test_single_pixel_counted_four_times() {
        let hist = calculate_histogram(&solid(1, 1, Rgba::WHITE), 4);
        assert_eq!(hist.count(255), 4);
    }

    #[test]
    fn test_missing_image_is_all_zero() {
        let missing: Option<Framebuffer> = None;
        let hist = calculate_histogram(&missing, 4);
        assert!(hist.is_empty());
        assert_eq!(hist.bins().len(), 256);
    }

    #[test]
    fn test_zero_step_is_one() {
        let hist = calculate_histogram(&solid(3, 3, Rgba::BLACK), 0);
        // 9 grid + 3 + 3 + 1
        assert_eq!(hist.total(), 16);
    }

    #[test]
    fn test_each_call_is_fresh() {
        let fb = solid(4, 4, Rgba::WHITE);
        let first = calculate_histogram(&fb, 2);
        let second = calculate_histogram(&fb, 2);
        assert_eq!(first, second);
        assert_eq!(first.total(), second.total());
    }

    #[test]
    fn test_statistics() {
        let mut hist = LuminanceHistogram::new();
        for level in [0, 0, 100, 200, 255] {
            hist.record(level);
        }
        assert_eq!(hist.min_level(), Some(0));
        assert_eq!(hist.max_level(), Some(255));
        assert!((hist.mean().unwrap() - 111.0).abs() < 1e-9);
        assert!((hist.shadow_clipping() - 0.4).abs() < 1e-9);
        assert!((hist.highlight_clipping() - 0.2).abs() < 1e-9);
        assert_eq!(hist.percentile(0.0), Some(0));
        assert_eq!(hist.percentile(50.0), Some(100));
        assert_eq!(hist.percentile(100.0), Some(255));
    }

    #[test]
    fn test_empty_statistics() {
        let hist = LuminanceHistogram::default();
        assert_eq!(hist.mean(), None);
        assert_eq!(hist.min_level(), None);
        assert_eq!(hist.percentile(50.0), None);
        assert_eq!(hist.shadow_clipping(), 0.0);
    }

    #[test]
    fn test_adaptive_sample_step() {
        assert_eq!(adaptive_sample_step(0, 0), 2);
        assert_eq!(adaptive_sample_step(1000, 1000), 2);
        assert_eq!(adaptive_sample_step(1001, 1000), 3);
        assert_eq!(adaptive_sample_step(3000, 2000), 4);
        assert_eq!(adaptive_sample_step(4000, 3000), 5);
        assert_eq!(adaptive_sample_step(6000, 4000), 6);
    }
}

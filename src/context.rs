//! Analysis context: configuration plus caches, passed explicitly.
//!
//! Replaces process-wide managers. Create one per document or session and hand it
//! to whatever needs cached histograms or decoded images.

use crate::cache::{
    estimate_bytes, CacheStats, HistogramCache, HistogramData, HistogramKind, ImageCache,
    ImageFingerprint,
};
use crate::color::Rgb;
use crate::config::Config;
use crate::contrast::contrast_status_color;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::histogram::{
    adaptive_sample_step, calculate_histogram, calculate_hue_histogram, calculate_rgb_histogram,
    HueHistogram, LuminanceHistogram, RgbHistogram,
};
use crate::image::ImageAccessor;
use crate::overlay::{DisplayRect, ZoneOverlay};
use crate::zone::Zone;

/// Configuration and caches for one analysis session.
#[derive(Debug)]
pub struct AnalysisContext {
    config: Config,
    histograms: HistogramCache,
    images: ImageCache<Framebuffer>,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AnalysisContext {
    /// Context sized from `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let histograms = HistogramCache::new(config.cache.histogram_entries);
        let images = ImageCache::with_limit_mb(config.cache.image_memory_mb);
        Self { config, histograms, images }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Sampling stride for `image`, fixed or adaptive per configuration.
    #[must_use]
    pub fn sample_step_for<I: ImageAccessor + ?Sized>(&self, image: &I) -> u32 {
        if self.config.analysis.adaptive_sampling {
            adaptive_sample_step(image.width(), image.height())
        } else {
            self.config.analysis.sample_step
        }
    }

    /// Luminance histogram, from cache when this image was seen before.
    pub fn luminance_histogram<I: ImageAccessor + ?Sized>(&mut self, image: &I) -> LuminanceHistogram {
        let fp = ImageFingerprint::of(image);
        if let Some(HistogramData::Luminance(h)) = self.histograms.get(&fp, HistogramKind::Luminance) {
            return h.clone();
        }
        let h = calculate_histogram(image, self.sample_step_for(image));
        self.histograms.insert(fp, h.clone());
        h
    }

    /// RGB histogram, from cache when this image was seen before.
    pub fn rgb_histogram<I: ImageAccessor + ?Sized>(&mut self, image: &I) -> RgbHistogram {
        let fp = ImageFingerprint::of(image);
        if let Some(HistogramData::Rgb(h)) = self.histograms.get(&fp, HistogramKind::Rgb) {
            return h.clone();
        }
        let h = calculate_rgb_histogram(image, self.sample_step_for(image));
        self.histograms.insert(fp, h.clone());
        h
    }

    /// Hue histogram, from cache when this image was seen before.
    pub fn hue_histogram<I: ImageAccessor + ?Sized>(&mut self, image: &I) -> HueHistogram {
        let fp = ImageFingerprint::of(image);
        if let Some(HistogramData::Hue(h)) = self.histograms.get(&fp, HistogramKind::Hue) {
            return h.clone();
        }
        let h = calculate_hue_histogram(image, self.sample_step_for(image));
        self.histograms.insert(fp, h.clone());
        h
    }

    /// Drop cached histograms of `image`, e.g. after it was edited.
    pub fn invalidate<I: ImageAccessor + ?Sized>(&mut self, image: &I) -> usize {
        self.histograms.clear_by_image(&ImageFingerprint::of(image))
    }

    /// Zone highlight mask using the configured overlay step.
    ///
    /// # Errors
    ///
    /// See [`ZoneOverlay::render`].
    pub fn zone_overlay<I: ImageAccessor + ?Sized>(
        &self,
        image: &I,
        zone: Zone,
        canvas: (u32, u32),
        display: DisplayRect,
    ) -> Result<Framebuffer> {
        ZoneOverlay::new(zone)
            .canvas(canvas.0, canvas.1)
            .display(display)
            .step(self.config.analysis.overlay_step)
            .render(image)
    }

    /// Contrast indicator color under the configured theme.
    #[must_use]
    pub fn status_color(&self, ratio: f64, system_dark: bool) -> Rgb {
        contrast_status_color(ratio, self.config.display.theme.is_dark(system_dark))
    }

    /// Cache a decoded image under `source_id`.
    pub fn store_image(&mut self, source_id: impl Into<String>, image: Framebuffer) {
        let size = estimate_bytes(&image);
        self.images.put(source_id, image, size);
    }

    /// Previously stored image.
    pub fn image(&mut self, source_id: &str) -> Option<&Framebuffer> {
        self.images.get(source_id)
    }

    /// Forget one stored image.
    pub fn remove_image(&mut self, source_id: &str) -> bool {
        self.images.remove(source_id)
    }

    /// Change the image budget.
    pub fn set_image_memory_mb(&mut self, mb: usize) {
        self.config.cache.image_memory_mb = mb;
        self.images.set_limit_mb(mb);
    }

    /// Histogram cache counters.
    #[must_use]
    pub fn histogram_stats(&self) -> CacheStats {
        self.histograms.stats()
    }

    /// Image cache counters.
    #[must_use]
    pub fn image_stats(&self) -> CacheStats {
        self.images.stats()
    }

    /// Empty both caches.
    pub fn clear_caches(&mut self) {
        self.histograms.clear();
        self.images.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::config::ThemePreference;

    fn gradient(width: u32, height: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 255 / (width + height - 2).max(1)) as u8;
                fb.set_pixel(x, y, Rgba::rgb(v, v / 2, 255 - v));
            }
        }
        fb
    }

    #[test]
    fn test_histograms_are_cached() {
        let mut ctx = AnalysisContext::default();
        let image = gradient(16, 16);

        let first = ctx.luminance_histogram(&image);
        let second = ctx.luminance_histogram(&image);
        assert_eq!(first, second);
        assert_eq!(first, calculate_histogram(&image, 4));

        let stats = ctx.histogram_stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn test_kinds_cached_separately() {
        let mut ctx = AnalysisContext::default();
        let image = gradient(8, 8);
        ctx.luminance_histogram(&image);
        let rgb = ctx.rgb_histogram(&image);
        let hue = ctx.hue_histogram(&image);
        assert_eq!(rgb.total(), calculate_rgb_histogram(&image, 4).total());
        assert_eq!(hue, calculate_hue_histogram(&image, 4));
        assert_eq!(ctx.histogram_stats().entries, 3);

        assert_eq!(ctx.invalidate(&image), 3);
        assert_eq!(ctx.histogram_stats().entries, 0);
    }

    #[test]
    fn test_configured_step_is_used() {
        let mut config = Config::default();
        config.analysis.sample_step = 1;
        let mut ctx = AnalysisContext::new(config);
        let image = gradient(5, 5);
        assert_eq!(ctx.luminance_histogram(&image).total(), 25 + 5 + 5 + 1);
    }

    #[test]
    fn test_adaptive_step() {
        let mut config = Config::default();
        config.analysis.adaptive_sampling = true;
        let ctx = AnalysisContext::new(config);
        assert_eq!(ctx.sample_step_for(&gradient(10, 10)), 2);
    }

    #[test]
    fn test_status_color_follows_theme() {
        let mut config = Config::default();
        config.display.theme = ThemePreference::Dark;
        let ctx = AnalysisContext::new(config);
        assert_eq!(ctx.status_color(21.0, false), Rgb::new(129, 199, 132));
        assert_eq!(AnalysisContext::default().status_color(21.0, false), Rgb::new(76, 175, 80));
    }

    #[test]
    fn test_image_store() {
        let mut ctx = AnalysisContext::default();
        ctx.store_image("a.png", gradient(4, 4));
        assert_eq!(ctx.image("a.png").map(Framebuffer::width), Some(4));
        assert!(ctx.image("b.png").is_none());
        assert_eq!(ctx.image_stats().used, 4 * 4 * 4 * 11 / 10);

        ctx.set_image_memory_mb(0);
        assert_eq!(ctx.image_stats().entries, 0);
        assert!(!ctx.remove_image("a.png"));

        ctx.clear_caches();
        assert_eq!(ctx.histogram_stats().hits, 0);
    }

    #[test]
    fn test_zone_overlay_uses_config_step() {
        let mut config = Config::default();
        config.analysis.overlay_step = 1;
        let ctx = AnalysisContext::new(config);
        let mut image = Framebuffer::new(4, 4).unwrap();
        image.clear(Rgba::BLACK);
        image.set_pixel(1, 1, Rgba::WHITE);

        let mask = ctx
            .zone_overlay(&image, Zone::BRIGHTEST, (4, 4), DisplayRect::new(0, 0, 4, 4))
            .unwrap();
        assert_eq!(mask.get_pixel(1, 1), Some(Zone::BRIGHTEST.highlight_color()));
        assert_eq!(mask.get_pixel(2, 1), Some(Rgba::TRANSPARENT));
    }
}

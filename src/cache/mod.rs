//! LRU caches for decoded images and computed histograms.
//!
//! Both caches sit on [`LruList`]. The image cache is bounded by an estimated byte
//! budget, the histogram cache by entry count. Neither is global: they are owned by
//! an [`AnalysisContext`](crate::context::AnalysisContext) or by the caller.

mod lru;

pub use lru::LruList;

use crate::color::Rgb;
use crate::framebuffer::Framebuffer;
use crate::histogram::{HueHistogram, LuminanceHistogram, RgbHistogram};
use crate::image::ImageAccessor;

/// Default histogram cache size in entries.
pub const DEFAULT_HISTOGRAM_ENTRIES: usize = 50;

/// Default image cache budget in megabytes.
pub const DEFAULT_IMAGE_MEMORY_MB: usize = 500;

const MB: usize = 1024 * 1024;

/// Hit, miss and eviction counters plus occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Successful lookups.
    pub hits: u64,
    /// Failed lookups.
    pub misses: u64,
    /// Entries dropped to make room.
    pub evictions: u64,
    /// Entries currently stored.
    pub entries: usize,
    /// Current occupancy in the cache's unit (bytes or entries).
    pub used: usize,
    /// Occupancy limit in the same unit.
    pub limit: usize,
}

impl CacheStats {
    /// `hits / (hits + misses)`, 0 before any lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

/// Cheap identity for an image: dimensions plus nine sampled pixels.
///
/// Samples the corners, edge midpoints and centre. Two different images with equal
/// size and equal samples collide; that is accepted for cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageFingerprint {
    width: u32,
    height: u32,
    samples: [Rgb; 9],
}

impl ImageFingerprint {
    /// Fingerprint `image`. An empty image gets black samples.
    #[must_use]
    pub fn of<I: ImageAccessor + ?Sized>(image: &I) -> Self {
        let (width, height) = (image.width(), image.height());
        let mut samples = [Rgb::BLACK; 9];
        if !image.is_empty() {
            let xs = [0, width / 2, width - 1];
            let ys = [0, height / 2, height - 1];
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample = image.pixel(xs[i % 3], ys[i / 3]);
            }
        }
        Self { width, height, samples }
    }

    /// Image dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Which histogram an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistogramKind {
    /// 256-bin display luminance.
    Luminance,
    /// Per-channel RGB.
    Rgb,
    /// 360-bin hue.
    Hue,
}

/// A cached histogram of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistogramData {
    /// Display luminance.
    Luminance(LuminanceHistogram),
    /// RGB channels.
    Rgb(RgbHistogram),
    /// Hue.
    Hue(HueHistogram),
}

impl HistogramData {
    /// Kind tag.
    #[must_use]
    pub const fn kind(&self) -> HistogramKind {
        match self {
            Self::Luminance(_) => HistogramKind::Luminance,
            Self::Rgb(_) => HistogramKind::Rgb,
            Self::Hue(_) => HistogramKind::Hue,
        }
    }
}

impl From<LuminanceHistogram> for HistogramData {
    fn from(h: LuminanceHistogram) -> Self {
        Self::Luminance(h)
    }
}

impl From<RgbHistogram> for HistogramData {
    fn from(h: RgbHistogram) -> Self {
        Self::Rgb(h)
    }
}

impl From<HueHistogram> for HistogramData {
    fn from(h: HueHistogram) -> Self {
        Self::Hue(h)
    }
}

/// Count-bounded LRU of histograms keyed by image and kind.
#[derive(Debug, Clone)]
pub struct HistogramCache {
    entries: LruList<(ImageFingerprint, HistogramKind), HistogramData>,
    max_entries: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Default for HistogramCache {
    fn default() -> Self {
        Self::new(DEFAULT_HISTOGRAM_ENTRIES)
    }
}

impl HistogramCache {
    /// Cache holding at most `max_entries` histograms (at least one).
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: LruList::new(),
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Cached histogram, marking it recently used.
    pub fn get(&mut self, image: &ImageFingerprint, kind: HistogramKind) -> Option<&HistogramData> {
        let key = (*image, kind);
        if self.entries.contains(&key) {
            self.hits += 1;
            self.entries.get(&key)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Store `data`, replacing any entry of the same kind for `image`.
    ///
    /// Evicts least recently used entries until there is room.
    pub fn insert(&mut self, image: ImageFingerprint, data: impl Into<HistogramData>) {
        let data = data.into();
        let key = (image, data.kind());
        self.entries.remove(&key);

        while self.entries.len() >= self.max_entries {
            if self.entries.pop_lru().is_none() {
                break;
            }
            self.evictions += 1;
            crate::trace!("cache", "histogram evicted ({} entries)", self.entries.len());
        }
        self.entries.insert(key, data, 1);
    }

    /// Drop every histogram cached for `image`. Returns how many were dropped.
    pub fn clear_by_image(&mut self, image: &ImageFingerprint) -> usize {
        self.entries.retain(|(fp, _)| fp != image)
    }

    /// Drop everything and reset hit/miss counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of cached histograms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters and occupancy in entries.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries: self.entries.len(),
            used: self.entries.len(),
            limit: self.max_entries,
        }
    }
}

/// Byte-budgeted LRU of decoded images keyed by source id (usually a path).
#[derive(Debug, Clone)]
pub struct ImageCache<V> {
    entries: LruList<String, V>,
    max_bytes: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<V> Default for ImageCache<V> {
    fn default() -> Self {
        Self::with_limit_mb(DEFAULT_IMAGE_MEMORY_MB)
    }
}

impl<V> ImageCache<V> {
    /// Cache with a budget of `mb` megabytes.
    #[must_use]
    pub fn with_limit_mb(mb: usize) -> Self {
        Self {
            entries: LruList::new(),
            max_bytes: mb.saturating_mul(MB),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Store `image` under `key` with an estimated footprint of `size_bytes`.
    ///
    /// Least recently used images are evicted until the new one fits. An image larger
    /// than the whole budget is still stored once everything else is gone.
    pub fn put(&mut self, key: impl Into<String>, image: V, size_bytes: usize) {
        let key = key.into();
        self.entries.remove(&key);
        self.evict_until(self.max_bytes.saturating_sub(size_bytes));
        crate::trace!("cache", "image {key} stored ({size_bytes} bytes)");
        self.entries.insert(key, image, size_bytes);
    }

    /// Cached image, marking it recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let key = key.to_string();
        if self.entries.contains(&key) {
            self.hits += 1;
            self.entries.get(&key)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Remove one image. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(&key.to_string()).is_some()
    }

    /// Drop every image. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Change the budget, evicting immediately if the cache is now over it.
    pub fn set_limit_mb(&mut self, mb: usize) {
        self.max_bytes = mb.saturating_mul(MB);
        self.evict_until(self.max_bytes);
    }

    /// Estimated bytes in use.
    #[must_use]
    pub const fn used_bytes(&self) -> usize {
        self.entries.total_weight()
    }

    /// Number of cached images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters and occupancy in bytes.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries: self.entries.len(),
            used: self.entries.total_weight(),
            limit: self.max_bytes,
        }
    }

    fn evict_until(&mut self, target: usize) {
        while self.entries.total_weight() > target {
            let Some((key, _)) = self.entries.pop_lru() else {
                break;
            };
            self.evictions += 1;
            crate::debug!("cache", "evicted image {key}, {} bytes in use", self.used_bytes());
        }
    }
}

/// Estimated memory for caching `fb`: packed RGBA bytes plus 10% overhead.
#[must_use]
pub fn estimate_bytes(fb: &Framebuffer) -> usize {
    (fb.pixel_count() * 4) * 11 / 10
}

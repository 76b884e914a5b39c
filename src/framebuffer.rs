//! RGBA pixel buffer.
//!
//! Holds decoded images for analysis and serves as the canvas for zone overlays.
//! Rows are padded to a 64-byte stride so whole-row passes stay SIMD friendly.
//! Uses trueno for vectorized reductions where applicable.

use crate::color::{display_luminance, Rgb, Rgba};
use crate::error::{Error, Result};
use crate::image::ImageAccessor;
use trueno::Vector;

/// Alignment for SIMD operations (64 bytes for AVX-512).
const SIMD_ALIGNMENT: usize = 64;

/// Row-padded RGBA framebuffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order, 4 bytes per pixel.
    pixels: Vec<u8>,
    /// Stride in bytes (may include padding for alignment).
    stride: usize,
}

impl Framebuffer {
    /// Create a transparent framebuffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use colorcard::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);
        let pixels = vec![0; stride * (height as usize)];

        Ok(Self { width, height, pixels, stride })
    }

    /// Build an opaque framebuffer from tightly packed RGB bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or `data` is not
    /// exactly `width * height * 3` bytes long.
    pub fn from_rgb_bytes(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        Self::from_packed(width, height, data, 3)
    }

    /// Build a framebuffer from tightly packed RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or `data` is not
    /// exactly `width * height * 4` bytes long.
    pub fn from_rgba_bytes(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        Self::from_packed(width, height, data, 4)
    }

    fn from_packed(width: u32, height: u32, data: &[u8], channels: usize) -> Result<Self> {
        let mut fb = Self::new(width, height)?;
        let row_len = (width as usize) * channels;
        if data.len() != row_len * (height as usize) {
            return Err(Error::InvalidDimensions { width, height });
        }

        for (y, src) in data.chunks_exact(row_len).enumerate() {
            let start = y * fb.stride;
            let dst = &mut fb.pixels[start..start + (width as usize) * 4];
            for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(channels)) {
                out[..3].copy_from_slice(&px[..3]);
                out[3] = if channels == 4 { px[3] } else { 255 };
            }
        }
        Ok(fb)
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the stride (row width in bytes, including any padding).
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Raw pixel data including row padding.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get a row of pixels as a slice.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * self.stride;
        let end = start + (self.width as usize) * 4;
        Some(&self.pixels[start..end])
    }

    /// Clear the framebuffer to a solid color.
    ///
    /// Copies a 64-byte (16 pixel) pattern per chunk so the compiler can vectorize.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        let mut pattern = [0u8; 64];
        for chunk in pattern.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }

        let row_bytes = (self.width as usize) * 4;
        for y in 0..self.height as usize {
            let row_start = y * self.stride;
            let row = &mut self.pixels[row_start..row_start + row_bytes];

            let mut chunks = row.chunks_exact_mut(64);
            for chunk in &mut chunks {
                chunk.copy_from_slice(&pattern);
            }
            for px in chunks.into_remainder().chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Fill a rectangular region with a solid color.
    ///
    /// The region is clipped to the framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let rgba = color.to_array();
        let rect_bytes = ((x2 - x1) as usize) * 4;

        for row_y in y1..y2 {
            let start = self.pixel_index(x1, row_y);
            for px in self.pixels[start..start + rect_bytes].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(Rgba::from_array(rgba))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Display luminance statistics over every pixel, via trueno reductions.
    ///
    /// Returns `(min, max, mean)` on the `0..=255` scale.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let mut luminances = Vec::with_capacity(self.pixel_count());
        for y in 0..self.height {
            if let Some(row) = self.row(y) {
                luminances.extend(
                    row.chunks_exact(4)
                        .map(|px| f32::from(display_luminance(Rgb::new(px[0], px[1], px[2])))),
                );
            }
        }

        let vec = Vector::from_vec(luminances);
        let min = vec.min().unwrap_or(0.0);
        let max = vec.max().unwrap_or(0.0);
        let mean = vec.mean().unwrap_or(0.0);

        (min, max, mean)
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }

    /// Pixel data without stride padding, as PNG encoders expect.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;

        if self.stride == row_bytes {
            return self.pixels[..row_bytes * (self.height as usize)].to_vec();
        }

        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for y in 0..self.height as usize {
            let start = y * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }

    /// Approximate heap footprint in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}

impl ImageAccessor for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    /// Alpha is ignored. Out-of-range coordinates read as black.
    fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.get_pixel(x, y).map(Rgba::to_rgb).unwrap_or_default()
    }
}

//! Zone highlight overlays.
//!
//! Marks every part of a displayed image whose display luminance falls in one zone.
//! The mask is rendered on a transparent canvas the size of the viewing surface,
//! sampled on a coarse display-space grid and drawn as filled blocks.

use crate::color::{display_luminance, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::image::ImageAccessor;
use crate::zone::Zone;

/// Default display-space stride and block size.
pub const DEFAULT_OVERLAY_STEP: u32 = 4;

/// Where the image is drawn on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayRect {
    /// Left edge on the canvas.
    pub x: u32,
    /// Top edge on the canvas.
    pub y: u32,
    /// Displayed width.
    pub width: u32,
    /// Displayed height.
    pub height: u32,
}

impl DisplayRect {
    /// Create a display rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Builder for a zone highlight mask.
#[derive(Debug, Clone)]
pub struct ZoneOverlay {
    zone: Zone,
    canvas: (u32, u32),
    display: DisplayRect,
    color: Rgba,
    step: u32,
}

impl ZoneOverlay {
    /// Overlay for `zone` using its highlight color and the default step.
    #[must_use]
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            canvas: (0, 0),
            display: DisplayRect::default(),
            color: zone.highlight_color(),
            step: DEFAULT_OVERLAY_STEP,
        }
    }

    /// Set the canvas size.
    #[must_use]
    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = (width, height);
        self
    }

    /// Set the displayed image rectangle.
    #[must_use]
    pub fn display(mut self, rect: DisplayRect) -> Self {
        self.display = rect;
        self
    }

    /// Override the highlight color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the sampling stride. A step of 0 is treated as 1.
    #[must_use]
    pub fn step(mut self, step: u32) -> Self {
        self.step = step.max(1);
        self
    }

    /// Render the mask for `image`.
    ///
    /// Display position `(dx, dy)` samples image pixel
    /// `(floor(dx * W / display_w), floor(dy * H / display_h))`, clamped to the last
    /// pixel. Matching samples fill a `step x step` block at the display position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the image, the display rectangle or the
    /// canvas has zero width or height.
    pub fn render<I: ImageAccessor + ?Sized>(&self, image: &I) -> Result<Framebuffer> {
        crate::time_scope!("overlay", "zone");
        let (img_w, img_h) = (image.width(), image.height());
        if img_w == 0 || img_h == 0 {
            return Err(Error::InvalidDimensions { width: img_w, height: img_h });
        }
        let DisplayRect { x: disp_x, y: disp_y, width: disp_w, height: disp_h } = self.display;
        if disp_w == 0 || disp_h == 0 {
            return Err(Error::InvalidDimensions { width: disp_w, height: disp_h });
        }

        let mut canvas = Framebuffer::new(self.canvas.0, self.canvas.1)?;
        canvas.clear(Rgba::TRANSPARENT);

        let scale_x = f64::from(img_w) / f64::from(disp_w);
        let scale_y = f64::from(img_h) / f64::from(disp_h);
        let step = self.step as usize;
        let mut blocks = 0usize;

        for dy in (0..disp_h).step_by(step) {
            let img_y = ((f64::from(dy) * scale_y) as u32).min(img_h - 1);
            for dx in (0..disp_w).step_by(step) {
                let img_x = ((f64::from(dx) * scale_x) as u32).min(img_w - 1);
                if self.zone.contains(display_luminance(image.pixel(img_x, img_y))) {
                    canvas.fill_rect(
                        disp_x.saturating_add(dx),
                        disp_y.saturating_add(dy),
                        self.step,
                        self.step,
                        self.color,
                    );
                    blocks += 1;
                }
            }
        }

        crate::trace!("overlay", "zone {} marked {} blocks", self.zone, blocks);
        Ok(canvas)
    }
}

/// Render a zone highlight mask in one call.
///
/// # Errors
///
/// See [`ZoneOverlay::render`].
pub fn render_zone_overlay<I: ImageAccessor + ?Sized>(
    image: &I,
    zone: Zone,
    canvas: (u32, u32),
    display: DisplayRect,
    color: Rgba,
    step: u32,
) -> Result<Framebuffer> {
    ZoneOverlay::new(zone)
        .canvas(canvas.0, canvas.1)
        .display(display)
        .color(color)
        .step(step)
        .render(image)
}

//! Image access and sampling grids.
//!
//! Decoding is done elsewhere; the engine only needs dimensions and per-pixel RGB.
//! Large images are sampled on a stride grid instead of visiting every pixel.

use crate::color::Rgb;

/// Read-only access to a decoded image.
pub trait ImageAccessor {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Color at `(x, y)`. Callers guarantee `x < width()` and `y < height()`.
    fn pixel(&self, x: u32, y: u32) -> Rgb;

    /// True when the image has no pixels.
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl<T: ImageAccessor + ?Sized> ImageAccessor for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb {
        (**self).pixel(x, y)
    }
}

/// A missing image behaves as a 0x0 image.
impl<T: ImageAccessor> ImageAccessor for Option<T> {
    fn width(&self) -> u32 {
        self.as_ref().map_or(0, ImageAccessor::width)
    }

    fn height(&self) -> u32 {
        self.as_ref().map_or(0, ImageAccessor::height)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.as_ref().map_or(Rgb::BLACK, |image| image.pixel(x, y))
    }
}

/// Default sampling stride: one pixel in 16.
pub const DEFAULT_SAMPLE_STEP: u32 = 4;

/// Coordinates visited when sampling an image at a stride.
///
/// The plain grid visits `(x, y)` for `y in (0..height).step_by(step)` and
/// `x in (0..width).step_by(step)`, row by row. With edges enabled it then visits
/// the rightmost column at the row stride, the bottom row at the column stride, and
/// the bottom-right corner, so clipped highlights on the last row or column are
/// never skipped. Edge pixels that are also on the grid are visited twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    step: u32,
    edges: bool,
}

impl SampleGrid {
    /// Plain strided grid. A step of 0 is treated as 1.
    #[must_use]
    pub fn strided(width: u32, height: u32, step: u32) -> Self {
        Self { width, height, step: step.max(1), edges: false }
    }

    /// Strided grid plus right column, bottom row and corner.
    #[must_use]
    pub fn with_edges(width: u32, height: u32, step: u32) -> Self {
        Self { edges: true, ..Self::strided(width, height, step) }
    }

    /// Edge-supplemented grid covering `image`.
    #[must_use]
    pub fn for_image<I: ImageAccessor + ?Sized>(image: &I, step: u32) -> Self {
        Self::with_edges(image.width(), image.height(), step)
    }

    /// Effective stride.
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Coordinates in visiting order.
    pub fn points(&self) -> impl Iterator<Item = (u32, u32)> {
        let Self { width, height, step, edges } = *self;
        let s = step as usize;

        let grid = (0..height)
            .step_by(s)
            .flat_map(move |y| (0..width).step_by(s).map(move |x| (x, y)));

        let right_rows = if edges && width > 0 { height } else { 0 };
        let bottom_cols = if edges && height > 0 { width } else { 0 };
        let corner = edges && width > 0 && height > 0;

        let right = (0..right_rows).step_by(s).map(move |y| (width - 1, y));
        let bottom = (0..bottom_cols).step_by(s).map(move |x| (x, height - 1));
        let corner = corner.then(|| (width - 1, height - 1));

        grid.chain(right).chain(bottom).chain(corner)
    }

    /// Number of coordinates [`points`](Self::points) yields.
    #[must_use]
    pub fn len(&self) -> usize {
        let strided = |n: u32| (n as usize).div_ceil(self.step as usize);
        let grid = strided(self.width) * strided(self.height);
        if !self.edges || self.width == 0 || self.height == 0 {
            return grid;
        }
        grid + strided(self.height) + strided(self.width) + 1
    }

    /// True when no coordinate is visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

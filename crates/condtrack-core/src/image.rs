//! In-memory frame types consumed by the tracker.
//!
//! [`Image`] holds the raw 8-bit frame as delivered by a capture source,
//! [`GrayImage`] is its normalised luminance and [`IntegralImage`] a
//! summed-area table over that luminance for constant-time box sums.

use crate::error::{Result, TrackerError};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Pixel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit grayscale
    Gray8,
    /// 8-bit RGB (24 bits per pixel)
    Rgb8,
    /// 8-bit RGBA (32 bits per pixel)
    #[default]
    Rgba8,
}

impl PixelFormat {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Calculate total bytes needed for a frame of this format.
    #[inline]
    pub fn frame_size(self, width: u32, height: u32) -> usize {
        width as usize * height as usize * self.channels()
    }
}

/// A video frame in CPU memory, tightly packed, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Create a black image with the given dimensions and format.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            format,
            width,
            height,
            data: vec![0; format.frame_size(width, height)],
        }
    }

    /// Wrap an existing pixel buffer, checking its length against the format.
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = format.frame_size(width, height);
        if data.len() != expected {
            return Err(TrackerError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    /// True when the image has no pixels in at least one dimension.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fail with [`TrackerError::EmptyImage`] for zero-sized frames.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(TrackerError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Bounds of the whole image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Set every channel of the pixels inside `rect` (clipped) to `value`,
    /// leaving alpha opaque.
    pub fn fill_rect(&mut self, rect: Rect, value: u8) {
        let Some(clipped) = rect.intersection(self.bounds()) else {
            return;
        };
        let c = self.format.channels();
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                let start = (y as usize * self.width as usize + x as usize) * c;
                let px = &mut self.data[start..start + c];
                match self.format {
                    PixelFormat::Rgba8 => {
                        px[..3].fill(value);
                        px[3] = 255;
                    }
                    _ => px.fill(value),
                }
            }
        }
    }

    /// Synthetic test frame: a uniform square of `foreground` on `background`.
    pub fn with_square(width: u32, height: u32, square: Rect, foreground: u8, background: u8) -> Self {
        let mut image = Self::new(width, height, PixelFormat::Gray8);
        image.data.fill(background);
        image.fill_rect(square, foreground);
        image
    }

    /// Convert to normalised luminance (BT.601 weights).
    pub fn to_gray(&self) -> GrayImage {
        let mut gray = GrayImage::new(self.width, self.height);
        match self.format {
            PixelFormat::Gray8 => {
                for (dst, &src) in gray.data.iter_mut().zip(&self.data) {
                    *dst = src as f32 / 255.0;
                }
            }
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => {
                let c = self.format.channels();
                for (dst, px) in gray.data.iter_mut().zip(self.data.chunks_exact(c)) {
                    *dst = (0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32)
                        / 255.0;
                }
            }
        }
        gray
    }
}

/// A grayscale image stored as f32 values [0, 1].
#[derive(Debug, Clone)]
pub struct GrayImage {
    pub data: Vec<f32>,
    pub width: u32,
    pub height: u32,
}

impl GrayImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0.0; width as usize * height as usize],
            width,
            height,
        }
    }
}

/// Summed-area table over a [`GrayImage`].
#[derive(Debug, Clone)]
pub struct IntegralImage {
    width: u32,
    height: u32,
    /// `(width + 1) * (height + 1)` prefix sums, first row and column zero.
    sums: Vec<f64>,
}

impl IntegralImage {
    pub fn new(gray: &GrayImage) -> Self {
        let w = gray.width as usize;
        let h = gray.height as usize;
        let stride = w + 1;
        let mut sums = vec![0.0f64; stride * (h + 1)];
        for y in 0..h {
            let mut row_sum = 0.0f64;
            for x in 0..w {
                row_sum += gray.data[y * w + x] as f64;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_sum;
            }
        }
        Self {
            width: gray.width,
            height: gray.height,
            sums,
        }
    }

    #[inline]
    fn at(&self, x: i32, y: i32) -> f64 {
        self.sums[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// Sum of the pixels inside `rect` clipped to the image, together with
    /// the clipped area.
    pub fn sum_and_area(&self, rect: Rect) -> (f64, i64) {
        match rect.intersection(Rect::from_size(self.width, self.height)) {
            Some(r) => {
                let sum = self.at(r.right(), r.bottom()) - self.at(r.x, r.bottom())
                    - self.at(r.right(), r.y)
                    + self.at(r.x, r.y);
                (sum, r.area())
            }
            None => (0.0, 0),
        }
    }

    /// Mean intensity inside `rect`, `None` when it misses the image.
    pub fn mean(&self, rect: Rect) -> Option<f64> {
        let (sum, area) = self.sum_and_area(rect);
        (area > 0).then(|| sum / area as f64)
    }
}

//! Parameter types for image operations.
//!
//! These types describe *what* to encode, not *how*. They are the interface
//! between the compression engine (which decides which qualities to try) and
//! the [`backend`](super::backend) (which does the pixel work). Keeping them
//! separate lets tests drive the engine with a mock backend.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG quality factor (0–100). Clamped on construction.
//! - [`SourceImage`] — Decoded RGB8 raster handed to the encoder.

use image::{DynamicImage, RgbImage};

/// Quality factor for lossy JPEG encoding (0-100).
///
/// 0 is the smallest/worst output, 100 the largest/best. The `image` codec
/// treats 0 the same as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: Quality = Quality(0);
    pub const MAX: Quality = Quality(100);

    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(50)
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded, uncompressed RGB8 raster.
///
/// The engine only ever borrows it; the caller owns it for the whole call.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    raster: RgbImage,
}

impl SourceImage {
    /// Build from raw interleaved RGB bytes.
    ///
    /// Returns `None` if `pixels.len() != width * height * 3`.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        // `from_raw` accepts oversized buffers; the encoder does not.
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(3)?;
        if pixels.len() != expected {
            return None;
        }
        RgbImage::from_raw(width, height, pixels).map(|raster| Self { raster })
    }

    /// Flatten any decoded image to RGB8. Alpha is dropped.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        Self {
            raster: img.into_rgb8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn is_empty(&self) -> bool {
        self.raster.width() == 0 || self.raster.height() == 0
    }

    pub fn pixels(&self) -> &[u8] {
        self.raster.as_raw()
    }
}

impl From<RgbImage> for SourceImage {
    fn from(raster: RgbImage) -> Self {
        Self { raster }
    }
}

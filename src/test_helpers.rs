//! Shared test utilities for the squeeze test suite.
//!
//! Fixture rasters are generated in memory so tests never depend on image
//! files checked into the repo:
//!
//! - [`solid_image`] — one flat color, compresses to almost nothing
//! - [`gradient_image`] — smooth ramps, typical of skies and walls
//! - [`noise_image`] — high-entropy pixels where quality clearly drives size

use crate::imaging::SourceImage;
use image::{ImageEncoder, RgbImage};
use std::path::Path;

pub fn solid_image(width: u32, height: u32, color: [u8; 3]) -> SourceImage {
    RgbImage::from_pixel(width, height, image::Rgb(color)).into()
}

pub fn gradient_image(width: u32, height: u32) -> SourceImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
    .into()
}

/// Deterministic pseudo-random pixels (integer hash, no RNG crate).
pub fn noise_image(width: u32, height: u32) -> SourceImage {
    RgbImage::from_fn(width, height, |x, y| {
        let mut h = x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263);
        h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
        h ^= h >> 16;
        image::Rgb([h as u8, (h >> 8) as u8, (h >> 16) as u8])
    })
    .into()
}

/// Write a small valid JPEG with the gradient pattern.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient_image(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.pixels(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

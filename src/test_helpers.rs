//! Shared test utilities: synthetic images written to temp directories.

use image::{Rgb, RgbImage};
use std::path::Path;

/// An RGB image whose pixels encode their own coordinates, so crops and
/// resizes can be checked pixel-for-pixel.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Write a gradient image with the given dimensions, encoded by extension.
pub fn create_test_image(path: &Path, width: u32, height: u32) {
    gradient_image(width, height).save(path).unwrap();
}

//! In-memory image operations: warp, tiling, and factor resize.
//!
//! All functions take an already-decoded [`RgbImage`] and return new images.
//! Nothing here touches the filesystem; the [`process`](crate::process)
//! driver pairs these with an [`ImageBackend`](super::ImageBackend) for I/O.
//!
//! ## Warp
//!
//! A warp is two projective passes, each resampled with bilinear
//! interpolation onto a canvas the size of the input:
//!
//! 1. rotation about the image centre by `angle_degrees` (counter-clockwise);
//! 2. a perspective transform mapping the four image corners to the corners
//!    shifted by `corner_offsets`.
//!
//! Pixels whose pre-image falls outside the source are black. Running the
//! passes separately means content rotated out of frame stays lost even if
//! the perspective step would pull that region back into view.

use super::backend::BackendError;
use super::calculations::{perspective_control_points, scaled_dimensions, tile_rects};
use super::params::WarpParams;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp};
use rand::Rng;

const BORDER: Rgb<u8> = Rgb([0, 0, 0]);

/// Rotate about the image centre, keeping the canvas size.
///
/// Positive angles turn the content counter-clockwise as displayed.
pub fn rotate_about_center(image: &RgbImage, angle_degrees: f32) -> RgbImage {
    let (cx, cy) = (image.width() as f32 / 2.0, image.height() as f32 / 2.0);
    // imageproc rotates clockwise in image coordinates (y down)
    let projection = Projection::translate(cx, cy)
        * Projection::rotate(-angle_degrees.to_radians())
        * Projection::translate(-cx, -cy);
    warp(image, &projection, Interpolation::Bilinear, BORDER)
}

/// Apply the four-corner perspective shift described by `corner_offsets`.
pub fn apply_perspective(
    image: &RgbImage,
    corner_offsets: &[(f32, f32); 4],
) -> Result<RgbImage, BackendError> {
    let (src, dst) = perspective_control_points(image.width(), image.height(), corner_offsets);
    let projection =
        Projection::from_control_points(src, dst).ok_or(BackendError::DegenerateTransform)?;
    Ok(warp(image, &projection, Interpolation::Bilinear, BORDER))
}

/// Apply a sampled warp: rotation first, then perspective.
pub fn apply_warp(image: &RgbImage, params: &WarpParams) -> Result<RgbImage, BackendError> {
    let rotated = rotate_about_center(image, params.angle_degrees);
    apply_perspective(&rotated, &params.corner_offsets)
}

/// Sample a warp from `rng` and apply it.
///
/// Returns the warped image together with the parameters that produced it,
/// so callers can record them.
pub fn warp_image<R: Rng + ?Sized>(
    image: &RgbImage,
    angle_range: f32,
    rng: &mut R,
) -> Result<(RgbImage, WarpParams), BackendError> {
    let params = WarpParams::sample(angle_range, rng);
    let warped = apply_warp(image, &params)?;
    Ok((warped, params))
}

/// Cut the image into `tile_size` squares, row-major from the top-left.
///
/// Edge tiles are truncated, not padded.
pub fn split_into_tiles(image: &RgbImage, tile_size: u32) -> Vec<RgbImage> {
    tile_rects(image.width(), image.height(), tile_size)
        .into_iter()
        .map(|r| imageops::crop_imm(image, r.x, r.y, r.width, r.height).to_image())
        .collect()
}

/// Downscale by an integer factor with bilinear filtering.
///
/// Returns `None` when either floor-divided edge would be zero.
pub fn resize_by_factor(image: &RgbImage, factor: u32) -> Option<RgbImage> {
    let (width, height) = scaled_dimensions(image.dimensions(), factor);
    if width == 0 || height == 0 {
        return None;
    }
    Some(imageops::resize(image, width, height, FilterType::Triangle))
}

//! Pure calculation functions for image geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::TileRect;

/// Dimensions after dividing both edges by `factor`, rounding down.
///
/// # Examples
/// ```
/// # use warptile::imaging::scaled_dimensions;
/// assert_eq!(scaled_dimensions((1001, 750), 2), (500, 375));
/// assert_eq!(scaled_dimensions((100, 100), 3), (33, 33));
/// ```
pub fn scaled_dimensions(original: (u32, u32), factor: u32) -> (u32, u32) {
    let (w, h) = original;
    (w / factor, h / factor)
}

/// Number of tiles `tile_rects` produces: `ceil(w / tile) * ceil(h / tile)`.
pub fn tile_count(width: u32, height: u32, tile_size: u32) -> usize {
    (width.div_ceil(tile_size) as usize) * (height.div_ceil(tile_size) as usize)
}

/// Lay a `tile_size` grid over the image, row-major from the top-left.
///
/// Tiles on the right and bottom edges are truncated to the image bounds
/// rather than padded, so the rectangles partition the image exactly.
pub fn tile_rects(width: u32, height: u32, tile_size: u32) -> Vec<TileRect> {
    let mut rects = Vec::with_capacity(tile_count(width, height, tile_size));
    for y in (0..height).step_by(tile_size as usize) {
        for x in (0..width).step_by(tile_size as usize) {
            rects.push(TileRect {
                x,
                y,
                width: tile_size.min(width - x),
                height: tile_size.min(height - y),
            });
        }
    }
    rects
}

/// Source and destination control points for the perspective step.
///
/// Source points are the image corners (top-left, top-right, bottom-left,
/// bottom-right). Each destination point is its corner shifted by the offset
/// scaled to the image size.
pub fn perspective_control_points(
    width: u32,
    height: u32,
    corner_offsets: &[(f32, f32); 4],
) -> ([(f32, f32); 4], [(f32, f32); 4]) {
    let (w, h) = (width as f32, height as f32);
    let src = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];
    let mut dst = src;
    for (point, (dx, dy)) in dst.iter_mut().zip(corner_offsets) {
        point.0 += dx * w;
        point.1 += dy * h;
    }
    (src, dst)
}

//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` (JPEG, PNG) |
//! | **Rotate, perspective** | `imageproc::geometric_transformations::warp` |
//! | **Tile** | `image::imageops::crop_imm` |
//! | **Resize** | `image::imageops::resize` with `Triangle` (bilinear) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and grid math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: In-memory warp, tiling and resize

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{perspective_control_points, scaled_dimensions, tile_count, tile_rects};
pub use operations::{
    apply_perspective, apply_warp, resize_by_factor, rotate_about_center, split_into_tiles,
    warp_image,
};
pub use params::{MAX_CORNER_SHIFT, Quality, TileRect, WarpParams};
pub use rust_backend::RustBackend;

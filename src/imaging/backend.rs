//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two operations that touch the
//! filesystem: decoding a source image and encoding a result. Everything in
//! between (warp, tiling, resize) is done in memory by
//! [`operations`](super::operations).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use a mock that
//! records saves without encoding anything.

use super::params::Quality;
use image::RgbImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Degenerate transform: control points do not define a projection")]
    DegenerateTransform,
}

/// Trait for image I/O backends.
pub trait ImageBackend {
    /// Decode an image into 8-bit RGB. Alpha, if any, is dropped.
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError>;

    /// Encode `image` to `path`, choosing the format from the extension.
    fn save(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError>;
}

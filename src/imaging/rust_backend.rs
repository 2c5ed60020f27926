//! Pure Rust image I/O backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` → `DynamicImage::into_rgb8` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with configurable quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless, quality ignored) |

use super::backend::{BackendError, ImageBackend};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ImageReader, RgbImage};
use std::path::Path;
use tracing::debug;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased text after the last `.` of the file name. Unlike
/// [`Path::extension`], a bare `.png` yields `png`.
fn lowercase_extension(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError> {
        let decoded = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;
        debug!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            color = ?decoded.color(),
            "decoded image"
        );
        Ok(decoded.into_rgb8())
    }

    fn save(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
        let ext = lowercase_extension(path);
        if !matches!(ext.as_str(), "jpg" | "jpeg" | "png") {
            return Err(BackendError::ProcessingFailed(format!(
                "Unsupported output format: {}",
                ext
            )));
        }

        let file = std::fs::File::create(path).map_err(BackendError::Io)?;
        let writer = std::io::BufWriter::new(file);
        let result = if ext == "png" {
            image.write_with_encoder(PngEncoder::new(writer))
        } else {
            image.write_with_encoder(JpegEncoder::new_with_quality(
                writer,
                quality.value() as u8,
            ))
        };
        result.map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
        })
    }
}

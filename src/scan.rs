//! Input folder scanning.
//!
//! Finds the images to augment: regular files directly inside the input
//! folder whose extension is one of [`SUPPORTED_EXTENSIONS`], compared
//! case-insensitively. Sub-folders are not descended into.
//!
//! ```text
//! cats/
//! ├── 001.jpg        ✓
//! ├── 002.PNG        ✓
//! ├── 003.jpeg       ✓
//! ├── notes.txt      ✗ extension
//! ├── raw.tiff       ✗ extension
//! └── extra/         ✗ directory (contents ignored)
//!     └── 004.jpg
//! ```
//!
//! Results are sorted by file name so repeated runs visit images in the same
//! order.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions treated as input images.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read input folder: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input folder has no usable name: {0}")]
    NoFolderName(PathBuf),
}

/// An image found in the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    /// File name including extension, reused for the output variants.
    pub filename: String,
}

/// True when the file name ends in a supported extension.
///
/// Matches on the name suffix, so a bare `.png` qualifies even though
/// [`Path::extension`] sees no extension there.
pub fn is_supported_image(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_ascii_lowercase())
        .is_some_and(|name| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|ext| name.strip_suffix(ext).is_some_and(|s| s.ends_with('.')))
        })
}

/// Name of the input folder, used as the prefix of every output folder.
///
/// Trailing separators and `.` components are ignored (`data/cats/` → `cats`).
/// Paths without a final name (`.`, `..`) are resolved against the filesystem.
pub fn input_folder_name(input: &Path) -> Result<String, ScanError> {
    let name = match input.file_name() {
        Some(name) => name.to_os_string(),
        None => input
            .canonicalize()?
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| ScanError::NoFolderName(input.to_path_buf()))?,
    };
    name.into_string()
        .map_err(|_| ScanError::NoFolderName(input.to_path_buf()))
}

/// List the images to process, sorted by file name.
pub fn scan(input: &Path) -> Result<Vec<SourceImage>, ScanError> {
    let mut images = Vec::new();

    for entry in WalkDir::new(input).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_supported_image(path) {
            debug!(path = %path.display(), "skipping");
            continue;
        }
        let Some(filename) = entry.file_name().to_str() else {
            warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };
        images.push(SourceImage {
            path: path.to_path_buf(),
            filename: filename.to_string(),
        });
    }

    images.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(images)
}

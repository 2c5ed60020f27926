//! Output folder and file naming.
//!
//! Every variant lands in a subfolder of the output root whose name starts
//! with the input folder's name, so augmenting several datasets into the same
//! output root never collides:
//!
//! ```text
//! out/
//! ├── cats_warped/            # cats/001.jpg → cats_warped/001.jpg
//! ├── cats_warped_tiles/      # 001_tile_0.png, 001_tile_1.png, ...
//! ├── cats_factor_2/          # 001.jpg at half size
//! └── cats_factor_4/
//! ```

use std::path::{Path, PathBuf};

/// Folder holding warped copies.
pub fn warped_dir_name(folder_name: &str) -> String {
    format!("{folder_name}_warped")
}

/// Folder holding tiles cut from the warped copies.
pub fn tiles_dir_name(folder_name: &str) -> String {
    format!("{folder_name}_warped_tiles")
}

/// Folder holding copies downscaled by `factor`.
pub fn factor_dir_name(folder_name: &str, factor: u32) -> String {
    format!("{folder_name}_factor_{factor}")
}

/// Tile file name: `<stem>_tile_<index>.png`, whatever the source format.
///
/// - `"001-dawn.jpg"`, 0 → `"001-dawn_tile_0.png"`
/// - `"scan.v2.PNG"`, 12 → `"scan.v2_tile_12.png"`
pub fn tile_file_name(filename: &str, index: usize) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    format!("{stem}_tile_{index}.png")
}

/// Resolved output directories for one input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    folder_name: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, folder_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            folder_name: folder_name.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    pub fn warped_dir(&self) -> PathBuf {
        self.root.join(warped_dir_name(&self.folder_name))
    }

    pub fn tiles_dir(&self) -> PathBuf {
        self.root.join(tiles_dir_name(&self.folder_name))
    }

    pub fn factor_dir(&self, factor: u32) -> PathBuf {
        self.root.join(factor_dir_name(&self.folder_name, factor))
    }
}

//! # warptile
//!
//! Batch augmentation for image folders: random rotation + perspective warps,
//! tiling of the warped copies, and integer-factor downscaling. Built for
//! growing training sets from a folder of photos or scans.
//!
//! # Pipeline
//!
//! ```text
//! scan      input/           →  sorted .png/.jpg/.jpeg files
//! warp      each image       →  <name>_warped/          (optional)
//! tile      warped image     →  <name>_warped_tiles/    (optional, needs warp)
//! resize    each image × f   →  <name>_factor_<f>/
//! ```
//!
//! Processing is sequential: each image is decoded once, every variant is
//! written, then the next image starts.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `AugmentConfig`: stock defaults, optional TOML file, CLI overrides, validation |
//! | [`scan`] | Finds qualifying images in the input folder, resolves the folder name |
//! | [`naming`] | Output folder and tile file naming |
//! | [`imaging`] | Pure-Rust decode/encode, warp, tiling and resize |
//! | [`process`] | Batch driver: events, report, error handling |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Warps Are Two Passes
//!
//! Rotation and perspective are applied as separate resampling passes rather
//! than one composed homography. Corners rotated out of frame are filled with
//! black before the perspective step, which is what a camera tilted after
//! being rotated would see.
//!
//! ## Injected Randomness
//!
//! The random source is a parameter of [`process::process_with_backend`].
//! `--seed` turns a run fully reproducible; without it every run draws new
//! warps.
//!
//! ## Resize From the Original
//!
//! Factor variants are always cut from the decoded source, never from the
//! warped copy, so resized outputs are identical across runs.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;

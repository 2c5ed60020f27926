//! Batch augmentation driver.
//!
//! For every image found by [`scan`](crate::scan::scan), in file name order:
//!
//! 1. decode it once;
//! 2. if warping is enabled, sample a warp, write the warped copy to
//!    `<name>_warped/`, and (if tiling is enabled) cut the warped copy into
//!    tiles written to `<name>_warped_tiles/`;
//! 3. for each resize factor, downscale the *original* and write it to
//!    `<name>_factor_<f>/`.
//!
//! Each image is fully written before the next is read. The first failure
//! stops the run; files already written stay on disk.
//!
//! ## Output Structure
//!
//! ```text
//! out/
//! ├── cats_warped/
//! │   └── 001.jpg
//! ├── cats_warped_tiles/
//! │   ├── 001_tile_0.png
//! │   └── 001_tile_1.png
//! ├── cats_factor_2/
//! │   └── 001.jpg
//! └── report.json            # only with --report
//! ```

use crate::config::{AugmentConfig, ConfigError};
use crate::imaging::{
    BackendError, ImageBackend, Quality, RustBackend, WarpParams, resize_by_factor,
    split_into_tiles, warp_image,
};
use crate::naming::{OutputLayout, tile_file_name};
use crate::scan::{self, ScanError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Image processing failed for {path}: {source}")]
    Imaging {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Resize factor {factor} is too large for {path} ({width}x{height})")]
    FactorTooLarge {
        path: PathBuf,
        factor: u32,
        width: u32,
        height: u32,
    },
    #[error("Resize factors must be positive integers, got {0:?}")]
    InvalidFactors(Vec<u32>),
}

/// What to augment and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Resize divisors, applied in the given order.
    pub factors: Vec<u32>,
}

/// Kind of variant written for a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputKind {
    Warped,
    Tile { index: usize },
    Resized { factor: u32 },
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Warped => write!(f, "warped"),
            OutputKind::Tile { index } => write!(f, "tile {index}"),
            OutputKind::Resized { factor } => write!(f, "factor {factor}"),
        }
    }
}

/// One file written during the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrittenFile {
    #[serde(flatten)]
    pub kind: OutputKind,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Everything produced from one source image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageReport {
    pub filename: String,
    /// Original dimensions (width, height)
    pub dimensions: (u32, u32),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warp: Option<WarpParams>,
    pub outputs: Vec<WrittenFile>,
}

/// Summary of a whole run, serialized to `report.json` on request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub input_folder_name: String,
    pub images: Vec<ImageReport>,
}

impl BatchReport {
    pub fn count(&self, pred: impl Fn(&OutputKind) -> bool) -> usize {
        self.images
            .iter()
            .flat_map(|i| &i.outputs)
            .filter(|o| pred(&o.kind))
            .count()
    }

    pub fn warped_count(&self) -> usize {
        self.count(|k| matches!(k, OutputKind::Warped))
    }

    pub fn tile_count(&self) -> usize {
        self.count(|k| matches!(k, OutputKind::Tile { .. }))
    }

    pub fn resized_count(&self) -> usize {
        self.count(|k| matches!(k, OutputKind::Resized { .. }))
    }
}

/// Progress events emitted while the batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    Started {
        folder_name: String,
        image_count: usize,
    },
    ImageProcessed {
        /// 1-based position in processing order.
        index: usize,
        total: usize,
        report: ImageReport,
    },
}

/// Build the random generator for a run: seeded when `seed` is set.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Run the batch with the production backend.
pub fn process(
    job: &BatchJob,
    config: &AugmentConfig,
    on_event: &mut dyn FnMut(&ProcessEvent),
) -> Result<BatchReport, ProcessError> {
    let mut rng = make_rng(config.warp.seed);
    process_with_backend(&RustBackend::new(), job, config, &mut rng, on_event)
}

/// Run the batch using a specific backend and random source (allows testing with mock).
pub fn process_with_backend<R: Rng + ?Sized>(
    backend: &impl ImageBackend,
    job: &BatchJob,
    config: &AugmentConfig,
    rng: &mut R,
    on_event: &mut dyn FnMut(&ProcessEvent),
) -> Result<BatchReport, ProcessError> {
    config.validate()?;
    if job.factors.contains(&0) {
        return Err(ProcessError::InvalidFactors(job.factors.clone()));
    }
    if config.tiles.enabled && !config.warp.enabled {
        warn!("tiling applies only to warped images; enable warp to write tiles");
    }

    let folder_name = scan::input_folder_name(&job.input_dir)?;
    let sources = scan::scan(&job.input_dir)?;
    let layout = OutputLayout::new(&job.output_dir, folder_name.clone());
    let quality = Quality::new(config.output.jpeg_quality);

    std::fs::create_dir_all(layout.root())?;
    info!(
        input = %job.input_dir.display(),
        output = %job.output_dir.display(),
        images = sources.len(),
        "starting batch"
    );
    on_event(&ProcessEvent::Started {
        folder_name: folder_name.clone(),
        image_count: sources.len(),
    });

    let total = sources.len();
    let mut images = Vec::with_capacity(total);

    for (position, source) in sources.iter().enumerate() {
        let imaging_err = |e: BackendError| ProcessError::Imaging {
            path: source.path.clone(),
            source: e,
        };

        let original = backend.load(&source.path).map_err(imaging_err)?;
        let dimensions = original.dimensions();
        let mut outputs = Vec::new();
        let mut warp = None;

        if config.warp.enabled {
            let (warped, params) =
                warp_image(&original, config.warp.angle_range, &mut *rng).map_err(imaging_err)?;
            debug!(
                file = %source.filename,
                angle = params.angle_degrees,
                offsets = ?params.corner_offsets,
                "sampled warp"
            );

            let warped_dir = layout.warped_dir();
            std::fs::create_dir_all(&warped_dir)?;
            let path = warped_dir.join(&source.filename);
            backend.save(&warped, &path, quality).map_err(imaging_err)?;
            outputs.push(written(OutputKind::Warped, path, &warped));

            if config.tiles.enabled {
                let tiles_dir = layout.tiles_dir();
                std::fs::create_dir_all(&tiles_dir)?;
                for (index, tile) in split_into_tiles(&warped, config.tiles.size)
                    .iter()
                    .enumerate()
                {
                    let path = tiles_dir.join(tile_file_name(&source.filename, index));
                    backend.save(tile, &path, quality).map_err(imaging_err)?;
                    outputs.push(written(OutputKind::Tile { index }, path, tile));
                }
            }
            warp = Some(params);
        }

        for &factor in &job.factors {
            let resized =
                resize_by_factor(&original, factor).ok_or_else(|| ProcessError::FactorTooLarge {
                    path: source.path.clone(),
                    factor,
                    width: dimensions.0,
                    height: dimensions.1,
                })?;
            let factor_dir = layout.factor_dir(factor);
            std::fs::create_dir_all(&factor_dir)?;
            let path = factor_dir.join(&source.filename);
            backend.save(&resized, &path, quality).map_err(imaging_err)?;
            outputs.push(written(OutputKind::Resized { factor }, path, &resized));
        }

        let report = ImageReport {
            filename: source.filename.clone(),
            dimensions,
            warp,
            outputs,
        };
        on_event(&ProcessEvent::ImageProcessed {
            index: position + 1,
            total,
            report: report.clone(),
        });
        images.push(report);
    }

    Ok(BatchReport {
        input_folder_name: folder_name,
        images,
    })
}

fn written(kind: OutputKind, path: PathBuf, image: &image::RgbImage) -> WrittenFile {
    WrittenFile {
        kind,
        path,
        width: image.width(),
        height: image.height(),
    }
}

/// Write the report as pretty JSON to `<output_dir>/report.json`.
pub fn write_report(report: &BatchReport, output_dir: &Path) -> Result<PathBuf, ProcessError> {
    let path = output_dir.join("report.json");
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

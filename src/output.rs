//! CLI output formatting.
//!
//! Each image gets a header line with its position and file name, followed by
//! one indented line per written variant. Tiles are collapsed into a single
//! count line, since a large image can produce hundreds of them.
//!
//! ```text
//! cats (3 images)
//! 001 dawn.jpg (4032x3024)
//!     warped: cats_warped/dawn.jpg (angle -3.2°)
//!     tiles: 192 → cats_warped_tiles/
//!     factor 2: cats_factor_2/dawn.jpg (2016x1512)
//!     factor 4: cats_factor_4/dawn.jpg (1008x756)
//!
//! Wrote 3 warped, 576 tiles, 6 resized
//! ```
//!
//! Format functions are pure (return `Vec<String>`); `print_*` wrappers
//! write to stdout.

use crate::process::{BatchReport, ImageReport, OutputKind, ProcessEvent};
use std::path::Path;

/// Path relative to the output root, for display.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the lines for one image.
pub fn format_image(index: usize, report: &ImageReport, output_root: &Path) -> Vec<String> {
    let (w, h) = report.dimensions;
    let mut lines = vec![format!("{:03} {} ({}x{})", index, report.filename, w, h)];

    let mut tiles = 0;
    let mut tiles_dir = None;
    for file in &report.outputs {
        match file.kind {
            OutputKind::Warped => {
                let angle = report
                    .warp
                    .map(|p| format!(" (angle {:.1}\u{00b0})", p.angle_degrees))
                    .unwrap_or_default();
                lines.push(format!(
                    "    warped: {}{}",
                    display_path(&file.path, output_root),
                    angle
                ));
            }
            OutputKind::Tile { .. } => {
                tiles += 1;
                tiles_dir = file.path.parent();
            }
            OutputKind::Resized { factor } => {
                if tiles > 0 {
                    lines.push(tiles_line(tiles, tiles_dir, output_root));
                    tiles = 0;
                }
                lines.push(format!(
                    "    factor {}: {} ({}x{})",
                    factor,
                    display_path(&file.path, output_root),
                    file.width,
                    file.height
                ));
            }
        }
    }
    if tiles > 0 {
        lines.push(tiles_line(tiles, tiles_dir, output_root));
    }
    lines
}

fn tiles_line(count: usize, dir: Option<&Path>, output_root: &Path) -> String {
    let dir = dir
        .map(|d| format!("{}/", display_path(d, output_root)))
        .unwrap_or_default();
    format!("    tiles: {} \u{2192} {}", count, dir)
}

/// Format a progress event.
pub fn format_process_event(event: &ProcessEvent, output_root: &Path) -> Vec<String> {
    match event {
        ProcessEvent::Started {
            folder_name,
            image_count,
        } => vec![format!("{} ({})", folder_name, plural(*image_count, "image"))],
        ProcessEvent::ImageProcessed { index, report, .. } => {
            format_image(*index, report, output_root)
        }
    }
}

/// Format the closing summary.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    if report.images.is_empty() {
        return vec![format!(
            "No .png/.jpg/.jpeg images found in {}",
            report.input_folder_name
        )];
    }
    let mut parts = Vec::new();
    let warped = report.warped_count();
    if warped > 0 {
        parts.push(format!("{warped} warped"));
    }
    let tiles = report.tile_count();
    if tiles > 0 {
        parts.push(plural(tiles, "tile"));
    }
    parts.push(format!("{} resized", report.resized_count()));
    vec![String::new(), format!("Wrote {}", parts.join(", "))]
}

pub fn print_process_event(event: &ProcessEvent, output_root: &Path) {
    for line in format_process_event(event, output_root) {
        println!("{}", line);
    }
}

pub fn print_summary(report: &BatchReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

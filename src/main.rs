use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use warptile::config::{self, Overrides};
use warptile::{output, process};

#[derive(Parser)]
#[command(name = "warptile")]
#[command(about = "Resize and optionally warp images by specified factors")]
#[command(long_about = "\
Resize and optionally warp images by specified factors

Every .png/.jpg/.jpeg file directly inside INPUT_FOLDER is downscaled by each
FACTOR. With --warp, a randomly rotated and perspective-distorted copy is
written too, mimicking hand-held capture; --tile additionally cuts that copy
into square tiles (and is ignored without --warp).

Output layout (for an input folder named `cats`):

  OUTPUT_FOLDER/
  ├── cats_warped/           # --warp: same file names as the input
  ├── cats_warped_tiles/     # --tile: <stem>_tile_<n>.png, row-major
  ├── cats_factor_2/         # one folder per factor
  └── cats_factor_4/")]
#[command(version)]
struct Cli {
    /// Path to the folder containing input images
    input_folder: PathBuf,

    /// Path to the folder to store output images
    output_folder: PathBuf,

    /// Resize factors (e.g. 2 4 6)
    #[arg(required = true, num_args = 1.., value_parser = clap::value_parser!(u32).range(1..))]
    factors: Vec<u32>,

    /// Warp images to mimic human capture orientations
    #[arg(long)]
    warp: bool,

    /// Range of angles for random warping, in degrees [default: 5]
    #[arg(long = "angle_range", value_name = "DEGREES", allow_negative_numbers = true)]
    angle_range: Option<f32>,

    /// Cut the warped images into tiles (no effect without --warp)
    #[arg(long)]
    tile: bool,

    /// Size of each tile in pixels [default: 256]
    #[arg(long = "tile_size", value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    tile_size: Option<u32>,

    /// Seed the random generator so warps are reproducible
    #[arg(long)]
    seed: Option<u64>,

    /// JPEG encoding quality, 1-100 [default: 95]
    #[arg(long = "jpeg_quality", value_name = "QUALITY", value_parser = clap::value_parser!(u32).range(1..=100))]
    jpeg_quality: Option<u32>,

    /// TOML file with defaults for the options above
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write report.json into the output folder
    #[arg(long)]
    report: bool,

    /// Log debug diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            warp: self.warp,
            angle_range: self.angle_range,
            tile: self.tile,
            tile_size: self.tile_size,
            seed: self.seed,
            jpeg_quality: self.jpeg_quality,
            report: self.report,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = config::load_config(cli.config.as_deref())?;
    config.apply(&cli.overrides());
    config.validate()?;

    let job = process::BatchJob {
        input_dir: cli.input_folder.clone(),
        output_dir: cli.output_folder.clone(),
        factors: cli.factors.clone(),
    };

    let report = process::process(&job, &config, &mut |event| {
        output::print_process_event(event, &job.output_dir)
    })?;
    output::print_summary(&report);

    if config.output.report {
        let path = process::write_report(&report, &job.output_dir)?;
        println!("Report: {}", path.display());
    }

    Ok(())
}

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug for this
/// crate with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,warptile=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

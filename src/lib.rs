//! Tablemask: table annotations to detection boxes and line masks.
//!
//! Tablemask reads labelme-style annotations of scanned document pages and
//! produces two kinds of training data: table-region boxes for a detector,
//! and horizontal/vertical ruling-line masks for a structure-segmentation
//! model, optionally with "cracked" source images that imitate broken
//! rules in degraded scans.
//!
//! # Modules
//!
//! - [`ir`]: Annotation model, typed coordinates and boxes, labelme reader
//! - [`extract`]: Table box extraction and manifest lines
//! - [`raster`]: Line classification, crack augmentation, mask rendering
//! - [`validation`]: Annotation file diagnostics
//! - [`error`]: Error types for tablemask operations

pub mod error;
pub mod extract;
pub mod ir;
pub mod raster;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use image::GrayImage;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::info;

pub use error::TablemaskError;

/// The tablemask CLI application.
#[derive(Parser)]
#[command(name = "tablemask")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the detection manifest line for an annotation file.
    Boxes(BoxesArgs),
    /// Render horizontal/vertical line masks and the (possibly cracked) image.
    Masks(MasksArgs),
    /// Validate an annotation file for errors and warnings.
    Validate(ValidateArgs),
}

/// Arguments for the boxes subcommand.
#[derive(clap::Args)]
struct BoxesArgs {
    /// Annotation JSON file.
    annotation: PathBuf,

    /// Image name written at the start of the line (defaults to imagePath).
    #[arg(long)]
    image: Option<String>,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the masks subcommand.
#[derive(clap::Args)]
struct MasksArgs {
    /// Annotation JSON file containing 2-point line shapes.
    annotation: PathBuf,

    /// Source image the annotation was drawn on.
    image: PathBuf,

    /// Mask width in pixels.
    #[arg(long)]
    width: u32,

    /// Mask height in pixels.
    #[arg(long)]
    height: u32,

    /// Directory for <stem>_h.png, <stem>_v.png and <stem>_img.png.
    #[arg(long)]
    out_dir: PathBuf,

    /// Probability of keeping the cracked image (0 disables cracks in the output).
    #[arg(long, default_value_t = 0.0)]
    crop_probability: f64,

    /// Seed for reproducible augmentation.
    #[arg(long, env = "TABLEMASK_SEED")]
    seed: Option<u64>,

    /// Write masks as 0/255 instead of 0/1 so they can be viewed.
    #[arg(long)]
    preview: bool,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Annotation JSON file to validate.
    annotation: PathBuf,

    /// Validate for mask rendering (2-point lines only).
    #[arg(long)]
    lines: bool,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the tablemask CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), TablemaskError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Boxes(args)) => run_boxes(args),
        Some(Commands::Masks(args)) => run_masks(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("tablemask {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Table annotations to detection boxes and line masks.");
            println!();
            println!("Run 'tablemask --help' for usage information.");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct BoxesOutput<'a> {
    image: &'a str,
    #[serde(flatten)]
    extraction: &'a extract::BoxExtraction,
    degenerate: Vec<usize>,
}

/// Execute the boxes subcommand.
fn run_boxes(args: BoxesArgs) -> Result<(), TablemaskError> {
    let annotation = ir::io_labelme_json::read_annotation(&args.annotation)?;
    let extraction = extract::extract_boxes(&annotation)?;
    let image = args.image.as_deref().unwrap_or(&extraction.image_name);

    match args.output.as_str() {
        "text" => {
            println!(
                "{}",
                extract::ManifestEntry::from_extraction(image, &extraction)
            );
        }
        "json" => {
            let out = BoxesOutput {
                image,
                extraction: &extraction,
                degenerate: extraction.degenerate_indices(),
            };
            println!("{}", to_json(&out)?);
        }
        other => return Err(unsupported_output(other)),
    }

    Ok(())
}

/// Execute the masks subcommand.
fn run_masks(args: MasksArgs) -> Result<(), TablemaskError> {
    let annotation = ir::io_labelme_json::read_annotation(&args.annotation)?;
    let mut image = image::open(&args.image)
        .map_err(|source| TablemaskError::ImageRead {
            path: args.image.clone(),
            source,
        })?
        .to_rgb8();

    let target = raster::TargetSize::new(args.width, args.height);
    let options = raster::RasterOptions::with_crop_probability(args.crop_probability);

    let masks = if let Some(seed) = args.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        raster::rasterize_lines(&annotation, &mut image, target, &options, &mut rng)?
    } else {
        let mut rng = rand::rng();
        raster::rasterize_lines(&annotation, &mut image, target, &options, &mut rng)?
    };

    std::fs::create_dir_all(&args.out_dir)?;
    let stem = args
        .image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sample".to_string());

    let h_path = args.out_dir.join(format!("{stem}_h.png"));
    let v_path = args.out_dir.join(format!("{stem}_v.png"));
    let img_path = args.out_dir.join(format!("{stem}_img.png"));

    save_mask(&masks.horizontal, &h_path, args.preview)?;
    save_mask(&masks.vertical, &v_path, args.preview)?;
    image
        .save(&img_path)
        .map_err(|source| TablemaskError::ImageWrite {
            path: img_path.clone(),
            source,
        })?;

    info!(
        cracks = masks.cracks.spans.len(),
        kept = masks.cracks.kept,
        "wrote {}, {}, {}",
        h_path.display(),
        v_path.display(),
        img_path.display()
    );
    println!("{}", h_path.display());
    println!("{}", v_path.display());
    println!("{}", img_path.display());

    Ok(())
}

fn save_mask(mask: &GrayImage, path: &Path, preview: bool) -> Result<(), TablemaskError> {
    let result = if preview {
        let mut visible = mask.clone();
        for pixel in visible.pixels_mut() {
            pixel.0[0] = pixel.0[0].saturating_mul(255);
        }
        visible.save(path)
    } else {
        mask.save(path)
    };

    result.map_err(|source| TablemaskError::ImageWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), TablemaskError> {
    let annotation = ir::io_labelme_json::read_annotation(&args.annotation)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
        lines_only: args.lines,
    };
    let report = validation::validate_annotation(&annotation, &opts);

    match args.output.as_str() {
        "text" => print!("{}", report),
        "json" => {
            #[derive(Serialize)]
            struct JsonReport<'a> {
                image: &'a str,
                error_count: usize,
                warning_count: usize,
                issues: &'a [validation::ValidationIssue],
            }
            let out = JsonReport {
                image: &report.image,
                error_count: report.error_count(),
                warning_count: report.warning_count(),
                issues: &report.issues,
            };
            println!("{}", to_json(&out)?);
        }
        other => return Err(unsupported_output(other)),
    }

    if report.fails(opts.strict) {
        Err(TablemaskError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, TablemaskError> {
    serde_json::to_string_pretty(value).map_err(TablemaskError::JsonOutput)
}

fn unsupported_output(other: &str) -> TablemaskError {
    TablemaskError::UnsupportedOutput(format!("'{}' (supported: text, json)", other))
}

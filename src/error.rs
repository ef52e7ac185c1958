use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for tablemask operations.
#[derive(Debug, Error)]
pub enum TablemaskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse annotation JSON from {path}: {source}")]
    AnnotationJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed annotation file {path}: {message}")]
    MalformedAnnotation { path: PathBuf, message: String },

    #[error(
        "Unsupported shape in '{image}': shape[{shape_index}] has {point_count} point(s), expected {expected}"
    )]
    UnsupportedShape {
        image: String,
        shape_index: usize,
        point_count: usize,
        expected: &'static str,
    },

    #[error("Invalid raster parameters: {message}")]
    InvalidRasterParams { message: String },

    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to render JSON output: {0}")]
    JsonOutput(#[source] serde_json::Error),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}

//! labelme JSON reader.
//!
//! Only the fields the box extractor and the line rasterizer need are read:
//! `imagePath`, `imageWidth`, `imageHeight` and each shape's `points`
//! (plus the informational `label` / `shape_type`). Everything else labelme
//! writes (`version`, `flags`, `imageData`, ...) is ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::model::{AnnotationFile, Shape};
use super::{Coord, Pixel};
use crate::error::TablemaskError;

// ============================================================================
// labelme schema types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LmFile {
    #[serde(default)]
    image_path: Option<String>,
    #[serde(default)]
    image_width: Option<u32>,
    #[serde(default)]
    image_height: Option<u32>,
    #[serde(default)]
    shapes: Option<Vec<LmShape>>,
}

#[derive(Debug, Deserialize)]
struct LmShape {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    shape_type: Option<String>,
    #[serde(default)]
    points: Option<Vec<Coord<Pixel>>>,
}

// ============================================================================
// Public API
// ============================================================================

/// Reads one labelme annotation file.
///
/// # Errors
/// `Io` if the file cannot be opened, `AnnotationJsonParse` for invalid JSON
/// or mistyped values, `MalformedAnnotation` for missing required fields or
/// a zero image dimension.
pub fn read_annotation(path: &Path) -> Result<AnnotationFile, TablemaskError> {
    let file = File::open(path).map_err(TablemaskError::Io)?;
    let reader = BufReader::new(file);

    let raw: LmFile =
        serde_json::from_reader(reader).map_err(|source| TablemaskError::AnnotationJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    lm_to_ir(raw, path)
}

/// Parses a labelme annotation from a string.
pub fn from_annotation_str(json: &str) -> Result<AnnotationFile, TablemaskError> {
    let path = Path::new("<string>");
    let raw: LmFile =
        serde_json::from_str(json).map_err(|source| TablemaskError::AnnotationJsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    lm_to_ir(raw, path)
}

/// Parses a labelme annotation from raw bytes.
pub fn from_annotation_slice(bytes: &[u8]) -> Result<AnnotationFile, TablemaskError> {
    let path = Path::new("<bytes>");
    let raw: LmFile =
        serde_json::from_slice(bytes).map_err(|source| TablemaskError::AnnotationJsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    lm_to_ir(raw, path)
}

// ============================================================================
// Conversion: labelme -> IR
// ============================================================================

fn lm_to_ir(raw: LmFile, path: &Path) -> Result<AnnotationFile, TablemaskError> {
    let image_path = raw
        .image_path
        .ok_or_else(|| malformed(path, "missing imagePath"))?;
    let image_width = raw
        .image_width
        .ok_or_else(|| malformed(path, "missing imageWidth"))?;
    let image_height = raw
        .image_height
        .ok_or_else(|| malformed(path, "missing imageHeight"))?;
    let raw_shapes = raw.shapes.ok_or_else(|| malformed(path, "missing shapes"))?;

    if image_width == 0 || image_height == 0 {
        return Err(malformed(
            path,
            format!("image size {image_width}x{image_height} must be non-zero"),
        ));
    }

    let mut shapes = Vec::with_capacity(raw_shapes.len());
    for (shape_idx, shape) in raw_shapes.into_iter().enumerate() {
        let points = shape
            .points
            .ok_or_else(|| malformed(path, format!("shapes[{shape_idx}] missing points")))?;
        shapes.push(Shape {
            label: shape.label,
            shape_type: shape.shape_type,
            points,
        });
    }

    Ok(AnnotationFile {
        image_path,
        image_width,
        image_height,
        shapes,
    })
}

fn malformed(path: &Path, message: impl Into<String>) -> TablemaskError {
    TablemaskError::MalformedAnnotation {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

// ============================================================================
// Tests
// ============================================================================

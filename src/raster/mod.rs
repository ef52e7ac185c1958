//! Ruling-line rasterization into horizontal and vertical masks.
//!
//! Each 2-point shape of an annotation file is a table rule. Rules are
//! classified by slope, rescaled from the declared source size to the
//! requested mask size and drawn into one of two binary masks. While doing
//! so the source image may be "cracked": short stretches of rules are erased
//! to imitate degraded scans.
//!
//! Randomness is two-level. Every rule draws a 50% coin for cracking; after
//! all rules are processed a single draw with probability
//! `crop_probability` decides whether the cracked image is handed back or
//! the pristine one is restored. The per-rule draws always happen, so the
//! number of values consumed from the random source does not depend on the
//! final draw.

pub mod crack;
pub mod orientation;
pub mod stroke;

pub use crack::{CrackAxis, CrackedSpan};
pub use orientation::LineOrientation;
pub use stroke::stroke_thickness;

use image::{GrayImage, ImageBuffer, Pixel as ImagePixel};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::TablemaskError;
use crate::ir::{parse_points_to_box, AnnotationFile, BBoxXYXY, Pixel};

/// Output mask size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rasterization options.
#[derive(Clone, Debug, Default)]
pub struct RasterOptions {
    /// Probability that the cracked image is returned instead of the
    /// original. Zero disables augmentation in the output.
    pub crop_probability: f64,
}

impl RasterOptions {
    pub fn with_crop_probability(crop_probability: f64) -> Self {
        Self { crop_probability }
    }

    /// Validate options before running.
    pub fn validate(&self) -> Result<(), TablemaskError> {
        let p = self.crop_probability;
        if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
            return Err(TablemaskError::InvalidRasterParams {
                message: format!("crop probability must be in [0.0, 1.0], got {p}"),
            });
        }
        Ok(())
    }
}

/// What the crack augmentation did to the image.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CrackSummary {
    /// Every erased stretch, in shape order.
    pub spans: Vec<CrackedSpan>,
    /// Whether the returned image still carries the spans.
    pub kept: bool,
}

impl CrackSummary {
    /// True if the caller's image differs from what was passed in.
    pub fn modified_image(&self) -> bool {
        self.kept && !self.spans.is_empty()
    }
}

/// The two binary masks (values 0 or 1) plus the augmentation record.
#[derive(Clone, Debug)]
pub struct LineMasks {
    pub horizontal: GrayImage,
    pub vertical: GrayImage,
    pub cracks: CrackSummary,
}

/// Rasterizes the ruling lines of `annotation` into two masks of size
/// `target`, cracking `image` in place.
///
/// `image` must be in the annotation's source pixel space. On return it
/// holds either the cracked image (with probability `crop_probability`) or
/// exactly the image that was passed in.
///
/// # Errors
/// `InvalidRasterParams` for a bad probability or an empty target.
/// `UnsupportedShape` if any shape has other than 2 points; all shapes are
/// checked before the image or the random source is touched.
pub fn rasterize_lines<P, R>(
    annotation: &AnnotationFile,
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    target: TargetSize,
    options: &RasterOptions,
    rng: &mut R,
) -> Result<LineMasks, TablemaskError>
where
    P: ImagePixel,
    R: Rng + ?Sized,
{
    options.validate()?;
    if target.width == 0 || target.height == 0 {
        return Err(TablemaskError::InvalidRasterParams {
            message: format!(
                "target size {}x{} must be non-zero",
                target.width, target.height
            ),
        });
    }

    let lines = line_boxes(annotation)?;
    let thickness = stroke_thickness(target.height);

    let pristine = image.clone();
    let mut horizontal = GrayImage::new(target.width, target.height);
    let mut vertical = GrayImage::new(target.width, target.height);
    let mut spans = Vec::new();

    for (shape_index, bbox) in lines.iter().enumerate() {
        if rng.random_bool(crack::CRACK_SHAPE_PROBABILITY) {
            if let Some(span) = crack::crack_line(image, bbox, rng) {
                debug!(shape_index, ?span, "cracked line");
                spans.push(span);
            }
        }

        let orientation = LineOrientation::classify(bbox);
        let scaled = bbox
            .to_normalized(annotation.image_width, annotation.image_height)
            .to_pixel(target.width, target.height);
        let start = (scaled.x1().trunc(), scaled.y1().trunc());
        let end = (scaled.x2().trunc(), scaled.y2().trunc());

        match orientation {
            LineOrientation::Horizontal => {
                stroke::draw_thick_line(&mut horizontal, start, end, thickness)
            }
            LineOrientation::Vertical => stroke::draw_thick_line(&mut vertical, start, end, thickness),
            LineOrientation::Diagonal => {
                debug!(shape_index, "dropping diagonal line");
            }
        }
    }

    stroke::binarize(&mut horizontal);
    stroke::binarize(&mut vertical);

    let kept = rng.random_bool(options.crop_probability);
    if !kept {
        *image = pristine;
    }

    Ok(LineMasks {
        horizontal,
        vertical,
        cracks: CrackSummary { spans, kept },
    })
}

/// Clamped boxes of every shape, which must all be 2-point lines.
fn line_boxes(annotation: &AnnotationFile) -> Result<Vec<BBoxXYXY<Pixel>>, TablemaskError> {
    let mut boxes = Vec::with_capacity(annotation.shapes.len());

    for (shape_index, shape) in annotation.shapes.iter().enumerate() {
        let unsupported = || TablemaskError::UnsupportedShape {
            image: annotation.image_path.clone(),
            shape_index,
            point_count: shape.points.len(),
            expected: "2",
        };
        if shape.points.len() != 2 {
            return Err(unsupported());
        }
        let bbox = parse_points_to_box(
            &shape.points,
            annotation.image_width,
            annotation.image_height,
        )
        .ok_or_else(unsupported)?;

        if !bbox.is_ordered() {
            warn!(
                image = %annotation.image_path,
                shape_index,
                "degenerate line box after clamping: ({}, {}, {}, {})",
                bbox.x1(),
                bbox.y1(),
                bbox.x2(),
                bbox.y2()
            );
        }
        boxes.push(bbox);
    }

    Ok(boxes)
}

//! Annotation file validation.
//!
//! The extractor and rasterizer stop at the first unsupported shape and
//! only log inverted boxes. Validation walks the whole file instead and
//! reports every problem it finds:
//! - Structural issues (empty image path, point counts)
//! - Geometric issues (non-finite points, points outside the image,
//!   boxes inverted by clamping)
//! - Line issues (rules too slanted to land in either mask)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::ir::{parse_points_to_box, AnnotationFile, Shape};
use crate::raster::LineOrientation;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
    /// Validate for the line rasterizer: only 2-point shapes are accepted
    /// and slanted lines are reported.
    pub lines_only: bool,
}

/// Validates an annotation file and returns every issue found.
pub fn validate_annotation(annotation: &AnnotationFile, opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::for_image(&annotation.image_path);

    if annotation.image_path.trim().is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyImagePath,
            IssueContext::File,
            "Empty imagePath",
        ));
    }

    if annotation.shapes.is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::NoShapes,
            IssueContext::File,
            "No shapes, so no table region",
        ));
    }

    for (index, shape) in annotation.shapes.iter().enumerate() {
        validate_shape(annotation, index, shape, opts, &mut report);
    }

    report
}

fn validate_shape(
    annotation: &AnnotationFile,
    index: usize,
    shape: &Shape,
    opts: &ValidateOptions,
    report: &mut ValidationReport,
) {
    let context = IssueContext::Shape { index };
    let count = shape.points.len();

    let accepted = if opts.lines_only {
        count == 2
    } else {
        count == 2 || count == 4
    };
    if !accepted {
        let expected = if opts.lines_only { "2" } else { "2 or 4" };
        report.add(ValidationIssue::error(
            IssueCode::UnsupportedPointCount,
            context,
            format!("{} point(s), expected {}", count, expected),
        ));
        return;
    }

    if let Some(point) = shape.points.iter().find(|p| !p.is_finite()) {
        report.add(ValidationIssue::error(
            IssueCode::PointNotFinite,
            context,
            format!("Non-finite point {:?}", point),
        ));
        return; // Skip further geometry checks
    }

    let (w, h) = (annotation.image_width as f64, annotation.image_height as f64);
    for point in &shape.points {
        if point.x < 0.0 || point.y < 0.0 || point.x > w || point.y > h {
            report.add(ValidationIssue::warning(
                IssueCode::PointOutOfBounds,
                context,
                format!(
                    "Point ({:.1}, {:.1}) outside image bounds (0, 0, {}, {}); it will be clamped",
                    point.x, point.y, annotation.image_width, annotation.image_height
                ),
            ));
        }
    }

    let Some(bbox) = parse_points_to_box(
        &shape.points,
        annotation.image_width,
        annotation.image_height,
    ) else {
        return;
    };

    if !bbox.is_ordered() {
        report.add(ValidationIssue::warning(
            IssueCode::DegenerateBox,
            context,
            format!(
                "Inverted box after clamping: ({:.1}, {:.1}, {:.1}, {:.1})",
                bbox.x1(),
                bbox.y1(),
                bbox.x2(),
                bbox.y2()
            ),
        ));
    }

    if opts.lines_only && LineOrientation::classify(&bbox) == LineOrientation::Diagonal {
        report.add(ValidationIssue::warning(
            IssueCode::DiagonalLine,
            context,
            "Line is neither horizontal nor vertical and is left out of both masks",
        ));
    }
}

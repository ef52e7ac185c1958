//! Table-region box extraction.
//!
//! Every shape of an annotation file (2-point rectangle or 4-point
//! quadrilateral) becomes one clamped pixel box. The vertical span covered
//! by all boxes is tracked alongside so that callers can cut header and
//! footer rules that sit outside the table.

pub mod manifest;

pub use manifest::ManifestEntry;

use serde::Serialize;
use tracing::warn;

use crate::error::TablemaskError;
use crate::ir::{parse_points_to_box, AnnotationFile, BBoxXYXY, Pixel};

/// Vertical span of a set of boxes, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VerticalExtent {
    /// Smallest `y1` over all boxes.
    pub min_y: f64,
    /// Largest `y2` over all boxes, never below zero.
    pub max_y: f64,
}

impl VerticalExtent {
    /// Both bounds as a fraction of the image height.
    pub fn normalized(&self, image_height: u32) -> (f64, f64) {
        let h = image_height as f64;
        (self.min_y / h, self.max_y / h)
    }
}

/// Boxes extracted from one annotation file.
#[derive(Clone, Debug, Serialize)]
pub struct BoxExtraction {
    /// The annotation's `imagePath`, verbatim.
    pub image_name: String,
    /// One box per shape, in shape order.
    pub boxes: Vec<BBoxXYXY<Pixel>>,
    /// `None` when the file has no shapes, i.e. no table region was found.
    pub extent: Option<VerticalExtent>,
}

impl BoxExtraction {
    /// Indices of boxes left inverted by clamping.
    pub fn degenerate_indices(&self) -> Vec<usize> {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, bbox)| !bbox.is_ordered())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Extracts one clamped box per shape.
///
/// Inverted boxes are logged and kept as they are.
///
/// # Errors
/// `UnsupportedShape` as soon as a shape has neither 2 nor 4 points; the
/// rest of the file is not processed.
pub fn extract_boxes(annotation: &AnnotationFile) -> Result<BoxExtraction, TablemaskError> {
    let mut boxes = Vec::with_capacity(annotation.shapes.len());

    for (shape_index, shape) in annotation.shapes.iter().enumerate() {
        let bbox = parse_points_to_box(
            &shape.points,
            annotation.image_width,
            annotation.image_height,
        )
        .ok_or_else(|| TablemaskError::UnsupportedShape {
            image: annotation.image_path.clone(),
            shape_index,
            point_count: shape.points.len(),
            expected: "2 or 4",
        })?;

        if !bbox.is_ordered() {
            warn!(
                image = %annotation.image_path,
                shape_index,
                "degenerate box after clamping: ({}, {}, {}, {})",
                bbox.x1(),
                bbox.y1(),
                bbox.x2(),
                bbox.y2()
            );
        }

        boxes.push(bbox);
    }

    let extent = vertical_extent(&boxes);

    Ok(BoxExtraction {
        image_name: annotation.image_path.clone(),
        boxes,
        extent,
    })
}

/// `max_y` starts from zero rather than negative infinity: valid coordinates
/// are never negative after clamping `y1`, and only an inverted box can have
/// a negative `y2`.
fn vertical_extent(boxes: &[BBoxXYXY<Pixel>]) -> Option<VerticalExtent> {
    if boxes.is_empty() {
        return None;
    }

    let mut extent = VerticalExtent {
        min_y: f64::INFINITY,
        max_y: 0.0,
    };
    for bbox in boxes {
        if bbox.y1() < extent.min_y {
            extent.min_y = bbox.y1();
        }
        if bbox.y2() > extent.max_y {
            extent.max_y = bbox.y2();
        }
    }
    Some(extent)
}

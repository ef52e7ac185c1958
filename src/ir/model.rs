//! In-memory annotation model.
//!
//! One [`AnnotationFile`] describes one scanned page: the declared size of
//! the source image and the shapes drawn on it. Table regions are stored as
//! 2-point rectangles or 4-point quadrilaterals; ruling lines as 2-point
//! segments.

use serde::Serialize;

use super::coord::Coord;
use super::space::Pixel;

/// A loaded annotation file.
#[derive(Clone, Debug, Serialize)]
pub struct AnnotationFile {
    /// Image reference as written by the annotation tool.
    pub image_path: String,

    /// Declared source image width in pixels. Never zero once loaded.
    pub image_width: u32,

    /// Declared source image height in pixels. Never zero once loaded.
    pub image_height: u32,

    /// Shapes in file order.
    pub shapes: Vec<Shape>,
}

impl AnnotationFile {
    pub fn new(image_path: impl Into<String>, image_width: u32, image_height: u32) -> Self {
        Self {
            image_path: image_path.into(),
            image_width,
            image_height,
            shapes: Vec::new(),
        }
    }

    /// Appends a shape, builder style.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }
}

/// One annotated polygon.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Shape {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,

    pub points: Vec<Coord<Pixel>>,
}

impl Shape {
    pub fn new(points: Vec<Coord<Pixel>>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    /// Two-point segment from `(x1, y1)` to `(x2, y2)`.
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(vec![Coord::new(x1, y1), Coord::new(x2, y2)])
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

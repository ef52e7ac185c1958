//! Slope-based line orientation.

use serde::Serialize;

use crate::ir::{BBoxXYXY, Pixel};

/// Keeps a zero-length segment from dividing 0 by 0.
pub const SINE_EPSILON: f64 = 1e-6;

/// Lines with `|sin|` below this go to the horizontal mask.
pub const HORIZONTAL_MAX_SINE: f64 = 0.2;

/// Lines with `|sin|` above this go to the vertical mask.
pub const VERTICAL_MIN_SINE: f64 = 0.8;

/// Which mask, if any, a ruling line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LineOrientation {
    Horizontal,
    Vertical,
    /// Neither axis-aligned enough for a mask; dropped.
    Diagonal,
}

impl LineOrientation {
    pub fn classify(bbox: &BBoxXYXY<Pixel>) -> Self {
        let sine = slope_sine(bbox).abs();
        if sine < HORIZONTAL_MAX_SINE {
            LineOrientation::Horizontal
        } else if sine > VERTICAL_MIN_SINE {
            LineOrientation::Vertical
        } else {
            LineOrientation::Diagonal
        }
    }
}

/// `(dy + eps) / (hypot(dx, dy) + eps)` over the box diagonal.
///
/// A zero-length segment comes out as 1, i.e. vertical.
pub fn slope_sine(bbox: &BBoxXYXY<Pixel>) -> f64 {
    let dy = bbox.height();
    let dx = bbox.width();
    (dy + SINE_EPSILON) / (dx.hypot(dy) + SINE_EPSILON)
}

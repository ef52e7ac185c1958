//! Coordinate space marker types.
//!
//! Annotation points live in the source image's pixel grid, while the
//! rasterizer passes every line through a resolution-independent unit square
//! before rescaling it to the target mask. These zero-sized markers keep the
//! two from being mixed up.

use std::fmt;

/// Marker for source-image pixel coordinates, origin at the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker for coordinates divided by the declared image size.
///
/// A point inside the image maps into `[0, 1] x [0, 1]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

//! Axis-aligned boxes in XYXY form and the shared point-to-box reduction.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::{Normalized, Pixel};

/// An axis-aligned box `(x1, y1, x2, y2)`.
///
/// Construction does not enforce `x1 <= x2` or `y1 <= y2`. Clamping a shape
/// that lies entirely outside the image can invert a box, and such boxes are
/// kept and reported rather than rejected.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    #[inline]
    pub fn new(min: Coord<TSpace>, max: Coord<TSpace>) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_xyxy(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min: Coord::new(x1, y1),
            max: Coord::new(x2, y2),
        }
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn x2(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn y2(&self) -> f64 {
        self.max.y
    }

    /// Horizontal extent; negative for an inverted box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent; negative for an inverted box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if `x1 <= x2` and `y1 <= y2`.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Smallest box enclosing every point. `None` for an empty slice.
    pub fn enclosing(points: &[Coord<TSpace>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = Self::from_xyxy(first.x, first.y, first.x, first.y);
        for p in rest {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("x1", &self.min.x)
            .field("y1", &self.min.y)
            .field("x2", &self.max.x)
            .field("y2", &self.max.y)
            .finish()
    }
}

impl<TSpace> Default for BBoxXYXY<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}

// Hand-written so that TSpace needs no serde bounds.
impl<TSpace> Serialize for BBoxXYXY<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BBoxXYXY", 4)?;
        state.serialize_field("x1", &self.min.x)?;
        state.serialize_field("y1", &self.min.y)?;
        state.serialize_field("x2", &self.max.x)?;
        state.serialize_field("y2", &self.max.y)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYXY<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct BoxData {
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
        }
        let data = BoxData::deserialize(deserializer)?;
        Ok(BBoxXYXY::from_xyxy(data.x1, data.y1, data.x2, data.y2))
    }
}

impl BBoxXYXY<Pixel> {
    /// Pulls the low corner up to the origin and the high corner down to the
    /// image size.
    ///
    /// Only `x1`/`y1` are raised and only `x2`/`y2` are lowered, so a box lying
    /// wholly outside the image comes back inverted instead of collapsed.
    pub fn clamp_to_image(&self, image_width: u32, image_height: u32) -> Self {
        Self::from_xyxy(
            self.min.x.max(0.0),
            self.min.y.max(0.0),
            self.max.x.min(image_width as f64),
            self.max.y.min(image_height as f64),
        )
    }

    pub fn to_normalized(&self, image_width: u32, image_height: u32) -> BBoxXYXY<Normalized> {
        let (w, h) = (image_width as f64, image_height as f64);
        BBoxXYXY::from_xyxy(
            self.min.x / w,
            self.min.y / h,
            self.max.x / w,
            self.max.y / h,
        )
    }
}

impl BBoxXYXY<Normalized> {
    pub fn to_pixel(&self, width: u32, height: u32) -> BBoxXYXY<Pixel> {
        let (w, h) = (width as f64, height as f64);
        BBoxXYXY::from_xyxy(
            self.min.x * w,
            self.min.y * h,
            self.max.x * w,
            self.max.y * h,
        )
    }
}

/// Derives the clamped pixel box of a 2-point line or 4-point quadrilateral.
///
/// Returns `None` for any other point count; callers decide which counts
/// they accept and how to report the rest. Rotation of a quadrilateral is
/// discarded. The result may be inverted (see [`BBoxXYXY::clamp_to_image`]).
pub fn parse_points_to_box(
    points: &[Coord<Pixel>],
    image_width: u32,
    image_height: u32,
) -> Option<BBoxXYXY<Pixel>> {
    if points.len() != 2 && points.len() != 4 {
        return None;
    }
    BBoxXYXY::enclosing(points).map(|bbox| bbox.clamp_to_image(image_width, image_height))
}

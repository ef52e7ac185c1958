//! Annotation points tagged with their coordinate space.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A 2D point with a type-level marker for the coordinate space.
///
/// On the wire a point is a two-element array `[x, y]`, which is how
/// labelme stores polygon vertices.
#[derive(Clone, Copy, PartialEq)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Coord<TSpace> {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// Returns true if neither component is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<TSpace> std::fmt::Debug for Coord<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<TSpace> From<[f64; 2]> for Coord<TSpace> {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

// Hand-written so that TSpace needs no serde bounds.
impl<TSpace> Serialize for Coord<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de, TSpace> Deserialize<'de> for Coord<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pair = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Coord::from(pair))
    }
}

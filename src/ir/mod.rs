//! Annotation representation shared by the box extractor and the line
//! rasterizer.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Pixel and normalized coordinates are distinct types,
//!    so a box cannot be rescaled to a mask without passing through the unit
//!    square first.
//!
//! 2. **Canonical Format**: Every shape reduces to one XYXY box in source
//!    pixel space via [`parse_points_to_box`].
//!
//! 3. **Permissive Construction**: Inverted boxes and out-of-range points
//!    are representable, so validation can report them instead of the
//!    reader refusing the file.
//!
//! # Example
//!
//! ```
//! use tablemask::ir::{parse_points_to_box, AnnotationFile, BBoxXYXY, Pixel, Shape};
//!
//! let annotation = AnnotationFile::new("page.png", 1000, 1000)
//!     .with_shape(Shape::line(990.0, 505.0, 10.0, 500.0));
//!
//! let shape = &annotation.shapes[0];
//! let bbox = parse_points_to_box(&shape.points, annotation.image_width, annotation.image_height);
//! assert_eq!(bbox, Some(BBoxXYXY::<Pixel>::from_xyxy(10.0, 500.0, 990.0, 505.0)));
//! ```

mod bbox;
mod coord;
pub mod io_labelme_json;
mod model;
mod space;

pub use bbox::{parse_points_to_box, BBoxXYXY};
pub use coord::Coord;
pub use model::{AnnotationFile, Shape};
pub use space::{Normalized, Pixel};

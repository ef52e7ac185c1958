//! Detection manifest lines.
//!
//! A manifest line names one image followed by its table boxes:
//!
//! ```text
//! images/page_001.png 10,500,990,505,0 15,10,80,60,0
//! ```
//!
//! Each box is `x1,y1,x2,y2,class` with the class fixed at 0 (table). Which
//! file a line goes into and how image paths are rewritten is up to the
//! caller.

use std::fmt;

use super::BoxExtraction;
use crate::ir::{BBoxXYXY, Pixel};

/// Class label written for every table box.
pub const TABLE_CLASS_ID: u32 = 0;

/// One image's line in a detection manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct ManifestEntry {
    pub image: String,
    pub boxes: Vec<BBoxXYXY<Pixel>>,
}

impl ManifestEntry {
    pub fn new(image: impl Into<String>, boxes: Vec<BBoxXYXY<Pixel>>) -> Self {
        Self {
            image: image.into(),
            boxes,
        }
    }

    /// Builds an entry from an extraction, naming the image explicitly.
    pub fn from_extraction(image: impl Into<String>, extraction: &BoxExtraction) -> Self {
        Self::new(image, extraction.boxes.clone())
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.image)?;
        for bbox in &self.boxes {
            write!(
                f,
                " {},{},{},{},{}",
                bbox.x1(),
                bbox.y1(),
                bbox.x2(),
                bbox.y2(),
                TABLE_CLASS_ID
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_boxes_with_class_zero() {
        let entry = ManifestEntry::new(
            "images/page_001.png",
            vec![
                BBoxXYXY::from_xyxy(10.0, 500.0, 990.0, 505.0),
                BBoxXYXY::from_xyxy(15.5, 10.0, 80.0, 60.25),
            ],
        );
        assert_eq!(
            entry.to_string(),
            "images/page_001.png 10,500,990,505,0 15.5,10,80,60.25,0"
        );
    }

    #[test]
    fn image_without_boxes_is_just_the_path() {
        let entry = ManifestEntry::new("images/blank.png", vec![]);
        assert_eq!(entry.to_string(), "images/blank.png");
    }
}

//! Crack augmentation: erase a random stretch of a ruling line in the
//! source image by pasting the background just beside it over the line.

use image::{ImageBuffer, Pixel as ImagePixel};
use rand::Rng;
use serde::Serialize;

use crate::ir::{BBoxXYXY, Pixel};

/// Chance that any one line is cracked.
pub const CRACK_SHAPE_PROBABILITY: f64 = 0.5;

/// A line box thinner than this (in source pixels) along one axis is
/// treated as a rule along the other axis.
pub const THIN_LINE_MAX_EXTENT: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CrackAxis {
    /// Rows of a vertical rule were overwritten.
    Vertical,
    /// Columns of a horizontal rule were overwritten.
    Horizontal,
}

/// One erased stretch.
///
/// For a vertical crack, columns `line - 1` and `line` were overwritten over
/// rows `start..end`; a horizontal crack swaps rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CrackedSpan {
    pub axis: CrackAxis,
    pub line: i64,
    pub start: i64,
    pub end: i64,
}

impl CrackedSpan {
    /// Returns true if `(x, y)` lies inside the overwritten band.
    pub fn covers(&self, x: u32, y: u32) -> bool {
        let (across, along) = match self.axis {
            CrackAxis::Vertical => (x as i64, y as i64),
            CrackAxis::Horizontal => (y as i64, x as i64),
        };
        (across == self.line.saturating_sub(1) || across == self.line)
            && (self.start..self.end).contains(&along)
    }
}

/// Cracks the line described by `bbox` in place, if it is thin enough along
/// one axis.
///
/// Two distinct positions are drawn from the integer range spanned by the
/// line; the stretch between them is overwritten with the pixels two to
/// three positions further along the perpendicular axis. Lines shorter
/// than two pixels and boxes thick in both directions are left alone, as
/// are band pixels whose source or destination falls outside the buffer.
pub fn crack_line<P, R>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    bbox: &BBoxXYXY<Pixel>,
    rng: &mut R,
) -> Option<CrackedSpan>
where
    P: ImagePixel,
    R: Rng + ?Sized,
{
    let axis = if bbox.width() < THIN_LINE_MAX_EXTENT {
        CrackAxis::Vertical
    } else if bbox.height() < THIN_LINE_MAX_EXTENT {
        CrackAxis::Horizontal
    } else {
        return None;
    };

    let (lo, hi, line) = match axis {
        CrackAxis::Vertical => (bbox.y1(), bbox.y2(), (bbox.x1() + bbox.x2()) / 2.0),
        CrackAxis::Horizontal => (bbox.x1(), bbox.x2(), (bbox.y1() + bbox.y2()) / 2.0),
    };
    // Float-to-int casts saturate, so far-off boxes end up at the i64 limits.
    let (lo, hi, line) = (lo as i64, hi as i64, line as i64);
    let len = hi.saturating_sub(lo);
    if len < 2 {
        return None;
    }

    let picks = rand::seq::index::sample(rng, len as usize, 2);
    let (a, b) = (lo + picks.index(0) as i64, lo + picks.index(1) as i64);
    let span = CrackedSpan {
        axis,
        line,
        start: a.min(b),
        end: a.max(b),
    };

    paste_band(image, &span);
    Some(span)
}

/// Copies `line + 2, line + 3` onto `line - 1, line` across the span.
fn paste_band<P: ImagePixel>(image: &mut ImageBuffer<P, Vec<P::Subpixel>>, span: &CrackedSpan) {
    let (width, height) = (image.width() as i64, image.height() as i64);
    let (across_len, along_len) = match span.axis {
        CrackAxis::Vertical => (width, height),
        CrackAxis::Horizontal => (height, width),
    };
    let inside = |v: i64, len: i64| (0..len).contains(&v);

    for along in span.start.max(0)..span.end.min(along_len) {
        for offset in 0..2 {
            let dst = span.line.saturating_sub(1).saturating_add(offset);
            let src = span.line.saturating_add(2 + offset);
            if !inside(dst, across_len) || !inside(src, across_len) {
                continue;
            }
            let (dst_xy, src_xy) = match span.axis {
                CrackAxis::Vertical => ((dst, along), (src, along)),
                CrackAxis::Horizontal => ((along, dst), (along, src)),
            };
            let value = *image.get_pixel(src_xy.0 as u32, src_xy.1 as u32);
            image.put_pixel(dst_xy.0 as u32, dst_xy.1 as u32, value);
        }
    }
}

/// Fuzz-only entrypoint: cracks an arbitrary, possibly inverted or
/// off-image box on a small gray page.
#[cfg(feature = "fuzzing")]
pub fn fuzz_crack_line(width: u8, height: u8, coords: [f64; 4], seed: u64) {
    use rand::SeedableRng;

    let mut image = image::GrayImage::new(u32::from(width), u32::from(height));
    let bbox = BBoxXYXY::<Pixel>::from_xyxy(coords[0], coords[1], coords[2], coords[3])
        .clamp_to_image(u32::from(width).max(1), u32::from(height).max(1));
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let _ = crack_line(&mut image, &bbox, &mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const LINE: Rgb<u8> = Rgb([0, 0, 0]);
    const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

    /// White page with a black 2px vertical rule at columns 19..=20.
    fn page_with_vertical_rule() -> RgbImage {
        RgbImage::from_fn(40, 60, |x, _| if x == 19 || x == 20 { LINE } else { PAPER })
    }

    #[test]
    fn vertical_crack_erases_rule_within_span() {
        let mut image = page_with_vertical_rule();
        let bbox = BBoxXYXY::from_xyxy(20.0, 5.0, 21.0, 55.0);
        let mut rng = StdRng::seed_from_u64(7);

        let span = crack_line(&mut image, &bbox, &mut rng).expect("thin vertical line");
        assert_eq!(span.axis, CrackAxis::Vertical);
        assert_eq!(span.line, 20);
        assert!(span.start >= 5 && span.end < 55 && span.start < span.end);

        let original = page_with_vertical_rule();
        for (x, y, pixel) in image.enumerate_pixels() {
            if span.covers(x, y) {
                assert_eq!(*pixel, PAPER, "({x}, {y}) should be erased");
            } else {
                assert_eq!(pixel, original.get_pixel(x, y), "({x}, {y}) should be untouched");
            }
        }
    }

    #[test]
    fn horizontal_crack_uses_rows_below() {
        let mut image = RgbImage::from_fn(60, 30, |_, y| match y {
            9 | 10 => LINE,
            12 | 13 => Rgb([200, 10, 10]),
            _ => PAPER,
        });
        let bbox = BBoxXYXY::from_xyxy(3.0, 10.0, 57.0, 11.0);
        let mut rng = StdRng::seed_from_u64(11);

        let span = crack_line(&mut image, &bbox, &mut rng).expect("thin horizontal line");
        assert_eq!(span.axis, CrackAxis::Horizontal);
        assert_eq!(span.line, 10);
        for x in span.start..span.end {
            assert_eq!(*image.get_pixel(x as u32, 9), Rgb([200, 10, 10]));
            assert_eq!(*image.get_pixel(x as u32, 10), Rgb([200, 10, 10]));
        }
    }

    #[test]
    fn thick_box_is_not_cracked() {
        let mut image = page_with_vertical_rule();
        let bbox = BBoxXYXY::from_xyxy(5.0, 5.0, 30.0, 30.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(crack_line(&mut image, &bbox, &mut rng).is_none());
        assert_eq!(image, page_with_vertical_rule());
    }

    #[test]
    fn one_pixel_line_is_not_cracked() {
        let mut image = page_with_vertical_rule();
        let bbox = BBoxXYXY::from_xyxy(20.0, 5.0, 20.0, 6.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(crack_line(&mut image, &bbox, &mut rng).is_none());
    }

    #[test]
    fn band_at_right_edge_is_clipped() {
        let mut image = RgbImage::from_fn(10, 20, |x, _| if x >= 8 { LINE } else { PAPER });
        let bbox = BBoxXYXY::from_xyxy(9.0, 0.0, 9.0, 20.0);
        let mut rng = StdRng::seed_from_u64(3);

        // Sources at columns 11 and 12 do not exist, so nothing is pasted.
        let span = crack_line(&mut image, &bbox, &mut rng).expect("thin line");
        assert_eq!(span.line, 9);
        assert!(image.pixels().filter(|p| **p == LINE).count() == 40);
    }

    #[test]
    fn far_off_boxes_leave_page_alone() {
        let boxes = [
            BBoxXYXY::from_xyxy(-1e300, 10.0, -1e300, 50.0).clamp_to_image(40, 60),
            BBoxXYXY::from_xyxy(1e300, 10.0, 1e300, 50.0).clamp_to_image(40, 60),
            BBoxXYXY::from_xyxy(5.0, -1e300, 30.0, -1e300).clamp_to_image(40, 60),
            BBoxXYXY::from_xyxy(-1e300, -1e300, -1e300, 1e300),
        ];
        for (i, bbox) in boxes.iter().enumerate() {
            let mut image = page_with_vertical_rule();
            let mut rng = StdRng::seed_from_u64(i as u64);

            let span = crack_line(&mut image, bbox, &mut rng).expect("thin far-off line");
            assert!(span.line == i64::MIN || span.line == i64::MAX, "box {i}: {span:?}");
            assert_eq!(image, page_with_vertical_rule(), "box {i}");
            assert!(image.enumerate_pixels().all(|(x, y, _)| !span.covers(x, y)));
        }
    }
}

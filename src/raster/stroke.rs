//! Stroke thickness policy and thick-line drawing.

use image::{GrayImage, Luma};
use imageproc::drawing::BresenhamLineIter;

/// Intensity written for every stroke pixel before binarization.
pub const STROKE_INTENSITY: u8 = 255;

/// Drawn pixels above this become 1 when the masks are binarized.
pub const BINARY_THRESHOLD: u8 = 127;

/// Stroke width for a mask of the given height.
///
/// Fixed buckets: below 1000 rows 3px, above 2000 rows 8px, otherwise 5px.
pub fn stroke_thickness(target_height: u32) -> u32 {
    if target_height < 1000 {
        3
    } else if target_height > 2000 {
        8
    } else {
        5
    }
}

/// Endpoints are bounded to this magnitude before clipping so that infinite
/// or huge rescaled coordinates keep the clip arithmetic finite.
const COORD_LIMIT: f64 = 1e15;

/// Draws a constant-intensity segment exactly `thickness` pixels wide with
/// round caps, clipped to the mask.
///
/// The segment is first clipped to the mask grown by the brush reach, so the
/// work done is bounded by the mask size however far off the endpoints are.
pub(crate) fn draw_thick_line(
    mask: &mut GrayImage,
    start: (f64, f64),
    end: (f64, f64),
    thickness: u32,
) {
    let bound = |(x, y): (f64, f64)| {
        (
            x.clamp(-COORD_LIMIT, COORD_LIMIT),
            y.clamp(-COORD_LIMIT, COORD_LIMIT),
        )
    };
    let (start, end) = (bound(start), bound(end));
    if !(start.0.is_finite() && start.1.is_finite() && end.0.is_finite() && end.1.is_finite()) {
        return;
    }

    let brush = brush_offsets(thickness);
    let reach = f64::from(thickness / 2 + 1);
    let window = (
        (-reach, -reach),
        (f64::from(mask.width()) - 1.0 + reach, f64::from(mask.height()) - 1.0 + reach),
    );
    let Some((start, end)) = clip_segment(start, end, window.0, window.1) else {
        return;
    };

    let color = Luma([STROKE_INTENSITY]);
    let (width, height) = (i64::from(mask.width()), i64::from(mask.height()));
    let line = BresenhamLineIter::new(
        (start.0 as f32, start.1 as f32),
        (end.0 as f32, end.1 as f32),
    );
    for (cx, cy) in line {
        for &(dx, dy) in &brush {
            let (x, y) = (i64::from(cx) + dx, i64::from(cy) + dy);
            if (0..width).contains(&x) && (0..height).contains(&y) {
                mask.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Pixel offsets of a disk exactly `thickness` pixels across.
///
/// Odd disks are centred on the pixel, even ones on its upper-left corner.
fn brush_offsets(thickness: u32) -> Vec<(i64, i64)> {
    let t = i64::from(thickness.max(1));
    let centre = if t % 2 == 0 { 0.5 } else { 0.0 };
    let radius_sq = (t as f64 / 2.0).powi(2);
    let (lo, hi) = (-(t / 2), (t - 1) / 2);

    let mut offsets = Vec::new();
    for dy in lo..=hi {
        for dx in lo..=hi {
            let (fx, fy) = (dx as f64 + centre, dy as f64 + centre);
            if fx * fx + fy * fy <= radius_sq {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Liang-Barsky clip of `start..end` to the rectangle `min..=max`.
///
/// A segment lying wholly inside comes back unchanged.
fn clip_segment(
    start: (f64, f64),
    end: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [
        (-dx, start.0 - min.0),
        (dx, max.0 - start.0),
        (-dy, start.1 - min.1),
        (dy, max.1 - start.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        if t == 0.0 {
            start
        } else if t == 1.0 {
            end
        } else {
            (start.0 + t * dx, start.1 + t * dy)
        }
    };
    Some((at(t0), at(t1)))
}

/// Maps every pixel to exactly 0 or 1.
pub(crate) fn binarize(mask: &mut GrayImage) {
    for pixel in mask.pixels_mut() {
        pixel.0[0] = u8::from(pixel.0[0] > BINARY_THRESHOLD);
    }
}

#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use tablemask::ir::{AnnotationFile, Coord, Pixel, Shape};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Image sizes small enough to rasterize quickly.
pub fn arb_image_size() -> impl Strategy<Value = (u32, u32)> {
    (16u32..=160, 16u32..=160)
}

/// A point that may fall somewhat outside a `width` x `height` image.
pub fn arb_point(width: u32, height: u32) -> impl Strategy<Value = Coord<Pixel>> {
    let (w, h) = (width as f64, height as f64);
    (-0.25 * w..1.25 * w, -0.25 * h..1.25 * h).prop_map(|(x, y)| Coord::new(x, y))
}

/// A rule that stays inside the image and is either near-horizontal or
/// near-vertical, spanning at least half the image.
pub fn arb_rule(width: u32, height: u32) -> impl Strategy<Value = Shape> {
    let (w, h) = (width as f64, height as f64);
    let horizontal = (0.0..w / 4.0, w * 0.75..w, 2.0..h - 2.0, 0.0..1.0)
        .prop_map(move |(x1, x2, y, dy): (f64, f64, f64, f64)| {
            Shape::line(x1, y, x2, (y + dy).min(h - 1.0))
        });
    let vertical = (0.0..h / 4.0, h * 0.75..h, 2.0..w - 2.0, 0.0..1.0)
        .prop_map(move |(y1, y2, x, dx): (f64, f64, f64, f64)| {
            Shape::line(x, y1, (x + dx).min(w - 1.0), y2)
        });
    prop_oneof![horizontal, vertical]
}

/// A sized annotation holding only 2-point line shapes.
pub fn arb_line_annotation() -> impl Strategy<Value = AnnotationFile> {
    arb_image_size().prop_flat_map(|(w, h)| {
        let rules = prop::collection::vec(arb_rule(w, h), 0..6);
        let strays = prop::collection::vec(
            (arb_point(w, h), arb_point(w, h))
                .prop_map(|(a, b)| Shape::new(vec![a, b])),
            0..3,
        );
        (rules, strays).prop_map(move |(rules, strays)| {
            let mut annotation = AnnotationFile::new("page.png", w, h);
            annotation.shapes.extend(rules);
            annotation.shapes.extend(strays);
            annotation
        })
    })
}

/// A sized annotation of 2- and 4-point shapes for box extraction.
pub fn arb_box_annotation() -> impl Strategy<Value = AnnotationFile> {
    arb_image_size().prop_flat_map(|(w, h)| {
        let two = prop::collection::vec(arb_point(w, h), 2);
        let four = prop::collection::vec(arb_point(w, h), 4);
        let shape = prop_oneof![two, four].prop_map(Shape::new);
        prop::collection::vec(shape, 0..8).prop_map(move |shapes| {
            let mut annotation = AnnotationFile::new("page.png", w, h);
            annotation.shapes = shapes;
            annotation
        })
    })
}

use proptest::prelude::*;
use tablemask::extract::extract_boxes;
use tablemask::ir::io_labelme_json::from_annotation_str;
use tablemask::ir::{parse_points_to_box, Coord, Pixel};

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn boxes_stay_inside_the_image(
        annotation in proptest_helpers::arb_box_annotation()
    ) {
        let extraction = extract_boxes(&annotation).expect("2/4-point shapes");
        prop_assert_eq!(extraction.boxes.len(), annotation.shapes.len());

        let (w, h) = (annotation.image_width as f64, annotation.image_height as f64);
        for bbox in &extraction.boxes {
            prop_assert!(bbox.x1() >= 0.0 && bbox.y1() >= 0.0);
            prop_assert!(bbox.x2() <= w && bbox.y2() <= h);
        }
    }

    #[test]
    fn in_bounds_points_give_enclosing_ordered_box(
        points in prop::collection::vec((0.0f64..640.0, 0.0f64..480.0), 2),
        quad in any::<bool>(),
        extra in prop::collection::vec((0.0f64..640.0, 0.0f64..480.0), 2),
    ) {
        let mut points: Vec<Coord<Pixel>> = points.into_iter().map(|(x, y)| Coord::new(x, y)).collect();
        if quad {
            points.extend(extra.into_iter().map(|(x, y)| Coord::new(x, y)));
        }

        let bbox = parse_points_to_box(&points, 640, 480).expect("2 or 4 points");
        prop_assert!(bbox.is_ordered());
        for p in &points {
            prop_assert!(bbox.x1() <= p.x && p.x <= bbox.x2());
            prop_assert!(bbox.y1() <= p.y && p.y <= bbox.y2());
        }
        prop_assert!(points.iter().any(|p| p.x == bbox.x1()));
        prop_assert!(points.iter().any(|p| p.y == bbox.y2()));
    }

    #[test]
    fn extent_spans_box_tops_and_bottoms(
        annotation in proptest_helpers::arb_box_annotation()
    ) {
        let extraction = extract_boxes(&annotation).expect("2/4-point shapes");
        match extraction.extent {
            None => prop_assert!(extraction.boxes.is_empty()),
            Some(extent) => {
                let min_y1 = extraction.boxes.iter().map(|b| b.y1()).fold(f64::INFINITY, f64::min);
                let max_y2 = extraction.boxes.iter().map(|b| b.y2()).fold(0.0, f64::max);
                prop_assert_eq!(extent.min_y, min_y1);
                prop_assert_eq!(extent.max_y, max_y2);
            }
        }
    }

    #[test]
    fn reader_keeps_shape_order(
        ys in prop::collection::vec(0u32..480, 0..8)
    ) {
        let shapes: Vec<String> = ys
            .iter()
            .map(|y| format!(r#"{{"label":"1","points":[[0,{y}],[640,{y}]],"flags":{{}}}}"#))
            .collect();
        let json = format!(
            r#"{{"version":"4.5.6","shapes":[{}],"imagePath":"p.png","imageData":null,"imageHeight":480,"imageWidth":640}}"#,
            shapes.join(",")
        );

        let annotation = from_annotation_str(&json).expect("read annotation");
        prop_assert_eq!(annotation.shapes.len(), ys.len());
        for (shape, y) in annotation.shapes.iter().zip(&ys) {
            prop_assert_eq!(shape.points[0].y, *y as f64);
            prop_assert_eq!(shape.points[1].x, 640.0);
        }
    }
}

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

/// A light page with dark rules at the given rows and columns.
pub fn ruled_page(width: u32, height: u32, rows: &[u32], cols: &[u32]) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if rows.contains(&y) || cols.contains(&x) {
            Rgb([20, 20, 20])
        } else {
            Rgb([240, 240, 240])
        }
    })
}

pub fn write_png(path: &Path, image: &RgbImage) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    image.save(path).expect("write png file");
}

pub fn read_gray(path: &Path) -> image::GrayImage {
    image::open(path).expect("open mask").to_luma8()
}

//! Fuzz target for labelme annotation parsing.
//!
//! Feeds arbitrary bytes to the reader and, when they parse, runs box
//! extraction on the result, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tablemask::extract::extract_boxes;
use tablemask::ir::io_labelme_json::from_annotation_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(annotation) = from_annotation_slice(data) {
        let _ = extract_boxes(&annotation);
    }
});

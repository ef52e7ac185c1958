//! Fuzz target for crack augmentation.
//!
//! Decodes a page size, four box coordinates and a seed from the input and
//! cracks that box, checking that out-of-page bands never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tablemask::raster::crack::fuzz_crack_line;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 + 4 * 8 + 8 {
        return;
    }

    let (width, height) = (data[0], data[1]);
    let mut coords = [0.0f64; 4];
    for (i, coord) in coords.iter_mut().enumerate() {
        let start = 2 + i * 8;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&data[start..start + 8]);
        *coord = f64::from_le_bytes(raw);
    }
    let mut raw_seed = [0u8; 8];
    raw_seed.copy_from_slice(&data[34..42]);

    fuzz_crack_line(width, height, coords, u64::from_le_bytes(raw_seed));
});

#![allow(dead_code)]

use rover_pilot::image::RgbFrame;

pub const FLOOR: u8 = 210;
pub const TAPE: u8 = 25;

/// Light floor with a dark vertical tape of half-width `half_w` at column `cx`.
pub fn tape_rgb(width: usize, height: usize, cx: f32, half_w: f32) -> RgbFrame {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            let v = if (x as f32 - cx).abs() <= half_w { TAPE } else { FLOOR };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    RgbFrame::new(width, height, data).expect("buffer matches dimensions")
}

pub fn uniform_rgb(width: usize, height: usize, value: u8) -> RgbFrame {
    RgbFrame::new(width, height, vec![value; width * height * 3])
        .expect("buffer matches dimensions")
}

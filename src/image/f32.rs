//! Owned float luma buffer, tightly packed row by row.
//!
//! Holds smoothed luma in `[0, 1]` for the tracker and baseline-normalized
//! walk patches, roughly `[-1, 1]`, for the classifiers.
use super::traits::{ImageView, ImageViewMut};
use super::u8::ImageU8;

#[derive(Clone, Debug)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Rescale an 8-bit view into `[0, 1]`, dropping any row padding.
    pub fn from_u8(gray: ImageU8<'_>) -> Self {
        let data = (0..gray.h)
            .flat_map(|y| gray.row(y).iter().map(|&px| px as f32 / 255.0))
            .collect();
        Self {
            w: gray.w,
            h: gray.h,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.w + x] = v;
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    fn width(&self) -> usize {
        self.w
    }

    fn height(&self) -> usize {
        self.h
    }

    fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.w..(y + 1) * self.w]
    }
}

impl ImageViewMut for ImageF32 {
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }
}

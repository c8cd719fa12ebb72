//! Smoothing and downsampling used ahead of thresholding and classification.
//!
//! - `blur`: separable convolution with clamped borders (Gaussian by default).
//! - `downsample_area`: box-average reduction to an arbitrary smaller size,
//!   which is how full captures become the small walk patches.
use super::{GrayFrame, ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Apply `filter` horizontally then vertically. Border samples clamp.
pub fn blur(filter: &dyn SeparableFilter, inp: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    let (w, h) = (inp.w, inp.h);
    if taps.is_empty() || w == 0 || h == 0 {
        return inp.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let src = inp.row(y);
        let dst = tmp.row_mut(y);
        for (x, out) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let xx = (x as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                acc += t * src[xx];
            }
            *out = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let yy = (y as isize + k as isize - radius).clamp(0, h as isize - 1) as usize;
                acc += t * tmp.get(x, yy);
            }
            out.set(x, y, acc);
        }
    }
    out
}

/// Reduce `src` to `out_w × out_h` by averaging the source pixels that fall
/// into each destination cell. Upscaling is not supported; when the target is
/// larger than the source along an axis, cells degenerate to nearest sampling.
pub fn downsample_area(src: &GrayFrame, out_w: usize, out_h: usize) -> GrayFrame {
    let (sw, sh) = (src.width(), src.height());
    if out_w == 0 || out_h == 0 || sw == 0 || sh == 0 {
        return GrayFrame::filled(out_w, out_h, 0);
    }

    let mut data = Vec::with_capacity(out_w * out_h);
    for oy in 0..out_h {
        let y0 = oy * sh / out_h;
        let y1 = ((oy + 1) * sh / out_h).max(y0 + 1).min(sh);
        for ox in 0..out_w {
            let x0 = ox * sw / out_w;
            let x1 = ((ox + 1) * sw / out_w).max(x0 + 1).min(sw);
            let mut sum = 0u32;
            for y in y0..y1 {
                for x in x0..x1 {
                    sum += src.get(x, y) as u32;
                }
            }
            let count = ((y1 - y0) * (x1 - x0)) as u32;
            data.push(((sum + count / 2) / count) as u8);
        }
    }
    GrayFrame::from_raw_parts(out_w, out_h, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_preserves_constant_image() {
        let mut img = ImageF32::new(8, 6);
        img.data.iter_mut().for_each(|v| *v = 0.4);
        let out = blur(&GAUSSIAN_5TAP, &img);
        assert!(out.data.iter().all(|v| (v - 0.4).abs() < 1e-5));
    }

    #[test]
    fn downsample_averages_blocks() {
        // Left half 0, right half 200 → two output columns.
        let mut data = vec![0u8; 8 * 4];
        for y in 0..4 {
            for x in 4..8 {
                data[y * 8 + x] = 200;
            }
        }
        let src = GrayFrame::new(8, 4, data).unwrap();
        let small = downsample_area(&src, 2, 1);
        assert_eq!(small.as_raw(), &[0, 200]);
    }
}

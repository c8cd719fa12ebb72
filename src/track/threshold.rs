//! Intensity split between line and floor pixels.
//!
//! Otsu's method picks the level maximising between-class variance of the
//! 256-bin histogram. The class means come along for free and feed the
//! contrast gate that rejects frames without a line.

use super::options::Polarity;
use crate::image::{ImageF32, ImageView};
use serde::Serialize;

/// Result of splitting the ROI histogram in two classes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdSplit {
    /// Pixels at or below this level form the dark class.
    pub level: u8,
    pub dark_mean: f32,
    pub light_mean: f32,
    pub dark_count: usize,
    pub light_count: usize,
}

impl ThresholdSplit {
    pub fn contrast(&self) -> f32 {
        if self.dark_count == 0 || self.light_count == 0 {
            0.0
        } else {
            self.light_mean - self.dark_mean
        }
    }
}

#[inline]
pub(super) fn quantize(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

pub(super) fn histogram(img: &ImageF32) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for y in 0..img.height() {
        for &v in img.row(y) {
            hist[quantize(v) as usize] += 1;
        }
    }
    hist
}

/// Split `hist` at `level`, reporting both class means.
pub(super) fn split_at(hist: &[u32; 256], level: u8) -> ThresholdSplit {
    let mut dark_count = 0u64;
    let mut dark_sum = 0u64;
    let mut light_count = 0u64;
    let mut light_sum = 0u64;
    for (v, &n) in hist.iter().enumerate() {
        let n = n as u64;
        if v <= level as usize {
            dark_count += n;
            dark_sum += n * v as u64;
        } else {
            light_count += n;
            light_sum += n * v as u64;
        }
    }
    let mean = |sum: u64, count: u64| {
        if count == 0 {
            0.0
        } else {
            (sum as f64 / count as f64) as f32
        }
    };
    ThresholdSplit {
        level,
        dark_mean: mean(dark_sum, dark_count),
        light_mean: mean(light_sum, light_count),
        dark_count: dark_count as usize,
        light_count: light_count as usize,
    }
}

/// Otsu's threshold. `None` when the histogram has a single populated level.
pub(super) fn otsu(hist: &[u32; 256]) -> Option<ThresholdSplit> {
    let total: u64 = hist.iter().map(|&n| n as u64).sum();
    if total == 0 {
        return None;
    }
    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(v, &n)| v as f64 * n as f64)
        .sum();

    let mut best_level = None;
    let mut best_var = 0.0f64;
    let mut w_dark = 0.0f64;
    let mut sum_dark = 0.0f64;
    for (v, &n) in hist.iter().enumerate().take(255) {
        w_dark += n as f64;
        sum_dark += v as f64 * n as f64;
        let w_light = total as f64 - w_dark;
        if w_dark == 0.0 || w_light == 0.0 {
            continue;
        }
        let mean_dark = sum_dark / w_dark;
        let mean_light = (sum_all - sum_dark) / w_light;
        let between = w_dark * w_light * (mean_dark - mean_light).powi(2);
        if between > best_var {
            best_var = between;
            best_level = Some(v as u8);
        }
    }
    best_level.map(|level| split_at(hist, level))
}

/// Binary mask (1 = line) of `img` against `level`.
pub(super) fn line_mask(img: &ImageF32, level: u8, polarity: Polarity) -> Vec<u8> {
    let mut mask = Vec::with_capacity(img.w * img.h);
    for y in 0..img.height() {
        for &v in img.row(y) {
            let q = quantize(v);
            let is_line = match polarity {
                Polarity::Dark => q <= level,
                Polarity::Light => q > level,
            };
            mask.push(is_line as u8);
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otsu_separates_bimodal_histogram() {
        let mut hist = [0u32; 256];
        hist[30] = 100;
        hist[200] = 300;
        let split = otsu(&hist).expect("two populated levels");
        assert!(split.level >= 30 && split.level < 200);
        assert_eq!(split.dark_count, 100);
        assert_eq!(split.light_count, 300);
        assert!((split.contrast() - 170.0).abs() < 1e-3);
    }

    #[test]
    fn otsu_gives_up_on_flat_histogram() {
        let mut hist = [0u32; 256];
        hist[128] = 500;
        assert!(otsu(&hist).is_none());
    }
}

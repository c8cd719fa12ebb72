use super::options::TrackOptions;
use super::region_accumulator::RegionAccumulator;
use super::threshold::{histogram, line_mask, otsu, split_at, ThresholdSplit};
use super::SteeringVector;
use crate::angle::heading_deg;
use crate::diagnostics::TimingBreakdown;
use crate::image::resample::{blur, GAUSSIAN_5TAP};
use crate::image::{ImageF32, ImageU8};
use log::debug;
use nalgebra::{Matrix2, SymmetricEigen};
use serde::Serialize;
use std::time::Instant;

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Why a frame produced no steering vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    EmptyFrame,
    /// The histogram holds a single intensity.
    Uniform,
    LowContrast,
    TooFewPixels,
    /// The region covers more of the ROI than `max_fill` allows.
    Oversized,
    Degenerate,
}

/// Everything learned about one frame on the way to a steering vector.
#[derive(Clone, Debug)]
pub(crate) struct Analysis {
    pub roi_top: usize,
    pub roi_height: usize,
    pub split: Option<ThresholdSplit>,
    pub region_pixels: usize,
    pub elongation: Option<f32>,
    pub outcome: Result<SteeringVector, Rejection>,
}

impl Analysis {
    fn rejected(roi_top: usize, roi: &ImageU8<'_>, why: Rejection) -> Self {
        Self {
            roi_top,
            roi_height: roi.h,
            split: None,
            region_pixels: 0,
            elongation: None,
            outcome: Err(why),
        }
    }
}

/// Isolate the line in the lower band of `gray` and fit its axis.
pub(crate) fn analyse(
    gray: ImageU8<'_>,
    opts: &TrackOptions,
    timings: &mut TimingBreakdown,
) -> Analysis {
    let roi_top = opts.roi_start(gray.h);
    let roi = gray.rows_from(roi_top);
    if roi.w == 0 || roi.h == 0 {
        return Analysis::rejected(roi_top, &roi, Rejection::EmptyFrame);
    }

    let t = Instant::now();
    let luma = ImageF32::from_u8(roi);
    let smooth = if opts.blur {
        blur(&GAUSSIAN_5TAP, &luma)
    } else {
        luma
    };
    timings.lap("smooth", t);

    let t = Instant::now();
    let hist = histogram(&smooth);
    let split = match opts.fixed_threshold {
        Some(level) => Some(split_at(&hist, level)),
        None => otsu(&hist),
    };
    let Some(split) = split else {
        timings.lap("threshold", t);
        return Analysis::rejected(roi_top, &roi, Rejection::Uniform);
    };
    let mut analysis = Analysis {
        split: Some(split),
        ..Analysis::rejected(roi_top, &roi, Rejection::LowContrast)
    };
    if split.contrast() < opts.min_contrast {
        timings.lap("threshold", t);
        debug!(
            "line rejected: contrast {:.1} < {:.1}",
            split.contrast(),
            opts.min_contrast
        );
        return analysis;
    }
    let mask = line_mask(&smooth, split.level, opts.polarity);
    timings.lap("threshold", t);

    let t = Instant::now();
    let region = largest_component(&mask, smooth.w, smooth.h);
    timings.lap("components", t);
    analysis.region_pixels = region.len();
    if region.len() < opts.min_pixels.max(1) {
        debug!(
            "line rejected: region of {} px < {}",
            region.len(),
            opts.min_pixels
        );
        analysis.outcome = Err(Rejection::TooFewPixels);
        return analysis;
    }
    let fill = region.len() as f32 / (smooth.w * smooth.h) as f32;
    if fill > opts.max_fill {
        debug!(
            "line rejected: region fills {:.0}% of the ROI",
            fill * 100.0
        );
        analysis.outcome = Err(Rejection::Oversized);
        return analysis;
    }

    let t = Instant::now();
    let fit = fit_line(&region, smooth.w, roi_top, opts);
    timings.lap("fit", t);
    match fit {
        Ok((vector, elongation)) => {
            analysis.elongation = Some(elongation);
            analysis.outcome = Ok(vector);
        }
        Err(why) => {
            debug!("line rejected: {why:?}");
            analysis.outcome = Err(why);
        }
    }
    analysis
}

/// 8-connected labelling that keeps only the largest region.
fn largest_component(mask: &[u8], width: usize, height: usize) -> RegionAccumulator {
    let n = width * height;
    let mut visited = vec![0u8; n];
    let mut stack = Vec::with_capacity(64);
    let mut best = RegionAccumulator::with_capacity(0);
    let mut current = RegionAccumulator::with_capacity(128);

    for seed in 0..n {
        if mask[seed] == 0 || visited[seed] != 0 {
            continue;
        }
        current.reset();
        visited[seed] = 1;
        stack.push(seed);
        while let Some(idx) = stack.pop() {
            let x = idx % width;
            let y = idx / width;
            current.push(idx, x, y);
            for (dx, dy) in NEIGH_OFFSETS {
                let xn = x as isize + dx;
                let yn = y as isize + dy;
                if xn < 0 || yn < 0 || xn >= width as isize || yn >= height as isize {
                    continue;
                }
                let neighbor = yn as usize * width + xn as usize;
                if mask[neighbor] == 0 || visited[neighbor] != 0 {
                    continue;
                }
                visited[neighbor] = 1;
                stack.push(neighbor);
            }
        }
        if current.len() > best.len() {
            std::mem::swap(&mut best, &mut current);
        }
    }
    best
}

/// PCA fit of the region's principal axis.
fn fit_line(
    region: &RegionAccumulator,
    width: usize,
    roi_top: usize,
    opts: &TrackOptions,
) -> Result<(SteeringVector, f32), Rejection> {
    let m = region.moments().ok_or(Rejection::TooFewPixels)?;
    if !m.cx.is_finite() || !m.cy.is_finite() {
        return Err(Rejection::Degenerate);
    }

    let cov = Matrix2::new(m.cxx, m.cxy, m.cxy, m.cyy);
    let eig = SymmetricEigen::new(cov);
    let (vmax, lambda_max, lambda_min) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        (eig.eigenvectors.column(0), eig.eigenvalues[0], eig.eigenvalues[1])
    } else {
        (eig.eigenvectors.column(1), eig.eigenvalues[1], eig.eigenvalues[0])
    };
    if !lambda_max.is_finite() || lambda_max <= 0.0 {
        return Err(Rejection::Degenerate);
    }

    let mut tx = vmax[0];
    let mut ty = vmax[1];
    let norm = (tx * tx + ty * ty).sqrt();
    if !norm.is_finite() || norm < 1e-9 {
        return Err(Rejection::Degenerate);
    }
    tx /= norm;
    ty /= norm;

    let mut smin = f64::INFINITY;
    let mut smax = f64::NEG_INFINITY;
    for &idx in &region.indices {
        let x = (idx % width) as f64;
        let y = (idx / width) as f64;
        let s = (x - m.cx) * tx + (y - m.cy) * ty;
        smin = smin.min(s);
        smax = smax.max(s);
    }
    // Pixel centres span one pixel less than the covered extent.
    let extent = smax - smin + 1.0;
    if !extent.is_finite() || extent < opts.min_extent_px as f64 {
        return Err(Rejection::Degenerate);
    }

    let elongation: f64 = if lambda_min > 1e-9 {
        (lambda_max / lambda_min).sqrt().min(1e6)
    } else {
        1e6
    };
    let elongation = elongation as f32;
    if elongation < opts.min_elongation {
        return Err(Rejection::Degenerate);
    }

    let half = (width as f64 - 1.0) * 0.5;
    let shift = m.cx - half;
    let shift_ratio = if half > 0.0 {
        (shift / half).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let vector = SteeringVector {
        angle: heading_deg(tx as f32, ty as f32),
        shift: shift as f32,
        shift_ratio: shift_ratio as f32,
        centroid: [m.cx as f32, (m.cy + roi_top as f64) as f32],
    };
    Ok((vector, elongation))
}

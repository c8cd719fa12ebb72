use serde::{Deserialize, Serialize};

/// Which side of the threshold the tracked line lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Dark tape on a light floor.
    Dark,
    /// Light tape on a dark floor.
    Light,
}

/// Options controlling line isolation and the line fit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackOptions {
    /// Fraction of the frame height skipped from the top. The remaining lower
    /// band is the region of interest closest to the robot.
    pub roi_top: f32,
    pub polarity: Polarity,
    /// Fixed luma threshold. `None` selects Otsu's threshold per frame.
    pub fixed_threshold: Option<u8>,
    /// Minimum gap between the mean luma of line and floor pixels (0..255).
    pub min_contrast: f32,
    /// Smallest connected line region accepted, in pixels.
    pub min_pixels: usize,
    /// Largest share of the region of interest the line may cover. Bigger
    /// regions are shading or floor texture split in two, not tape.
    pub max_fill: f32,
    /// Smallest extent of the region along its fitted axis, in pixels.
    pub min_extent_px: f32,
    /// Minimum ratio between the spreads along and across the fitted axis.
    pub min_elongation: f32,
    /// Smooth with a 5-tap Gaussian before thresholding.
    pub blur: bool,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            roi_top: 0.3,
            polarity: Polarity::Dark,
            fixed_threshold: None,
            min_contrast: 40.0,
            min_pixels: 30,
            max_fill: 0.35,
            min_extent_px: 10.0,
            min_elongation: 1.2,
            blur: true,
        }
    }
}

impl TrackOptions {
    /// First row of the region of interest for a frame of `height` rows.
    pub fn roi_start(&self, height: usize) -> usize {
        let frac = if self.roi_top.is_finite() {
            self.roi_top.clamp(0.0, 1.0)
        } else {
            0.0
        };
        ((height as f32 * frac).floor() as usize).min(height.saturating_sub(1))
    }
}

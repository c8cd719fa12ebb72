//! Line-following vector extraction.
//!
//! Given one camera frame, find the tracked tape and describe how it sits
//! relative to the robot's forward axis. The pipeline performs:
//!
//! - Region of interest: only the lower band of the frame (closest to the
//!   wheels) is analysed; see `TrackOptions::roi_top`.
//! - Smoothing with the separable 5-tap Gaussian to suppress sensor noise
//!   and floor texture.
//! - Thresholding: Otsu's split of the ROI histogram, or a fixed level. The
//!   two class means double as a contrast test, so a frame without tape
//!   yields no line instead of a split through noise.
//! - Connected components: 8-connected labelling of the line mask, keeping
//!   the largest region.
//! - PCA line fitting: the region's coordinate moments give a 2x2 covariance
//!   matrix whose principal eigenvector is the tape's axis. Regions that are
//!   too short along that axis, or not elongated, are degenerate.
//!
//! Output is a `SteeringVector` whose `angle` lives in `[0, 180)` degrees
//! with 90 meaning the tape runs straight ahead, and whose `shift` is the
//! centroid's horizontal offset from the frame centre (positive = right).
//! Absence of a line is `None`, never a made-up angle.
//!
//! Extraction is a pure function of the frame and options.

pub(crate) mod extractor;
mod options;
mod region_accumulator;
mod threshold;


pub use extractor::Rejection;
pub use options::{Polarity, TrackOptions};
pub use threshold::ThresholdSplit;

use crate::diagnostics::{TimingBreakdown, TrackReport};
use crate::error::RobotError;
use crate::image::io::load_rgb_frame;
use crate::image::{GrayFrame, RgbFrame};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Orientation and lateral offset of the tracked line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteeringVector {
    /// Degrees in [0, 180); 90 = aligned with forward travel, below 90 the
    /// line leans to the right, above 90 to the left.
    pub angle: f32,
    /// Centroid x minus the frame's centre column, in pixels.
    pub shift: f32,
    /// `shift` divided by half the frame width, in [-1, 1].
    pub shift_ratio: f32,
    /// Line centroid in full-frame pixel coordinates.
    pub centroid: [f32; 2],
}

/// Stateless extractor configured once with `TrackOptions`.
#[derive(Clone, Debug, Default)]
pub struct LineTracker {
    options: TrackOptions,
}

impl LineTracker {
    pub fn new(options: TrackOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TrackOptions {
        &self.options
    }

    pub fn extract(&self, frame: &RgbFrame) -> Option<SteeringVector> {
        self.extract_gray(&frame.to_gray())
    }

    pub fn extract_gray(&self, gray: &GrayFrame) -> Option<SteeringVector> {
        let mut timings = TimingBreakdown::default();
        extractor::analyse(gray.as_view(), &self.options, &mut timings)
            .outcome
            .ok()
    }

    /// Load the image at `path` and extract. Unreadable data is an error;
    /// a readable image without a line is `Ok(None)`.
    pub fn extract_file(&self, path: &Path) -> Result<Option<SteeringVector>, RobotError> {
        let frame = load_rgb_frame(path)?;
        Ok(self.extract(&frame))
    }

    /// Extract and keep every intermediate figure for tooling.
    pub fn extract_with_report(&self, gray: &GrayFrame) -> TrackReport {
        let start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let analysis = extractor::analyse(gray.as_view(), &self.options, &mut timings);
        timings.finish(start);
        TrackReport::from_analysis(gray.width(), gray.height(), analysis, timings)
    }
}

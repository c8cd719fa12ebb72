use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Thresholds of the zone heuristic. Deviations are in baseline-normalized
/// units, i.e. gray levels divided by 255.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneParams {
    /// Fraction of the patch height, from the top, that is ignored (far field).
    pub horizon: f32,
    /// A pixel counts as obstructed when it deviates from the baseline by more.
    pub deviation: f32,
    /// A zone is clear when at most this fraction of it is obstructed.
    pub clear_fraction: f32,
    /// A zone is blocked when at least this fraction of it is obstructed.
    pub blocked_fraction: f32,
    /// Minimum difference between the side zones to prefer one of them.
    pub side_margin: f32,
}

impl Default for ZoneParams {
    fn default() -> Self {
        Self {
            horizon: 0.4,
            deviation: 0.18,
            clear_fraction: 0.15,
            blocked_fraction: 0.6,
            side_margin: 0.1,
        }
    }
}

/// Walk decision settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParams {
    /// Patch size fed to the zone heuristic. A loaded model dictates its own.
    pub patch_width: usize,
    pub patch_height: usize,
    /// Patches whose RMS deviation from the baseline (gray levels) falls
    /// below this carry no usable signal and yield no action.
    pub min_contrast: f32,
    /// Classifier confidence required to act.
    pub min_confidence: f32,
    pub zone: ZoneParams,
    /// Optional JSON model for the MLP classifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            patch_width: 32,
            patch_height: 24,
            min_contrast: 4.0,
            min_confidence: 0.5,
            zone: ZoneParams::default(),
            model: None,
        }
    }
}

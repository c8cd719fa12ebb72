use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Steering tolerances and loop settings for line following.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowParams {
    /// Heading error in degrees tolerated before turning.
    pub angle_tolerance_deg: f32,
    /// Tolerated `shift_ratio` magnitude before turning toward the line.
    pub shift_tolerance: f32,
    pub pulse_ms: u64,
    /// Consecutive cycles without a line before giving up.
    pub lost_line_cycles: usize,
    /// Delete each photo after extraction, when the source created it.
    pub remove_photos: bool,
}

impl Default for FollowParams {
    fn default() -> Self {
        Self {
            angle_tolerance_deg: 15.0,
            shift_tolerance: 0.25,
            pulse_ms: 200,
            lost_line_cycles: 3,
            remove_photos: false,
        }
    }
}

impl FollowParams {
    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Walk loop settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkSettings {
    /// Where downsampled patches and cycle reports are written.
    pub diagnostics_dir: PathBuf,
    pub pulse_ms: u64,
    /// Weight of the newest frame in the baseline moving average.
    pub baseline_alpha: f32,
    /// Readings closer than this force `Stop`.
    pub min_distance_cm: f32,
    /// Give up after this many undecided cycles in a row; 0 never gives up.
    pub max_unsure_cycles: usize,
    pub save_reports: bool,
    /// Delete each photo once the next one replaces it.
    pub remove_photos: bool,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            diagnostics_dir: PathBuf::from("walk_diagnostics"),
            pulse_ms: 200,
            baseline_alpha: 0.1,
            min_distance_cm: 20.0,
            max_unsure_cycles: 5,
            save_reports: true,
            remove_photos: false,
        }
    }
}

impl WalkSettings {
    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

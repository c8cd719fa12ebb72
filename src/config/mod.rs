//! JSON configuration for the robot binary and the demo tools.
//!
//! Every section is optional; missing fields fall back to their defaults.
pub mod demo;

use crate::camera::CameraConfig;
use crate::error::RobotError;
use crate::follow::FollowParams;
use crate::track::TrackOptions;
use crate::walk::WalkParams;
use crate::walker::WalkSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub camera: CameraConfig,
    /// Serve photos from this directory instead of running the camera.
    pub replay_dir: Option<PathBuf>,
    pub track: TrackOptions,
    pub follow: FollowParams,
    pub walk: WalkParams,
    pub walker: WalkSettings,
    /// Known floor brightness; calibrated on the first frame when absent.
    pub baseline: Option<f32>,
}

pub fn load_config(path: &Path) -> Result<RobotConfig, RobotError> {
    read_json(path)
}

pub(crate) fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, RobotError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        RobotError::Configuration(format!("failed to read config {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        RobotError::Configuration(format!("failed to parse config {}: {e}", path.display()))
    })
}

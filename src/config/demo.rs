//! Configs of the `track_demo` and `walk_demo` tools.
use super::read_json;
use crate::error::RobotError;
use crate::track::TrackOptions;
use crate::walk::WalkParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct TrackDemoConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub track: TrackOptions,
    pub output: TrackDemoOutput,
}

#[derive(Debug, Deserialize)]
pub struct TrackDemoOutput {
    pub result_json: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct WalkDemoConfig {
    pub input: PathBuf,
    /// Floor brightness; the input's mean brightness when absent.
    #[serde(default)]
    pub baseline: Option<f32>,
    #[serde(default)]
    pub walk: WalkParams,
    pub output: WalkDemoOutput,
}

#[derive(Debug, Deserialize)]
pub struct WalkDemoOutput {
    pub patch_image: PathBuf,
    pub result_json: PathBuf,
}

pub fn load_track_demo(path: &Path) -> Result<TrackDemoConfig, RobotError> {
    read_json(path)
}

pub fn load_walk_demo(path: &Path) -> Result<WalkDemoConfig, RobotError> {
    read_json(path)
}

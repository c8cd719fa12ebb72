use super::TimingBreakdown;
use crate::walk::{action_code, WalkAction};
use serde::Serialize;
use std::path::PathBuf;

/// Record of one walk cycle, written next to the saved patch.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkReport {
    pub cycle: usize,
    pub photo: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<PathBuf>,
    pub baseline: f32,
    pub patch_mean: f32,
    pub patch_std: f32,
    /// RMS deviation from `baseline` in gray levels.
    pub signal: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<WalkAction>,
    /// Integer code of `action`, `-1` when undecided.
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_cm: Option<f32>,
    pub timings: TimingBreakdown,
}

impl WalkReport {
    pub fn new(cycle: usize, photo: PathBuf, baseline: f32) -> Self {
        Self {
            cycle,
            photo,
            patch: None,
            baseline,
            patch_mean: 0.0,
            patch_std: 0.0,
            signal: 0.0,
            confidence: None,
            action: None,
            code: action_code(None),
            distance_cm: None,
            timings: TimingBreakdown::default(),
        }
    }

    pub fn set_action(&mut self, action: Option<WalkAction>) {
        self.action = action;
        self.code = action_code(action);
    }

    pub fn summary(&self) -> String {
        let action = match self.action {
            Some(a) => format!("{a:?}"),
            None => "undecided".to_string(),
        };
        format!(
            "cycle {} {action} (code {}) baseline={:.1} mean={:.1} std={:.1} signal={:.1}",
            self.cycle, self.code, self.baseline, self.patch_mean, self.patch_std, self.signal
        )
    }
}

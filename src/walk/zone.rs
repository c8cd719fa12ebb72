//! Embeddable heuristic classifier.
//!
//! The near field (below `horizon`) is cut into left, centre and right thirds.
//! Each third is scored by the fraction of pixels that deviate from the floor
//! baseline; the floor itself normalizes to about zero.

use super::engine::{PatchClassifier, Scored};
use super::options::ZoneParams;
use super::WalkAction;
use crate::image::{ImageF32, ImageView};

/// Obstructed fraction per zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneScores {
    pub left: f32,
    pub centre: f32,
    pub right: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ZoneClassifier {
    params: ZoneParams,
}

impl ZoneClassifier {
    pub fn new(params: ZoneParams) -> Self {
        Self { params }
    }

    pub fn scores(&self, patch: &ImageF32) -> Option<ZoneScores> {
        let (w, h) = (patch.width(), patch.height());
        if w < 3 || h == 0 {
            return None;
        }
        let top = ((h as f32 * self.params.horizon.clamp(0.0, 1.0)) as usize).min(h - 1);
        let bounds = [0, w / 3, 2 * w / 3, w];
        let mut obstructed = [0usize; 3];
        let mut total = [0usize; 3];
        for y in top..h {
            let row = patch.row(y);
            for zone in 0..3 {
                for &v in &row[bounds[zone]..bounds[zone + 1]] {
                    total[zone] += 1;
                    if v.abs() > self.params.deviation {
                        obstructed[zone] += 1;
                    }
                }
            }
        }
        let frac = |z: usize| {
            if total[z] == 0 {
                1.0
            } else {
                obstructed[z] as f32 / total[z] as f32
            }
        };
        Some(ZoneScores {
            left: frac(0),
            centre: frac(1),
            right: frac(2),
        })
    }

    pub(crate) fn decide(&self, s: ZoneScores) -> Option<Scored> {
        let p = &self.params;
        if s.centre <= p.clear_fraction {
            return Some(Scored::new(WalkAction::GoStraight, 1.0 - s.centre));
        }
        if s.left >= p.blocked_fraction
            && s.centre >= p.blocked_fraction
            && s.right >= p.blocked_fraction
        {
            return Some(Scored::new(
                WalkAction::Stop,
                s.left.min(s.centre).min(s.right),
            ));
        }
        if (s.left - s.right).abs() < p.side_margin {
            return None;
        }
        let (action, freer) = if s.left < s.right {
            (WalkAction::TurnLeft, s.left)
        } else {
            (WalkAction::TurnRight, s.right)
        };
        Some(Scored::new(action, 1.0 - freer))
    }
}

impl PatchClassifier for ZoneClassifier {
    fn name(&self) -> &str {
        "zone"
    }

    fn classify(&self, patch: &ImageF32) -> Option<Scored> {
        self.scores(patch).and_then(|s| self.decide(s))
    }
}

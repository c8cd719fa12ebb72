use super::mlp::MlpClassifier;
use super::options::WalkParams;
use super::zone::ZoneClassifier;
use super::WalkAction;
use crate::error::RobotError;
use crate::image::resample::downsample_area;
use crate::image::{intensity_stats, GrayFrame, ImageF32, ImageView, IntensityStats};
use log::debug;
use std::path::Path;

/// Action proposed by a classifier together with its confidence in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scored {
    pub action: WalkAction,
    pub confidence: f32,
}

impl Scored {
    pub fn new(action: WalkAction, confidence: f32) -> Self {
        Self {
            action,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Maps a baseline-normalized patch to an action.
///
/// Returning `None` means the classifier has no preference.
pub trait PatchClassifier {
    fn name(&self) -> &str;

    fn classify(&self, patch: &ImageF32) -> Option<Scored>;

    /// Fixed input size `(width, height)` if the classifier requires one.
    fn input_size(&self) -> Option<(usize, usize)> {
        None
    }
}

/// Full account of one decision, kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub stats: IntensityStats,
    /// RMS deviation of the patch from the baseline, in gray levels.
    pub signal: f32,
    pub scored: Option<Scored>,
    pub decision: Option<WalkAction>,
}

/// Turns a small gray patch into a walk action.
pub struct WalkDecisionEngine {
    classifier: Box<dyn PatchClassifier>,
    params: WalkParams,
}

impl std::fmt::Debug for WalkDecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkDecisionEngine")
            .field("classifier", &self.classifier.name())
            .field("params", &self.params)
            .finish()
    }
}

impl WalkDecisionEngine {
    pub fn new(classifier: Box<dyn PatchClassifier>, params: WalkParams) -> Self {
        Self { classifier, params }
    }

    /// Engine backed by the built-in zone heuristic.
    pub fn zone(params: WalkParams) -> Self {
        let classifier = ZoneClassifier::new(params.zone);
        Self::new(Box::new(classifier), params)
    }

    /// Engine backed by the MLP stored at `path`.
    pub fn from_model_file(path: &Path, params: WalkParams) -> Result<Self, RobotError> {
        let classifier = MlpClassifier::load(path)?;
        Ok(Self::new(Box::new(classifier), params))
    }

    /// Pick the classifier named by `params.model`, defaulting to zones.
    pub fn from_params(params: WalkParams) -> Result<Self, RobotError> {
        match params.model.clone() {
            Some(path) => Self::from_model_file(&path, params),
            None => Ok(Self::zone(params)),
        }
    }

    pub fn params(&self) -> &WalkParams {
        &self.params
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Patch size callers should downsample to.
    pub fn patch_size(&self) -> (usize, usize) {
        self.classifier
            .input_size()
            .unwrap_or((self.params.patch_width, self.params.patch_height))
    }

    /// Decide on an action for `patch` given the floor `baseline` brightness.
    /// `None` means no decision: too little signal, or the classifier is unsure.
    pub fn classify(&self, patch: &GrayFrame, baseline: f32) -> Option<WalkAction> {
        self.evaluate(patch, baseline).decision
    }

    pub fn evaluate(&self, patch: &GrayFrame, baseline: f32) -> Evaluation {
        let stats = intensity_stats(&patch.as_view());
        let mut eval = Evaluation {
            stats,
            signal: 0.0,
            scored: None,
            decision: None,
        };
        if patch.as_view().is_empty() || !baseline.is_finite() {
            return eval;
        }
        eval.signal = baseline_deviation(&stats, baseline);
        if eval.signal < self.params.min_contrast {
            debug!(
                "walk: patch deviates {:.2} from baseline {:.1}, below {:.2}",
                eval.signal, baseline, self.params.min_contrast
            );
            return eval;
        }

        let (w, h) = self.patch_size();
        let resized;
        let patch = if patch.width() == w && patch.height() == h {
            patch
        } else {
            resized = downsample_area(patch, w, h);
            &resized
        };
        let normalized = normalize(patch, baseline);

        eval.scored = self.classifier.classify(&normalized);
        eval.decision = match eval.scored {
            Some(s) if s.confidence >= self.params.min_confidence => Some(s.action),
            Some(s) => {
                debug!(
                    "walk: {:?} at {:.2} below confidence {:.2}",
                    s.action, s.confidence, self.params.min_confidence
                );
                None
            }
            None => None,
        };
        eval
    }
}

/// RMS of `p - baseline` over the patch: spread and offset both count.
fn baseline_deviation(stats: &IntensityStats, baseline: f32) -> f32 {
    let offset = stats.mean - baseline;
    (stats.std_dev * stats.std_dev + offset * offset).sqrt()
}

/// `(p - baseline) / 255` per pixel.
pub fn normalize(patch: &GrayFrame, baseline: f32) -> ImageF32 {
    let mut out = ImageF32::new(patch.width(), patch.height());
    for (dst, &px) in out.data.iter_mut().zip(patch.as_raw()) {
        *dst = (px as f32 - baseline) / 255.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(WalkAction, f32);

    impl PatchClassifier for Always {
        fn name(&self) -> &str {
            "always"
        }
        fn classify(&self, _patch: &ImageF32) -> Option<Scored> {
            Some(Scored::new(self.0, self.1))
        }
        fn input_size(&self) -> Option<(usize, usize)> {
            Some((4, 3))
        }
    }

    /// Floor of `floor` with the columns in `cols` at `obstacle`.
    fn patch(w: usize, h: usize, floor: u8, obstacle: u8, cols: std::ops::Range<usize>) -> GrayFrame {
        let mut data = vec![floor; w * h];
        for y in 0..h {
            for x in cols.clone() {
                data[y * w + x] = obstacle;
            }
        }
        GrayFrame::new(w, h, data).unwrap()
    }

    #[test]
    fn uniform_patch_has_no_decision() {
        let engine = WalkDecisionEngine::zone(WalkParams::default());
        let flat = GrayFrame::filled(32, 24, 130);
        assert_eq!(engine.classify(&flat, 130.0), None);
        assert_eq!(super::super::action_code(engine.classify(&flat, 130.0)), -1);
    }

    #[test]
    fn uniform_patch_far_from_baseline_stops() {
        let engine = WalkDecisionEngine::zone(WalkParams::default());
        let wall = GrayFrame::filled(32, 24, 20);
        let eval = engine.evaluate(&wall, 130.0);
        assert!((eval.signal - 110.0).abs() < 1e-3, "signal={}", eval.signal);
        assert_eq!(eval.decision, Some(WalkAction::Stop));
    }

    #[test]
    fn small_offset_from_baseline_is_noise() {
        let engine = WalkDecisionEngine::zone(WalkParams::default());
        let flat = GrayFrame::filled(32, 24, 132);
        assert_eq!(engine.classify(&flat, 130.0), None);
    }

    #[test]
    fn obstacle_in_centre_turns_away() {
        let engine = WalkDecisionEngine::zone(WalkParams::default());
        // Centre and right blocked, left clear.
        let p = patch(32, 24, 120, 20, 10..32);
        assert_eq!(engine.classify(&p, 120.0), Some(WalkAction::TurnLeft));
        let p = patch(32, 24, 120, 20, 0..20);
        assert_eq!(engine.classify(&p, 120.0), Some(WalkAction::TurnRight));
    }

    #[test]
    fn obstacle_at_side_keeps_straight() {
        let engine = WalkDecisionEngine::zone(WalkParams::default());
        let p = patch(32, 24, 120, 250, 0..8);
        assert_eq!(engine.classify(&p, 120.0), Some(WalkAction::GoStraight));
    }

    #[test]
    fn low_confidence_is_withheld() {
        let params = WalkParams {
            min_confidence: 0.8,
            ..Default::default()
        };
        let p = patch(8, 6, 100, 10, 0..4);
        let unsure = WalkDecisionEngine::new(Box::new(Always(WalkAction::Stop, 0.6)), params.clone());
        assert_eq!(unsure.classify(&p, 100.0), None);
        let sure = WalkDecisionEngine::new(Box::new(Always(WalkAction::Stop, 0.9)), params);
        assert_eq!(sure.classify(&p, 100.0), Some(WalkAction::Stop));
    }

    #[test]
    fn patch_size_follows_classifier() {
        let engine =
            WalkDecisionEngine::new(Box::new(Always(WalkAction::Stop, 1.0)), WalkParams::default());
        assert_eq!(engine.patch_size(), (4, 3));
        assert_eq!(
            WalkDecisionEngine::zone(WalkParams::default()).patch_size(),
            (32, 24)
        );
    }

    #[test]
    fn normalize_centres_on_baseline() {
        let p = GrayFrame::new(2, 1, vec![100, 202]).unwrap();
        let n = normalize(&p, 100.0);
        assert_eq!(n.data[0], 0.0);
        assert!((n.data[1] - 0.4).abs() < 1e-6);
    }
}

//! Small fully connected network stored as JSON.
//!
//! ```json
//! {
//!   "inputWidth": 16, "inputHeight": 12,
//!   "layers": [ { "weights": [[...], ...], "bias": [...] }, ... ]
//! }
//! ```
//!
//! `weights` is row-major, one row per output unit. Hidden layers use `tanh`,
//! the last layer is a softmax over the actions listed in `actions`
//! (default: `turn_left`, `turn_right`, `go_straight`, `stop`).

use super::engine::{PatchClassifier, Scored};
use super::WalkAction;
use crate::error::RobotError;
use crate::image::{ImageF32, ImageView};
use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayerSpec {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelSpec {
    input_width: usize,
    input_height: usize,
    layers: Vec<LayerSpec>,
    #[serde(default = "default_actions")]
    actions: Vec<WalkAction>,
}

fn default_actions() -> Vec<WalkAction> {
    WalkAction::ALL.to_vec()
}

#[derive(Clone, Debug)]
struct Dense {
    weights: DMatrix<f32>,
    bias: DVector<f32>,
}

#[derive(Clone, Debug)]
pub struct MlpClassifier {
    input_width: usize,
    input_height: usize,
    layers: Vec<Dense>,
    actions: Vec<WalkAction>,
}

impl MlpClassifier {
    /// Read and validate a model file. Any problem is a configuration error,
    /// since the walker cannot run without its model.
    pub fn load(path: &Path) -> Result<Self, RobotError> {
        let file = File::open(path).map_err(|e| {
            RobotError::Configuration(format!("cannot open model {}: {e}", path.display()))
        })?;
        let spec: ModelSpec = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            RobotError::Configuration(format!("invalid model {}: {e}", path.display()))
        })?;
        let model = Self::from_spec(spec).map_err(|reason| {
            RobotError::Configuration(format!("invalid model {}: {reason}", path.display()))
        })?;
        debug!(
            "loaded walk model {} ({}x{} input, {} layers)",
            path.display(),
            model.input_width,
            model.input_height,
            model.layers.len()
        );
        Ok(model)
    }

    /// Parse a model from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RobotError> {
        let spec: ModelSpec = serde_json::from_str(json)
            .map_err(|e| RobotError::Configuration(format!("invalid model: {e}")))?;
        Self::from_spec(spec)
            .map_err(|reason| RobotError::Configuration(format!("invalid model: {reason}")))
    }

    fn from_spec(spec: ModelSpec) -> Result<Self, String> {
        let mut inputs = spec.input_width * spec.input_height;
        if inputs == 0 {
            return Err("input size must be non-zero".to_string());
        }
        if spec.layers.is_empty() {
            return Err("model has no layers".to_string());
        }
        let mut layers = Vec::with_capacity(spec.layers.len());
        for (i, layer) in spec.layers.into_iter().enumerate() {
            let outputs = layer.weights.len();
            if outputs == 0 || layer.bias.len() != outputs {
                return Err(format!(
                    "layer {i}: {} weight rows vs {} biases",
                    outputs,
                    layer.bias.len()
                ));
            }
            if let Some(row) = layer.weights.iter().find(|row| row.len() != inputs) {
                return Err(format!(
                    "layer {i}: row of {} weights, expected {inputs}",
                    row.len()
                ));
            }
            let weights = DMatrix::from_fn(outputs, inputs, |r, c| layer.weights[r][c]);
            layers.push(Dense {
                weights,
                bias: DVector::from_vec(layer.bias),
            });
            inputs = outputs;
        }
        if inputs != spec.actions.len() {
            return Err(format!(
                "last layer has {inputs} outputs for {} actions",
                spec.actions.len()
            ));
        }
        Ok(Self {
            input_width: spec.input_width,
            input_height: spec.input_height,
            layers,
            actions: spec.actions,
        })
    }

    /// Softmax probabilities per action, or `None` on a size mismatch.
    pub fn probabilities(&self, patch: &ImageF32) -> Option<Vec<f32>> {
        if patch.width() != self.input_width || patch.height() != self.input_height {
            return None;
        }
        let mut input = Vec::with_capacity(self.input_width * self.input_height);
        for y in 0..patch.height() {
            input.extend_from_slice(patch.row(y));
        }
        let mut x = DVector::from_vec(input);
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            x = &layer.weights * x + &layer.bias;
            if i < last {
                x.apply(|v| *v = v.tanh());
            }
        }
        let max = x.max();
        x.apply(|v| *v = (*v - max).exp());
        let sum = x.sum();
        if !sum.is_finite() || sum <= 0.0 {
            return None;
        }
        Some(x.iter().map(|v| v / sum).collect())
    }
}

impl PatchClassifier for MlpClassifier {
    fn name(&self) -> &str {
        "mlp"
    }

    fn classify(&self, patch: &ImageF32) -> Option<Scored> {
        let probs = self.probabilities(patch)?;
        let (best, p) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))?;
        Some(Scored::new(self.actions[best], p))
    }

    fn input_size(&self) -> Option<(usize, usize)> {
        Some((self.input_width, self.input_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x1 input, single linear layer: left pixel votes `turn_left`,
    /// right pixel votes `turn_right`.
    const TINY: &str = r#"{
        "inputWidth": 2, "inputHeight": 1,
        "layers": [{
            "weights": [[8, 0], [0, 8], [0, 0], [-8, -8]],
            "bias": [0, 0, 0, 0]
        }]
    }"#;

    fn patch(a: f32, b: f32) -> ImageF32 {
        let mut p = ImageF32::new(2, 1);
        p.set(0, 0, a);
        p.set(1, 0, b);
        p
    }

    #[test]
    fn picks_strongest_output() {
        let mlp = MlpClassifier::from_json(TINY).unwrap();
        assert_eq!(mlp.input_size(), Some((2, 1)));
        let s = mlp.classify(&patch(1.0, 0.0)).unwrap();
        assert_eq!(s.action, WalkAction::TurnLeft);
        assert!(s.confidence > 0.9);
        assert_eq!(
            mlp.classify(&patch(0.0, 1.0)).unwrap().action,
            WalkAction::TurnRight
        );
    }

    #[test]
    fn probabilities_sum_to_one() {
        let mlp = MlpClassifier::from_json(TINY).unwrap();
        let probs = mlp.probabilities(&patch(0.3, -0.2)).unwrap();
        assert_eq!(probs.len(), 4);
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn wrong_patch_size_is_no_opinion() {
        let mlp = MlpClassifier::from_json(TINY).unwrap();
        assert!(mlp.classify(&ImageF32::new(3, 1)).is_none());
    }

    #[test]
    fn shape_mismatch_is_configuration_error() {
        let bad = r#"{"inputWidth": 2, "inputHeight": 1,
            "layers": [{"weights": [[1, 2, 3]], "bias": [0]}]}"#;
        assert!(matches!(
            MlpClassifier::from_json(bad),
            Err(RobotError::Configuration(_))
        ));
    }

    #[test]
    fn missing_model_file_is_configuration_error() {
        let path = std::env::temp_dir().join("rover_pilot_no_such_model.json");
        assert!(matches!(
            MlpClassifier::load(&path),
            Err(RobotError::Configuration(_))
        ));
    }
}

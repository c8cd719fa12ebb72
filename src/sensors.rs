//! Auxiliary collaborators: the ultrasonic range finder and object detectors.
//!
//! Detector internals (Haar cascades, DNNs, classifiers) live elsewhere; only
//! the "file in, labelled detections out" contract is modelled.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Distance sensor facing forward.
pub trait RangeSensor {
    /// Distance to the nearest obstacle in centimetres. `None` when the
    /// reading failed (the hardware reports negative values in that case).
    fn distance(&mut self) -> Option<f32>;
}

/// Map a raw sensor reading to the contract above.
pub fn reading_from_raw(raw: f32) -> Option<f32> {
    (raw.is_finite() && raw >= 0.0).then_some(raw)
}

/// One labelled detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Class label, e.g. "cat" or "laptop".
    #[serde(alias = "item")]
    pub name: String,
    #[serde(default)]
    pub confidence: f32,
}

pub trait ObjectDetector {
    /// Detect objects in the image at `path`. `None` or an empty list both
    /// mean nothing was found.
    fn detect_file(&self, path: &Path) -> Option<Vec<Detection>>;
}

/// True when any detection's label contains `label` (case-insensitive).
pub fn contains_label(detections: &[Detection], label: &str) -> bool {
    let needle = label.to_ascii_lowercase();
    detections
        .iter()
        .any(|d| d.name.to_ascii_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector(Vec<Detection>);

    impl ObjectDetector for FixedDetector {
        fn detect_file(&self, _path: &Path) -> Option<Vec<Detection>> {
            (!self.0.is_empty()).then(|| self.0.clone())
        }
    }

    #[test]
    fn negative_readings_mean_failure() {
        assert_eq!(reading_from_raw(-1.0), None);
        assert_eq!(reading_from_raw(f32::NAN), None);
        assert_eq!(reading_from_raw(42.5), Some(42.5));
    }

    #[test]
    fn label_lookup_matches_substrings() {
        let det = FixedDetector(vec![
            Detection {
                name: "cat".into(),
                confidence: 0.9,
            },
            Detection {
                name: "notebook, laptop".into(),
                confidence: 0.7,
            },
        ]);
        let found = det.detect_file(Path::new("detect.jpg")).unwrap();
        assert!(contains_label(&found, "cat"));
        assert!(contains_label(&found, "Laptop"));
        assert!(!contains_label(&found, "dog"));
        assert!(FixedDetector(vec![])
            .detect_file(Path::new("x.jpg"))
            .is_none());
    }

    #[test]
    fn classifier_items_deserialize_as_names() {
        let det: Detection = serde_json::from_str(r#"{"item": "laptop"}"#).unwrap();
        assert_eq!(det.name, "laptop");
        assert_eq!(det.confidence, 0.0);
    }
}

use super::TimingBreakdown;
use crate::track::{Rejection, SteeringVector, ThresholdSplit};
use serde::Serialize;

/// Detailed account of one line extraction.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackReport {
    pub width: usize,
    pub height: usize,
    pub roi_top: usize,
    pub roi_height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<ThresholdSplit>,
    pub region_pixels: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elongation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<SteeringVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
    pub timings: TimingBreakdown,
}

impl TrackReport {
    pub(crate) fn from_analysis(
        width: usize,
        height: usize,
        analysis: crate::track::extractor::Analysis,
        timings: TimingBreakdown,
    ) -> Self {
        let (vector, rejection) = match analysis.outcome {
            Ok(v) => (Some(v), None),
            Err(why) => (None, Some(why)),
        };
        Self {
            width,
            height,
            roi_top: analysis.roi_top,
            roi_height: analysis.roi_height,
            split: analysis.split,
            region_pixels: analysis.region_pixels,
            elongation: analysis.elongation,
            vector,
            rejection,
            timings,
        }
    }

    /// One-line human summary for the demo tools.
    pub fn summary(&self) -> String {
        match (&self.vector, &self.rejection) {
            (Some(v), _) => format!(
                "angle={:.1} shift={:.1}px ({:+.2}) region={}px",
                v.angle, v.shift, v.shift_ratio, self.region_pixels
            ),
            (None, Some(why)) => format!("no line ({why:?}) region={}px", self.region_pixels),
            (None, None) => "no line".to_string(),
        }
    }
}

use serde::Serialize;
use std::time::Instant;

/// Wall-clock cost of one pipeline stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: &'static str,
    pub elapsed_ms: f64,
}

/// Stage costs in execution order plus the cycle total.
///
/// A stage that ran twice (e.g. an early exit after a partial stage) is
/// listed twice; `stage_ms` reports the first entry.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record the time since `since` under `label`.
    pub fn lap(&mut self, label: &'static str, since: Instant) {
        self.stages.push(StageTiming {
            label,
            elapsed_ms: elapsed_ms(since),
        });
    }

    /// Close the breakdown with the time since `start`.
    pub fn finish(&mut self, start: Instant) {
        self.total_ms = elapsed_ms(start);
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1e3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_keep_order_and_total_covers_them() {
        let start = Instant::now();
        let mut timings = TimingBreakdown::default();
        timings.lap("capture", start);
        timings.lap("classify", Instant::now());
        timings.finish(start);
        let labels: Vec<_> = timings.stages.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["capture", "classify"]);
        assert!(timings.total_ms >= timings.stage_ms("capture").unwrap());
        assert_eq!(timings.stage_ms("drive"), None);
    }
}

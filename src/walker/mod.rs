//! Autonomous walk loop.
//!
//! Each cycle captures a photo, shrinks it to the decision engine's patch
//! size, stores that patch for inspection and classifies it against the
//! floor baseline. An optional range sensor can veto the decision with a
//! `Stop`. The chosen action becomes a short pulse sequence, after which the
//! baseline absorbs the new frame.
//!
//! The baseline is owned by the controller: it is given up front
//! (`with_baseline`), seeded by `prepare_action`, and otherwise changes only
//! through `update_baseline`.

mod settings;


pub use settings::WalkSettings;

use crate::camera::{capture_path, FrameSource};
use crate::diagnostics::{TimingBreakdown, WalkReport};
use crate::error::RobotError;
use crate::image::io::{load_rgb_frame, save_gray_frame, write_json_file};
use crate::image::resample::downsample_area;
use crate::image::{intensity_stats, RgbFrame};
use crate::motion::{pulse_sequence, Direction, MotionActuator};
use crate::sensors::RangeSensor;
use crate::walk::{Evaluation, WalkAction, WalkDecisionEngine};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Motor pulses that carry out `action`.
pub fn action_pulses(action: WalkAction) -> &'static [Direction] {
    match action {
        WalkAction::GoStraight => &[Direction::Forward],
        WalkAction::TurnLeft => &[Direction::Left],
        WalkAction::TurnRight => &[Direction::Right],
        WalkAction::Stop => &[Direction::Back, Direction::Right],
    }
}

/// Why `run` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    /// All requested cycles ran.
    Completed { cycles: usize },
    /// Too many consecutive cycles ended without a decision.
    Undecided { cycles: usize },
}

pub struct WalkController<A, S> {
    actuator: A,
    source: S,
    engine: WalkDecisionEngine,
    settings: WalkSettings,
    baseline: Option<f32>,
    last_frame_path: Option<PathBuf>,
    range: Option<Box<dyn RangeSensor>>,
    cycle: usize,
}

impl<A: MotionActuator, S: FrameSource> WalkController<A, S> {
    pub fn new(actuator: A, source: S, engine: WalkDecisionEngine, settings: WalkSettings) -> Self {
        Self {
            actuator,
            source,
            engine,
            settings,
            baseline: None,
            last_frame_path: None,
            range: None,
            cycle: 0,
        }
    }

    /// Start from a known floor brightness instead of calibrating.
    pub fn with_baseline(mut self, baseline: f32) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn with_range_sensor(mut self, sensor: Box<dyn RangeSensor>) -> Self {
        self.range = Some(sensor);
        self
    }

    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    pub fn last_frame_path(&self) -> Option<&Path> {
        self.last_frame_path.as_deref()
    }

    pub fn engine(&self) -> &WalkDecisionEngine {
        &self.engine
    }

    pub fn settings(&self) -> &WalkSettings {
        &self.settings
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn into_parts(self) -> (A, S) {
        (self.actuator, self.source)
    }

    /// Get ready to walk: diagnostics directory, calibration frame, baseline.
    ///
    /// `Ok(false)` when the calibration frame could not be taken or decoded.
    pub fn prepare_action(&mut self) -> Result<bool, RobotError> {
        let dir = &self.settings.diagnostics_dir;
        fs::create_dir_all(dir).map_err(|e| {
            RobotError::Configuration(format!(
                "cannot create diagnostics dir {}: {e}",
                dir.display()
            ))
        })?;

        let photo = match capture_path(&mut self.source) {
            Ok(path) => path,
            Err(err) => {
                warn!("walk calibration failed: {err}");
                return Ok(false);
            }
        };
        let frame = match load_rgb_frame(&photo) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("walk calibration failed: {err}");
                return Ok(false);
            }
        };
        if self.baseline.is_none() {
            let mean = intensity_stats(&frame.to_gray().as_view()).mean;
            info!("walk baseline calibrated at {mean:.1}");
            self.baseline = Some(mean);
        }
        self.replace_last_frame(photo);
        Ok(true)
    }

    /// Shrink `frame` to the patch size, save the patch to `save_path` and
    /// classify it with the current baseline.
    pub fn handle_small(
        &self,
        frame: &RgbFrame,
        save_path: &Path,
    ) -> Result<Option<WalkAction>, RobotError> {
        Ok(self.evaluate_small(frame, save_path)?.decision)
    }

    fn evaluate_small(&self, frame: &RgbFrame, save_path: &Path) -> Result<Evaluation, RobotError> {
        let (w, h) = self.engine.patch_size();
        let patch = downsample_area(&frame.to_gray(), w, h);
        save_gray_frame(&patch, save_path)?;
        // Without any baseline yet the patch is judged against its own mean.
        let baseline = self
            .baseline
            .unwrap_or_else(|| intensity_stats(&patch.as_view()).mean);
        Ok(self.engine.evaluate(&patch, baseline))
    }

    /// Blend the frame's mean brightness into the baseline.
    pub fn update_baseline(&mut self, frame: &RgbFrame) {
        let mean = intensity_stats(&frame.to_gray().as_view()).mean;
        let alpha = self.settings.baseline_alpha.clamp(0.0, 1.0);
        self.baseline = Some(match self.baseline {
            Some(b) => (1.0 - alpha) * b + alpha * mean,
            None => mean,
        });
    }

    /// One capture, decide, drive cycle.
    pub fn step(&mut self) -> Result<WalkReport, RobotError> {
        self.cycle += 1;
        let start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let t = Instant::now();
        let photo = capture_path(&mut self.source)?;
        let frame = load_rgb_frame(&photo)?;
        timings.lap("capture", t);

        let patch_path = self
            .settings
            .diagnostics_dir
            .join(format!("walk_{:06}.png", self.cycle));
        let t = Instant::now();
        let eval = self.evaluate_small(&frame, &patch_path)?;
        timings.lap("classify", t);

        let baseline = self.baseline.unwrap_or(eval.stats.mean);
        let mut report = WalkReport::new(self.cycle, photo.clone(), baseline);
        report.patch = Some(patch_path);
        report.patch_mean = eval.stats.mean;
        report.patch_std = eval.stats.std_dev;
        report.signal = eval.signal;
        report.confidence = eval.scored.map(|s| s.confidence);

        let mut decision = eval.decision;
        if let Some(sensor) = self.range.as_mut() {
            report.distance_cm = sensor.distance();
            if let Some(d) = report.distance_cm {
                if d < self.settings.min_distance_cm {
                    info!("obstacle at {d:.0}cm, stopping");
                    decision = Some(WalkAction::Stop);
                }
            }
        }
        report.set_action(decision);

        if let Some(action) = decision {
            let t = Instant::now();
            pulse_sequence(
                &mut self.actuator,
                action_pulses(action),
                self.settings.pulse(),
            )?;
            timings.lap("drive", t);
        }

        self.update_baseline(&frame);
        self.replace_last_frame(photo);

        timings.finish(start);
        report.timings = timings;
        debug!("{}", report.summary());
        if self.settings.save_reports {
            let path = self
                .settings
                .diagnostics_dir
                .join(format!("walk_{:06}.json", self.cycle));
            write_json_file(&path, &report)?;
        }
        Ok(report)
    }

    /// Walk for up to `max_cycles` cycles.
    pub fn run(&mut self, max_cycles: usize) -> Result<WalkOutcome, RobotError> {
        let mut unsure = 0usize;
        for done in 1..=max_cycles {
            let report = self.step()?;
            if report.action.is_some() {
                unsure = 0;
                continue;
            }
            unsure += 1;
            let limit = self.settings.max_unsure_cycles;
            if limit > 0 && unsure >= limit {
                warn!("no walk decision for {unsure} cycles, giving up");
                return Ok(WalkOutcome::Undecided { cycles: done });
            }
        }
        info!("walk finished after {max_cycles} cycles");
        Ok(WalkOutcome::Completed { cycles: max_cycles })
    }

    fn replace_last_frame(&mut self, photo: PathBuf) {
        let removable = self.settings.remove_photos && self.source.owns_photos();
        if let Some(previous) = self.last_frame_path.replace(photo) {
            if removable && Some(&previous) != self.last_frame_path.as_ref() {
                if let Err(err) = fs::remove_file(&previous) {
                    warn!("cannot remove {}: {err}", previous.display());
                }
            }
        }
    }
}

//! Line following: photo in, steering vector out, motors pulsed.
//!
//! `prepare_follow` is the sensing half (capture and extract). `steer` turns a
//! vector into one of three motor commands, and `step`/`run` close the loop.

mod params;

#[cfg(test)]
mod tests;

pub use params::FollowParams;

use crate::angle::deviation_from_forward_deg;
use crate::camera::{capture_path, FrameSource};
use crate::error::RobotError;
use crate::motion::{pulse, Direction, MotionActuator};
use crate::track::{LineTracker, SteeringVector};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowCommand {
    Forward,
    TurnLeft,
    TurnRight,
}

impl FollowCommand {
    pub fn direction(self) -> Direction {
        match self {
            FollowCommand::Forward => Direction::Forward,
            FollowCommand::TurnLeft => Direction::Left,
            FollowCommand::TurnRight => Direction::Right,
        }
    }
}

/// Map a steering vector to a motor command.
///
/// Lateral offset wins over orientation: a line off to one side is chased
/// first, and only a roughly centred line is used to correct heading.
pub fn steer(vector: &SteeringVector, params: &FollowParams) -> FollowCommand {
    if vector.shift_ratio > params.shift_tolerance {
        return FollowCommand::TurnRight;
    }
    if vector.shift_ratio < -params.shift_tolerance {
        return FollowCommand::TurnLeft;
    }
    let deviation = deviation_from_forward_deg(vector.angle);
    if deviation < -params.angle_tolerance_deg {
        FollowCommand::TurnRight
    } else if deviation > params.angle_tolerance_deg {
        FollowCommand::TurnLeft
    } else {
        FollowCommand::Forward
    }
}

/// Why `run` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowOutcome {
    Completed { cycles: usize },
    /// No line was seen for `lost_line_cycles` cycles in a row.
    LineLost { cycles: usize },
}

pub struct FollowController<A, S> {
    actuator: A,
    source: S,
    tracker: LineTracker,
    params: FollowParams,
}

impl<A: MotionActuator, S: FrameSource> FollowController<A, S> {
    pub fn new(actuator: A, source: S, tracker: LineTracker, params: FollowParams) -> Self {
        Self {
            actuator,
            source,
            tracker,
            params,
        }
    }

    pub fn tracker(&self) -> &LineTracker {
        &self.tracker
    }

    pub fn params(&self) -> &FollowParams {
        &self.params
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn into_parts(self) -> (A, S) {
        (self.actuator, self.source)
    }

    /// Take a photo and extract the line from it.
    ///
    /// A failed capture is `Capture`, a missing or undecodable photo is
    /// `Image`, and a readable photo without a line is `Ok(None)`.
    pub fn prepare_follow(&mut self) -> Result<Option<SteeringVector>, RobotError> {
        let path = capture_path(&mut self.source)?;
        let vector = self.tracker.extract_file(&path);
        if self.params.remove_photos && self.source.owns_photos() {
            remove_photo(&path);
        }
        let vector = vector?;
        match &vector {
            Some(v) => debug!(
                "line at {:.1}deg shift {:+.1}px in {}",
                v.angle,
                v.shift,
                path.display()
            ),
            None => debug!("no line in {}", path.display()),
        }
        Ok(vector)
    }

    /// One sense and drive cycle. `None` when no line was seen; the robot
    /// does not move then.
    pub fn step(&mut self) -> Result<Option<FollowCommand>, RobotError> {
        let Some(vector) = self.prepare_follow()? else {
            return Ok(None);
        };
        let command = steer(&vector, &self.params);
        pulse(&mut self.actuator, command.direction(), self.params.pulse())?;
        Ok(Some(command))
    }

    /// Follow for up to `max_cycles` cycles.
    pub fn run(&mut self, max_cycles: usize) -> Result<FollowOutcome, RobotError> {
        let mut misses = 0usize;
        for done in 1..=max_cycles {
            match self.step()? {
                Some(command) => {
                    misses = 0;
                    debug!("cycle {done}: {command:?}");
                }
                None => {
                    misses += 1;
                    if misses >= self.params.lost_line_cycles.max(1) {
                        warn!("line lost for {misses} cycles");
                        return Ok(FollowOutcome::LineLost { cycles: done });
                    }
                }
            }
        }
        info!("follow finished after {max_cycles} cycles");
        Ok(FollowOutcome::Completed { cycles: max_cycles })
    }
}

fn remove_photo(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        warn!("cannot remove {}: {err}", path.display());
    }
}

#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod camera;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod follow;
pub mod image;
pub mod motion;
pub mod sensors;
pub mod track;
pub mod walk;
pub mod walker;

// Helpers shared by the extractor and the steering rules.
pub mod angle;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::RobotError;
pub use crate::follow::{FollowCommand, FollowController, FollowOutcome, FollowParams};
pub use crate::track::{LineTracker, SteeringVector, TrackOptions};
pub use crate::walk::{action_code, WalkAction, WalkDecisionEngine, WalkParams};
pub use crate::walker::{WalkController, WalkOutcome, WalkSettings};

// Collaborator contracts.
pub use crate::camera::{FrameSource, PhotoId, PhotoLocation};
pub use crate::motion::MotionActuator;
pub use crate::sensors::{ObjectDetector, RangeSensor};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use rover_pilot::prelude::*;
///
/// # fn main() -> Result<(), RobotError> {
/// let frame = RgbFrame::new(2, 2, vec![200; 12])?;
/// let tracker = LineTracker::default();
/// match tracker.extract(&frame) {
///     Some(v) => println!("angle={:.1} shift={:.1}", v.angle, v.shift),
///     None => println!("no line"),
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayFrame, RgbFrame};
    pub use crate::{
        action_code, LineTracker, RobotError, SteeringVector, WalkAction, WalkDecisionEngine,
    };
}

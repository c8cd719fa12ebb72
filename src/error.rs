//! Failure taxonomy for the controllers and their I/O helpers.
//!
//! "Nothing found" is never an error here: a missing line or an unsure walk
//! decision is an `Option::None` in the respective return types.

use crate::motion::Direction;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub enum RobotError {
    /// The photo collaborator reported failure.
    Capture { reason: String },
    /// Image data could not be decoded, encoded or was malformed.
    Image {
        path: Option<PathBuf>,
        reason: String,
    },
    /// A required resource (model, directory, config file) is missing or invalid.
    Configuration(String),
    /// The motion actuator refused a switch.
    Actuator {
        direction: Direction,
        switching_on: bool,
    },
    /// Plain filesystem failure.
    Io { path: PathBuf, reason: String },
}

impl RobotError {
    pub fn capture(reason: impl Into<String>) -> Self {
        RobotError::Capture {
            reason: reason.into(),
        }
    }

    pub(crate) fn image_at(path: &Path, err: impl std::fmt::Display) -> Self {
        RobotError::Image {
            path: Some(path.to_path_buf()),
            reason: err.to_string(),
        }
    }

    pub(crate) fn io_at(path: &Path, err: impl std::fmt::Display) -> Self {
        RobotError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    /// Attach a path to an `Image` error produced from an in-memory buffer.
    pub(crate) fn with_path(self, at: &Path) -> Self {
        match self {
            RobotError::Image { path: None, reason } => RobotError::Image {
                path: Some(at.to_path_buf()),
                reason,
            },
            other => other,
        }
    }
}

impl std::fmt::Display for RobotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RobotError::Capture { reason } => write!(f, "capture failed: {reason}"),
            RobotError::Image {
                path: Some(path),
                reason,
            } => write!(f, "bad image {}: {reason}", path.display()),
            RobotError::Image { path: None, reason } => write!(f, "bad image: {reason}"),
            RobotError::Configuration(reason) => write!(f, "configuration error: {reason}"),
            RobotError::Actuator {
                direction,
                switching_on,
            } => write!(
                f,
                "actuator refused {direction:?} {}",
                if *switching_on { "on" } else { "off" }
            ),
            RobotError::Io { path, reason } => write!(f, "i/o error at {}: {reason}", path.display()),
        }
    }
}

impl std::error::Error for RobotError {}

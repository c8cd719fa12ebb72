//! Walk decisions from small grayscale patches.
//!
//! A patch is normalized against the floor baseline brightness, gated on its
//! contrast, and handed to a `PatchClassifier`. Two classifiers ship with the
//! crate: `ZoneClassifier`, a left/centre/right obstruction heuristic, and
//! `MlpClassifier`, a small network loaded from JSON.
//!
//! An unsure decision is `None`. Callers that need the legacy integer code
//! use `action_code`, which maps `None` to `-1`.

mod engine;
mod mlp;
mod options;
mod zone;

pub use engine::{normalize, Evaluation, PatchClassifier, Scored, WalkDecisionEngine};
pub use mlp::MlpClassifier;
pub use options::{WalkParams, ZoneParams};
pub use zone::{ZoneClassifier, ZoneScores};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkAction {
    TurnLeft,
    TurnRight,
    GoStraight,
    Stop,
}

impl WalkAction {
    /// All actions in code order.
    pub const ALL: [WalkAction; 4] = [
        WalkAction::TurnLeft,
        WalkAction::TurnRight,
        WalkAction::GoStraight,
        WalkAction::Stop,
    ];

    pub fn code(self) -> i32 {
        match self {
            WalkAction::TurnLeft => 0,
            WalkAction::TurnRight => 1,
            WalkAction::GoStraight => 2,
            WalkAction::Stop => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }
}

/// Integer code of a decision, `-1` when there is none.
pub fn action_code(decision: Option<WalkAction>) -> i32 {
    decision.map_or(-1, WalkAction::code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(action_code(Some(WalkAction::TurnLeft)), 0);
        assert_eq!(action_code(Some(WalkAction::Stop)), 3);
        assert_eq!(action_code(None), -1);
        for a in WalkAction::ALL {
            assert_eq!(WalkAction::from_code(a.code()), Some(a));
        }
        assert_eq!(WalkAction::from_code(-1), None);
    }
}

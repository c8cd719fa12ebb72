//! Motor collaborator contract and pulse helpers.
//!
//! The actuator exposes raw on/off switches per direction. Nothing times out
//! on the hardware side, so every "on" issued here is paired with its "off"
//! by `pulse` before it returns.

use crate::error::RobotError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// Eight-switch differential drive contract. Each call reports success.
pub trait MotionActuator {
    fn fwd_on(&mut self) -> bool;
    fn fwd_off(&mut self) -> bool;
    fn back_on(&mut self) -> bool;
    fn back_off(&mut self) -> bool;
    fn left_on(&mut self) -> bool;
    fn left_off(&mut self) -> bool;
    fn right_on(&mut self) -> bool;
    fn right_off(&mut self) -> bool;
}

impl<A: MotionActuator + ?Sized> MotionActuator for &mut A {
    fn fwd_on(&mut self) -> bool {
        (**self).fwd_on()
    }
    fn fwd_off(&mut self) -> bool {
        (**self).fwd_off()
    }
    fn back_on(&mut self) -> bool {
        (**self).back_on()
    }
    fn back_off(&mut self) -> bool {
        (**self).back_off()
    }
    fn left_on(&mut self) -> bool {
        (**self).left_on()
    }
    fn left_off(&mut self) -> bool {
        (**self).left_off()
    }
    fn right_on(&mut self) -> bool {
        (**self).right_on()
    }
    fn right_off(&mut self) -> bool {
        (**self).right_off()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    pub fn switch_on<A: MotionActuator + ?Sized>(self, actuator: &mut A) -> bool {
        match self {
            Direction::Forward => actuator.fwd_on(),
            Direction::Back => actuator.back_on(),
            Direction::Left => actuator.left_on(),
            Direction::Right => actuator.right_on(),
        }
    }

    pub fn switch_off<A: MotionActuator + ?Sized>(self, actuator: &mut A) -> bool {
        match self {
            Direction::Forward => actuator.fwd_off(),
            Direction::Back => actuator.back_off(),
            Direction::Left => actuator.left_off(),
            Direction::Right => actuator.right_off(),
        }
    }
}

/// Drive in `direction` for `duration`, then switch off.
///
/// A refused "on" returns immediately without sleeping. A refused "off" is
/// reported as an error after logging, since the motor may still be running.
pub fn pulse<A: MotionActuator + ?Sized>(
    actuator: &mut A,
    direction: Direction,
    duration: Duration,
) -> Result<(), RobotError> {
    if !direction.switch_on(actuator) {
        return Err(RobotError::Actuator {
            direction,
            switching_on: true,
        });
    }
    if !duration.is_zero() {
        thread::sleep(duration);
    }
    if !direction.switch_off(actuator) {
        warn!("actuator did not confirm {direction:?} off");
        return Err(RobotError::Actuator {
            direction,
            switching_on: false,
        });
    }
    debug!("pulse {direction:?} {}ms", duration.as_millis());
    Ok(())
}

/// Run pulses back to back, stopping at the first failure.
pub fn pulse_sequence<A: MotionActuator + ?Sized>(
    actuator: &mut A,
    steps: &[Direction],
    duration: Duration,
) -> Result<(), RobotError> {
    for &direction in steps {
        pulse(actuator, direction, duration)?;
    }
    Ok(())
}

/// One recorded actuator switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Switch {
    pub direction: Direction,
    pub on: bool,
}

/// Actuator that only logs and records switches. Always succeeds.
///
/// Used for bench runs without motors attached and as a test double.
#[derive(Clone, Debug, Default)]
pub struct DryRunActuator {
    switches: Vec<Switch>,
}

impl DryRunActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    /// Directions that were switched on, in order.
    pub fn pulses(&self) -> Vec<Direction> {
        self.switches
            .iter()
            .filter(|s| s.on)
            .map(|s| s.direction)
            .collect()
    }

    fn record(&mut self, direction: Direction, on: bool) -> bool {
        debug!("dry-run {direction:?} {}", if on { "on" } else { "off" });
        self.switches.push(Switch { direction, on });
        true
    }
}

impl MotionActuator for DryRunActuator {
    fn fwd_on(&mut self) -> bool {
        self.record(Direction::Forward, true)
    }
    fn fwd_off(&mut self) -> bool {
        self.record(Direction::Forward, false)
    }
    fn back_on(&mut self) -> bool {
        self.record(Direction::Back, true)
    }
    fn back_off(&mut self) -> bool {
        self.record(Direction::Back, false)
    }
    fn left_on(&mut self) -> bool {
        self.record(Direction::Left, true)
    }
    fn left_off(&mut self) -> bool {
        self.record(Direction::Left, false)
    }
    fn right_on(&mut self) -> bool {
        self.record(Direction::Right, true)
    }
    fn right_off(&mut self) -> bool {
        self.record(Direction::Right, false)
    }
}

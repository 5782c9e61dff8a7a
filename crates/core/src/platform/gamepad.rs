use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::platform::PlatformError;
use crate::types::Point;

bitflags! {
    /// Face buttons of a directional controller.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct GamepadButtons: u8 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const EAST = 1 << 2;
        const WEST = 1 << 3;
    }
}

/// Analog trigger and bumper values, each in `[0, 1]`.
///
/// Digital bumpers report exactly `0.0` or `1.0`; "fully pressed" is
/// defined throughout the toolkit as a reading of exactly `1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerState {
    pub left_bumper: f64,
    pub left_trigger: f64,
    pub right_bumper: f64,
    pub right_trigger: f64,
}

/// One frame's controller reading.
///
/// Stick components are in `[-1, 1]`. The host polls its controller
/// backend into this snapshot once per frame; all downstream consumers
/// stay pure functions of it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GamepadState {
    pub left_stick: Point,
    pub right_stick: Point,
    pub buttons: GamepadButtons,
    pub triggers: TriggerState,
}

/// A pollable source of controller snapshots.
///
/// `Ok(None)` means no controller is currently connected; callers skip
/// motion integration for that frame rather than treating it as an error.
pub trait GamepadSource {
    fn sample(&mut self) -> Result<Option<GamepadState>, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn button_flags_combine() {
        let pressed = GamepadButtons::SOUTH | GamepadButtons::EAST;
        assert!(pressed.contains(GamepadButtons::SOUTH));
        assert!(!pressed.contains(GamepadButtons::NORTH));
    }

    #[rstest]
    fn default_state_is_at_rest() {
        let state = GamepadState::default();
        assert!(state.left_stick.is_zero());
        assert!(state.buttons.is_empty());
        assert_eq!(state.triggers.right_trigger, 0.0);
    }
}

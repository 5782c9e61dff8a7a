//! Controller backend that samples connected gamepads through gilrs.
//!
//! `Gilrs` is not `Send`, so the source lives on the host's main thread
//! and is polled once per frame, which is exactly the contract of
//! [`GamepadSource`].

use gilrs::{Axis, Button, Gamepad, Gilrs};
use padpointer_core::platform::{
    GamepadButtons, GamepadSource, GamepadState, PlatformError, PlatformErrorKind, TriggerState,
};
use padpointer_core::types::Point;
use tracing::{debug, warn};

pub struct GilrsSource {
    gilrs: Gilrs,
}

impl GilrsSource {
    pub fn new() -> Result<Self, PlatformError> {
        let gilrs = Gilrs::new().map_err(|err| {
            PlatformError::new(
                PlatformErrorKind::InitializationFailed,
                format!("gilrs initialization failed: {err}"),
            )
        })?;
        debug!(gamepads = gilrs.gamepads().count(), "gilrs controller backend ready");
        Ok(Self { gilrs })
    }
}

impl GamepadSource for GilrsSource {
    fn sample(&mut self) -> Result<Option<GamepadState>, PlatformError> {
        // Drain the event queue so connect/disconnect and cached axis
        // state stay current; the snapshot below reads the cached state.
        while let Some(event) = self.gilrs.next_event() {
            match event.event {
                gilrs::EventType::Connected => debug!(id = ?event.id, "gamepad connected"),
                gilrs::EventType::Disconnected => warn!(id = ?event.id, "gamepad disconnected"),
                _ => {}
            }
        }

        let snapshot = self
            .gilrs
            .gamepads()
            .find(|(_, gamepad)| gamepad.is_connected())
            .map(|(_, gamepad)| read_state(&gamepad));
        Ok(snapshot)
    }
}

fn read_state(gamepad: &Gamepad<'_>) -> GamepadState {
    let mut buttons = GamepadButtons::empty();
    for (flag, button) in [
        (GamepadButtons::NORTH, Button::North),
        (GamepadButtons::SOUTH, Button::South),
        (GamepadButtons::EAST, Button::East),
        (GamepadButtons::WEST, Button::West),
    ] {
        if gamepad.is_pressed(button) {
            buttons |= flag;
        }
    }

    GamepadState {
        left_stick: stick(gamepad, Axis::LeftStickX, Axis::LeftStickY),
        right_stick: stick(gamepad, Axis::RightStickX, Axis::RightStickY),
        buttons,
        triggers: TriggerState {
            left_bumper: button_value(gamepad, Button::LeftTrigger),
            left_trigger: button_value(gamepad, Button::LeftTrigger2),
            right_bumper: button_value(gamepad, Button::RightTrigger),
            right_trigger: button_value(gamepad, Button::RightTrigger2),
        },
    }
}

fn stick(gamepad: &Gamepad<'_>, x: Axis, y: Axis) -> Point {
    Point::new(f64::from(gamepad.value(x)), f64::from(gamepad.value(y)))
}

fn button_value(gamepad: &Gamepad<'_>, button: Button) -> f64 {
    gamepad.button_data(button).map_or(0.0, |data| f64::from(data.value()))
}

//! Shared helpers for unit tests: an emulator wired to the mock platform
//! and frame builders for the two interesting schemes.

use padpointer_core::platform::GamepadState;
use padpointer_core::types::Size;
use padpointer_platform_mock::pointer::pointer_device;

use crate::emulator::{CursorEmulator, DeviceOverrides, FrameInput};
use crate::scheme::ControlScheme;
use crate::settings::CursorSettings;

pub const TEST_SCREEN: Size = Size::new(1920.0, 1080.0);

/// Builds an emulator with the mock real pointer explicitly injected, so
/// tests never depend on which devices happen to be link-registered.
pub fn emulator_with_mock_platform(settings: CursorSettings) -> CursorEmulator {
    CursorEmulator::new(settings)
        .with_overrides(DeviceOverrides { pointer: Some(pointer_device()) })
}

pub fn gamepad_frame(gamepad: Option<GamepadState>, delta_time: f64) -> FrameInput {
    FrameInput { scheme: ControlScheme::Gamepad, gamepad, screen: TEST_SCREEN, delta_time }
}

pub fn pointer_frame(delta_time: f64) -> FrameInput {
    FrameInput { scheme: ControlScheme::Pointer, gamepad: None, screen: TEST_SCREEN, delta_time }
}

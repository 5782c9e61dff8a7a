mod error;
mod gamepad;
mod pointer;

pub use error::{PlatformError, PlatformErrorKind};
pub use gamepad::{GamepadButtons, GamepadSource, GamepadState, TriggerState};
pub use pointer::{PointerButton, PointerDevice, PointerRegistration, pointer_devices};

pub use crate::register_pointer_device;

//! Frame-driven virtual pointer runtime.
//!
//! The [`CursorEmulator`] drives an emulated pointer from directional
//! controller snapshots and keeps it synchronized with the host's real
//! pointer as the active control scheme changes. Everything here is
//! single-threaded and cooperative: the embedding environment calls
//! [`CursorEmulator::update`] exactly once per rendered frame from its
//! main/UI thread. That single-thread mutation rule is a contract of the
//! embedder, not something re-checked at runtime.

mod emulator;
mod idle;
mod motion;
mod presenter;
mod scheme;
mod settings;
mod speed;
mod virtual_pointer;

#[cfg(test)]
mod test_support;

pub use emulator::{ClickObserver, CursorEmulator, DeviceOverrides, EmulatorError, FrameInput};
pub use idle::InactivityTimer;
pub use motion::{ResponseCurve, integrate, select_stick, shape};
pub use presenter::{CameraProjection, CursorPresenter, CursorSprite};
pub use scheme::{ControlScheme, SchemeMachine, SchemeState};
pub use settings::{ButtonSelection, CursorSettings, StickPolicy, SurfaceMode, TriggerSelection};
pub use speed::{MAX_SPEED, MIN_SPEED, change_speed, current_speed};
pub use virtual_pointer::{VirtualPointer, VirtualPointerGuard, acquire_virtual_pointer};

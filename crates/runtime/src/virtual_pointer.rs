//! The emulated pointer device and its process-wide acquisition slot.

use std::sync::{Arc, Mutex, Weak};

use padpointer_core::platform::{GamepadState, PlatformError, PlatformErrorKind};
use padpointer_core::types::{Point, Size};
use tracing::debug;

use crate::settings::{ButtonSelection, TriggerSelection};

/// Position, last-frame delta, and press state of the emulated pointer.
#[derive(Debug, Default)]
pub struct VirtualPointer {
    position: Point,
    delta: Point,
    pressed: bool,
}

impl VirtualPointer {
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Places the pointer at `position` clamped into the padded screen
    /// bounds, without recording a motion delta (used for warps).
    pub fn warp(&mut self, position: Point, screen: Size, padding: f64) {
        self.position = clamp_to_screen(position, screen, padding);
        self.delta = Point::ZERO;
    }

    /// Adds `displacement`, clamps into the padded screen bounds, and
    /// records the post-clamp delta as the device's motion for the frame.
    pub fn apply_displacement(&mut self, displacement: Point, screen: Size, padding: f64) -> Point {
        let target = clamp_to_screen(self.position + displacement, screen, padding);
        self.delta = target - self.position;
        self.position = target;
        self.delta
    }

    /// Edge-triggered press write: updates the stored state only when it
    /// differs from the previous frame and reports whether an edge
    /// occurred, so downstream click listeners see one clean transition
    /// instead of per-frame repeats.
    pub fn write_pressed(&mut self, pressed: bool) -> bool {
        if self.pressed == pressed {
            return false;
        }
        self.pressed = pressed;
        true
    }
}

fn clamp_to_screen(position: Point, screen: Size, padding: f64) -> Point {
    position.clamp(
        Point::new(padding, padding),
        Point::new(screen.width() - padding, screen.height() - padding),
    )
}

/// Resolves the configured button/trigger selection against a controller
/// reading. Triggers count as pressed only at a reading of exactly `1.0`.
pub(crate) fn derive_press(
    state: &GamepadState,
    button: ButtonSelection,
    trigger: TriggerSelection,
) -> bool {
    use padpointer_core::platform::GamepadButtons;

    let button_pressed = match button {
        ButtonSelection::North => state.buttons.contains(GamepadButtons::NORTH),
        ButtonSelection::South => state.buttons.contains(GamepadButtons::SOUTH),
        ButtonSelection::East => state.buttons.contains(GamepadButtons::EAST),
        ButtonSelection::West => state.buttons.contains(GamepadButtons::WEST),
        ButtonSelection::None => false,
    };

    let triggers = &state.triggers;
    let trigger_pressed = match trigger {
        TriggerSelection::Lb => triggers.left_bumper == 1.0,
        TriggerSelection::Lt => triggers.left_trigger == 1.0,
        TriggerSelection::Rb => triggers.right_bumper == 1.0,
        TriggerSelection::Rt => triggers.right_trigger == 1.0,
        TriggerSelection::LtRt => triggers.left_trigger == 1.0 || triggers.right_trigger == 1.0,
        TriggerSelection::LbRb => triggers.left_bumper == 1.0 || triggers.right_bumper == 1.0,
        TriggerSelection::None => false,
    };

    button_pressed || trigger_pressed
}

/// Shared handle to the process-wide virtual pointer.
///
/// The device is a scoped resource: it is created lazily on first
/// acquisition, reused while any guard is alive, and released when the
/// last guard drops. Dropping a guard on any teardown path (including
/// unwinding) is what releases the device, so no explicit removal call
/// exists to forget.
pub struct VirtualPointerGuard {
    inner: Arc<Mutex<VirtualPointer>>,
}

impl VirtualPointerGuard {
    /// Runs `f` with exclusive access to the pointer state.
    pub fn with<R>(&self, f: impl FnOnce(&mut VirtualPointer) -> R) -> Result<R, PlatformError> {
        let mut pointer = self.inner.lock().map_err(|_| {
            PlatformError::new(PlatformErrorKind::DeviceUnavailable, "virtual pointer poisoned")
        })?;
        Ok(f(&mut pointer))
    }
}

// Single-threaded embedding contract: the mutex guards the process-wide
// static, not cross-thread traffic.
static SLOT: Mutex<Option<Weak<Mutex<VirtualPointer>>>> = Mutex::new(None);

/// Acquires the process-wide virtual pointer, reusing the existing device
/// when one is still alive.
pub fn acquire_virtual_pointer() -> VirtualPointerGuard {
    let mut slot = SLOT.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(existing) = slot.as_ref().and_then(Weak::upgrade) {
        debug!("reusing existing virtual pointer device");
        return VirtualPointerGuard { inner: existing };
    }
    debug!("creating virtual pointer device");
    let inner = Arc::new(Mutex::new(VirtualPointer::default()));
    *slot = Some(Arc::downgrade(&inner));
    VirtualPointerGuard { inner }
}

use padpointer_core::platform::{PlatformError, PointerButton, PointerDevice};
use padpointer_core::register_pointer_device;
use padpointer_core::types::Point;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerLogEntry {
    Warp(Point),
    OsCursorVisible(bool),
}

struct PointerState {
    position: Point,
    pressed: bool,
    log: Vec<PointerLogEntry>,
}

impl PointerState {
    const fn new() -> Self {
        Self { position: Point::ZERO, pressed: false, log: Vec::new() }
    }

    fn push(&mut self, entry: PointerLogEntry) {
        self.log.push(entry);
    }
}

struct MockPointerDevice {
    state: Mutex<PointerState>,
}

impl MockPointerDevice {
    const fn new() -> Self {
        Self { state: Mutex::new(PointerState::new()) }
    }
}

impl PointerDevice for MockPointerDevice {
    fn position(&self) -> Result<Point, PlatformError> {
        Ok(self.state.lock().unwrap().position)
    }

    fn warp(&self, point: Point) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        state.position = point;
        state.push(PointerLogEntry::Warp(point));
        Ok(())
    }

    fn is_pressed(&self, button: PointerButton) -> Result<bool, PlatformError> {
        let state = self.state.lock().unwrap();
        Ok(button == PointerButton::Left && state.pressed)
    }

    fn set_os_cursor_visible(&self, visible: bool) -> Result<(), PlatformError> {
        self.state.lock().unwrap().push(PointerLogEntry::OsCursorVisible(visible));
        Ok(())
    }
}

static MOCK_POINTER: MockPointerDevice = MockPointerDevice::new();

register_pointer_device!(&MOCK_POINTER);

/// The mock device, for explicit injection via device overrides.
pub fn pointer_device() -> &'static dyn PointerDevice {
    &MOCK_POINTER
}

/// Clears the recorded log and resets position and button state.
pub fn reset_pointer_state() {
    let mut state = MOCK_POINTER.state.lock().unwrap();
    *state = PointerState::new();
}

/// Scripts the physical primary-button state tests want the device to
/// report.
pub fn set_pointer_pressed(pressed: bool) {
    MOCK_POINTER.state.lock().unwrap().pressed = pressed;
}

/// Returns the recorded device traffic since the last reset and clears
/// the buffer.
pub fn take_pointer_log() -> Vec<PointerLogEntry> {
    let mut state = MOCK_POINTER.state.lock().unwrap();
    let entries = state.log.clone();
    state.log.clear();
    entries
}

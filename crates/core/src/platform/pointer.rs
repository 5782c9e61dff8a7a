use crate::platform::PlatformError;
use crate::types::Point;

/// Mouse or pointing device buttons.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Trait that backends implement to expose the real (physical) pointer.
///
/// A registered device may legitimately be absent from a host; consumers
/// obtain one through [`pointer_devices()`] and treat an empty iterator as
/// "no real pointer available".
pub trait PointerDevice: Send + Sync {
    /// Current position in screen coordinates.
    fn position(&self) -> Result<Point, PlatformError>;

    /// Teleports the pointer to an absolute screen position.
    fn warp(&self, point: Point) -> Result<(), PlatformError>;

    /// Whether the given physical button is currently held.
    fn is_pressed(&self, button: PointerButton) -> Result<bool, PlatformError>;

    /// Shows or hides the operating-system cursor image.
    ///
    /// Backends without that capability return
    /// [`PlatformErrorKind::CapabilityUnavailable`](crate::platform::PlatformErrorKind).
    fn set_os_cursor_visible(&self, visible: bool) -> Result<(), PlatformError>;
}

pub struct PointerRegistration {
    pub device: &'static dyn PointerDevice,
}

inventory::collect!(PointerRegistration);

pub fn pointer_devices() -> impl Iterator<Item = &'static dyn PointerDevice> {
    inventory::iter::<PointerRegistration>.into_iter().map(|entry| entry.device)
}

#[macro_export]
macro_rules! register_pointer_device {
    ($device:expr) => {
        inventory::submit! {
            $crate::platform::PointerRegistration { device: $device }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{PlatformError, PlatformErrorKind};
    use rstest::rstest;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubPointerDevice {
        visible: AtomicBool,
    }

    impl StubPointerDevice {
        const fn new() -> Self {
            Self { visible: AtomicBool::new(true) }
        }
    }

    impl PointerDevice for StubPointerDevice {
        fn position(&self) -> Result<Point, PlatformError> {
            Ok(Point::new(12.0, 34.0))
        }

        fn warp(&self, _point: Point) -> Result<(), PlatformError> {
            Ok(())
        }

        fn is_pressed(&self, _button: PointerButton) -> Result<bool, PlatformError> {
            Ok(false)
        }

        fn set_os_cursor_visible(&self, visible: bool) -> Result<(), PlatformError> {
            self.visible.store(visible, Ordering::SeqCst);
            Ok(())
        }
    }

    static STUB_POINTER: StubPointerDevice = StubPointerDevice::new();

    register_pointer_device!(&STUB_POINTER);

    #[rstest]
    fn pointer_registration_exposes_device() {
        let devices: Vec<_> = pointer_devices().collect();
        assert!(devices.iter().any(|device| device.position().is_ok()));
    }

    #[rstest]
    fn capability_error_formats_message() {
        let err = PlatformError::new(PlatformErrorKind::CapabilityUnavailable, "no cursor surface");
        assert_eq!(err.to_string(), "no cursor surface");
    }
}

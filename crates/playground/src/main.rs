//! Scripted emulator session against the mock platform: drives the
//! cursor with a synthetic gamepad, hands over to the "real" pointer,
//! and idles until the sprite auto-hides.

use padpointer_core::platform::{GamepadButtons, GamepadSource, GamepadState, PlatformError};
use padpointer_core::types::{Point, Size};
use padpointer_platform_mock::gamepad::MockGamepad;
use padpointer_platform_mock::pointer::pointer_device;
use padpointer_runtime::{
    ClickObserver, ControlScheme, CursorEmulator, CursorSettings, DeviceOverrides, FrameInput,
    ResponseCurve, StickPolicy, change_speed,
};

const SCREEN: Size = Size::new(1920.0, 1080.0);
const FRAME: f64 = 1.0 / 60.0;

struct PrintingObserver;

impl ClickObserver for PrintingObserver {
    fn on_press(&mut self, position: Point) -> Result<(), PlatformError> {
        println!("  click down at {position}");
        Ok(())
    }

    fn on_release(&mut self, position: Point) -> Result<(), PlatformError> {
        println!("  click up at {position}");
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = CursorSettings::new()
        .with_stick(StickPolicy::Both)
        .with_curve(ResponseCurve::SmoothStep)
        .with_inactive_hide_time(2.0);

    let mut emulator = CursorEmulator::new(settings)
        .with_overrides(DeviceOverrides { pointer: Some(pointer_device()) });
    emulator.add_observer(Box::new(PrintingObserver));

    let mut pad = MockGamepad::new();
    pad.set_state(GamepadState { left_stick: Point::new(0.8, -0.3), ..GamepadState::default() });

    change_speed(1200.0);

    emulator.activate(&frame(ControlScheme::Gamepad, &mut pad)?)?;
    println!(
        "activated: scheme={:?} position={}",
        emulator.current_control_scheme(),
        emulator.virtual_position().unwrap_or(Point::ZERO)
    );

    println!("phase 1: one second of stick motion");
    for _ in 0..60 {
        emulator.update(&frame(ControlScheme::Gamepad, &mut pad)?);
    }
    println!("  cursor at {}", emulator.virtual_position().unwrap_or(Point::ZERO));

    println!("phase 2: press and release the south button");
    pad.set_state(GamepadState { buttons: GamepadButtons::SOUTH, ..GamepadState::default() });
    emulator.update(&frame(ControlScheme::Gamepad, &mut pad)?);
    pad.set_state(GamepadState::default());
    emulator.update(&frame(ControlScheme::Gamepad, &mut pad)?);

    println!("phase 3: hand over to the real pointer");
    emulator.update(&frame(ControlScheme::Pointer, &mut pad)?);
    println!(
        "  real pointer now at {}",
        pointer_device().position().unwrap_or(Point::ZERO)
    );

    println!("phase 4: idle until the cursor hides");
    emulator.update(&frame(ControlScheme::Gamepad, &mut pad)?);
    let mut frames = 0u32;
    while emulator.sprite().visible {
        emulator.update(&frame(ControlScheme::Gamepad, &mut pad)?);
        frames += 1;
        if frames > 600 {
            return Err("cursor never auto-hid".into());
        }
    }
    println!("  sprite hidden after {frames} idle frames");

    emulator.deactivate();
    println!("deactivated");
    Ok(())
}

fn frame(scheme: ControlScheme, pad: &mut MockGamepad) -> Result<FrameInput, PlatformError> {
    Ok(FrameInput { scheme, gamepad: pad.sample()?, screen: SCREEN, delta_time: FRAME })
}

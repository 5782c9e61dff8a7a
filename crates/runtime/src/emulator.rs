//! Frame orchestration: ties the scheme machine, motion integration,
//! virtual pointer, presenter, and inactivity timer together.

use std::sync::{Arc, Mutex, PoisonError};

use padpointer_core::platform::{
    GamepadState, PlatformError, PointerButton, PointerDevice, pointer_devices,
};
use padpointer_core::types::{Point, Size};
use thiserror::Error;
use tracing::{debug, error, trace, warn};

use crate::idle::InactivityTimer;
use crate::motion;
use crate::presenter::{CameraProjection, CursorPresenter, CursorSprite};
use crate::scheme::{ControlScheme, SchemeMachine, TransitionContext};
use crate::settings::CursorSettings;
use crate::speed::{self, SpeedCell};
use crate::virtual_pointer::{self, VirtualPointerGuard, acquire_virtual_pointer};

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("emulator is not active")]
    NotActive,
    #[error("pointer action failed: {0}")]
    Platform(#[from] PlatformError),
}

/// One frame's worth of host input, polled by the embedder.
///
/// Components never reach into ambient device state; everything the
/// update pass consumes arrives through this snapshot, which keeps the
/// pipeline pure and independently testable.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Input scheme resolved by the host environment for this frame.
    pub scheme: ControlScheme,
    /// Controller reading, or `None` while no controller is connected.
    pub gamepad: Option<GamepadState>,
    /// Current screen dimensions (queried per frame).
    pub screen: Size,
    /// Elapsed seconds since the previous frame, unscaled by pause state.
    pub delta_time: f64,
}

/// Explicit device injection, used by tests and embedders that manage
/// their own backends instead of relying on registration.
#[derive(Clone, Copy, Default)]
pub struct DeviceOverrides {
    pub pointer: Option<&'static dyn PointerDevice>,
}

/// Observer of emulated primary-press edges.
///
/// Failures are contained at the call site: they are reported through the
/// diagnostic channel and never interrupt the remaining frame work.
pub trait ClickObserver {
    fn on_press(&mut self, position: Point) -> Result<(), PlatformError>;

    fn on_release(&mut self, position: Point) -> Result<(), PlatformError> {
        let _ = position;
        Ok(())
    }
}

/// Emulates a pointer device driven by directional-controller input and
/// keeps it synchronized with the real pointer across scheme changes.
///
/// Lifecycle: [`activate`](Self::activate) acquires the virtual pointer
/// and registers with the speed registry; [`update`](Self::update) runs
/// once per frame; teardown happens in [`deactivate`](Self::deactivate)
/// or, on any abnormal path, in `Drop`.
pub struct CursorEmulator {
    settings: CursorSettings,
    speed: SpeedCell,
    machine: SchemeMachine,
    presenter: CursorPresenter,
    idle: InactivityTimer,
    overrides: DeviceOverrides,
    virtual_pointer: Option<VirtualPointerGuard>,
    real: Option<&'static dyn PointerDevice>,
    observers: Vec<Box<dyn ClickObserver>>,
    gamepad_pressed: bool,
    current_scheme: Option<ControlScheme>,
}

impl CursorEmulator {
    pub fn new(settings: CursorSettings) -> Self {
        let presenter = CursorPresenter::new(settings.surface_mode);
        let idle = InactivityTimer::new(settings.inactive_hide_time);
        let speed = Arc::new(Mutex::new(settings.speed));
        Self {
            settings,
            speed,
            machine: SchemeMachine::new(),
            presenter,
            idle,
            overrides: DeviceOverrides::default(),
            virtual_pointer: None,
            real: None,
            observers: Vec::new(),
            gamepad_pressed: false,
            current_scheme: None,
        }
    }

    pub fn with_camera(mut self, camera: Box<dyn CameraProjection>) -> Self {
        self.presenter = CursorPresenter::new(self.settings.surface_mode).with_camera(camera);
        self
    }

    pub fn with_overrides(mut self, overrides: DeviceOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn ClickObserver>) {
        self.observers.push(observer);
    }

    pub fn is_active(&self) -> bool {
        self.virtual_pointer.is_some()
    }

    /// Name of the most recently resolved control scheme, or `None`
    /// before the first activation.
    pub fn current_control_scheme(&self) -> Option<&'static str> {
        self.current_scheme.map(|scheme| scheme.name())
    }

    /// This instance's current effective speed in pixels per second.
    pub fn cursor_speed(&self) -> f64 {
        *self.speed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the presented sprite's opacity channel only; position and
    /// visibility logic are unaffected. Clamped into `[0, 1]`.
    pub fn cursor_alpha(&mut self, alpha: f64) {
        self.presenter.set_alpha(alpha);
    }

    /// Current presentation state of the cursor sprite.
    pub fn sprite(&self) -> CursorSprite {
        self.presenter.sprite()
    }

    /// Device-space position of the emulated pointer while active.
    pub fn virtual_position(&self) -> Option<Point> {
        let guard = self.virtual_pointer.as_ref()?;
        guard.with(|pointer| pointer.position()).ok()
    }

    /// Acquires the virtual pointer, joins the speed registry, seeds both
    /// devices at the configured anchor fraction of the screen, and
    /// resolves the initial scheme.
    pub fn activate(&mut self, frame: &FrameInput) -> Result<(), EmulatorError> {
        if self.is_active() {
            return Ok(());
        }

        self.real = self.overrides.pointer.or_else(|| pointer_devices().next());
        if self.real.is_none() {
            debug!("no real pointer device available; running emulation-only");
        }

        let guard = acquire_virtual_pointer();
        speed::register(&self.speed);

        // Seed both devices at the anchor position so the cursor does not
        // jump on the first frame.
        let (anchor_x, anchor_y) = self.settings.initial_anchor;
        let initial = frame.screen.anchor(anchor_x, anchor_y);
        if let Some(real) = self.real
            && let Err(err) = real.warp(initial)
        {
            warn!(%err, "failed to seed real pointer position");
        }
        let seeded = guard.with(|pointer| {
            pointer.warp(initial, frame.screen, self.settings.padding);
            pointer.position()
        })?;
        self.presenter.present(seeded, frame.screen);
        self.presenter.mark_rendered();

        self.virtual_pointer = Some(guard);

        // First transition out of the uninitialized state.
        let fired = self.resolve_scheme(frame)?;
        if !fired {
            trace!("initial scheme resolution deferred");
        }
        self.current_scheme = Some(frame.scheme);
        self.idle.reset();
        self.presenter.apply_visibility(true);
        debug!(scheme = frame.scheme.name(), position = %seeded, "cursor emulator activated");
        Ok(())
    }

    /// One cooperative update pass, invoked once per rendered frame from
    /// the host's main/UI thread. Degraded conditions (missing devices,
    /// failing device calls) skip the affected stage and never abort the
    /// rest of the frame.
    pub fn update(&mut self, frame: &FrameInput) {
        if !self.is_active() {
            trace!("update on inactive emulator ignored");
            return;
        }

        // Scheme-change detection runs first so a transition and its
        // position handoff are visible within the same frame.
        let transition_fired = match self.resolve_scheme(frame) {
            Ok(fired) => fired,
            Err(err) => {
                warn!(%err, "scheme transition failed; continuing frame");
                false
            }
        };
        self.current_scheme = Some(frame.scheme);

        self.integrate_motion(frame);
        self.follow_real_pointer(frame);
        self.gate_visibility(transition_fired, frame.delta_time);
    }

    /// Releases the virtual pointer, leaves the speed registry, restores
    /// the OS cursor, and resets the machine. Idempotent; also invoked
    /// from `Drop` so release is guaranteed on abnormal teardown.
    pub fn deactivate(&mut self) {
        let Some(guard) = self.virtual_pointer.take() else {
            return;
        };
        drop(guard);
        speed::unregister(&self.speed);

        if let Some(real) = self.real
            && let Err(err) = real.set_os_cursor_visible(true)
        {
            warn!(%err, "failed to restore OS cursor visibility");
        }

        self.presenter.set_scheme_visible(false);
        self.presenter.apply_visibility(false);
        self.machine.reset();
        self.idle.reset();
        self.gamepad_pressed = false;
        debug!("cursor emulator deactivated");
    }

    fn resolve_scheme(&mut self, frame: &FrameInput) -> Result<bool, EmulatorError> {
        let guard = self.virtual_pointer.as_ref().ok_or(EmulatorError::NotActive)?;
        let mut ctx = TransitionContext {
            real: self.real,
            virtual_pointer: guard,
            presenter: &mut self.presenter,
            settings: &self.settings,
            screen: frame.screen,
        };
        Ok(self.machine.resolve(frame.scheme, &mut ctx)?)
    }

    /// Reads the controller snapshot, moves the virtual pointer, derives
    /// the press state, and presents the result. No-ops while no
    /// controller is connected.
    fn integrate_motion(&mut self, frame: &FrameInput) {
        let Some(guard) = self.virtual_pointer.as_ref() else {
            return;
        };
        let Some(state) = frame.gamepad.as_ref() else {
            return;
        };

        let displacement = motion::integrate(
            state,
            self.settings.stick,
            self.settings.curve,
            self.cursor_speed(),
            frame.delta_time,
        );

        let pressed =
            virtual_pointer::derive_press(state, self.settings.button, self.settings.trigger);
        self.gamepad_pressed = pressed;

        let result = guard.with(|pointer| {
            pointer.apply_displacement(displacement, frame.screen, self.settings.padding);
            let edge = pointer.write_pressed(pressed);
            (pointer.position(), edge)
        });
        let (position, press_edge) = match result {
            Ok(values) => values,
            Err(err) => {
                warn!(%err, "virtual pointer unavailable; skipping motion");
                return;
            }
        };

        if press_edge {
            self.notify_press_edge(pressed, position);
        }

        self.presenter.present(position, frame.screen);
    }

    /// While the pointer scheme is active the presenter follows the real
    /// device instead of the virtual one.
    fn follow_real_pointer(&mut self, frame: &FrameInput) {
        if !self.machine.real_drives_presentation() {
            return;
        }
        let Some(real) = self.real else {
            return;
        };
        let position = match real.position() {
            Ok(position) => position,
            Err(err) => {
                warn!(%err, "real pointer read failed; skipping presentation");
                return;
            }
        };
        let padding = self.settings.padding;
        let clamped = position.clamp(
            Point::new(padding, padding),
            Point::new(frame.screen.width() - padding, frame.screen.height() - padding),
        );
        self.presenter.present(clamped, frame.screen);
    }

    /// Applies the inactivity gate to the scheme-determined visibility.
    /// A transition in the same frame wins over an expiring countdown.
    fn gate_visibility(&mut self, transition_fired: bool, delta_time: f64) {
        let real_pressed = self
            .real
            .and_then(|device| device.is_pressed(PointerButton::Left).ok())
            .unwrap_or(false);
        let moved = self.presenter.sprite_moved();
        let active = moved || self.gamepad_pressed || real_pressed;
        if active {
            self.presenter.mark_rendered();
        }

        let idle_allows = if transition_fired {
            self.idle.reset();
            true
        } else {
            self.idle.tick(active, delta_time)
        };
        self.presenter.apply_visibility(idle_allows);
    }

    fn notify_press_edge(&mut self, pressed: bool, position: Point) {
        for observer in &mut self.observers {
            let outcome = if pressed {
                observer.on_press(position)
            } else {
                observer.on_release(position)
            };
            if let Err(err) = outcome {
                error!(%err, "click observer failed; continuing frame");
            }
        }
    }
}

impl Drop for CursorEmulator {
    fn drop(&mut self) {
        self.deactivate();
    }
}

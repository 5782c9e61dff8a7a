//! Control-scheme state machine.
//!
//! Tracks which input scheme is active and drives the enter/exit effects
//! on visibility, device pairing, and position handoff. Scheme changes are
//! detected by comparing the scheme resolved by the host this frame with
//! the stored previous one; no event subscription is involved, so there is
//! no subscribe/unsubscribe lifecycle to leak.

use padpointer_core::platform::{PlatformError, PointerDevice};
use padpointer_core::types::Size;
use tracing::{debug, warn};

use crate::presenter::CursorPresenter;
use crate::settings::CursorSettings;
use crate::virtual_pointer::VirtualPointerGuard;

/// Input modality resolved by the host environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlScheme {
    Pointer,
    Gamepad,
    Other,
}

impl ControlScheme {
    pub fn name(&self) -> &'static str {
        match self {
            ControlScheme::Pointer => "Pointer",
            ControlScheme::Gamepad => "Gamepad",
            ControlScheme::Other => "Other",
        }
    }
}

/// Machine states. There is no terminal state; teardown resets to
/// `Uninitialized`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemeState {
    #[default]
    Uninitialized,
    PointerActive,
    GamepadActive,
    OtherActive,
}

impl SchemeState {
    fn scheme(self) -> Option<ControlScheme> {
        match self {
            SchemeState::Uninitialized => None,
            SchemeState::PointerActive => Some(ControlScheme::Pointer),
            SchemeState::GamepadActive => Some(ControlScheme::Gamepad),
            SchemeState::OtherActive => Some(ControlScheme::Other),
        }
    }
}

/// Everything a transition may touch, borrowed for the duration of one
/// resolve call so the machine itself stays free of device ownership.
pub(crate) struct TransitionContext<'a> {
    pub real: Option<&'a dyn PointerDevice>,
    pub virtual_pointer: &'a VirtualPointerGuard,
    pub presenter: &'a mut CursorPresenter,
    pub settings: &'a CursorSettings,
    pub screen: Size,
}

#[derive(Debug, Default)]
pub struct SchemeMachine {
    state: SchemeState,
    real_drives_presentation: bool,
}

impl SchemeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchemeState {
        self.state
    }

    /// While set, the presenter follows the real pointer instead of the
    /// virtual one.
    pub fn real_drives_presentation(&self) -> bool {
        self.real_drives_presentation
    }

    /// Returns to `Uninitialized`; the next resolve acts as an initial
    /// activation again.
    pub fn reset(&mut self) {
        self.state = SchemeState::Uninitialized;
        self.real_drives_presentation = false;
    }

    /// Compares `resolved` with the stored previous scheme and fires the
    /// transition on change. Returns whether a transition fired; calling
    /// again with the same resolved scheme is a no-op.
    pub(crate) fn resolve(
        &mut self,
        resolved: ControlScheme,
        ctx: &mut TransitionContext<'_>,
    ) -> Result<bool, PlatformError> {
        if self.state.scheme() == Some(resolved) {
            return Ok(false);
        }

        match resolved {
            ControlScheme::Pointer => self.enter_pointer(ctx),
            ControlScheme::Gamepad => self.enter_gamepad(ctx),
            ControlScheme::Other => self.enter_other(ctx),
        }
    }

    fn enter_pointer(&mut self, ctx: &mut TransitionContext<'_>) -> Result<bool, PlatformError> {
        // Without a real pointer the transition cannot hand the position
        // over; abort without recording a state change so a later frame
        // with a device present retries.
        let Some(real) = ctx.real else {
            warn!("pointer scheme resolved but no real pointer present; transition deferred");
            return Ok(false);
        };

        if ctx.settings.hide_real_pointer {
            ctx.presenter.set_scheme_visible(true);
            real.set_os_cursor_visible(false)?;
        } else {
            ctx.presenter.set_scheme_visible(false);
            real.set_os_cursor_visible(true)?;
        }

        // The real device continues where the virtual cursor stopped.
        let handoff = ctx.virtual_pointer.with(|pointer| pointer.position())?;
        real.warp(handoff)?;

        self.real_drives_presentation = true;
        self.state = SchemeState::PointerActive;
        debug!(position = %handoff, "entered pointer scheme");
        Ok(true)
    }

    fn enter_gamepad(&mut self, ctx: &mut TransitionContext<'_>) -> Result<bool, PlatformError> {
        ctx.presenter.set_scheme_visible(true);

        if let Some(real) = ctx.real {
            real.set_os_cursor_visible(false)?;

            // Continuity handoff: the virtual cursor continues where the
            // real device stopped, and presentation follows immediately so
            // the switch is visible within the same frame.
            let handoff = real.position()?;
            let position = ctx.virtual_pointer.with(|pointer| {
                pointer.warp(handoff, ctx.screen, ctx.settings.padding);
                pointer.position()
            })?;
            ctx.presenter.present(position, ctx.screen);
            debug!(position = %position, "entered gamepad scheme");
        } else {
            debug!("entered gamepad scheme without real pointer");
        }

        self.real_drives_presentation = false;
        self.state = SchemeState::GamepadActive;
        Ok(true)
    }

    fn enter_other(&mut self, ctx: &mut TransitionContext<'_>) -> Result<bool, PlatformError> {
        ctx.presenter.set_scheme_visible(false);
        self.real_drives_presentation = false;
        self.state = SchemeState::OtherActive;
        debug!("entered unrecognized scheme");
        Ok(true)
    }
}

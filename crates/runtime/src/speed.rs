//! Process-wide cursor speed registry.
//!
//! Holds the clamped global speed and non-owning handles to every live
//! emulator instance so a speed change reaches all of them. Mutation
//! happens only on the host's main/UI thread (an embedding contract); the
//! mutex exists for soundness of the static, not for contention.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::debug;

pub const MIN_SPEED: f64 = 100.0;
pub const MAX_SPEED: f64 = 2500.0;

/// Per-instance speed cell; emulators read their effective speed from it.
pub(crate) type SpeedCell = Arc<Mutex<f64>>;

struct RegistryState {
    /// `None` until the first `change_speed` call; instances keep their
    /// configured speed until a global value exists.
    speed: Option<f64>,
    instances: Vec<Weak<Mutex<f64>>>,
}

static REGISTRY: Mutex<RegistryState> =
    Mutex::new(RegistryState { speed: None, instances: Vec::new() });

fn registry() -> std::sync::MutexGuard<'static, RegistryState> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clamps `value` into `[MIN_SPEED, MAX_SPEED]`, stores it as the global
/// speed, and applies it to every live instance. Returns the stored value.
pub fn change_speed(value: f64) -> f64 {
    let clamped = value.clamp(MIN_SPEED, MAX_SPEED);
    let mut state = registry();
    state.speed = Some(clamped);
    state.instances.retain(|handle| match handle.upgrade() {
        Some(cell) => {
            *cell.lock().unwrap_or_else(PoisonError::into_inner) = clamped;
            true
        }
        None => false,
    });
    debug!(speed = clamped, "global cursor speed changed");
    clamped
}

/// The stored global speed, if one has been set.
pub fn current_speed() -> Option<f64> {
    registry().speed
}

/// Adds an instance cell to the live set, seeding it with the stored
/// global speed when one exists.
pub(crate) fn register(cell: &SpeedCell) {
    let mut state = registry();
    if let Some(speed) = state.speed {
        *cell.lock().unwrap_or_else(PoisonError::into_inner) = speed;
    }
    state.instances.push(Arc::downgrade(cell));
}

/// Removes an instance cell from the live set. Idempotent: removing an
/// absent cell is not an error.
pub(crate) fn unregister(cell: &SpeedCell) {
    let mut state = registry();
    state
        .instances
        .retain(|handle| handle.upgrade().is_some_and(|live| !Arc::ptr_eq(&live, cell)));
}

#[cfg(test)]
pub(crate) fn reset_for_tests() {
    let mut state = registry();
    state.speed = None;
    state.instances.clear();
}

use padpointer_core::platform::{GamepadSource, GamepadState, PlatformError};

/// Scriptable controller source: replays whatever snapshot the test set
/// last, or reports a disconnected controller.
#[derive(Debug, Default)]
pub struct MockGamepad {
    state: Option<GamepadState>,
}

impl MockGamepad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state(&mut self, state: GamepadState) {
        self.state = Some(state);
    }

    pub fn disconnect(&mut self) {
        self.state = None;
    }
}

impl GamepadSource for MockGamepad {
    fn sample(&mut self) -> Result<Option<GamepadState>, PlatformError> {
        Ok(self.state)
    }
}

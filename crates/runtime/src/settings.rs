use serde::{Deserialize, Serialize};

use crate::motion::ResponseCurve;

/// Which analog stick drives the cursor.
///
/// `Both` prefers the left stick and falls back to the right one only
/// while the left reads exactly `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickPolicy {
    #[default]
    Left,
    Right,
    Both,
}

/// Face button mapped to the emulated primary click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSelection {
    North,
    #[default]
    South,
    East,
    West,
    None,
}

/// Trigger or bumper mapped to the emulated primary click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerSelection {
    Lb,
    Lt,
    Rb,
    #[default]
    Rt,
    LtRt,
    LbRb,
    None,
}

/// Render mode of the UI surface the cursor sprite lives on.
///
/// `Overlay` projects screen points directly into surface-local space;
/// any other mode needs the host's primary camera as projection reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceMode {
    #[default]
    Overlay,
    Camera,
}

/// Embedder-facing configuration of a cursor emulator instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSettings {
    /// Cursor speed in pixels per second at full stick deflection.
    pub speed: f64,
    /// Margin in pixels the cursor cannot leave on any screen edge.
    pub padding: f64,
    /// Keep the virtual sprite visible and suppress the OS pointer while
    /// the pointer scheme is active.
    pub hide_real_pointer: bool,
    /// Normalized `[0, 1]` screen fraction where both devices start.
    pub initial_anchor: (f64, f64),
    /// Seconds without activity before the sprite auto-hides; a
    /// non-positive value disables auto-hiding.
    pub inactive_hide_time: f64,
    pub stick: StickPolicy,
    pub button: ButtonSelection,
    pub trigger: TriggerSelection,
    pub curve: ResponseCurve,
    pub surface_mode: SurfaceMode,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            speed: 1000.0,
            padding: 35.0,
            hide_real_pointer: true,
            initial_anchor: (0.5, 0.5),
            inactive_hide_time: 4.0,
            stick: StickPolicy::default(),
            button: ButtonSelection::default(),
            trigger: TriggerSelection::default(),
            curve: ResponseCurve::default(),
            surface_mode: SurfaceMode::default(),
        }
    }
}

impl CursorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_hide_real_pointer(mut self, hide: bool) -> Self {
        self.hide_real_pointer = hide;
        self
    }

    pub fn with_initial_anchor(mut self, x: f64, y: f64) -> Self {
        self.initial_anchor = (x, y);
        self
    }

    pub fn with_inactive_hide_time(mut self, seconds: f64) -> Self {
        self.inactive_hide_time = seconds;
        self
    }

    pub fn with_stick(mut self, stick: StickPolicy) -> Self {
        self.stick = stick;
        self
    }

    pub fn with_button(mut self, button: ButtonSelection) -> Self {
        self.button = button;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerSelection) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_curve(mut self, curve: ResponseCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_surface_mode(mut self, mode: SurfaceMode) -> Self {
        self.surface_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_expectations() {
        let settings = CursorSettings::default();
        assert_eq!(settings.speed, 1000.0);
        assert_eq!(settings.padding, 35.0);
        assert!(settings.hide_real_pointer);
        assert_eq!(settings.initial_anchor, (0.5, 0.5));
        assert_eq!(settings.inactive_hide_time, 4.0);
        assert_eq!(settings.trigger, TriggerSelection::Rt);
    }

    #[rstest]
    fn builder_overrides_selected_fields() {
        let settings = CursorSettings::new()
            .with_stick(StickPolicy::Both)
            .with_button(ButtonSelection::None)
            .with_inactive_hide_time(-1.0);
        assert_eq!(settings.stick, StickPolicy::Both);
        assert_eq!(settings.button, ButtonSelection::None);
        assert_eq!(settings.inactive_hide_time, -1.0);
        // Untouched fields keep their defaults.
        assert_eq!(settings.padding, 35.0);
    }

    #[rstest]
    fn settings_deserialize_from_partial_config() {
        let parsed: CursorSettings =
            serde_json::from_str(r#"{ "stick": "both", "trigger": "lt-rt", "speed": 1500.0 }"#)
                .expect("valid settings document");
        assert_eq!(parsed.stick, StickPolicy::Both);
        assert_eq!(parsed.trigger, TriggerSelection::LtRt);
        assert_eq!(parsed.speed, 1500.0);
        assert_eq!(parsed.padding, 35.0);
    }
}

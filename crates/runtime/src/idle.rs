//! Inactivity countdown that hides an idle cursor.

/// Hides the presented cursor after a configurable idle period.
///
/// A non-positive timeout disables the feature entirely: the cursor then
/// never auto-hides and [`tick`](InactivityTimer::tick) always allows the
/// scheme-determined visibility through.
#[derive(Clone, Debug, PartialEq)]
pub struct InactivityTimer {
    timeout: f64,
    remaining: f64,
}

impl InactivityTimer {
    pub fn new(timeout: f64) -> Self {
        Self { timeout, remaining: timeout }
    }

    pub fn enabled(&self) -> bool {
        self.timeout > 0.0
    }

    /// Restarts the countdown, e.g. on a scheme transition.
    pub fn reset(&mut self) {
        self.remaining = self.timeout;
    }

    /// Advances the countdown by one frame.
    ///
    /// `active` is true when any activity was observed this frame
    /// (presented cursor moved, gamepad press held, or the real primary
    /// button held); activity restarts the countdown. Returns whether the
    /// cursor may stay visible: `false` forces it hidden regardless of
    /// what the scheme logic decided.
    pub fn tick(&mut self, active: bool, delta_time: f64) -> bool {
        if !self.enabled() {
            return true;
        }
        if active {
            self.reset();
            return true;
        }
        if self.remaining > 0.0 {
            self.remaining -= delta_time;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn expires_after_timeout_without_activity() {
        let mut timer = InactivityTimer::new(4.0);
        // Eight idle half-second frames run the countdown to zero; the
        // frame after that forces the cursor hidden.
        for _ in 0..8 {
            assert!(timer.tick(false, 0.5));
        }
        assert!(!timer.tick(false, 0.5));
    }

    #[rstest]
    fn activity_restarts_countdown_and_restores_visibility() {
        let mut timer = InactivityTimer::new(4.0);
        for _ in 0..1000 {
            timer.tick(false, 0.1);
        }
        assert!(!timer.tick(false, 0.1));
        assert!(timer.tick(true, 0.1));
        // Fresh countdown after the reset.
        assert!(timer.tick(false, 3.9));
        assert!(timer.tick(false, 0.2));
        assert!(!timer.tick(false, 0.1));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    fn non_positive_timeout_disables_hiding(#[case] timeout: f64) {
        let mut timer = InactivityTimer::new(timeout);
        assert!(!timer.enabled());
        for _ in 0..100 {
            assert!(timer.tick(false, 1.0));
        }
    }
}

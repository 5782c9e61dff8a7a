//! Stick selection and response-curve shaping for cursor motion.

use padpointer_core::platform::GamepadState;
use padpointer_core::types::Point;
use serde::{Deserialize, Serialize};

use crate::settings::StickPolicy;

/// Monotonic response curve shaping stick magnitude into motion magnitude.
///
/// Curves map `[0, 1] -> [0, 1]` with `f(0) = 0` and are applied as odd
/// functions about zero (the sign of each component is preserved).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseCurve {
    #[default]
    Linear,
    /// `t^2`: fine control near the center, full speed at the edge.
    EaseIn,
    /// `1 - (1 - t)^2`: fast take-off, soft approach to full speed.
    EaseOut,
    /// `3t^2 - 2t^3`.
    SmoothStep,
}

impl ResponseCurve {
    /// Evaluates the curve at `t`, clamped into `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            ResponseCurve::Linear => t,
            ResponseCurve::EaseIn => t * t,
            ResponseCurve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            ResponseCurve::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Picks the raw stick vector according to the configured policy.
///
/// `Both` prefers the left stick and only falls back to the right one
/// while the left reads exactly `(0, 0)`.
pub fn select_stick(state: &GamepadState, policy: StickPolicy) -> Point {
    match policy {
        StickPolicy::Left => state.left_stick,
        StickPolicy::Right => state.right_stick,
        StickPolicy::Both => {
            if state.left_stick.is_zero() {
                state.right_stick
            } else {
                state.left_stick
            }
        }
    }
}

/// Applies the response curve per axis, preserving each component's sign.
pub fn shape(raw: Point, curve: ResponseCurve) -> Point {
    Point::new(shape_axis(raw.x(), curve), shape_axis(raw.y(), curve))
}

fn shape_axis(value: f64, curve: ResponseCurve) -> f64 {
    value.signum() * curve.evaluate(value.abs())
}

/// Produces the unclamped frame displacement for one controller reading.
pub fn integrate(
    state: &GamepadState,
    policy: StickPolicy,
    curve: ResponseCurve,
    speed: f64,
    delta_time: f64,
) -> Point {
    shape(select_stick(state, policy), curve) * (speed * delta_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn state(left: Point, right: Point) -> GamepadState {
        GamepadState { left_stick: left, right_stick: right, ..GamepadState::default() }
    }

    #[rstest]
    fn both_policy_prefers_left_stick() {
        let reading = state(Point::new(-0.5, 0.1), Point::new(1.0, 1.0));
        assert_eq!(select_stick(&reading, StickPolicy::Both), Point::new(-0.5, 0.1));
    }

    #[rstest]
    fn both_policy_falls_back_on_exact_rest() {
        let reading = state(Point::ZERO, Point::new(0.3, 0.0));
        assert_eq!(select_stick(&reading, StickPolicy::Both), Point::new(0.3, 0.0));

        // A left stick that is only nearly at rest still wins.
        let reading = state(Point::new(0.0, 0.001), Point::new(0.3, 0.0));
        assert_eq!(select_stick(&reading, StickPolicy::Both), Point::new(0.0, 0.001));
    }

    #[rstest]
    #[case(ResponseCurve::Linear)]
    #[case(ResponseCurve::EaseIn)]
    #[case(ResponseCurve::EaseOut)]
    #[case(ResponseCurve::SmoothStep)]
    fn curves_are_monotonic_and_anchored(#[case] curve: ResponseCurve) {
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-12);
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = curve.evaluate(f64::from(step) / 100.0);
            assert!(value >= previous, "{curve:?} not monotonic at step {step}");
            previous = value;
        }
    }

    #[rstest]
    fn shaping_preserves_sign() {
        let shaped = shape(Point::new(-0.5, 0.5), ResponseCurve::EaseIn);
        assert_eq!(shaped, Point::new(-0.25, 0.25));
    }

    #[rstest]
    fn integration_scales_by_speed_and_time() {
        let reading = state(Point::new(1.0, -1.0), Point::ZERO);
        let displacement =
            integrate(&reading, StickPolicy::Left, ResponseCurve::Linear, 1000.0, 0.016);
        assert_eq!(displacement, Point::new(16.0, -16.0));
    }

    #[rstest]
    fn curve_evaluation_clamps_out_of_range_input() {
        assert_eq!(ResponseCurve::Linear.evaluate(1.5), 1.0);
        assert_eq!(ResponseCurve::SmoothStep.evaluate(-0.5), 0.0);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Point;

/// A width/height pair, typically the screen or a UI surface in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn width(&self) -> f64 {
        self.width
    }

    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Resolves a normalized `[0, 1]` anchor fraction to an absolute point.
    pub fn anchor(&self, fraction_x: f64, fraction_y: f64) -> Point {
        Point::new(self.width * fraction_x.clamp(0.0, 1.0), self.height * fraction_y.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.5, 0.5, Point::new(960.0, 540.0))]
    #[case(0.0, 1.0, Point::new(0.0, 1080.0))]
    #[case(-2.0, 3.0, Point::new(0.0, 1080.0))]
    fn anchor_resolves_and_clamps_fractions(#[case] fx: f64, #[case] fy: f64, #[case] expected: Point) {
        let screen = Size::new(1920.0, 1080.0);
        assert_eq!(screen.anchor(fx, fy), expected);
    }
}

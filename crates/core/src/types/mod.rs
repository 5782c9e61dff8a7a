pub mod point;
pub mod size;

pub use point::Point;
pub use size::Size;

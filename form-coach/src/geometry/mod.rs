//! Geometry kernel - pure functions over normalized points
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod measure;
mod point;

pub use angles::{angle, inclination_from_vertical};
pub use measure::{average, distance, horizontal_delta, in_range, midpoint, vertical_delta};
pub use point::Point;

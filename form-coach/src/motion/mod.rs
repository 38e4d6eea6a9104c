//! Motion module - frame-to-frame movement of tracked points
//!
//! Re-exports only. All logic in submodules.

mod velocity;

pub use velocity::{VerticalVelocity, DEAD_ZONE, VELOCITY_FRAMES};

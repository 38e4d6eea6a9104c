//! Pose module - landmark identities and per-frame landmark storage
//!
//! Re-exports only. All logic in submodules.

mod frame;
mod landmarks;

pub use frame::LandmarkFrame;
pub use landmarks::{Landmark, LandmarkId, Side, LANDMARK_COUNT, VALUES_PER_LANDMARK};

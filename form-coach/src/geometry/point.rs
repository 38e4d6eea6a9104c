//! Normalized 3D point

use serde::{Deserialize, Serialize};

/// Position in normalized image coordinates (x right, y down, z toward camera)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub const fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

//! Landmark identities and per-landmark data
//!
//! Slot layout follows MediaPipe Pose (33 landmarks).

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

/// Number of landmark slots in a frame
pub const LANDMARK_COUNT: usize = 33;

/// Floats per landmark in the flat JS buffer: x, y, z, visibility
pub const VALUES_PER_LANDMARK: usize = 4;

/// Fixed anatomical identity of a landmark slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkId {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkId {
    /// Every slot in buffer order
    pub const ALL: [LandmarkId; LANDMARK_COUNT] = [
        LandmarkId::Nose,
        LandmarkId::LeftEyeInner,
        LandmarkId::LeftEye,
        LandmarkId::LeftEyeOuter,
        LandmarkId::RightEyeInner,
        LandmarkId::RightEye,
        LandmarkId::RightEyeOuter,
        LandmarkId::LeftEar,
        LandmarkId::RightEar,
        LandmarkId::MouthLeft,
        LandmarkId::MouthRight,
        LandmarkId::LeftShoulder,
        LandmarkId::RightShoulder,
        LandmarkId::LeftElbow,
        LandmarkId::RightElbow,
        LandmarkId::LeftWrist,
        LandmarkId::RightWrist,
        LandmarkId::LeftPinky,
        LandmarkId::RightPinky,
        LandmarkId::LeftIndex,
        LandmarkId::RightIndex,
        LandmarkId::LeftThumb,
        LandmarkId::RightThumb,
        LandmarkId::LeftHip,
        LandmarkId::RightHip,
        LandmarkId::LeftKnee,
        LandmarkId::RightKnee,
        LandmarkId::LeftAnkle,
        LandmarkId::RightAnkle,
        LandmarkId::LeftHeel,
        LandmarkId::RightHeel,
        LandmarkId::LeftFootIndex,
        LandmarkId::RightFootIndex,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Body side, used to pick one limb chain out of a symmetric pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub const fn shoulder(self) -> LandmarkId {
        match self {
            Side::Left => LandmarkId::LeftShoulder,
            Side::Right => LandmarkId::RightShoulder,
        }
    }

    pub const fn elbow(self) -> LandmarkId {
        match self {
            Side::Left => LandmarkId::LeftElbow,
            Side::Right => LandmarkId::RightElbow,
        }
    }

    pub const fn wrist(self) -> LandmarkId {
        match self {
            Side::Left => LandmarkId::LeftWrist,
            Side::Right => LandmarkId::RightWrist,
        }
    }

    pub const fn hip(self) -> LandmarkId {
        match self {
            Side::Left => LandmarkId::LeftHip,
            Side::Right => LandmarkId::RightHip,
        }
    }

    pub const fn knee(self) -> LandmarkId {
        match self {
            Side::Left => LandmarkId::LeftKnee,
            Side::Right => LandmarkId::RightKnee,
        }
    }

    pub const fn ankle(self) -> LandmarkId {
        match self {
            Side::Left => LandmarkId::LeftAnkle,
            Side::Right => LandmarkId::RightAnkle,
        }
    }

    pub const fn heel(self) -> LandmarkId {
        match self {
            Side::Left => LandmarkId::LeftHeel,
            Side::Right => LandmarkId::RightHeel,
        }
    }

    pub const fn foot_index(self) -> LandmarkId {
        match self {
            Side::Left => LandmarkId::LeftFootIndex,
            Side::Right => LandmarkId::RightFootIndex,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single landmark: normalized position plus detector visibility
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,          // 0-1 normalized
    pub y: f32,          // 0-1 normalized
    pub z: f32,          // Relative depth
    pub visibility: f32, // 0-1 confidence
}

impl Landmark {
    pub const fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, z: 0.0, visibility }
    }

    pub const fn point(&self) -> Point {
        Point::with_depth(self.x, self.y, self.z)
    }
}

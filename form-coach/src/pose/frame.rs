//! One instant of pose data
//!
//! Receives the flat MediaPipe buffer from JavaScript and exposes the
//! landmarks by identity to the analyzers.

use tracing::warn;

use super::landmarks::{Landmark, LandmarkId, LANDMARK_COUNT, VALUES_PER_LANDMARK};
use crate::error::FormError;
use crate::geometry::Point;

/// Fixed-size, fixed-identity set of landmarks for one video frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkFrame {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LANDMARK_COUNT],
        }
    }
}

impl LandmarkFrame {
    pub const fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Parse a flat buffer of 132 values (33 landmarks × x, y, z, visibility)
    ///
    /// A wrong length is a caller contract violation and fails loudly. A
    /// non-finite visibility is read as 0 so the landmark is simply unusable.
    pub fn from_flat(data: &[f32]) -> Result<Self, FormError> {
        let expected = LANDMARK_COUNT * VALUES_PER_LANDMARK;
        if data.len() != expected {
            warn!(expected, actual = data.len(), "rejecting malformed landmark buffer");
            return Err(FormError::frame_size(expected, data.len()));
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (slot, chunk) in landmarks.iter_mut().zip(data.chunks_exact(VALUES_PER_LANDMARK)) {
            let visibility = if chunk[3].is_finite() {
                chunk[3].clamp(0.0, 1.0)
            } else {
                0.0
            };
            *slot = Landmark {
                x: chunk[0],
                y: chunk[1],
                z: chunk[2],
                visibility,
            };
        }

        Ok(Self { landmarks })
    }

    pub fn get(&self, id: LandmarkId) -> Landmark {
        self.landmarks[id.index()]
    }

    pub fn point(&self, id: LandmarkId) -> Point {
        self.get(id).point()
    }

    pub fn visibility(&self, id: LandmarkId) -> f32 {
        self.get(id).visibility
    }

    /// Replace one landmark, returning the updated frame
    #[must_use]
    pub fn with(mut self, id: LandmarkId, landmark: Landmark) -> Self {
        self.landmarks[id.index()] = landmark;
        self
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_buffer() -> Vec<f32> {
        (0..LANDMARK_COUNT)
            .flat_map(|i| [i as f32 / 100.0, 0.5, -0.1, 0.9])
            .collect()
    }

    #[test]
    fn parses_flat_buffer_by_slot() {
        let frame = LandmarkFrame::from_flat(&flat_buffer()).unwrap();
        let knee = frame.get(LandmarkId::LeftKnee);
        assert_relative_eq!(knee.x, 0.25);
        assert_relative_eq!(knee.y, 0.5);
        assert_relative_eq!(knee.z, -0.1);
        assert_relative_eq!(knee.visibility, 0.9);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = LandmarkFrame::from_flat(&[0.0; 99]).unwrap_err();
        assert!(matches!(err, FormError::FrameSize { expected: 132, actual: 99 }));
    }

    #[test]
    fn sanitizes_visibility() {
        let mut data = flat_buffer();
        data[3] = f32::NAN;
        data[7] = 1.7;
        let frame = LandmarkFrame::from_flat(&data).unwrap();
        assert_relative_eq!(frame.visibility(LandmarkId::Nose), 0.0);
        assert_relative_eq!(frame.visibility(LandmarkId::LeftEyeInner), 1.0);
    }

    #[test]
    fn with_replaces_single_slot() {
        let frame = LandmarkFrame::default().with(LandmarkId::RightAnkle, Landmark::new(0.4, 0.9, 0.8));
        assert_relative_eq!(frame.point(LandmarkId::RightAnkle).y, 0.9);
        assert_relative_eq!(frame.visibility(LandmarkId::LeftAnkle), 0.0);
    }
}

//! Visibility gate - first check of every analyzer
//!
//! A landmark is only trusted when its visibility is at or above the
//! analyzer's floor. Frame confidence is the weakest trusted landmark.

use crate::pose::{LandmarkFrame, LandmarkId, Side};

/// Visibility floor for one analyzer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityGate {
    /// Minimum visibility to accept a landmark
    floor: f32,
}

impl VisibilityGate {
    pub const fn new(floor: f32) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    pub fn is_visible(&self, frame: &LandmarkFrame, id: LandmarkId) -> bool {
        frame.visibility(id) >= self.floor
    }

    /// True only if every required landmark clears the floor
    pub fn validate(&self, frame: &LandmarkFrame, ids: &[LandmarkId]) -> bool {
        ids.iter().all(|&id| self.is_visible(frame, id))
    }

    /// Sides whose limb chain fully clears the floor
    pub fn visible_sides<const N: usize>(
        &self,
        frame: &LandmarkFrame,
        chain: fn(Side) -> [LandmarkId; N],
    ) -> Vec<Side> {
        Side::BOTH
            .into_iter()
            .filter(|&side| self.validate(frame, &chain(side)))
            .collect()
    }

    /// The visible side whose weakest landmark is strongest
    pub fn best_side<const N: usize>(
        &self,
        frame: &LandmarkFrame,
        chain: fn(Side) -> [LandmarkId; N],
    ) -> Option<Side> {
        self.visible_sides(frame, chain).into_iter().max_by(|a, b| {
            confidence(frame, &chain(*a)).total_cmp(&confidence(frame, &chain(*b)))
        })
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Minimum visibility across the landmarks actually consulted
///
/// The weakest link decides how much the measurement can be trusted.
pub fn confidence(frame: &LandmarkFrame, ids: &[LandmarkId]) -> f32 {
    ids.iter()
        .map(|&id| frame.visibility(id))
        .reduce(f32::min)
        .unwrap_or(0.0)
}

// Common limb chains

pub fn leg_chain(side: Side) -> [LandmarkId; 3] {
    [side.hip(), side.knee(), side.ankle()]
}

pub fn arm_chain(side: Side) -> [LandmarkId; 3] {
    [side.shoulder(), side.elbow(), side.wrist()]
}

pub fn torso_thigh_chain(side: Side) -> [LandmarkId; 3] {
    [side.shoulder(), side.hip(), side.knee()]
}

pub fn body_line_chain(side: Side) -> [LandmarkId; 3] {
    [side.shoulder(), side.hip(), side.ankle()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;

    fn frame_with_visibility(left: f32, right: f32) -> LandmarkFrame {
        let mut frame = LandmarkFrame::default();
        for id in leg_chain(Side::Left) {
            frame = frame.with(id, Landmark::new(0.5, 0.5, left));
        }
        for id in leg_chain(Side::Right) {
            frame = frame.with(id, Landmark::new(0.5, 0.5, right));
        }
        frame
    }

    #[test]
    fn validate_requires_every_landmark() {
        let gate = VisibilityGate::new(0.5);
        let frame = frame_with_visibility(0.9, 0.3);
        assert!(gate.validate(&frame, &leg_chain(Side::Left)));
        assert!(!gate.validate(&frame, &leg_chain(Side::Right)));
        assert!(!gate.validate(&frame, &[LandmarkId::LeftHip, LandmarkId::RightHip]));
    }

    #[test]
    fn floor_is_inclusive() {
        let gate = VisibilityGate::new(0.5);
        let frame = frame_with_visibility(0.5, 0.49);
        assert_eq!(gate.visible_sides(&frame, leg_chain), vec![Side::Left]);
    }

    #[test]
    fn confidence_is_minimum_not_mean() {
        let frame = LandmarkFrame::default()
            .with(LandmarkId::LeftHip, Landmark::new(0.5, 0.5, 0.95))
            .with(LandmarkId::LeftKnee, Landmark::new(0.5, 0.6, 0.4));
        assert_eq!(confidence(&frame, &[LandmarkId::LeftHip, LandmarkId::LeftKnee]), 0.4);
        assert_eq!(confidence(&frame, &[]), 0.0);
    }

    #[test]
    fn best_side_prefers_stronger_chain() {
        let gate = VisibilityGate::new(0.3);
        let frame = frame_with_visibility(0.6, 0.8);
        assert_eq!(gate.best_side(&frame, leg_chain), Some(Side::Right));
        assert_eq!(VisibilityGate::new(0.9).best_side(&frame, leg_chain), None);
    }
}

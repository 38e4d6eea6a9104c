//! Deadlift analyzer
//!
//! A rep is a hip hinge with near-straight knees followed by lockout with
//! the hips back at standing height. Standing hip height is learned from
//! upright frames.

use super::{chain_ids, mean_angle};
use crate::analyzer::{
    confidence, leg_chain, torso_thigh_chain, AnalysisResult, CycleEvent, CyclePhase,
    ExerciseAnalyzer, ExerciseType, RepCycle, VisibilityGate,
};
use crate::geometry::average;
use crate::pose::{LandmarkFrame, LandmarkId, Side};

const VISIBILITY_FLOOR: f32 = 0.5;
const COOLDOWN_MS: f64 = 1500.0;

/// Shoulder-hip-knee angle at the bottom of the hinge
pub const HINGE_ANGLE: f32 = 100.0;
/// Knees must stay at least this straight while hinged
pub const MIN_KNEE_ANGLE: f32 = 140.0;
pub const LOCKOUT_ANGLE: f32 = 140.0;
/// Hips within this of standing height count as locked out
pub const HIP_HEIGHT_TOLERANCE: f32 = 0.05;
/// Hinge and knee both at least this open when standing tall
const STANDING_ANGLE: f32 = 160.0;

fn full_chain(side: Side) -> [LandmarkId; 4] {
    [side.shoulder(), side.hip(), side.knee(), side.ankle()]
}

pub struct DeadliftAnalyzer {
    gate: VisibilityGate,
    cycle: RepCycle,
    standing_hip_y: Option<f32>,
}

impl DeadliftAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            cycle: RepCycle::new(COOLDOWN_MS),
            standing_hip_y: None,
        }
    }
}

impl Default for DeadliftAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for DeadliftAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::Deadlift
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let sides = self.gate.visible_sides(frame, full_chain);
        if sides.is_empty() {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::Deadlift,
                self.count(),
                "Turn side-on so your shoulders, hips, knees and ankles are visible",
            );
        }
        let conf = confidence(frame, &chain_ids(&sides, full_chain));

        let hinge = mean_angle(frame, &sides, torso_thigh_chain);
        let knee = mean_angle(frame, &sides, leg_chain);
        let hip_ys: Vec<f32> = sides.iter().map(|&s| frame.point(s.hip()).y).collect();
        let hip_y = average(&hip_ys);
        if !hinge.is_finite() || !knee.is_finite() || !hip_y.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::Deadlift, self.count(), conf);
        }

        let standing = hinge >= STANDING_ANGLE && knee >= STANDING_ANGLE;
        if standing && self.cycle.phase() == CyclePhase::Relaxed {
            self.standing_hip_y = Some(hip_y);
        }

        let squatting = hinge <= HINGE_ANGLE && knee < MIN_KNEE_ANGLE;
        let hinged = hinge <= HINGE_ANGLE && !squatting;
        let hips_home = self
            .standing_hip_y
            .is_some_and(|y| (hip_y - y).abs() <= HIP_HEIGHT_TOLERANCE);
        let locked_out = hinge >= LOCKOUT_ANGLE && hips_home;
        let event = self.cycle.step(hinged, locked_out, now_ms);

        let feedback = if squatting {
            "Keep your legs straighter - push your hips back, don't squat"
        } else if event == (CycleEvent::Completed { counted: true }) {
            "Strong lockout!"
        } else {
            match self.cycle.phase() {
                CyclePhase::Contracted if hinge >= LOCKOUT_ANGLE => "Stand all the way up and squeeze your glutes",
                CyclePhase::Contracted => "Drive your hips forward to stand up",
                CyclePhase::Relaxed if standing => "Hinge at the hips with a flat back",
                CyclePhase::Relaxed => "Hinge deeper - chest toward the floor",
            }
        };

        AnalysisResult::new(ExerciseType::Deadlift, self.count(), !squatting, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.cycle.count()
    }

    fn phase(&self) -> &'static str {
        match self.cycle.phase() {
            CyclePhase::Relaxed => "standing",
            CyclePhase::Contracted => "hinged",
        }
    }

    fn reset(&mut self) {
        self.cycle.reset();
        self.standing_hip_y = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bend, knees_at, shift, standing};

    fn hinge_at(degrees: f32) -> LandmarkFrame {
        Side::BOTH.into_iter().fold(standing(), |f, s| bend(f, s.knee(), s.hip(), s.shoulder(), degrees, 0.25))
    }

    #[test]
    fn hinge_and_lockout_counts() {
        let mut deadlift = DeadliftAnalyzer::new();
        deadlift.analyze(&standing(), 0.0);
        deadlift.analyze(&hinge_at(90.0), 1000.0);
        assert_eq!(deadlift.phase(), "hinged");
        let r = deadlift.analyze(&standing(), 2000.0);
        assert_eq!(r.current_count, 1);
        assert!(r.is_correct_form);
    }

    #[test]
    fn squatting_down_is_not_a_hinge() {
        let mut deadlift = DeadliftAnalyzer::new();
        deadlift.analyze(&standing(), 0.0);
        let squat = Side::BOTH.into_iter().fold(knees_at(100.0), |f, s| bend(f, s.knee(), s.hip(), s.shoulder(), 90.0, 0.25));
        let r = deadlift.analyze(&squat, 1000.0);
        assert!(!r.is_correct_form);
        assert_eq!(deadlift.phase(), "standing");
    }

    #[test]
    fn lockout_needs_hips_back_at_standing_height() {
        let mut deadlift = DeadliftAnalyzer::new();
        deadlift.analyze(&standing(), 0.0);
        deadlift.analyze(&hinge_at(90.0), 1000.0);
        // upright torso but the whole body is still low
        deadlift.analyze(&shift(standing(), 0.0, 0.1), 2000.0);
        assert_eq!(deadlift.count(), 0);
        assert_eq!(deadlift.phase(), "hinged");
        deadlift.analyze(&standing(), 2500.0);
        assert_eq!(deadlift.count(), 1);
    }
}

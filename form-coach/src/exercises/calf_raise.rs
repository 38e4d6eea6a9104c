//! Calf raise analyzer
//!
//! Measures heel height above the toes. The ankle is a poor signal here:
//! it sits above the toes even with the heel flat on the floor.

use super::chain_ids;
use crate::analyzer::{
    confidence, AnalysisResult, CycleEvent, CyclePhase, ExerciseAnalyzer, ExerciseType, Threshold,
    ThresholdCycle, VisibilityGate,
};
use crate::geometry::{average, vertical_delta};
use crate::pose::{LandmarkFrame, LandmarkId, Side};

/// Foot landmarks are small and often flicker
const VISIBILITY_FLOOR: f32 = 0.3;
const COOLDOWN_MS: f64 = 600.0;

/// Heel rise above the toes at the top (normalized units)
pub const RAISED_LIFT: f32 = 0.03;
/// Heel rise below which the heel counts as down
pub const LOWERED_LIFT: f32 = 0.01;
/// Largest left/right lift difference accepted as even
const MAX_IMBALANCE: f32 = 0.03;

fn foot_chain(side: Side) -> [LandmarkId; 2] {
    [side.heel(), side.foot_index()]
}

pub struct CalfRaiseAnalyzer {
    gate: VisibilityGate,
    cycle: ThresholdCycle,
}

impl CalfRaiseAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            cycle: ThresholdCycle::new(
                Threshold::Above(RAISED_LIFT),
                Threshold::Below(LOWERED_LIFT),
                COOLDOWN_MS,
            ),
        }
    }
}

impl Default for CalfRaiseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for CalfRaiseAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::CalfRaise
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let feet = self.gate.visible_sides(frame, foot_chain);
        if feet.is_empty() {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::CalfRaise,
                self.count(),
                "Make sure your feet are visible to the camera",
            );
        }
        let conf = confidence(frame, &chain_ids(&feet, foot_chain));

        // heel above toe gives a positive lift
        let lifts: Vec<f32> = feet
            .iter()
            .map(|&s| vertical_delta(frame.point(s.heel()), frame.point(s.foot_index())))
            .collect();
        let lift = average(&lifts);
        if !lift.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::CalfRaise, self.count(), conf);
        }

        let event = self.cycle.update(lift, now_ms);
        let uneven = lifts.len() == 2 && (lifts[0] - lifts[1]).abs() > MAX_IMBALANCE;

        let feedback = if uneven {
            "Rise evenly on both feet"
        } else if event == (CycleEvent::Completed { counted: true }) {
            "Good raise!"
        } else {
            match self.cycle.phase() {
                CyclePhase::Contracted => "Squeeze at the top, then lower slowly",
                CyclePhase::Relaxed if lift < LOWERED_LIFT => "Rise up onto the balls of your feet",
                CyclePhase::Relaxed => "Higher - lift your heels all the way",
            }
        };

        AnalysisResult::new(ExerciseType::CalfRaise, self.count(), !uneven, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.cycle.count()
    }

    fn phase(&self) -> &'static str {
        match self.cycle.phase() {
            CyclePhase::Relaxed => "down",
            CyclePhase::Contracted => "up",
        }
    }

    fn reset(&mut self) {
        self.cycle.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::pose::Landmark;
    use crate::test_support::{hide, set, standing};

    fn heels(left: f32, right: f32) -> LandmarkFrame {
        [(Side::Left, left), (Side::Right, right)]
            .into_iter()
            .fold(standing(), |f, (s, lift)| {
                let heel = f.point(s.heel());
                set(f, s.heel(), Point::new(heel.x, heel.y - lift))
            })
    }

    #[test]
    fn raise_and_lower_counts() {
        let mut calf = CalfRaiseAnalyzer::new();
        calf.analyze(&heels(0.0, 0.0), 0.0);
        calf.analyze(&heels(0.05, 0.05), 400.0);
        assert_eq!(calf.phase(), "up");
        let r = calf.analyze(&heels(0.0, 0.0), 800.0);
        assert_eq!(r.current_count, 1);
        assert!(r.is_correct_form);
    }

    #[test]
    fn small_lift_stays_in_dead_zone() {
        let mut calf = CalfRaiseAnalyzer::new();
        for i in 0..10 {
            calf.analyze(&heels(0.02, 0.02), f64::from(i) * 100.0);
        }
        assert_eq!(calf.phase(), "down");
        assert_eq!(calf.count(), 0);
    }

    #[test]
    fn uneven_raise_is_flagged() {
        let mut calf = CalfRaiseAnalyzer::new();
        let r = calf.analyze(&heels(0.08, 0.02), 0.0);
        assert!(!r.is_correct_form);
    }

    #[test]
    fn low_visibility_feet_still_pass_floor() {
        let mut calf = CalfRaiseAnalyzer::new();
        let dim = [LandmarkId::LeftHeel, LandmarkId::LeftFootIndex]
            .into_iter()
            .fold(standing(), |f, id| {
                let lm = f.get(id);
                f.with(id, Landmark::new(lm.x, lm.y, 0.35))
            });
        let dim = hide(dim, &[LandmarkId::RightHeel]);
        let r = calf.analyze(&dim, 0.0);
        assert!(r.confidence > 0.0);
    }
}

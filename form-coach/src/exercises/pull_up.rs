//! Pull-up analyzer
//!
//! Bent elbows alone are not a pull-up: the shoulders also have to rise
//! above the height they hang at. The hang baseline is refreshed on every
//! frame spent hanging with straight arms.

use super::{chain_ids, mean_angle};
use crate::analyzer::{
    arm_chain, confidence, AnalysisResult, CycleEvent, CyclePhase, ExerciseAnalyzer,
    ExerciseType, Threshold, ThresholdCycle, VisibilityGate,
};
use crate::geometry::average;
use crate::pose::LandmarkFrame;

const VISIBILITY_FLOOR: f32 = 0.5;
const COOLDOWN_MS: f64 = 1200.0;

pub const TOP_ANGLE: f32 = 70.0;
pub const HANG_ANGLE: f32 = 150.0;
/// Required shoulder rise over the hang baseline (normalized units)
pub const MIN_SHOULDER_RISE: f32 = 0.05;

pub struct PullUpAnalyzer {
    gate: VisibilityGate,
    cycle: ThresholdCycle,
    /// Shoulder y while hanging
    hang_shoulder_y: Option<f32>,
}

impl PullUpAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            cycle: ThresholdCycle::new(
                Threshold::AtMost(TOP_ANGLE),
                Threshold::AtLeast(HANG_ANGLE),
                COOLDOWN_MS,
            ),
            hang_shoulder_y: None,
        }
    }
}

impl Default for PullUpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for PullUpAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::PullUp
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let arms = self.gate.visible_sides(frame, arm_chain);
        if arms.is_empty() {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::PullUp,
                self.count(),
                "Make sure your arms and the bar are in view",
            );
        }
        let conf = confidence(frame, &chain_ids(&arms, arm_chain));

        let elbow = mean_angle(frame, &arms, arm_chain);
        let shoulder_ys: Vec<f32> = arms.iter().map(|&s| frame.point(s.shoulder()).y).collect();
        let shoulder_y = average(&shoulder_ys);
        if !elbow.is_finite() || !shoulder_y.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::PullUp, self.count(), conf);
        }

        if self.cycle.phase() == CyclePhase::Relaxed && elbow >= HANG_ANGLE {
            self.hang_shoulder_y = Some(shoulder_y);
        }
        // image y grows downward
        let rise = self.hang_shoulder_y.map_or(0.0, |hang| hang - shoulder_y);
        let risen = rise >= MIN_SHOULDER_RISE;

        let event = self.cycle.update_guarded(elbow, risen, true, now_ms);
        let arms_only = self.cycle.phase() == CyclePhase::Relaxed && elbow <= TOP_ANGLE && !risen;

        let feedback = if arms_only {
            "Pull your chest up to the bar, not just your arms"
        } else if event == (CycleEvent::Completed { counted: true }) {
            "Strong pull-up!"
        } else {
            match self.cycle.phase() {
                CyclePhase::Contracted => "Chin over the bar! Lower with control",
                CyclePhase::Relaxed if elbow >= HANG_ANGLE => "Engage your lats and pull",
                CyclePhase::Relaxed => "Keep pulling - chin over the bar",
            }
        };

        AnalysisResult::new(ExerciseType::PullUp, self.count(), !arms_only, feedback, conf)
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
        self.hang_shoulder_y = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::pose::Side;
    use crate::test_support::{elbows_at, front_standing, set, shift};

    fn hang() -> LandmarkFrame {
        Side::BOTH.into_iter().fold(front_standing(), |f, side| {
            let x = f.point(side.shoulder()).x;
            let f = set(f, side.elbow(), Point::new(x, 0.13));
            set(f, side.wrist(), Point::new(x, 0.01))
        })
    }

    #[test]
    fn counts_full_pull_up() {
        let mut pull_up = PullUpAnalyzer::new();
        pull_up.analyze(&hang(), 0.0);
        pull_up.analyze(&elbows_at(shift(hang(), 0.0, -0.08), 60.0), 800.0);
        assert_eq!(pull_up.phase(), "up");
        let r = pull_up.analyze(&hang(), 1600.0);
        assert_eq!(r.current_count, 1);
    }

    #[test]
    fn bent_arms_without_rise_do_not_count() {
        let mut pull_up = PullUpAnalyzer::new();
        pull_up.analyze(&hang(), 0.0);
        let r = pull_up.analyze(&elbows_at(hang(), 60.0), 800.0);
        assert!(!r.is_correct_form);
        assert_eq!(pull_up.phase(), "down");
        pull_up.analyze(&hang(), 1600.0);
        assert_eq!(pull_up.count(), 0);
    }

    #[test]
    fn no_baseline_means_no_rise() {
        let mut pull_up = PullUpAnalyzer::new();
        pull_up.analyze(&elbows_at(shift(hang(), 0.0, -0.08), 60.0), 0.0);
        assert_eq!(pull_up.phase(), "down");
    }
}

//! Push-up analyzer
//!
//! Elbow angle drives the cycle. The shoulder-hip-ankle line decides form:
//! a rep with sagging or piked hips still counts but is flagged.

use super::{chain_ids, mean_angle};
use crate::analyzer::{
    arm_chain, body_line_chain, confidence, AnalysisResult, CycleEvent, CyclePhase,
    ExerciseAnalyzer, ExerciseType, Threshold, ThresholdCycle, VisibilityGate,
};
use crate::geometry::angle;
use crate::pose::LandmarkFrame;

const VISIBILITY_FLOOR: f32 = 0.4;
const COOLDOWN_MS: f64 = 800.0;

pub const DOWN_ANGLE: f32 = 90.0;
pub const UP_ANGLE: f32 = 160.0;
/// Straightest acceptable shoulder-hip-ankle line
pub const MIN_BODY_LINE: f32 = 160.0;

pub struct PushUpAnalyzer {
    gate: VisibilityGate,
    cycle: ThresholdCycle,
}

impl PushUpAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            cycle: ThresholdCycle::new(
                Threshold::AtMost(DOWN_ANGLE),
                Threshold::AtLeast(UP_ANGLE),
                COOLDOWN_MS,
            ),
        }
    }
}

impl Default for PushUpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for PushUpAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::PushUp
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let arms = self.gate.visible_sides(frame, arm_chain);
        let line_side = self.gate.best_side(frame, body_line_chain).filter(|_| !arms.is_empty());
        let Some(line_side) = line_side else {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::PushUp,
                self.count(),
                "Set the camera side-on so your arms and whole body are visible",
            );
        };

        let mut used = chain_ids(&arms, arm_chain);
        used.extend(body_line_chain(line_side));
        let conf = confidence(frame, &used);

        let elbow = mean_angle(frame, &arms, arm_chain);
        let line = angle(
            frame.point(line_side.shoulder()),
            frame.point(line_side.hip()),
            frame.point(line_side.ankle()),
        );
        if !elbow.is_finite() || !line.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::PushUp, self.count(), conf);
        }

        let event = self.cycle.update(elbow, now_ms);
        let straight = line >= MIN_BODY_LINE;

        let feedback = if !straight {
            "Keep your body in a straight line - don't let your hips sag"
        } else if event == (CycleEvent::Completed { counted: true }) {
            "Great push-up!"
        } else {
            match self.cycle.phase() {
                CyclePhase::Contracted => "Good depth! Push back up",
                CyclePhase::Relaxed if elbow >= UP_ANGLE => "Lower your chest toward the floor",
                CyclePhase::Relaxed => "Go lower - elbows to 90 degrees",
            }
        };

        AnalysisResult::new(ExerciseType::PushUp, self.count(), straight, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.cycle.count()
    }

    fn phase(&self) -> &'static str {
        match self.cycle.phase() {
            CyclePhase::Relaxed => "up",
            CyclePhase::Contracted => "down",
        }
    }

    fn reset(&mut self) {
        self.cycle.reset();
    }
}

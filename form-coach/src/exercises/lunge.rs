//! Lunge analyzer
//!
//! Tracks the front knee, taken as the more bent of the visible knees.

use super::torso_lean;
use crate::analyzer::{
    confidence, leg_chain, AnalysisResult, CycleEvent, CyclePhase, ExerciseAnalyzer, ExerciseType,
    Threshold, ThresholdCycle, VisibilityGate,
};
use crate::geometry::angle;
use crate::pose::LandmarkFrame;

const VISIBILITY_FLOOR: f32 = 0.5;
const COOLDOWN_MS: f64 = 1000.0;

pub const DOWN_ANGLE: f32 = 105.0;
pub const UP_ANGLE: f32 = 155.0;

/// Front knee tighter than this drives the knee past the toes
const MIN_FRONT_KNEE: f32 = 70.0;
const MAX_TORSO_LEAN: f32 = 30.0;

pub struct LungeAnalyzer {
    gate: VisibilityGate,
    cycle: ThresholdCycle,
}

impl LungeAnalyzer {
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

impl Default for LungeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for LungeAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::Lunge
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let front = self
            .gate
            .visible_sides(frame, leg_chain)
            .into_iter()
            .map(|s| {
                let knee = angle(frame.point(s.hip()), frame.point(s.knee()), frame.point(s.ankle()));
                (s, knee)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((side, knee)) = front else {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::Lunge,
                self.count(),
                "Turn side-on so both legs are in view",
            );
        };
        let conf = confidence(frame, &leg_chain(side));
        if !knee.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::Lunge, self.count(), conf);
        }

        let event = self.cycle.update(knee, now_ms);
        let leaning = torso_lean(&self.gate, frame).is_some_and(|l| l > MAX_TORSO_LEAN);
        let too_deep = knee < MIN_FRONT_KNEE;

        let feedback = if leaning {
            "Keep your torso upright"
        } else if too_deep {
            "Front knee too far forward - keep it over your ankle"
        } else if event == (CycleEvent::Completed { counted: true }) {
            "Nice lunge! Switch legs or go again"
        } else {
            match self.cycle.phase() {
                CyclePhase::Contracted => "Good depth! Push through your front heel",
                CyclePhase::Relaxed if knee >= UP_ANGLE => "Step forward and lower your back knee",
                CyclePhase::Relaxed => "Lower until your front thigh is parallel to the floor",
            }
        };

        AnalysisResult::new(ExerciseType::Lunge, self.count(), !leaning && !too_deep, feedback, conf)
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

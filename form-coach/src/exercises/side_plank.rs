//! Side plank analyzer
//!
//! Timed hold on the side facing the camera. `count()` reports whole
//! seconds held; every `SIDE_PLANK_BUCKET_SECONDS` of hold is one rep.

use crate::analyzer::{
    body_line_chain, confidence, AnalysisResult, ExerciseAnalyzer, ExerciseType, HoldTimer,
    VisibilityGate,
};
use crate::geometry::{angle, in_range};
use crate::pose::{LandmarkFrame, Side};

const VISIBILITY_FLOOR: f32 = 0.4;

pub const MIN_BODY_LINE: f32 = 160.0;
pub const MAX_BODY_LINE: f32 = 180.0;

/// Seconds of hold that make up one rep
pub const SIDE_PLANK_BUCKET_SECONDS: u32 = 30;

pub struct SidePlankAnalyzer {
    gate: VisibilityGate,
    hold: HoldTimer,
    active_side: Option<Side>,
}

impl SidePlankAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            hold: HoldTimer::new(),
            active_side: None,
        }
    }

    pub fn held_seconds(&self) -> u32 {
        self.hold.held_seconds()
    }

    /// Completed 30 s buckets
    pub fn reps(&self) -> u32 {
        self.held_seconds() / SIDE_PLANK_BUCKET_SECONDS
    }

    /// Side measured on the last analyzable frame
    pub fn active_side(&self) -> Option<Side> {
        self.active_side
    }
}

impl Default for SidePlankAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for SidePlankAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::SidePlank
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let Some(side) = self.gate.best_side(frame, body_line_chain) else {
            self.hold.update(false, now_ms);
            return AnalysisResult::insufficient_visibility(
                ExerciseType::SidePlank,
                self.count(),
                "Face the camera side-on so your shoulder, hip and ankle are visible",
            );
        };
        self.active_side = Some(side);
        let conf = confidence(frame, &body_line_chain(side));

        let line = angle(
            frame.point(side.shoulder()),
            frame.point(side.hip()),
            frame.point(side.ankle()),
        );
        if !line.is_finite() {
            self.hold.update(false, now_ms);
            return AnalysisResult::ambiguous(ExerciseType::SidePlank, self.count(), conf);
        }

        let holding = in_range(line, MIN_BODY_LINE, MAX_BODY_LINE);
        let reps_before = self.reps();
        self.hold.update(holding, now_ms);

        let feedback = if !holding {
            "Lift your hips - keep your body in one straight line".to_string()
        } else if self.reps() > reps_before {
            format!("{} seconds! Keep it going", self.reps() * SIDE_PLANK_BUCKET_SECONDS)
        } else {
            format!("Holding on your {} side - stay strong", side.name())
        };

        AnalysisResult::new(ExerciseType::SidePlank, self.count(), holding, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.held_seconds()
    }

    fn phase(&self) -> &'static str {
        if self.hold.is_holding() {
            "holding"
        } else {
            "resting"
        }
    }

    fn reset(&mut self) {
        self.hold.reset();
        self.active_side = None;
    }
}

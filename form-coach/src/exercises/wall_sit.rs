//! Wall sit analyzer
//!
//! The hold clock only starts after the position has been steady for
//! `STABLE_FRAMES` consecutive frames. Count is one per `SECONDS_PER_COUNT`
//! seconds held.

use super::{chain_ids, mean_angle, shoulder_hip_chain};
use crate::analyzer::{
    confidence, leg_chain, AnalysisResult, ExerciseAnalyzer, ExerciseType, HoldTimer,
    VisibilityGate,
};
use crate::geometry::{in_range, inclination_from_vertical};
use crate::pose::LandmarkFrame;

const VISIBILITY_FLOOR: f32 = 0.4;

pub const KNEE_MIN: f32 = 80.0;
pub const KNEE_MAX: f32 = 100.0;
/// Back angle, 180° being flat against the wall
pub const MIN_BACK_ANGLE: f32 = 160.0;
pub const STABLE_FRAMES: u32 = 5;
pub const SECONDS_PER_COUNT: u32 = 10;

pub struct WallSitAnalyzer {
    gate: VisibilityGate,
    hold: HoldTimer,
    stable_frames: u32,
}

impl WallSitAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            hold: HoldTimer::new(),
            stable_frames: 0,
        }
    }

    pub fn held_seconds(&self) -> u32 {
        self.hold.held_seconds()
    }
}

impl Default for WallSitAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for WallSitAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::WallSit
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let legs = self.gate.visible_sides(frame, leg_chain);
        let back_side = self.gate.best_side(frame, shoulder_hip_chain).filter(|_| !legs.is_empty());
        let Some(back_side) = back_side else {
            self.stable_frames = 0;
            self.hold.update(false, now_ms);
            return AnalysisResult::insufficient_visibility(
                ExerciseType::WallSit,
                self.count(),
                "Turn side-on so your back and legs are in view",
            );
        };
        let mut used = chain_ids(&legs, leg_chain);
        used.extend(shoulder_hip_chain(back_side));
        let conf = confidence(frame, &used);

        let knee = mean_angle(frame, &legs, leg_chain);
        let back = 180.0
            - inclination_from_vertical(
                frame.point(back_side.shoulder()),
                frame.point(back_side.hip()),
            );
        if !knee.is_finite() || !back.is_finite() {
            self.stable_frames = 0;
            self.hold.update(false, now_ms);
            return AnalysisResult::ambiguous(ExerciseType::WallSit, self.count(), conf);
        }

        let knees_ok = in_range(knee, KNEE_MIN, KNEE_MAX);
        let back_ok = back >= MIN_BACK_ANGLE;
        if knees_ok && back_ok {
            self.stable_frames = self.stable_frames.saturating_add(1);
        } else {
            self.stable_frames = 0;
        }
        let holding = self.stable_frames >= STABLE_FRAMES;
        self.hold.update(holding, now_ms);

        let feedback = if knee > KNEE_MAX {
            "Slide lower - thighs parallel to the floor".to_string()
        } else if knee < KNEE_MIN {
            "Too low - knees at 90 degrees".to_string()
        } else if !back_ok {
            "Press your back flat against the wall".to_string()
        } else if !holding {
            "Good position - hold steady".to_string()
        } else {
            format!("Holding {} s - keep going", self.held_seconds())
        };

        AnalysisResult::new(ExerciseType::WallSit, self.count(), knees_ok && back_ok, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.held_seconds() / SECONDS_PER_COUNT
    }

    fn phase(&self) -> &'static str {
        if self.hold.is_holding() {
            "holding"
        } else if self.stable_frames > 0 {
            "settling"
        } else {
            "resting"
        }
    }

    fn reset(&mut self) {
        self.hold.reset();
        self.stable_frames = 0;
    }
}

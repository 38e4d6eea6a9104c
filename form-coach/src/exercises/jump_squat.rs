//! Jump squat analyzer
//!
//! Standing → down (squat depth) → airborne (hips rising fast) → standing.
//! Standing back up from the bottom without the jump resets the cycle
//! without counting.

use super::{chain_ids, mean_angle};
use crate::analyzer::{
    confidence, leg_chain, AnalysisResult, ExerciseAnalyzer, ExerciseType, RepCounter,
    VisibilityGate,
};
use crate::geometry::average;
use crate::motion::VerticalVelocity;
use crate::pose::LandmarkFrame;
use tracing::debug;

const VISIBILITY_FLOOR: f32 = 0.5;
const COOLDOWN_MS: f64 = 1000.0;

pub const DOWN_ANGLE: f32 = 120.0;
pub const UP_ANGLE: f32 = 160.0;
/// Upward hip speed (normalized units per second) that marks take-off
pub const TAKEOFF_SPEED: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpStage {
    Standing,
    Down,
    Airborne,
}

pub struct JumpSquatAnalyzer {
    gate: VisibilityGate,
    stage: JumpStage,
    hip_velocity: VerticalVelocity,
    counter: RepCounter,
}

impl JumpSquatAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            stage: JumpStage::Standing,
            hip_velocity: VerticalVelocity::new(),
            counter: RepCounter::new(COOLDOWN_MS),
        }
    }

    pub fn stage(&self) -> JumpStage {
        self.stage
    }
}

impl Default for JumpSquatAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for JumpSquatAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::JumpSquat
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let legs = self.gate.visible_sides(frame, leg_chain);
        if legs.is_empty() {
            // velocity across a tracking gap is meaningless
            self.hip_velocity.clear();
            return AnalysisResult::insufficient_visibility(
                ExerciseType::JumpSquat,
                self.count(),
                "Step back so your whole body stays in view when you jump",
            );
        }
        let conf = confidence(frame, &chain_ids(&legs, leg_chain));

        let knee = mean_angle(frame, &legs, leg_chain);
        let hip_ys: Vec<f32> = legs.iter().map(|&s| frame.point(s.hip()).y).collect();
        let hip_y = average(&hip_ys);
        if !knee.is_finite() || !hip_y.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::JumpSquat, self.count(), conf);
        }
        let rising = self.hip_velocity.update(now_ms, hip_y);

        let mut counted = false;
        let mut skipped_jump = false;
        match self.stage {
            JumpStage::Standing if knee <= DOWN_ANGLE => self.stage = JumpStage::Down,
            JumpStage::Down if rising >= TAKEOFF_SPEED => {
                debug!(speed = rising, "take-off");
                self.stage = JumpStage::Airborne;
            }
            JumpStage::Down if knee >= UP_ANGLE => {
                self.stage = JumpStage::Standing;
                skipped_jump = true;
            }
            JumpStage::Airborne if knee >= UP_ANGLE => {
                self.stage = JumpStage::Standing;
                counted = self.counter.try_increment(now_ms);
            }
            _ => {}
        }

        let feedback = if skipped_jump {
            "Explode up into a jump from the bottom"
        } else if counted {
            "Great jump! Land softly and sink back down"
        } else {
            match self.stage {
                JumpStage::Standing => "Squat down to prepare for the jump",
                JumpStage::Down => "Good depth! Now explode upward",
                JumpStage::Airborne => "Land softly with bent knees",
            }
        };

        AnalysisResult::new(ExerciseType::JumpSquat, self.count(), !skipped_jump, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.counter.count()
    }

    fn phase(&self) -> &'static str {
        match self.stage {
            JumpStage::Standing => "up",
            JumpStage::Down => "down",
            JumpStage::Airborne => "jump",
        }
    }

    fn reset(&mut self) {
        self.stage = JumpStage::Standing;
        self.hip_velocity.clear();
        self.counter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{knees_at, shift, standing};

    const FRAME_MS: f64 = 33.0;

    fn feed(analyzer: &mut JumpSquatAnalyzer, frames: &[LandmarkFrame]) -> Vec<AnalysisResult> {
        frames
            .iter()
            .enumerate()
            .map(|(i, f)| analyzer.analyze(f, i as f64 * FRAME_MS))
            .collect()
    }

    #[test]
    fn squat_jump_land_counts() {
        let mut analyzer = JumpSquatAnalyzer::new();
        let mut frames = vec![standing(); 3];
        frames.extend([knees_at(100.0); 3]);
        frames.extend((1..=3).map(|k| shift(knees_at(140.0), 0.0, -0.05 * k as f32)));
        frames.push(shift(standing(), 0.0, -0.15));
        let results = feed(&mut analyzer, &frames);
        assert_eq!(results.last().map(|r| r.current_count), Some(1));
        assert_eq!(analyzer.stage(), JumpStage::Standing);
    }

    #[test]
    fn standing_up_without_jump_does_not_count() {
        let mut analyzer = JumpSquatAnalyzer::new();
        let mut frames = vec![standing(); 3];
        frames.extend([knees_at(100.0); 3]);
        frames.extend([knees_at(140.0), standing()]);
        let results = feed(&mut analyzer, &frames);
        let last = results.last().cloned().unwrap();
        assert_eq!(last.current_count, 0);
        assert!(last.feedback.contains("jump"));
        assert!(!last.is_correct_form);
    }
}

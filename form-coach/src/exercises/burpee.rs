//! Burpee analyzer
//!
//! Squat → plank → back up → jump. The rep counts at the jump, which is
//! detected as the ankles leaving the floor relative to the standing
//! baseline. The analyzer waits in `Airborne` until the feet are down again
//! so a mid-air frame never becomes the new baseline. Standing up after
//! the plank and then squatting again without a jump starts a new rep.

use tracing::debug;

use super::{chain_ids, mean_angle};
use crate::analyzer::{
    body_line_chain, confidence, leg_chain, AnalysisResult, ExerciseAnalyzer, ExerciseType,
    RepCounter, VisibilityGate,
};
use crate::geometry::{average, inclination_from_vertical};
use crate::pose::{LandmarkFrame, LandmarkId, Side};

const VISIBILITY_FLOOR: f32 = 0.5;
const COOLDOWN_MS: f64 = 1500.0;

pub const SQUAT_ANGLE: f32 = 120.0;
pub const STANDING_KNEE_ANGLE: f32 = 160.0;
pub const PLANK_LINE: f32 = 160.0;
/// Ankle rise over the standing baseline that counts as a jump
pub const JUMP_LIFT: f32 = 0.04;
/// Ankle rise under which the feet are back on the floor
const LANDED_LIFT: f32 = 0.02;
/// Torso lean from vertical beyond which the body is horizontal enough
const PLANK_LEAN: f32 = 60.0;
const UPRIGHT_LEAN: f32 = 45.0;

fn full_chain(side: Side) -> [LandmarkId; 4] {
    [side.shoulder(), side.hip(), side.knee(), side.ankle()]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurpeeStage {
    Standing,
    Squat,
    Plank,
    /// Back on the feet after the plank, waiting for the jump
    Return,
    Airborne,
}

pub struct BurpeeAnalyzer {
    gate: VisibilityGate,
    stage: BurpeeStage,
    standing_ankle_y: Option<f32>,
    /// Stood tall in `Return` without jumping
    stood_after_plank: bool,
    counter: RepCounter,
}

impl BurpeeAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            stage: BurpeeStage::Standing,
            standing_ankle_y: None,
            stood_after_plank: false,
            counter: RepCounter::new(COOLDOWN_MS),
        }
    }

    pub fn stage(&self) -> BurpeeStage {
        self.stage
    }
}

impl Default for BurpeeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for BurpeeAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::Burpee
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let sides = self.gate.visible_sides(frame, full_chain);
        if sides.is_empty() {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::Burpee,
                self.count(),
                "Step back so your whole body is in view",
            );
        }
        let conf = confidence(frame, &chain_ids(&sides, full_chain));

        let knee = mean_angle(frame, &sides, leg_chain);
        let line = mean_angle(frame, &sides, body_line_chain);
        let leans: Vec<f32> = sides
            .iter()
            .map(|&s| inclination_from_vertical(frame.point(s.shoulder()), frame.point(s.hip())))
            .collect();
        let lean = average(&leans);
        let ankle_ys: Vec<f32> = sides.iter().map(|&s| frame.point(s.ankle()).y).collect();
        let ankle_y = average(&ankle_ys);
        if ![knee, line, lean, ankle_y].iter().all(|v| v.is_finite()) {
            return AnalysisResult::ambiguous(ExerciseType::Burpee, self.count(), conf);
        }

        let upright = lean <= UPRIGHT_LEAN;
        let standing_tall = upright && knee >= STANDING_KNEE_ANGLE;
        let horizontal = lean >= PLANK_LEAN;
        // image y grows downward
        let lift = self.standing_ankle_y.map(|base| base - ankle_y);

        let mut counted = false;
        let mut skipped_plank = false;
        let mut missed_jump = false;
        match self.stage {
            BurpeeStage::Standing => {
                if standing_tall {
                    self.standing_ankle_y = Some(ankle_y);
                }
                if knee <= SQUAT_ANGLE {
                    self.stage = BurpeeStage::Squat;
                }
            }
            BurpeeStage::Squat if horizontal => self.stage = BurpeeStage::Plank,
            BurpeeStage::Squat if standing_tall => {
                self.stage = BurpeeStage::Standing;
                skipped_plank = true;
            }
            BurpeeStage::Plank if upright => {
                self.stage = BurpeeStage::Return;
                self.stood_after_plank = false;
            }
            // take-off is on straight legs
            BurpeeStage::Return
                if knee >= STANDING_KNEE_ANGLE && lift.is_some_and(|l| l >= JUMP_LIFT) =>
            {
                self.stage = BurpeeStage::Airborne;
                counted = self.counter.try_increment(now_ms);
                debug!(counted, "burpee jump");
            }
            BurpeeStage::Return if self.stood_after_plank && knee <= SQUAT_ANGLE => {
                self.stage = BurpeeStage::Squat;
                self.stood_after_plank = false;
                missed_jump = true;
            }
            BurpeeStage::Return if standing_tall => self.stood_after_plank = true,
            BurpeeStage::Airborne if lift.map_or(true, |l| l < LANDED_LIFT) => {
                self.stage = BurpeeStage::Standing;
            }
            _ => {}
        }

        let sagging = self.stage == BurpeeStage::Plank && line < PLANK_LINE;
        let feedback = if skipped_plank {
            "Kick your feet back into a plank before standing up"
        } else if missed_jump {
            "Finish each burpee with a jump"
        } else if sagging {
            "Keep your body straight in the plank"
        } else if counted {
            "Great burpee!"
        } else {
            match self.stage {
                BurpeeStage::Standing if self.standing_ankle_y.is_none() => "Stand tall to begin",
                BurpeeStage::Standing => "Drop into a squat, hands to the floor",
                BurpeeStage::Squat => "Jump your feet back into a plank",
                BurpeeStage::Plank => "Jump your feet back in",
                BurpeeStage::Return => "Now explode up into a jump",
                BurpeeStage::Airborne => "Land softly",
            }
        };

        AnalysisResult::new(ExerciseType::Burpee, self.count(), !skipped_plank && !missed_jump && !sagging, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.counter.count()
    }

    fn phase(&self) -> &'static str {
        match self.stage {
            BurpeeStage::Standing => "standing",
            BurpeeStage::Squat => "squat",
            BurpeeStage::Plank => "plank",
            BurpeeStage::Return => "return",
            BurpeeStage::Airborne => "jump",
        }
    }

    fn reset(&mut self) {
        self.stage = BurpeeStage::Standing;
        self.standing_ankle_y = None;
        self.stood_after_plank = false;
        self.counter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{knees_at, plank, shift, standing};

    fn run(analyzer: &mut BurpeeAnalyzer, frames: &[LandmarkFrame]) -> Vec<AnalysisResult> {
        frames
            .iter()
            .enumerate()
            .map(|(i, f)| analyzer.analyze(f, i as f64 * 500.0))
            .collect()
    }

    #[test]
    fn full_burpee_counts_at_the_jump() {
        let mut burpee = BurpeeAnalyzer::new();
        let frames = [
            standing(),
            knees_at(100.0),
            plank(),
            knees_at(100.0),
            shift(standing(), 0.0, -0.06),
            standing(),
        ];
        let results = run(&mut burpee, &frames);
        assert_eq!(results[3].current_count, 0);
        assert_eq!(results[4].current_count, 1);
        assert_eq!(burpee.stage(), BurpeeStage::Standing);
    }

    #[test]
    fn squat_without_plank_is_flagged() {
        let mut burpee = BurpeeAnalyzer::new();
        let results = run(&mut burpee, &[standing(), knees_at(100.0), standing()]);
        assert!(!results[2].is_correct_form);
        assert_eq!(burpee.count(), 0);
    }

    #[test]
    fn squat_after_standing_up_starts_a_new_rep() {
        let mut burpee = BurpeeAnalyzer::new();
        let frames = [
            standing(),
            knees_at(100.0),
            plank(),
            knees_at(100.0),
            standing(),
            knees_at(100.0),
            plank(),
            knees_at(100.0),
            shift(standing(), 0.0, -0.06),
        ];
        let results = run(&mut burpee, &frames);
        assert_eq!(results[4].current_count, 0);
        assert!(!results[5].is_correct_form);
        assert_eq!(results[6].current_count, 0);
        assert_eq!(results[8].current_count, 1);
        assert_eq!(burpee.stage(), BurpeeStage::Airborne);
    }

    #[test]
    fn crouching_right_after_the_plank_is_not_a_new_rep() {
        let mut burpee = BurpeeAnalyzer::new();
        let frames = [standing(), knees_at(100.0), plank(), knees_at(100.0), knees_at(100.0)];
        run(&mut burpee, &frames);
        assert_eq!(burpee.stage(), BurpeeStage::Return);
    }

    #[test]
    fn no_jump_without_baseline() {
        let mut burpee = BurpeeAnalyzer::new();
        let results = run(&mut burpee, &[knees_at(100.0), plank(), knees_at(100.0), shift(standing(), 0.0, -0.06)]);
        assert_eq!(results[3].current_count, 0);
        assert_eq!(burpee.stage(), BurpeeStage::Return);
    }
}

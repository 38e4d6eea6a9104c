//! Mountain climber analyzer
//!
//! Each leg toggles between extended and driven (knee pulled in under the
//! hip), judged by the horizontal knee-to-hip distance. One rep is a drive
//! from each leg.

use super::hip_knee_chain;
use crate::analyzer::{
    body_line_chain, confidence, AnalysisResult, ExerciseAnalyzer, ExerciseType, RepCounter,
    VisibilityGate,
};
use crate::geometry::horizontal_delta;
use crate::pose::{LandmarkFrame, LandmarkId, Side};

const VISIBILITY_FLOOR: f32 = 0.4;
const COOLDOWN_MS: f64 = 600.0;

/// Knee within this horizontal distance of the hip is driven in
pub const DRIVE_DELTA: f32 = 0.1;
/// Knee beyond this horizontal distance of the hip is extended
pub const EXTEND_DELTA: f32 = 0.15;
/// Hips this far above the shoulder-ankle line are piked
const PIKE_MARGIN: f32 = 0.08;

const LEG_IDS: [LandmarkId; 4] = [
    LandmarkId::LeftHip,
    LandmarkId::LeftKnee,
    LandmarkId::RightHip,
    LandmarkId::RightKnee,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Leg {
    extended: bool,
    driven: bool,
    /// Drove in since the last counted pair
    drove: bool,
}

impl Leg {
    /// Returns true on a fresh drive from an extended position
    fn update(&mut self, delta: f32) -> bool {
        if delta > EXTEND_DELTA {
            self.extended = true;
            self.driven = false;
        } else if delta < DRIVE_DELTA && self.extended {
            self.extended = false;
            self.driven = true;
            self.drove = true;
            return true;
        }
        false
    }
}

pub struct MountainClimberAnalyzer {
    gate: VisibilityGate,
    legs: [Leg; 2],
    counter: RepCounter,
}

impl MountainClimberAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            legs: [Leg::default(); 2],
            counter: RepCounter::new(COOLDOWN_MS),
        }
    }

    fn leg_mut(&mut self, side: Side) -> &mut Leg {
        match side {
            Side::Left => &mut self.legs[0],
            Side::Right => &mut self.legs[1],
        }
    }

    fn piked(&self, frame: &LandmarkFrame) -> bool {
        let Some(side) = self.gate.best_side(frame, body_line_chain) else {
            return false;
        };
        let shoulder = frame.point(side.shoulder()).y;
        let ankle = frame.point(side.ankle()).y;
        frame.point(side.hip()).y < shoulder.min(ankle) - PIKE_MARGIN
    }
}

impl Default for MountainClimberAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for MountainClimberAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::MountainClimber
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        if !self.gate.validate(frame, &LEG_IDS) {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::MountainClimber,
                self.count(),
                "Get into a plank side-on to the camera so both legs are visible",
            );
        }
        let conf = confidence(frame, &LEG_IDS);

        let deltas = Side::BOTH.map(|s| {
            let [hip, knee] = hip_knee_chain(s);
            horizontal_delta(frame.point(hip), frame.point(knee)).abs()
        });
        if deltas.iter().any(|d| !d.is_finite()) {
            return AnalysisResult::ambiguous(ExerciseType::MountainClimber, self.count(), conf);
        }

        let mut drove = None;
        for (side, delta) in Side::BOTH.into_iter().zip(deltas) {
            if self.leg_mut(side).update(delta) {
                drove = Some(side);
            }
        }

        let mut counted = false;
        if self.legs.iter().all(|l| l.drove) {
            counted = self.counter.try_increment(now_ms);
            for leg in &mut self.legs {
                leg.drove = false;
            }
        }

        let piked = self.piked(frame);
        let feedback = if piked {
            "Keep your hips down in line with your shoulders".to_string()
        } else if counted {
            "Good pace! Keep driving".to_string()
        } else if let Some(side) = drove {
            format!("Now drive the {} knee", side.opposite().name())
        } else {
            "Drive your knees toward your chest, one at a time".to_string()
        };

        AnalysisResult::new(ExerciseType::MountainClimber, self.count(), !piked, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.counter.count()
    }

    fn phase(&self) -> &'static str {
        match (self.legs[0].driven, self.legs[1].driven) {
            (true, _) => "left_drive",
            (_, true) => "right_drive",
            _ => "extended",
        }
    }

    fn reset(&mut self) {
        self.legs = [Leg::default(); 2];
        self.counter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::test_support::{plank, set};

    fn drive(side: Side) -> LandmarkFrame {
        set(plank(), side.knee(), Point::new(0.60, 0.56))
    }

    fn run(analyzer: &mut MountainClimberAnalyzer, frames: &[LandmarkFrame]) -> u32 {
        for (i, f) in frames.iter().enumerate() {
            analyzer.analyze(f, i as f64 * 300.0);
        }
        analyzer.count()
    }

    #[test]
    fn one_rep_per_left_right_pair() {
        let mut climber = MountainClimberAnalyzer::new();
        let frames = [
            plank(),
            drive(Side::Left),
            plank(),
            drive(Side::Right),
            plank(),
            drive(Side::Left),
            plank(),
            drive(Side::Right),
        ];
        assert_eq!(run(&mut climber, &frames), 2);
    }

    #[test]
    fn same_leg_twice_is_half_a_rep() {
        let mut climber = MountainClimberAnalyzer::new();
        let frames = [plank(), drive(Side::Left), plank(), drive(Side::Left), plank()];
        assert_eq!(run(&mut climber, &frames), 0);
    }

    #[test]
    fn drive_without_extension_does_not_register() {
        let mut climber = MountainClimberAnalyzer::new();
        let frames = [drive(Side::Left), drive(Side::Left)];
        assert_eq!(run(&mut climber, &frames), 0);
        assert_eq!(climber.phase(), "extended");
    }

    #[test]
    fn piked_hips_are_flagged() {
        let mut climber = MountainClimberAnalyzer::new();
        let frame = Side::BOTH
            .into_iter()
            .fold(plank(), |f, s| set(f, s.hip(), Point::new(0.55, 0.35)));
        let r = climber.analyze(&frame, 0.0);
        assert!(!r.is_correct_form);
    }
}
